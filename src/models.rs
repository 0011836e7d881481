use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<Member>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stars: Vec<Star>,
    #[serde(default)]
    pub max_moment: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stars: Vec<Star>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    #[serde(default, deserialize_with = "string_or_number")]
    pub member_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub day_nr: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub star_nr: u32,
    #[serde(default)]
    pub star_key: Option<String>,
    /// Unset stars still count toward the per-day charts but have no place on
    /// a time axis.
    #[serde(default, rename = "getStarMoment")]
    pub moment: Option<DateTime<Utc>>,
    /// Minutes between the puzzle unlocking and this star being earned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_taken: f64,
    #[serde(
        default,
        rename = "nrOfStarsAfterThisOne",
        deserialize_with = "null_as_default"
    )]
    pub stars_after: u32,
    #[serde(
        default,
        rename = "nrOfPointsAfterThisOne",
        deserialize_with = "null_as_default"
    )]
    pub points_after: u32,
}

impl Leaderboard {
    /// Every recorded star. Falls back to the members' own lists when the
    /// payload carries no flat star list.
    pub fn all_stars(&self) -> Vec<&Star> {
        if !self.stars.is_empty() {
            return self.stars.iter().collect();
        }
        self.members
            .iter()
            .flat_map(|member| member.stars.iter())
            .collect()
    }

    pub fn max_moment(&self) -> Option<DateTime<Utc>> {
        self.max_moment.or_else(|| {
            self.all_stars()
                .into_iter()
                .filter_map(|star| star.moment)
                .max()
        })
    }

    pub fn first_moment(&self) -> Option<DateTime<Utc>> {
        self.all_stars()
            .into_iter()
            .filter_map(|star| star.moment)
            .min()
    }

    /// Highest scoring members first, at most `n` of them. The member list
    /// itself keeps its order.
    pub fn top_members(&self, n: usize) -> Vec<&Member> {
        let mut ranked: Vec<&Member> = self.members.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(n);
        ranked
    }
}

impl Star {
    pub fn key(&self) -> String {
        self.star_key
            .clone()
            .unwrap_or_else(|| self.star_nr.to_string())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
