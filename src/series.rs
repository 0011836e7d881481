use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{Leaderboard, Member, Star};

pub const DAYS: u32 = 25;

/// Per-day log10 minutes for the two stars of a member; index 0 is day 1.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStarTimes {
    pub first: Vec<Option<f64>>,
    pub second: Vec<Option<f64>>,
}

/// Log scale for display. Zero and negative durations have no logarithm and
/// become gaps in the chart.
pub fn log10_or_gap(value: f64) -> Option<f64> {
    let scaled = value.log10();
    scaled.is_finite().then_some(scaled)
}

/// Stars without a timestamp are left out of the time series.
pub fn cumulative_stars(member: &Member) -> Vec<(DateTime<Utc>, u32)> {
    member
        .stars
        .iter()
        .filter_map(|star| star.moment.map(|at| (at, star.stars_after)))
        .collect()
}

pub fn cumulative_points(member: &Member) -> Vec<(DateTime<Utc>, u32)> {
    member
        .stars
        .iter()
        .filter_map(|star| star.moment.map(|at| (at, star.points_after)))
        .collect()
}

pub fn star_progress(star: &Star) -> f64 {
    star.day_nr as f64 + star.star_nr as f64 / 2.0 - 1.0
}

pub fn day_vs_time(member: &Member) -> Vec<(f64, Option<f64>)> {
    member
        .stars
        .iter()
        .map(|star| (star_progress(star), log10_or_gap(star.time_taken)))
        .collect()
}

pub fn time_per_star(leaderboard: &Leaderboard, member: &Member) -> DailyStarTimes {
    let stars = leaderboard.all_stars();
    let find = |day: u32, key: &str| {
        stars
            .iter()
            .copied()
            .find(|star| star.member_id == member.id && star.day_nr == day && star.key() == key)
    };

    let mut first = Vec::with_capacity(DAYS as usize);
    let mut second = Vec::with_capacity(DAYS as usize);

    for day in 1..=DAYS {
        let star1 = find(day, "1");
        let star2 = find(day, "2");

        first.push(star1.and_then(|star| log10_or_gap(star.time_taken)));
        second.push(match (star1, star2) {
            (Some(star1), Some(star2)) => log10_or_gap(star2.time_taken - star1.time_taken),
            (None, Some(_)) => {
                warn!(member = %member.name, day, "second star recorded without a first star");
                None
            }
            _ => None,
        });
    }

    DailyStarTimes { first, second }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{member, star};

    fn leaderboard_of(members: Vec<Member>) -> Leaderboard {
        Leaderboard {
            members,
            stars: Vec::new(),
            max_moment: None,
        }
    }

    fn close(value: Option<f64>, expected: f64) -> bool {
        value.is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    #[test]
    fn star_progress_places_half_days() {
        assert_eq!(star_progress(&star("1", 5, 1, 10.0)), 4.5);
        assert_eq!(star_progress(&star("1", 5, 2, 10.0)), 5.0);
        assert_eq!(star_progress(&star("1", 1, 1, 10.0)), 0.5);
    }

    #[test]
    fn log_scale_turns_zero_into_gap() {
        assert!(close(log10_or_gap(100.0), 2.0));
        assert!(close(log10_or_gap(1.0), 0.0));
        assert_eq!(log10_or_gap(0.0), None);
        assert_eq!(log10_or_gap(-3.0), None);
    }

    #[test]
    fn cumulative_stars_never_decrease() {
        let mut stars = vec![
            star("1", 1, 1, 5.0),
            star("1", 1, 2, 9.0),
            star("1", 2, 1, 20.0),
        ];
        for (index, s) in stars.iter_mut().enumerate() {
            s.stars_after = index as u32 + 1;
            s.points_after = (index as u32 + 1) * 3;
        }
        let m = member("1", "Avery", 9, stars);

        let series = cumulative_stars(&m);
        assert_eq!(series.len(), 3);
        assert!(series.windows(2).all(|pair| pair[0].1 <= pair[1].1));
        assert!(series.windows(2).all(|pair| pair[0].0 <= pair[1].0));

        let points: Vec<u32> = cumulative_points(&m).into_iter().map(|(_, p)| p).collect();
        assert_eq!(points, vec![3, 6, 9]);
    }

    #[test]
    fn day_vs_time_uses_log_minutes() {
        let m = member("1", "Avery", 2, vec![star("1", 3, 1, 1000.0), star("1", 3, 2, 0.0)]);
        let points = day_vs_time(&m);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].0, 2.5);
        assert!(close(points[0].1, 3.0));
        assert_eq!(points[1], (3.0, None));
    }

    #[test]
    fn time_per_star_splits_second_star_from_first() {
        let m = member(
            "1",
            "Avery",
            4,
            vec![star("1", 1, 1, 10.0), star("1", 1, 2, 110.0), star("1", 2, 1, 1.0)],
        );
        let leaderboard = leaderboard_of(vec![m.clone()]);

        let times = time_per_star(&leaderboard, &m);
        assert_eq!(times.first.len(), DAYS as usize);
        assert_eq!(times.second.len(), DAYS as usize);
        assert!(close(times.first[0], 1.0));
        assert!(close(times.second[0], 2.0));
        assert!(close(times.first[1], 0.0));
        assert_eq!(times.second[1], None);
        assert!(times.first[2..].iter().all(Option::is_none));
    }

    #[test]
    fn second_star_without_first_is_a_gap() {
        let m = member("1", "Avery", 1, vec![star("1", 4, 2, 50.0)]);
        let leaderboard = leaderboard_of(vec![m.clone()]);

        let times = time_per_star(&leaderboard, &m);
        assert_eq!(times.first[3], None);
        assert_eq!(times.second[3], None);
    }

    #[test]
    fn time_per_star_ignores_other_members() {
        let avery = member("1", "Avery", 2, vec![star("1", 1, 1, 10.0)]);
        let jules = member("2", "Jules", 2, vec![star("2", 1, 1, 1000.0)]);
        let leaderboard = leaderboard_of(vec![avery.clone(), jules]);

        let times = time_per_star(&leaderboard, &avery);
        assert!(close(times.first[0], 1.0));
    }

    #[test]
    fn undated_stars_drop_out_of_time_series_only() {
        let mut undated = star("1", 2, 1, 100.0);
        undated.moment = None;
        undated.stars_after = 2;
        let mut dated = star("1", 1, 1, 10.0);
        dated.stars_after = 1;
        let m = member("1", "Avery", 2, vec![dated, undated]);

        let series = cumulative_stars(&m);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].1, 1);
        assert_eq!(cumulative_points(&m).len(), 1);

        let points = day_vs_time(&m);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].0, 1.5);
        assert!(close(points[1].1, 2.0));
    }

    #[test]
    fn time_per_star_reads_the_flat_star_list() {
        let json = r##"{
            "members": [
                {
                    "id": 7,
                    "name": "Avery",
                    "color": "#102030",
                    "score": 4,
                    "stars": [
                        { "memberId": 7, "dayNr": 9, "starNr": 1, "timeTaken": 5 }
                    ]
                }
            ],
            "stars": [
                { "memberId": 7, "dayNr": 3, "starKey": "1", "timeTaken": 10 },
                { "memberId": 7, "dayNr": 3, "starKey": "2", "timeTaken": 1010 },
                { "memberId": 7, "dayNr": 4, "starKey": "2", "timeTaken": 40 },
                { "memberId": 8, "dayNr": 5, "starKey": "1", "timeTaken": 100 }
            ]
        }"##;
        let leaderboard: Leaderboard = serde_json::from_str(json).unwrap();
        assert_eq!(leaderboard.all_stars().len(), 4);

        let times = time_per_star(&leaderboard, &leaderboard.members[0]);
        assert!(close(times.first[2], 1.0));
        assert!(close(times.second[2], 3.0));
        assert_eq!(times.first[3], None);
        assert_eq!(times.second[3], None);
        assert_eq!(times.first[4], None);
        assert_eq!(times.first[8], None);
    }
}
