use std::fmt::Write;

use anyhow::Context;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use tracing::info;

use crate::chart::ChartConfig;
use crate::charts;
use crate::models::Leaderboard;
use crate::sink::ChartSink;
use crate::source::LeaderboardSource;

pub const DEFAULT_TOP: usize = 3;

#[derive(Debug, Clone)]
pub struct ChartSettings {
    /// Members shown in the time-per-star chart.
    pub top: usize,
    /// Left edge of the time axes: 05:00 UTC the day before the first puzzle.
    pub event_start: DateTime<Utc>,
}

impl ChartSettings {
    pub fn for_year(year: i32, top: usize) -> anyhow::Result<Self> {
        let event_start = Utc
            .with_ymd_and_hms(year, 11, 30, 5, 0, 0)
            .single()
            .with_context(|| format!("invalid event year {year}"))?;
        Ok(Self { top, event_start })
    }

    /// Uses the given year, else the event the earliest star belongs to, else
    /// the current year.
    pub fn resolve(leaderboard: &Leaderboard, year: Option<i32>, top: usize) -> anyhow::Result<Self> {
        let year = year
            .or_else(|| leaderboard.first_moment().map(event_year))
            .unwrap_or_else(|| Utc::now().year());
        Self::for_year(year, top)
    }
}

/// Puzzles unlock in December, so anything earned before it belongs to the
/// previous year's event.
pub fn event_year(moment: DateTime<Utc>) -> i32 {
    if moment.month() < 12 {
        moment.year() - 1
    } else {
        moment.year()
    }
}

pub fn summary(leaderboard: &Leaderboard, limit: usize) -> String {
    let mut output = String::new();

    if leaderboard.members.is_empty() {
        let _ = writeln!(output, "No members on this leaderboard.");
        return output;
    }

    let _ = writeln!(output, "Members by score:");
    for member in leaderboard.top_members(limit) {
        let _ = writeln!(
            output,
            "- {} score {} with {} stars",
            member.name,
            member.score,
            member.stars.len()
        );
    }

    output
}

/// Fetches the leaderboard once and draws every chart into `sink`.
pub async fn run<L, S>(
    source: &L,
    sink: &mut S,
    year: Option<i32>,
    top: usize,
) -> anyhow::Result<Leaderboard>
where
    L: LeaderboardSource,
    S: ChartSink,
{
    let leaderboard = source.fetch().await?;
    info!(members = leaderboard.members.len(), "leaderboard loaded");

    let settings = ChartSettings::resolve(&leaderboard, year, top)?;
    render_all(&leaderboard, sink, &settings)?;
    Ok(leaderboard)
}

pub fn render_all<S: ChartSink>(
    leaderboard: &Leaderboard,
    sink: &mut S,
    settings: &ChartSettings,
) -> anyhow::Result<()> {
    draw(
        sink,
        charts::STARS_OVER_TIME,
        charts::stars_over_time(leaderboard, settings),
    )?;
    draw(sink, charts::DAY_VS_TIME, charts::day_vs_time(leaderboard))?;
    draw(
        sink,
        charts::POINTS_OVER_TIME,
        charts::points_over_time(leaderboard, settings),
    )?;
    draw(
        sink,
        charts::TIME_PER_STAR,
        charts::time_per_star(leaderboard, settings),
    )?;
    Ok(())
}

fn draw<S: ChartSink>(sink: &mut S, canvas: &str, config: ChartConfig) -> anyhow::Result<()> {
    sink.draw(canvas, &config)
        .with_context(|| format!("failed to draw {canvas}"))?;
    info!(canvas, datasets = config.data.datasets.len(), "chart drawn");
    Ok(())
}
