use crate::app::ChartSettings;
use crate::chart::{
    Axis, AxisValue, ChartConfig, ChartData, ChartKind, ChartOptions, DataPoint, Dataset,
    SeriesData, Ticks,
};
use crate::color::hex_to_rgb;
use crate::models::{Leaderboard, Member};
use crate::series;

pub const STARS_OVER_TIME: &str = "starsOverTime";
pub const POINTS_OVER_TIME: &str = "pointsOverTime";
pub const DAY_VS_TIME: &str = "dayVsTime";
pub const TIME_PER_STAR: &str = "timePerStar";

const SECOND_STAR_ALPHA: f64 = 0.7;
const LOG_MINUTES_LABEL: &str = "minutes taken per star (log scale)";

pub fn stars_over_time(leaderboard: &Leaderboard, settings: &ChartSettings) -> ChartConfig {
    let datasets = leaderboard
        .members
        .iter()
        .map(|member| timeline_dataset(member, series::cumulative_stars(member)))
        .collect();

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: None,
            datasets,
        },
        options: ChartOptions::titled(
            "Leaderboard (stars)",
            Axis::days("Day of Advent", settings.event_start, leaderboard.max_moment()),
            Axis::labelled("nr of stars").with_ticks(Ticks {
                min: Some(0.0),
                step_size: Some(1.0),
                ..Ticks::default()
            }),
        ),
    }
}

pub fn points_over_time(leaderboard: &Leaderboard, settings: &ChartSettings) -> ChartConfig {
    let datasets = leaderboard
        .members
        .iter()
        .map(|member| timeline_dataset(member, series::cumulative_points(member)))
        .collect();

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: None,
            datasets,
        },
        options: ChartOptions::titled(
            "Leaderboard (points)",
            Axis::days("Day of Advent", settings.event_start, leaderboard.max_moment()),
            Axis::labelled("cumulative points").with_ticks(Ticks {
                min: Some(0.0),
                ..Ticks::default()
            }),
        ),
    }
}

pub fn day_vs_time(leaderboard: &Leaderboard) -> ChartConfig {
    let datasets = leaderboard
        .members
        .iter()
        .map(|member| Dataset {
            label: member.name.clone(),
            background_color: Some(member.color.clone()),
            border_width: Some(1.0),
            border_color: Some("#000".to_string()),
            point_radius: Some(6.0),
            data: SeriesData::Points(
                series::day_vs_time(member)
                    .into_iter()
                    .map(|(x, y)| DataPoint {
                        x: AxisValue::Number(x),
                        y,
                    })
                    .collect(),
            ),
            ..Dataset::default()
        })
        .collect();

    ChartConfig {
        kind: ChartKind::Scatter,
        data: ChartData {
            labels: None,
            datasets,
        },
        options: ChartOptions::titled(
            "Stars vs Log10(minutes taken per star)",
            Axis::labelled("star progress").with_ticks(Ticks {
                min: Some(0.0),
                max: Some(series::DAYS as f64),
                step_size: Some(1.0),
            }),
            Axis::labelled(LOG_MINUTES_LABEL),
        ),
    }
}

pub fn time_per_star(leaderboard: &Leaderboard, settings: &ChartSettings) -> ChartConfig {
    let top = leaderboard.top_members(settings.top);
    let mut datasets = Vec::with_capacity(top.len() * 2);

    for member in &top {
        let times = series::time_per_star(leaderboard, member);
        let stack = format!("Stack {}", member.name);

        datasets.push(Dataset {
            label: format!("{} (★)", member.name),
            stack: Some(stack.clone()),
            background_color: Some(member.color.clone()),
            data: SeriesData::Values(times.first),
            ..Dataset::default()
        });
        datasets.push(Dataset {
            label: format!("{} (★★)", member.name),
            stack: Some(stack),
            background_color: Some(hex_to_rgb(&member.color, Some(SECOND_STAR_ALPHA))),
            data: SeriesData::Values(times.second),
            ..Dataset::default()
        });
    }

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: Some((1..=series::DAYS).collect()),
            datasets,
        },
        options: ChartOptions::titled(
            format!("Log10(minutes taken per star) of top {} players", top.len()),
            Axis::labelled("Day of Advent").stacked(),
            Axis::labelled(LOG_MINUTES_LABEL).stacked(),
        ),
    }
}

fn timeline_dataset(
    member: &Member,
    points: Vec<(chrono::DateTime<chrono::Utc>, u32)>,
) -> Dataset {
    Dataset {
        label: member.name.clone(),
        cubic_interpolation_mode: Some("monotone"),
        fill: Some(false),
        border_width: Some(1.5),
        border_color: Some(member.color.clone()),
        background_color: Some(member.color.clone()),
        data: SeriesData::Points(
            points
                .into_iter()
                .map(|(at, value)| DataPoint {
                    x: AxisValue::Time(at),
                    y: Some(value as f64),
                })
                .collect(),
        ),
        ..Dataset::default()
    }
}
