//! Serializable subset of the Chart.js 2.x configuration object.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const TITLE_FONT_SIZE: u32 = 24;

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Scatter,
    Bar,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<u32>>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cubic_interpolation_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    pub data: SeriesData,
}

/// Either `{x, y}` points or one value per label. `None` serializes as
/// `null`, which Chart.js draws as a gap.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Points(Vec<DataPoint>),
    Values(Vec<Option<f64>>),
}

impl Default for SeriesData {
    fn default() -> Self {
        SeriesData::Values(Vec::new())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataPoint {
    pub x: AxisValue,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Time(DateTime<Utc>),
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub legend: Legend,
    pub title: Title,
    pub scales: Scales,
}

impl ChartOptions {
    /// Responsive chart with the legend on the left and a large title.
    pub fn titled(text: impl Into<String>, x_axis: Axis, y_axis: Axis) -> Self {
        ChartOptions {
            responsive: true,
            legend: Legend { position: "left" },
            title: Title {
                display: true,
                text: text.into(),
                font_size: TITLE_FONT_SIZE,
            },
            scales: Scales {
                x_axes: vec![x_axis],
                y_axes: vec![y_axis],
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub position: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub display: bool,
    pub text: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x_axes: Vec<Axis>,
    pub y_axes: Vec<Axis>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeScale>,
    pub scale_label: ScaleLabel,
}

impl Axis {
    pub fn labelled(text: impl Into<String>) -> Self {
        Axis {
            scale_label: ScaleLabel {
                display: true,
                label_string: text.into(),
            },
            ..Axis::default()
        }
    }

    /// Time axis stepping one day at a time, ticks showing the day of month.
    pub fn days(text: impl Into<String>, min: DateTime<Utc>, max: Option<DateTime<Utc>>) -> Self {
        Axis {
            kind: Some("time"),
            time: Some(TimeScale {
                min,
                max,
                unit: "day",
                step_size: 1,
                display_formats: DisplayFormats { day: "D" },
            }),
            ..Axis::labelled(text)
        }
    }

    pub fn with_ticks(mut self, ticks: Ticks) -> Self {
        self.ticks = Some(ticks);
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacked = Some(true);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeScale {
    pub min: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<DateTime<Utc>>,
    pub unit: &'static str,
    pub step_size: u32,
    pub display_formats: DisplayFormats,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayFormats {
    pub day: &'static str,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLabel {
    pub display: bool,
    pub label_string: String,
}
