use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{Map, Value};

use crate::chart::ChartConfig;

/// Receives one finished chart configuration per canvas.
pub trait ChartSink {
    fn draw(&mut self, canvas: &str, config: &ChartConfig) -> anyhow::Result<()>;
}

/// Writes each chart to `<dir>/<canvas>.json`.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ChartSink for DirectorySink {
    fn draw(&mut self, canvas: &str, config: &ChartConfig) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.dir.join(format!("{canvas}.json"));
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Collects every chart into one JSON object keyed by canvas id.
#[derive(Default)]
pub struct BundleSink {
    charts: Map<String, Value>,
}

impl BundleSink {
    pub fn new() -> Self {
        Self { charts: Map::new() }
    }

    pub fn finish(self, mut writer: impl Write) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut writer, &Value::Object(self.charts))?;
        writeln!(writer)?;
        Ok(())
    }
}

impl ChartSink for BundleSink {
    fn draw(&mut self, canvas: &str, config: &ChartConfig) -> anyhow::Result<()> {
        self.charts
            .insert(canvas.to_string(), serde_json::to_value(config)?);
        Ok(())
    }
}
