use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod chart;
mod charts;
mod color;
mod models;
mod series;
mod sink;
mod source;

use crate::sink::{BundleSink, DirectorySink};
use crate::source::{FileSource, LeaderboardSource};

#[derive(Parser)]
#[command(name = "aoc-charts")]
#[command(about = "Chart.js configurations for an Advent of Code private leaderboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the four leaderboard charts
    #[command(group(
        ArgGroup::new("output")
            .args(["out_dir", "stdout"])
            .multiple(false)
    ))]
    Render {
        /// Leaderboard JSON (`-` for stdin); defaults to $AOC_LEADERBOARD
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value = "charts")]
        out_dir: PathBuf,
        /// Print all charts as one JSON object instead of writing files
        #[arg(long)]
        stdout: bool,
        #[arg(long, default_value_t = app::DEFAULT_TOP)]
        top: usize,
        /// Event year; inferred from the earliest star when omitted
        #[arg(long)]
        year: Option<i32>,
    },
    /// List members by score
    Summary {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn resolve_input(input: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match input {
        Some(path) => Ok(path),
        None => std::env::var("AOC_LEADERBOARD")
            .map(PathBuf::from)
            .context("pass --input or set AOC_LEADERBOARD to a leaderboard JSON file"),
    }
}

/// `RUST_LOG` when it parses, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            out_dir,
            stdout,
            top,
            year,
        } => {
            let source = FileSource::new(resolve_input(input)?);
            info!(input = %source.path().display(), "rendering charts");

            if stdout {
                let mut sink = BundleSink::new();
                app::run(&source, &mut sink, year, top).await?;
                sink.finish(std::io::stdout().lock())?;
            } else {
                let mut sink = DirectorySink::new(out_dir);
                app::run(&source, &mut sink, year, top).await?;
                println!("Charts written to {}.", sink.dir().display());
            }
        }
        Commands::Summary { input, limit } => {
            let source = FileSource::new(resolve_input(input)?);
            let leaderboard = source.fetch().await?;
            print!("{}", app::summary(&leaderboard, limit));
        }
    }

    Ok(())
}
