//! `calor`: run the reference heated-plate job from the command line.
//!
//! Logging goes through `tracing`; set `RUST_LOG` to change the level
//! (default `info`, `debug` adds per-worker metrics).

use std::path::PathBuf;
use std::process::ExitCode;

use calor::prelude::*;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Distributed 2-D heat diffusion over a grid of worker threads
#[derive(Parser, Debug)]
#[command(name = "calor", version)]
#[command(about = "Heated-plate diffusion with halo exchange between workers", long_about = None)]
struct Args {
    /// Number of workers (threads)
    #[arg(short = 'n', long, default_value_t = 4)]
    workers: usize,

    /// Grid cells across
    #[arg(long, default_value_t = 256)]
    width: u32,

    /// Grid cells down
    #[arg(long, default_value_t = 256)]
    height: u32,

    /// Number of steps
    #[arg(short, long, default_value_t = 10_000)]
    steps: u64,

    /// Heat is injected on steps below this
    #[arg(short, long, default_value_t = 5_000)]
    cutoff: u64,

    /// Write a snapshot every this many steps
    #[arg(short = 'i', long, default_value_t = 500)]
    snapshot_interval: u64,

    /// Time step
    #[arg(long, default_value_t = 2.5e-3)]
    dt: f32,

    /// Cell size
    #[arg(long, default_value_t = 5e-2)]
    cell_size: f32,

    /// What lies beyond the plate edge
    #[arg(short, long, value_enum, default_value_t = Boundary::Insulated)]
    boundary: Boundary,

    /// Directory for BMP snapshots
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Run without writing snapshots
    #[arg(long)]
    no_output: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Boundary {
    /// Zero flux across the plate edge
    Insulated,
    /// Edge margin held at its initial temperature
    Fixed,
}

impl From<Boundary> for EdgeBoundary {
    fn from(b: Boundary) -> Self {
        match b {
            Boundary::Insulated => EdgeBoundary::Insulated,
            Boundary::Fixed => EdgeBoundary::Fixed,
        }
    }
}

impl Args {
    fn config(&self) -> SimConfig {
        SimConfig {
            width: self.width,
            height: self.height,
            steps: self.steps,
            heat_cutoff: self.cutoff,
            snapshot_interval: self.snapshot_interval,
            h: self.cell_size,
            dt: self.dt,
            boundary: self.boundary.into(),
            ..SimConfig::default()
        }
    }
}

fn run(args: &Args) -> Result<RunReport, Box<dyn std::error::Error>> {
    let cluster = Cluster::new(args.config(), args.workers)?;
    let sink: Box<dyn SnapshotSink> = if args.no_output {
        Box::new(NullSink)
    } else {
        Box::new(BmpWriter::new(&args.output, args.snapshot_interval)?)
    };
    Ok(cluster.run(&PlateScenario, sink)?)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(report) => {
            info!(
                steps = report.steps,
                snapshots = report.snapshots,
                elapsed_s = report.elapsed.as_secs_f64(),
                halo_messages = report.metrics.halo.messages_sent,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_reference_run() {
        let args = Args::parse_from(["calor"]);
        let config = args.config();
        assert_eq!(config, SimConfig::default());
        assert_eq!(args.workers, 4);
        assert!(!args.no_output);
    }

    #[test]
    fn flags_map_onto_config() {
        let args = Args::parse_from([
            "calor", "-n", "6", "--width", "60", "--height", "40", "-s", "30", "-c", "10", "-i",
            "5", "-b", "fixed", "--no-output",
        ]);
        let config = args.config();
        assert_eq!(args.workers, 6);
        assert_eq!((config.width, config.height), (60, 40));
        assert_eq!(config.steps, 30);
        assert_eq!(config.heat_cutoff, 10);
        assert_eq!(config.snapshot_interval, 5);
        assert_eq!(config.boundary, EdgeBoundary::Fixed);
        assert!(args.no_output);
    }

    #[test]
    fn invalid_worker_count_is_an_error() {
        let args = Args::parse_from(["calor", "-n", "7", "--no-output", "-s", "1"]);
        assert!(run(&args).is_err());
    }
}
