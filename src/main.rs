use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use trackline::config::{
    OrientConfig, PipelineConfig, DEFAULT_STATION_PREFIX, DEFAULT_TRACK_GROUP,
    DEFAULT_TRACK_PREFIX,
};
use trackline::pipeline::{self, ReconstructionReport};

#[derive(Parser)]
#[command(
    name = "trackline",
    about = "Reconstruct track centerlines and rails from SVG rail maps"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace each closed track shape with its straight centerline
    Centerlines(ReconstructArgs),
    /// Replace each track shape with two straight rails from detected corners
    Rails(ReconstructArgs),
    /// Replace each four-segment track shape with two rails that follow its curves
    CurvedRails(ReconstructArgs),
    /// Make station-to-station paths start at their origin station
    Orient(OrientArgs),
}

#[derive(Args)]
struct ReconstructArgs {
    /// Input SVG path
    #[arg(short, long)]
    input: PathBuf,

    /// Output SVG path
    #[arg(short, long)]
    output: PathBuf,

    /// Inward rail offset (mode default if omitted)
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<f64>,

    /// Stroke width for derived paths without one (mode default if omitted)
    #[arg(long)]
    stroke_width: Option<f64>,

    /// Samples per shape (mode default if omitted)
    #[arg(long)]
    samples: Option<usize>,

    /// Id prefix of the groups holding track shapes
    #[arg(long, default_value = DEFAULT_TRACK_PREFIX)]
    track_prefix: String,
}

impl ReconstructArgs {
    fn into_config(self, defaults: fn(PathBuf, PathBuf) -> PipelineConfig) -> PipelineConfig {
        let base = defaults(self.input, self.output);
        PipelineConfig {
            offset: self.offset.unwrap_or(base.offset),
            stroke_width: self.stroke_width.unwrap_or(base.stroke_width),
            samples: self.samples.unwrap_or(base.samples),
            track_prefix: self.track_prefix,
            ..base
        }
    }
}

#[derive(Args)]
struct OrientArgs {
    /// Input SVG path
    #[arg(short, long)]
    input: PathBuf,

    /// Output SVG path (defaults to overwriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Id of the group holding the station-to-station paths
    #[arg(long, default_value = DEFAULT_TRACK_GROUP)]
    track_group: String,

    /// Id prefix of station groups
    #[arg(long, default_value = DEFAULT_STATION_PREFIX)]
    station_prefix: String,
}

fn print_reconstruction(output: &std::path::Path, report: ReconstructionReport) {
    println!("Done. Output written to {}", output.display());
    println!(
        "  {} shapes replaced, {} left unchanged",
        report.replaced, report.skipped
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default: WARN for everything, INFO for trackline.
    // Override with RUST_LOG (e.g. RUST_LOG=trackline=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("trackline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Centerlines(args) => {
            let config = args.into_config(PipelineConfig::centerlines);
            let report = pipeline::run_centerlines(&config)?;
            print_reconstruction(&config.output, report);
        }
        Command::Rails(args) => {
            let config = args.into_config(PipelineConfig::rails);
            let report = pipeline::run_rails(&config)?;
            print_reconstruction(&config.output, report);
        }
        Command::CurvedRails(args) => {
            let config = args.into_config(PipelineConfig::curved_rails);
            let report = pipeline::run_curved_rails(&config)?;
            print_reconstruction(&config.output, report);
        }
        Command::Orient(args) => {
            let output = args.output.unwrap_or_else(|| args.input.clone());
            let config = OrientConfig {
                track_group: args.track_group,
                station_prefix: args.station_prefix,
                ..OrientConfig::new(args.input, output)
            };
            let report = pipeline::run_orient(&config)?;
            println!("Done. Output written to {}", config.output.display());
            println!(
                "  {} paths checked, {} reversed, {} with unknown stations, {} unreadable",
                report.checked, report.reversed, report.unresolved, report.skipped
            );
        }
    }
    Ok(())
}
