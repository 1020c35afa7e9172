//! lasaurkit CLI - translate job files to machine code
//!
//! Reads a job in the canonical JSON format and writes G-code, the bbox
//! framing path, a filtered copy of the job, or its stats to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use lasaurkit::{init_logging, Job, JobGcodeExt, LaserSettings, TracingSink};

#[derive(Parser)]
#[command(name = "lasaurkit")]
#[command(version = lasaurkit::VERSION)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
#[command(about = "Translate laser jobs to G-code with the G8 raster extension", long_about = None)]
struct Cli {
    /// Machine settings file (.json or .toml)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the production G-code program
    Gcode {
        /// Job file in JSON format
        job: PathBuf,
    },
    /// Write the bounding box framing path
    Bbox {
        /// Job file in JSON format
        job: PathBuf,
    },
    /// Write the job back as JSON
    Export {
        /// Job file in JSON format
        job: PathBuf,
        /// Color to leave out; may be repeated
        #[arg(short, long = "exclude", value_name = "COLOR")]
        exclude: Vec<String>,
    },
    /// Write per-scope bounding boxes and lengths as JSON
    Stats {
        /// Job file in JSON format
        job: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let settings = load_settings(cli.settings.as_deref())?;

    match cli.command {
        Commands::Gcode { job } => {
            let job = load_job(&job, settings)?;
            print!("{}", job.to_gcode(&mut TracingSink));
        }
        Commands::Bbox { job } => {
            let job = load_job(&job, settings)?;
            print!("{}", job.to_bbox_gcode());
        }
        Commands::Export { job, exclude } => {
            let job = load_job(&job, settings)?;
            let exclude: HashSet<String> = exclude.into_iter().collect();
            let filter = (!exclude.is_empty()).then_some(&exclude);
            println!("{}", job.to_json(filter)?);
        }
        Commands::Stats { job } => {
            let job = load_job(&job, settings)?;
            println!("{}", serde_json::to_string_pretty(job.stats())?);
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<LaserSettings> {
    match path {
        Some(path) => LaserSettings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(LaserSettings::default()),
    }
}

fn load_job(path: &Path, settings: LaserSettings) -> Result<Job> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let job = Job::from_json(&text, settings)
        .with_context(|| format!("Failed to parse job {}", path.display()))?;
    tracing::info!(
        "Loaded {}: {} colors, {} rasters, {} passes",
        path.display(),
        job.all_colors().len(),
        job.rasters().len(),
        job.passes().len()
    );
    Ok(job)
}
