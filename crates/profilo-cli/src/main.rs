use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use profilo::{CommandAnnotator, Pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "profilo")]
#[command(about = "Turn labeled raw corpora into a linguistic feature dataset", long_about = None)]
struct Cli {
    /// Working directory holding clean/, conllu/ and the dataset file
    #[arg(short, long, value_name = "DIR", default_value = "work", global = true)]
    work_dir: PathBuf,

    /// Worker pool size (0 = one per CPU)
    #[arg(short = 'j', long, value_name = "N", default_value_t = 0, global = true)]
    workers: usize,

    /// Quiet mode (warnings only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, conflicts_with = "quiet", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sanitize raw container files into per-document cleaned texts
    Extract {
        /// Directory of raw container .txt files
        #[arg(value_name = "RAW_DIR")]
        raw_dir: PathBuf,

        /// Dataset split label baked into the document keys
        #[arg(short, long, default_value = "training")]
        split: String,
    },
    /// Run the external annotator over the cleaned texts
    Annotate {
        /// Annotator command line; receives text on stdin, prints CoNLL-U
        #[arg(short, long, value_name = "CMD")]
        annotator_cmd: String,
    },
    /// Aggregate CoNLL-U files into the feature dataset
    Features {
        /// Output CSV path (defaults to {work_dir}/linguistic_features.csv)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// The whole pipeline: extract, annotate, aggregate
    Run {
        /// Directory of raw container .txt files
        #[arg(value_name = "RAW_DIR")]
        raw_dir: PathBuf,

        /// Dataset split label baked into the document keys
        #[arg(short, long, default_value = "training")]
        split: String,

        /// Annotator command line; receives text on stdin, prints CoNLL-U
        #[arg(short, long, value_name = "CMD")]
        annotator_cmd: String,
    },
}

fn init_logging(quiet: bool, verbose: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "warn",
        (_, true) => "debug",
        _ => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if cli.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.workers)
            .build_global()
            .context("Failed to configure worker pool")?;
    }

    let mut pipeline = Pipeline::new(&cli.work_dir);

    match cli.command {
        Command::Extract { raw_dir, split } => {
            let written = pipeline.extract_split(&raw_dir, &split)?;
            info!(documents = written, "Extraction finished");
        }
        Command::Annotate { annotator_cmd } => {
            let annotator = CommandAnnotator::new(&annotator_cmd)?;
            let annotated = pipeline.annotate(&annotator)?;
            info!(documents = annotated, "Annotation finished");
        }
        Command::Features { output } => {
            if let Some(output) = output {
                pipeline = pipeline.with_dataset_path(output);
            }
            let rows = pipeline.extract_features()?;
            info!(rows, "Feature extraction finished");
        }
        Command::Run {
            raw_dir,
            split,
            annotator_cmd,
        } => {
            let annotator = CommandAnnotator::new(&annotator_cmd)?;
            let rows = pipeline.run(&annotator, &[(raw_dir, split)])?;
            info!(rows, "Pipeline finished");
        }
    }

    Ok(())
}
