//! nerscore - evaluation of named entity recognizers
//!
//! Usage:
//!   nerscore check <GOLD_DIR> <RESULTS_DIR> [THRESHOLD] [--json]
//!   nerscore process <DIR>... [--json]
//!   nerscore labels <GOLD_FILE> <PREDICTED_FILE> [--json]
//!   nerscore strip <INPUT_DIR> <OUTPUT_DIR> [--json]

use clap::{Parser, Subcommand};
use nerscore::{score_label_files, strip_directory, CorpusScorer, ScorerConfigBuilder};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nerscore")]
#[command(about = "Scores named entity recognizers against an annotated gold standard")]
#[command(version)]
struct Cli {
    /// Print the reports as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare classifier outputs with the gold standard
    Check {
        /// Directory of annotated documents
        gold_dir: PathBuf,
        /// Directory of classifier outputs, one file per gold document
        results_dir: PathBuf,
        /// Predictions with a lower probability are ignored
        #[arg(default_value_t = 0.0)]
        threshold: f64,
    },
    /// Recognize the dates of every document and compare them with the annotations
    Process {
        /// Directories of annotated documents
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
        /// Subdirectory where the recognized dates are written
        #[arg(long, default_value = "results")]
        results_subdir: String,
    },
    /// Score a label-per-line classifier, micro-averaged over the entity classes
    Labels {
        gold_file: PathBuf,
        predicted_file: PathBuf,
        /// Class left out of the micro-average
        #[arg(long, default_value = "0")]
        excluded_label: String,
    },
    /// Remove the DOC and ROOT tags of every document
    Strip {
        input_dir: PathBuf,
        output_dir: PathBuf,
    },
}

fn emit<R: Serialize + Display>(report: &R, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nerscore=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            gold_dir,
            results_dir,
            threshold,
        } => {
            let config = ScorerConfigBuilder::default().threshold(threshold).build();
            let report = CorpusScorer::new(config).check(gold_dir, results_dir)?;
            emit(&report, cli.json)?;
        }
        Commands::Process {
            dirs,
            results_subdir,
        } => {
            let config = ScorerConfigBuilder::default()
                .results_subdir(results_subdir)
                .build();
            let scorer = CorpusScorer::new(config);
            for (dir, report) in dirs.iter().zip(scorer.process_all(&dirs)) {
                match report {
                    Ok(report) => emit(&report, cli.json)?,
                    Err(err) => eprintln!("Could not process {}: {}", dir.display(), err),
                }
            }
        }
        Commands::Labels {
            gold_file,
            predicted_file,
            excluded_label,
        } => {
            let config = ScorerConfigBuilder::default()
                .excluded_label(excluded_label)
                .build();
            let report = score_label_files(gold_file, predicted_file, &config)?;
            emit(&report, cli.json)?;
        }
        Commands::Strip {
            input_dir,
            output_dir,
        } => {
            let report = strip_directory(input_dir, output_dir)?;
            emit(&report, cli.json)?;
        }
    }

    Ok(())
}
