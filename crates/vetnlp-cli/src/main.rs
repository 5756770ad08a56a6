//! vetnlp CLI
//!
//! Usage:
//!   vetnlp analyze "<patient description>"
//!   vetnlp analyze --file notes.txt --json
//!   vetnlp diseases list
//!   vetnlp diseases show <name>

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use vetnlp_cli::{report, Pipeline};
use vetnlp_core::{AnalyzerConfig, DiseaseCatalog};
use vetnlp_engine::StaticCatalog;

#[derive(Parser)]
#[command(name = "vetnlp")]
#[command(about = "Veterinary patient text analysis")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a patient description
    Analyze {
        /// Patient description text
        text: Option<String>,

        /// Read the description from a file instead
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the JSON document instead of the report
        #[arg(long)]
        json: bool,

        /// Skip follow-up question generation
        #[arg(long)]
        no_questions: bool,
    },
    /// Inspect the static disease catalogue
    Diseases {
        #[command(subcommand)]
        action: DiseasesAction,
    },
}

#[derive(Subcommand)]
enum DiseasesAction {
    /// List all catalogue entries
    List,
    /// Show one entry with its treatment text
    Show { name: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::from_env()?,
    };

    match cli.command {
        Commands::Analyze {
            text,
            file,
            json,
            no_questions,
        } => {
            let text = match (text, file) {
                (Some(text), None) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                _ => bail!("provide a patient description or --file"),
            };

            let pipeline = Pipeline::new(config)?;
            let output = pipeline.run(&text, !no_questions)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!(
                    "{}",
                    report::render(&output.analysis, &output.follow_up_questions)
                );
            }
        }
        Commands::Diseases { action } => {
            let catalog = StaticCatalog::with_defaults();
            match action {
                DiseasesAction::List => {
                    for disease in catalog.all() {
                        println!(
                            "{:<20} {:<10} {}",
                            disease.name,
                            disease.severity.to_string(),
                            disease.description
                        );
                    }
                }
                DiseasesAction::Show { name } => match catalog.find_by_name(&name)? {
                    Some(disease) => {
                        println!("Name:        {}", disease.name);
                        println!("Severity:    {}", disease.severity);
                        println!("Description: {}", disease.description);
                        println!("Symptoms:    {}", disease.common_symptoms.join(", "));
                        println!("Causes:      {}", disease.causes.join(", "));
                        println!("Treatment:   {}", disease.treatment);
                        println!("Species:     {}", disease.affected_species.join(", "));
                    }
                    None => bail!("no catalogue entry named '{name}'"),
                },
            }
        }
    }

    Ok(())
}
