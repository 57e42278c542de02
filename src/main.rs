//! Command-line entry point for schema_docgen

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use schema_docgen::config::{self, Config};
use schema_docgen::utils::logging::init_logging;
use schema_docgen::{generate_ddl, ExtractionPipeline};

#[derive(Parser)]
#[command(name = "schema_docgen", version, about = "Generates schema documentation, JSON export and SQL DDL from JPA entity sources")]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a project for entities and write the document and JSON export
    Extract {
        /// Project root containing the entity sources
        input_dir: PathBuf,
    },
    /// Generate the SQL DDL script from a JSON schema export
    Ddl {
        /// Path to the JSON schema export
        export: PathBuf,
        /// Output path of the SQL script
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    init_logging(&config.logging)?;

    match cli.command {
        Command::Extract { input_dir } => {
            let mut pipeline = ExtractionPipeline::new(config);
            let count = pipeline.extract_corpus(&input_dir)?;
            if count == 0 {
                tracing::warn!("No entities found under {}", input_dir.display());
            }
            pipeline.write_artifacts(&input_dir)?;
        }
        Command::Ddl { export, output } => generate_ddl(&export, &output)?,
    }

    Ok(())
}
