use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use persona_application::SessionOptions;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod render;

const DEFAULT_LOG_FILTER: &str = "warn,persona=info,persona_application=info,persona_core=info,\
persona_infrastructure=info,persona_interaction=info";

#[derive(Parser)]
#[command(name = "persona")]
#[command(about = "Persona Architect - mapas de persona a partir de um questionário guiado", long_about = None)]
struct Cli {
    /// Path to config.toml (default: <config dir>/persona-architect/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory where PDF files are written
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive four-step wizard (default)
    Wizard,
    /// Generate a persona from an answers file (TOML or JSON)
    Generate {
        /// Answers file using the questionnaire keys (role, productDescription, ...)
        #[arg(long)]
        answers: PathBuf,
        /// Skip the PDF export
        #[arg(long)]
        no_pdf: bool,
        /// Print the persona as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the response schema sent to the generation service
    Schema,
    /// List steps, fields and the fixed option lists
    Options,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let options = SessionOptions {
        config_dir: None,
        config_file: cli.config,
        output_dir: cli.output_dir,
    };

    match cli.command.unwrap_or(Commands::Wizard) {
        Commands::Wizard => commands::wizard::run(options).await?,
        Commands::Generate {
            answers,
            no_pdf,
            json,
        } => commands::generate::run(options, &answers, !no_pdf, json).await?,
        Commands::Schema => commands::schema::run()?,
        Commands::Options => commands::options::run(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_covers_every_workspace_crate() {
        for target in [
            "persona",
            "persona_application",
            "persona_core",
            "persona_infrastructure",
            "persona_interaction",
        ] {
            let directive = format!("{target}=info");
            assert!(
                DEFAULT_LOG_FILTER.split(',').any(|d| d == directive),
                "{target} missing from default filter"
            );
        }
        assert!(DEFAULT_LOG_FILTER.starts_with("warn,"));
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
