use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use invoiceplane_calc::amounts::RecalculationService;
use invoiceplane_calc::config::Config;
use invoiceplane_calc::numbering::IdentifierGenerator;
use invoiceplane_calc::{DocumentKind, RepositorySet, SettingsProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "invoiceplane-calc",
    version,
    about = "Recalculate InvoicePlane amounts and numbers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recalculate item and document amounts, printing each result as JSON
    Recalc {
        /// invoice or quote
        kind: DocumentKind,
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Generate the next identifier of a document group
    Number {
        group_id: i64,
        /// Show the identifier without advancing the group's counter
        #[arg(long)]
        peek: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invoiceplane_calc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Calculation mode: {}", config.app.calculation_mode());

    let pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;
    let repos = RepositorySet::mysql(pool);

    match cli.command {
        Commands::Recalc { kind, ids } => {
            let service = RecalculationService::new(repos, Arc::new(config.app.clone()));
            for id in ids {
                let amount = service
                    .recalculate(kind, id)
                    .await
                    .with_context(|| format!("Failed to recalculate {} {}", kind, id))?;
                println!("{}", serde_json::to_string(&amount)?);
            }
        }
        Commands::Number { group_id, peek } => {
            let generator = IdentifierGenerator::new(repos.sequences.clone());
            println!("{}", generator.generate_for_group(group_id, !peek).await?);
        }
    }

    Ok(())
}
