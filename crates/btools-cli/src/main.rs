mod criteria;
mod saved;
mod search;
mod select;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{criteria::CriteriaArgs, saved::SavedCommands, select::SelectCommands};

#[derive(Debug, Parser)]
#[command(name = "btools")]
#[command(about = "Blogger catalog search, selection and saved searches")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter and sort the blogger catalog
    Search {
        #[command(flatten)]
        criteria: CriteriaArgs,
        /// Multi-word free-text search; every word must match
        #[arg(long)]
        ai: Option<String>,
        /// Print the result view as JSON
        #[arg(long)]
        json: bool,
        /// Maximum number of rows to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Manage the persisted blogger selection
    Select {
        #[command(subcommand)]
        command: SelectCommands,
    },
    /// Manage saved searches
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = btools_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("btools ready; run `btools --help` for commands");
        return Ok(());
    };

    let store = btools_store::Store::from_config(&config)?;

    match command {
        Commands::Search {
            criteria,
            ai,
            json,
            limit,
        } => {
            let mut criteria = criteria.into_criteria();
            criteria.ai_query = ai;
            search::run_search(&config, &store, &criteria, json, limit).await?;
        }
        Commands::Select { command } => select::run_select(&store, command)?,
        Commands::Saved { command } => saved::run_saved(&config, &store, command).await?,
    }

    Ok(())
}
