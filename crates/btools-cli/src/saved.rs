use btools_core::AppConfig;
use btools_store::Store;
use clap::Subcommand;

use crate::criteria::CriteriaArgs;

/// Sub-commands available under `saved`.
#[derive(Debug, Subcommand)]
pub enum SavedCommands {
    /// Save the given criteria under a name, replacing any search of that name
    Save {
        name: String,
        #[command(flatten)]
        criteria: CriteriaArgs,
        /// Multi-word free-text search stored with the criteria
        #[arg(long)]
        ai: Option<String>,
    },
    /// List saved searches, newest first
    List,
    /// Print a saved search as JSON
    Show { name: String },
    /// Run a saved search against the catalog
    Run {
        name: String,
        #[arg(long)]
        json: bool,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Delete a saved search
    Delete { name: String },
}

/// # Errors
///
/// Returns an error if the named search does not exist or the store cannot
/// be written.
pub(crate) async fn run_saved(
    config: &AppConfig,
    store: &Store,
    command: SavedCommands,
) -> anyhow::Result<()> {
    match command {
        SavedCommands::Save { name, criteria, ai } => {
            let mut criteria = criteria.into_criteria();
            criteria.ai_query = ai;
            let saved = store.save_search(&name, &criteria)?;
            println!("saved search '{}'", saved.name);
        }
        SavedCommands::List => {
            let searches = store.list_searches();
            if searches.is_empty() {
                println!("no saved searches");
                return Ok(());
            }
            println!("{:<28}{:<22}FILTERS", "NAME", "UPDATED");
            for search in &searches {
                let chips = btools_query::active_filter_labels(&search.criteria);
                println!(
                    "{:<28}{:<22}{}",
                    search.name,
                    search.updated_at.format("%Y-%m-%d %H:%M UTC"),
                    if chips.is_empty() {
                        "(none)".to_string()
                    } else {
                        chips.join(" | ")
                    }
                );
            }
        }
        SavedCommands::Show { name } => {
            let search = store.load_search(&name)?;
            println!("{}", serde_json::to_string_pretty(&search)?);
        }
        SavedCommands::Run { name, json, limit } => {
            let search = store.load_search(&name)?;
            crate::search::run_search(config, store, &search.criteria, json, limit).await?;
        }
        SavedCommands::Delete { name } => {
            store.delete_search(&name)?;
            println!("deleted saved search '{name}'");
        }
    }
    Ok(())
}
