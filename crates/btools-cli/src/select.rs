use btools_core::SelectionSet;
use btools_store::Store;
use clap::Subcommand;

/// Sub-commands available under `select`.
#[derive(Debug, Subcommand)]
pub enum SelectCommands {
    /// Add blogger ids to the selection
    Add {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Remove blogger ids from the selection
    Remove {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print the selected ids in selection order
    List,
    /// Clear the selection
    Clear,
}

/// Applies `command` to the persisted selection. The store is only written
/// when the selection actually changes.
///
/// # Errors
///
/// Returns an error if the selection cannot be written.
pub(crate) fn run_select(store: &Store, command: SelectCommands) -> anyhow::Result<()> {
    let mut selection = store.read_selection();
    let changed = apply(&mut selection, &command);

    if changed {
        store.write_selection(&selection)?;
    }

    match command {
        SelectCommands::List => {
            if selection.is_empty() {
                println!("no bloggers selected");
            }
            for id in selection.iter() {
                println!("{id}");
            }
        }
        _ => println!("{} selected", selection.len()),
    }
    Ok(())
}

fn apply(selection: &mut SelectionSet, command: &SelectCommands) -> bool {
    match command {
        SelectCommands::Add { ids } => ids
            .iter()
            .fold(false, |changed, id| selection.insert(id.clone()) || changed),
        SelectCommands::Remove { ids } => ids
            .iter()
            .fold(false, |changed, id| selection.remove(id) || changed),
        SelectCommands::Clear => {
            let had_any = !selection.is_empty();
            selection.clear();
            had_any
        }
        SelectCommands::List => false,
    }
}
