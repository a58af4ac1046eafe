//! Command-line front end for the card catalog.
//!
//! # Responsibility
//! - Resolve configuration, open the slot database and load the collection.
//! - Translate subcommands into catalog intents and render the result.
//!
//! # Invariants
//! - The collection is loaded before any subcommand mutates it.
//! - Validation failures print one message and exit non-zero.

mod cli;
mod render;

use clap::Parser;
use cli::{Action, Args};
use log::info;
use punkcards_core::db::open_db;
use punkcards_core::{
    init_logging, CardForm, CardId, CatalogConfig, CatalogError, CatalogService, KeyValueStore,
    SqliteSlotStore, Submitted,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let config = CatalogConfig::resolve(&args.overrides()).map_err(|err| err.to_string())?;

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log directory `{}` is not UTF-8", log_dir.display()))?;
        init_logging(config.log_level, log_dir)?;
    }

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            format!("failed to create directory `{}`: {err}", parent.display())
        })?;
    }
    let conn = open_db(&config.db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", config.db_path.display()))?;
    let slots = SqliteSlotStore::try_new(&conn).map_err(|err| err.to_string())?;

    // Loads before any intent runs; a malformed slot is logged and treated as empty.
    let mut catalog =
        CatalogService::open(slots, config.storage_key.clone()).map_err(|err| err.to_string())?;

    match args.action {
        Action::List => print!("{}", render::card_grid(catalog.cards())),
        Action::Show { id } => {
            let id = CardId::new(id);
            let card = catalog
                .store()
                .get(&id)
                .ok_or_else(|| format!("no card with id `{id}`"))?;
            print!("{}", render::card_detail(card));
        }
        Action::Add { fields } => {
            let mut form = CardForm::new();
            fields.apply_to(&mut form);
            report(catalog.submit(&form))?;
        }
        Action::Edit {
            id,
            fields,
            no_song,
        } => {
            let id = CardId::new(id);
            let mut form = catalog
                .select_for_edit(&id)
                .ok_or_else(|| format!("no card with id `{id}`"))?;
            if no_song {
                form.song = Default::default();
            }
            fields.apply_to(&mut form);
            report(catalog.submit(&form))?;
        }
        Action::Delete { id } => {
            let id = CardId::new(id);
            if catalog.delete(&id).map_err(|err| err.to_string())? {
                println!("Deleted card {id}.");
            } else {
                println!("No card with id `{id}`; nothing deleted.");
            }
        }
        Action::Export => {
            let store = catalog.store();
            let raw = store
                .storage()
                .get(store.key())
                .map_err(|err| err.to_string())?;
            println!("{}", raw.unwrap_or_else(|| "[]".to_string()));
        }
    }

    info!(
        "event=cli_done module=cli status=ok cards={}",
        catalog.cards().len()
    );
    Ok(())
}

fn report(result: Result<Submitted, CatalogError>) -> Result<(), String> {
    match result.map_err(|err| err.to_string())? {
        Submitted::Added(id) => println!("Created card {id}."),
        Submitted::Updated(id) => println!("Updated card {id}."),
        Submitted::Unmatched(id) => println!("Card {id} no longer exists; nothing updated."),
    }
    Ok(())
}
