mod cli;
mod commands;
mod config;
mod infrastructure;
mod menu;
mod render;

use std::io;

use anyhow::Context;
use biblio_core::services::LibraryService;
use biblio_storage::LibraryStores;
use clap::Parser;

pub use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::menu::Prompt;
use infrastructure::logging;

/// Entry point: parse arguments, wire the library and run one command or the menu.
pub fn run() -> anyhow::Result<()> {
  logging::init();
  run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> anyhow::Result<()> {
  // --- Dependency Injection Phase ---

  // 1. Configuration (biblio.toml + flags)
  let cfg = AppConfig::resolve(&cli).context("loading configuration")?;

  // 2. Persistence Adapters (one JSON file per collection)
  let stores = LibraryStores::new(&cfg.storage, &cfg.paths);
  tracing::debug!(books = %stores.books.path().display(), members = %stores.members.path().display(), "record stores");

  // 3. Service Wiring
  // Loads both stores; a corrupt file stops here instead of being overwritten later.
  let mut library =
    LibraryService::open(stores.books, stores.members, cfg.library).context("opening library record stores")?;

  // 4. Front-end
  match cli.command {
    Some(command) => commands::execute(&mut library, command, &mut io::stdout().lock()),
    None => {
      let mut prompt = Prompt::new(io::stdin().lock(), io::stdout().lock());
      menu::run_menu(&mut library, &mut prompt)
    }
  }
}
