use std::path::PathBuf;

use biblio_core::services::DuplicatePolicy;
use clap::{Parser, Subcommand};

/// Command-line arguments.
///
/// Without a subcommand the interactive menu is started.
#[derive(Parser, Debug)]
#[command(name = "biblio", version, about = "Gestión de libros, socios y préstamos de una biblioteca")]
pub struct Cli {
  /// Base directory for config and data (overrides BIBLIO_BASE_DIR).
  #[arg(long, global = true, value_name = "DIR")]
  pub data_dir: Option<PathBuf>,

  /// Books record file (overrides `[storage].books_file`).
  #[arg(long, global = true, value_name = "FILE")]
  pub books_file: Option<PathBuf>,

  /// Members record file (overrides `[storage].members_file`).
  #[arg(long, global = true, value_name = "FILE")]
  pub members_file: Option<PathBuf>,

  /// What to do when adding an id that already exists: reject | overwrite.
  #[arg(long, global = true, value_name = "POLICY")]
  pub on_duplicate: Option<DuplicatePolicy>,

  #[command(subcommand)]
  pub command: Option<Command>,
}

/// One library operation.
///
/// The interactive menu builds the same values from its prompts, so both
/// front-ends share `commands::execute`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// Add a book to the catalogue.
  AddBook {
    #[arg(value_parser = non_empty)]
    id: String,
    title: String,
    author: String,
    copies: u32,
  },
  /// Change some fields of a book; omitted fields are left as they are.
  UpdateBook {
    #[arg(value_parser = non_empty)]
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    copies: Option<u32>,
  },
  /// Remove a book from the catalogue.
  RemoveBook {
    #[arg(value_parser = non_empty)]
    id: String,
  },
  /// List every book.
  ListBooks,
  /// Register a member.
  AddMember {
    #[arg(value_parser = non_empty)]
    id: String,
    name: String,
  },
  /// Rename a member.
  UpdateMember {
    #[arg(value_parser = non_empty)]
    id: String,
    #[arg(long)]
    name: Option<String>,
  },
  /// Remove a member.
  RemoveMember {
    #[arg(value_parser = non_empty)]
    id: String,
  },
  /// List every member with the books they hold.
  ListMembers,
  /// Lend a book to a member.
  Issue {
    #[arg(value_parser = non_empty)]
    book_id: String,
    #[arg(value_parser = non_empty)]
    member_id: String,
  },
  /// Give a borrowed book back.
  Return {
    #[arg(value_parser = non_empty)]
    book_id: String,
    #[arg(value_parser = non_empty)]
    member_id: String,
  },
}

/// Ids are trimmed; an empty id is never sent to the library.
pub fn non_empty(raw: &str) -> Result<String, String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() { Err("id must not be empty".to_string()) } else { Ok(trimmed.to_string()) }
}
