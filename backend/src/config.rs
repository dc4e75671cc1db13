use biblio_config::{BiblioPaths, ConfigBackend, ConfigError, TomlConfigBackend};
use biblio_core::services::LibraryOptions;
use biblio_storage::StorageConfig;

use crate::cli::Cli;

/// Everything the binary needs to wire the library, after applying CLI overrides.
#[derive(Debug, Clone)]
pub struct AppConfig {
  pub paths: BiblioPaths,
  pub storage: StorageConfig,
  pub library: LibraryOptions,
}

impl AppConfig {
  /// Config file first, then command-line flags on top.
  pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
    let paths = match &cli.data_dir {
      Some(dir) => BiblioPaths::with_base(dir)?,
      None => BiblioPaths::new()?,
    };
    let backend = TomlConfigBackend::new(paths.clone());

    let mut storage = StorageConfig::load(&backend)?;
    if let Some(file) = &cli.books_file {
      storage.books_file = file.clone();
    }
    if let Some(file) = &cli.members_file {
      storage.members_file = file.clone();
    }

    let mut library = load_library_options(&backend)?;
    if let Some(policy) = cli.on_duplicate {
      library.on_duplicate = policy;
    }

    Ok(Self { paths, storage, library })
  }
}

/// Section `[library]`; written back with defaults on first run, like `[storage]`.
fn load_library_options(backend: &TomlConfigBackend) -> Result<LibraryOptions, ConfigError> {
  let options: LibraryOptions = backend.load_section_with_default("library")?;
  backend.save_section("library", &options)?;
  Ok(options)
}
