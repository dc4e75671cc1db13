use biblio_config::{BiblioPaths, ConfigBackend, ConfigError, TomlConfigBackend};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sección `[storage]` de biblio.toml.
///
/// Las rutas relativas se resuelven contra el directorio de datos.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StorageConfig {
  #[serde(default = "default_books_file")]
  pub books_file: PathBuf,
  #[serde(default = "default_members_file")]
  pub members_file: PathBuf,
}

fn default_books_file() -> PathBuf {
  PathBuf::from("books.json")
}

fn default_members_file() -> PathBuf {
  PathBuf::from("members.json")
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig { books_file: default_books_file(), members_file: default_members_file() }
  }
}

impl StorageConfig {
  /// Carga la sección y la vuelve a escribir, así el usuario ve los valores por defecto.
  pub fn load(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let cfg: StorageConfig = backend.load_section_with_default("storage")?;
    backend.save_section("storage", &cfg)?;
    Ok(cfg)
  }

  pub fn books_path(&self, paths: &BiblioPaths) -> PathBuf {
    resolve(&paths.data_dir, &self.books_file)
  }

  pub fn members_path(&self, paths: &BiblioPaths) -> PathBuf {
    resolve(&paths.data_dir, &self.members_file)
  }
}

fn resolve(data_dir: &Path, file: &Path) -> PathBuf {
  if file.is_absolute() { file.to_path_buf() } else { data_dir.join(file) }
}
