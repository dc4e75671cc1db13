use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Variable de entorno que fuerza el directorio base (modo portable / tests).
pub const BASE_DIR_ENV: &str = "BIBLIO_BASE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone)]
pub struct BiblioPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl BiblioPaths {
  /// Resuelve los directorios: `BIBLIO_BASE_DIR` si existe, si no los del sistema.
  pub fn new() -> Result<Self, ConfigError> {
    if let Ok(env_base) = std::env::var(BASE_DIR_ENV) {
      return Self::with_base(env_base);
    }

    let proj_dirs = ProjectDirs::from("com", "biblio", "biblio").ok_or(ConfigError::Directories)?;
    let paths = Self {
      base_dir: proj_dirs.config_dir().to_path_buf(),
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
    };
    paths.create_dirs()?;

    Ok(paths)
  }

  /// Todo cuelga de `base`: `base/config` y `base/data`.
  pub fn with_base(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let base_dir = base.as_ref().to_path_buf();
    let paths =
      Self { config_dir: base_dir.join("config"), data_dir: base_dir.join("data"), base_dir };
    paths.create_dirs()?;

    Ok(paths)
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("biblio.toml")
  }

  fn create_dirs(&self) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    std::fs::create_dir_all(&self.data_dir)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  struct EnvVarGuard {
    key: String,
    original: Option<String>,
  }

  impl EnvVarGuard {
    fn new(key: &str, value: &str) -> Self {
      let original = std::env::var(key).ok();
      unsafe { std::env::set_var(key, value) };
      EnvVarGuard { key: key.to_owned(), original }
    }
  }

  impl Drop for EnvVarGuard {
    fn drop(&mut self) {
      match &self.original {
        Some(val) => unsafe { std::env::set_var(&self.key, val) },
        None => unsafe { std::env::remove_var(&self.key) },
      }
    }
  }

  #[test]
  fn test_biblio_base_dir_override() {
    let tmp = tempdir().unwrap();
    let _env = EnvVarGuard::new(BASE_DIR_ENV, tmp.path().to_str().unwrap());

    let paths = BiblioPaths::new().unwrap();

    assert_eq!(paths.base_dir, tmp.path());
    assert_eq!(paths.config_dir, tmp.path().join("config"));
    assert_eq!(paths.data_dir, tmp.path().join("data"));
    assert_eq!(paths.config_file(), tmp.path().join("config").join("biblio.toml"));

    assert!(paths.config_dir.exists());
    assert!(paths.data_dir.exists());
  }

  #[test]
  fn test_explicit_base_dir() {
    let tmp = tempdir().unwrap();
    let base = tmp.path().join("portable");

    let paths = BiblioPaths::with_base(&base).unwrap();

    assert_eq!(paths.data_dir, base.join("data"));
    assert!(paths.data_dir.exists());
  }
}
