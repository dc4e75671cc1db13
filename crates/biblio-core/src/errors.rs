// crates/biblio-core/src/errors.rs
use thiserror::Error;

/// Error genérico del núcleo de Biblio.
///
/// Solo cubre fallos de infraestructura (hoy: persistencia). Los casos de
/// negocio esperables (libro inexistente, sin copias, no prestado) no son
/// errores: viajan como valores en `services::outcome`.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("repository error: {0}")]
  Repository(String),
}

impl From<crate::ports::RepoError> for CoreError {
  fn from(err: crate::ports::RepoError) -> Self {
    CoreError::Repository(err.to_string())
  }
}
