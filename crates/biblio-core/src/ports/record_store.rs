#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("decode error: {0}")]
  Decode(String),

  #[error("encode error: {0}")]
  Encode(String),

  #[error("storage error: {0}")]
  Storage(String),
}

/// Port de almacén de registros para una colección completa (libros o socios).
///
/// Semántica de reemplazo total: `save_all` sustituye todo lo guardado por
/// `records`. Un almacén que todavía no existe se lee como colección vacía.
///
/// Implementaciones:
/// - `biblio_storage::JsonRecordStore` (un archivo JSON por colección)
/// - [`MemoryRecordStore`](crate::ports::MemoryRecordStore) (tests, sin disco)
pub trait RecordStore<T> {
  fn load(&self) -> Result<Vec<T>, RepoError>;
  fn save_all(&self, records: &[T]) -> Result<(), RepoError>;
}
