use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use biblio_core::ports::{RecordStore, RepoError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::models::RecordMapping;

/// Almacén de una colección completa en un archivo JSON (un array de registros).
///
/// - Archivo inexistente -> colección vacía.
/// - Cada `save_all` reescribe el archivo entero de forma atómica.
#[derive(Debug, Clone)]
pub struct JsonRecordStore<T> {
  path: PathBuf,
  _entity: PhantomData<fn() -> T>,
}

impl<T> JsonRecordStore<T> {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), _entity: PhantomData }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl<T: RecordMapping> RecordStore<T> for JsonRecordStore<T> {
  fn load(&self) -> Result<Vec<T>, RepoError> {
    let Some(content) = biblio_fs::read_to_string_if_exists(&self.path)? else {
      debug!(path = %self.path.display(), "record store missing, starting empty");
      return Ok(Vec::new());
    };

    let records: Vec<T::Record> = serde_json::from_str(&content)
      .map_err(|e| RepoError::Decode(format!("{}: {e}", self.path.display())))?;

    debug!(path = %self.path.display(), count = records.len(), "record store loaded");
    Ok(records.into_iter().map(T::from_record).collect())
  }

  fn save_all(&self, records: &[T]) -> Result<(), RepoError> {
    let rows: Vec<T::Record> = records.iter().map(T::to_record).collect();
    let json = to_pretty_json(&rows).map_err(|e| RepoError::Encode(format!("{}: {e}", self.path.display())))?;

    biblio_fs::atomic_write_str(&self.path, &json)?;

    debug!(path = %self.path.display(), count = rows.len(), "record store written");
    Ok(())
  }
}

/// JSON con sangría de 4 espacios, el formato histórico de los archivos.
fn to_pretty_json<S: Serialize>(value: &S) -> Result<String, serde_json::Error> {
  let mut buf = Vec::new();
  let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
  value.serialize(&mut ser)?;
  Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
  use super::*;
  use biblio_core::domain::{Book, BookId, Member};
  use tempfile::tempdir;

  #[test]
  fn missing_file_loads_empty() {
    let tmp = tempdir().unwrap();
    let store: JsonRecordStore<Book> = JsonRecordStore::new(tmp.path().join("books.json"));

    assert!(store.load().unwrap().is_empty());
    assert!(!store.path().exists());
  }

  #[test]
  fn books_are_written_as_flat_records() {
    let tmp = tempdir().unwrap();
    let store: JsonRecordStore<Book> = JsonRecordStore::new(tmp.path().join("books.json"));

    store.save_all(&[Book::new("B1", "Rayuela", "Cortázar", 2)]).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(
      raw,
      serde_json::json!([{ "book_id": "B1", "title": "Rayuela", "author": "Cortázar", "copies": 2 }])
    );
  }

  #[test]
  fn members_keep_their_loans_across_reload() {
    let tmp = tempdir().unwrap();
    let store: JsonRecordStore<Member> = JsonRecordStore::new(tmp.path().join("members.json"));
    let member = Member::with_borrowed("M1", "Ana", vec![BookId::from("B2"), BookId::from("B1")]);

    store.save_all(std::slice::from_ref(&member)).unwrap();

    assert_eq!(store.load().unwrap(), vec![member]);
  }

  #[test]
  fn legacy_member_records_without_loans_load() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("members.json");
    std::fs::write(&path, r#"[{"member_id": "M1", "name": "Ana"}]"#).unwrap();

    let loaded = JsonRecordStore::<Member>::new(&path).load().unwrap();

    assert_eq!(loaded, vec![Member::new("M1", "Ana")]);
  }

  #[test]
  fn save_replaces_previous_contents() {
    let tmp = tempdir().unwrap();
    let store: JsonRecordStore<Book> = JsonRecordStore::new(tmp.path().join("books.json"));

    store.save_all(&[Book::new("B1", "T", "A", 1), Book::new("B2", "T", "A", 1)]).unwrap();
    store.save_all(&[Book::new("B2", "T", "A", 0)]).unwrap();

    assert_eq!(store.load().unwrap(), vec![Book::new("B2", "T", "A", 0)]);
  }

  #[test]
  fn corrupt_file_is_a_decode_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("books.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonRecordStore::<Book>::new(&path).load().unwrap_err();

    assert!(matches!(err, RepoError::Decode(msg) if msg.contains("books.json")));
  }

  #[test]
  fn unwritable_location_is_an_io_error() {
    let tmp = tempdir().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let store: JsonRecordStore<Book> = JsonRecordStore::new(blocker.join("books.json"));

    let err = store.save_all(&[Book::new("B1", "T", "A", 1)]).unwrap_err();

    assert!(matches!(err, RepoError::Io(_)));
  }
}
