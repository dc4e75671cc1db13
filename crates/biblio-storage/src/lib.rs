pub mod config;
pub mod json_store;
pub mod models;

pub use config::StorageConfig;
pub use json_store::JsonRecordStore;
pub use models::{BookRecord, MemberRecord, RecordMapping};

use biblio_config::BiblioPaths;
use biblio_core::domain::{Book, Member};

/// Los dos almacenes JSON que usa la biblioteca.
pub struct LibraryStores {
  pub books: JsonRecordStore<Book>,
  pub members: JsonRecordStore<Member>,
}

impl LibraryStores {
  pub fn new(config: &StorageConfig, paths: &BiblioPaths) -> Self {
    Self {
      books: JsonRecordStore::new(config.books_path(paths)),
      members: JsonRecordStore::new(config.members_path(paths)),
    }
  }
}
