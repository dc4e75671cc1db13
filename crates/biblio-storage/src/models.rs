use biblio_core::domain::{Book, BookId, Member};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Registro plano de un libro tal como se escribe en `books.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
  pub book_id: String,
  pub title: String,
  pub author: String,
  pub copies: u32,
}

/// Registro de un socio en `members.json`.
///
/// `borrowed_books` puede faltar en archivos antiguos, que no guardaban
/// préstamos; se lee como lista vacía.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
  pub member_id: String,
  pub name: String,
  #[serde(default)]
  pub borrowed_books: Vec<String>,
}

/// Conversión entre una entidad del dominio y su registro persistido.
pub trait RecordMapping: Sized {
  type Record: Serialize + DeserializeOwned;

  fn to_record(&self) -> Self::Record;
  fn from_record(record: Self::Record) -> Self;
}

impl RecordMapping for Book {
  type Record = BookRecord;

  fn to_record(&self) -> BookRecord {
    BookRecord {
      book_id: self.id.to_string(),
      title: self.title.clone(),
      author: self.author.clone(),
      copies: self.copies,
    }
  }

  fn from_record(row: BookRecord) -> Self {
    Book::new(row.book_id, row.title, row.author, row.copies)
  }
}

impl RecordMapping for Member {
  type Record = MemberRecord;

  fn to_record(&self) -> MemberRecord {
    MemberRecord {
      member_id: self.id.to_string(),
      name: self.name.clone(),
      borrowed_books: self.borrowed().iter().map(ToString::to_string).collect(),
    }
  }

  fn from_record(row: MemberRecord) -> Self {
    Member::with_borrowed(row.member_id, row.name, row.borrowed_books.into_iter().map(BookId::from).collect())
  }
}
