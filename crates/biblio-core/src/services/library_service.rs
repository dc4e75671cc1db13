use std::hash::Hash;

use tracing::{debug, info, warn};

use crate::domain::display::{Displayable, member_card};
use crate::domain::{
  Book, BookId, BookUpdate, BorrowOutcome, Member, MemberId, MemberUpdate, Registry, ReturnOutcome,
};
use crate::errors::CoreError;
use crate::ports::RecordStore;
use crate::services::options::{DuplicatePolicy, LibraryOptions};
use crate::services::outcome::{AddOutcome, Missing, Outcome};

/// Orquestador de la biblioteca: dueño de libros y socios.
///
/// Cada operación que modifica datos reescribe de inmediato la colección
/// afectada en su almacén. Si el guardado falla, el error sube tal cual
/// (`CoreError::Repository`) y el estado en memoria ya modificado no se
/// revierte.
pub struct LibraryService<B, M>
where
  B: RecordStore<Book>,
  M: RecordStore<Member>,
{
  books_store: B,
  members_store: M,
  options: LibraryOptions,
  books: Registry<BookId, Book>,
  members: Registry<MemberId, Member>,
}

/// Socio con sus préstamos resueltos contra el catálogo.
#[derive(Debug, Clone, Copy)]
pub struct MemberView<'a> {
  pub member: &'a Member,
  books: &'a Registry<BookId, Book>,
}

impl<'a> MemberView<'a> {
  /// Libros prestados que siguen en el catálogo, en orden de préstamo.
  pub fn borrowed_books(self) -> impl Iterator<Item = &'a Book> {
    let books = self.books;
    self.member.borrowed().iter().filter_map(move |id| books.get(id))
  }
}

impl Displayable for MemberView<'_> {
  fn display_info(&self) -> String {
    let titles = self.borrowed_books().map(|b| b.title.as_str()).collect::<Vec<_>>().join(", ");
    member_card(self.member, &titles)
  }
}

impl<B, M> LibraryService<B, M>
where
  B: RecordStore<Book>,
  M: RecordStore<Member>,
{
  /// Construye la biblioteca cargando ambos almacenes.
  pub fn open(books_store: B, members_store: M, options: LibraryOptions) -> Result<Self, CoreError> {
    let books = load_registry(&books_store, |b: &Book| b.id.clone(), "book")?;
    let members = load_registry(&members_store, |m: &Member| m.id.clone(), "member")?;

    for member in members.values() {
      for book_id in member.borrowed().iter().filter(|id| !books.contains_key(id)) {
        warn!(member_id = %member.id, book_id = %book_id, "member holds a book that is not in the catalogue");
      }
    }

    debug!(books = books.len(), members = members.len(), "library loaded");
    Ok(Self { books_store, members_store, options, books, members })
  }

  // -------- BOOKS --------

  pub fn add_book(&mut self, book: Book) -> Result<AddOutcome, CoreError> {
    let outcome = self.admission(self.books.contains_key(&book.id));
    if outcome == AddOutcome::Duplicate {
      warn!(book_id = %book.id, "book id already exists, add rejected");
      return Ok(outcome);
    }

    let id = book.id.clone();
    self.books.insert(id.clone(), book);
    self.save_books()?;
    if outcome == AddOutcome::Replaced {
      self.release_loans(&id)?;
    }

    info!(book_id = %id, ?outcome, "book stored");
    Ok(outcome)
  }

  pub fn remove_book(&mut self, id: &BookId) -> Result<Outcome<Book>, CoreError> {
    let Some(book) = self.books.remove(id) else {
      return Ok(Outcome::NotFound(Missing::Book(id.clone())));
    };
    self.save_books()?;
    self.release_loans(id)?;

    info!(book_id = %id, "book removed");
    Ok(Outcome::Done(book))
  }

  pub fn update_book(&mut self, id: &BookId, update: BookUpdate) -> Result<Outcome, CoreError> {
    let Some(book) = self.books.get_mut(id) else {
      return Ok(Outcome::NotFound(Missing::Book(id.clone())));
    };
    update.apply(book);
    self.save_books()?;

    info!(book_id = %id, "book updated");
    Ok(Outcome::Done(()))
  }

  pub fn book(&self, id: &BookId) -> Option<&Book> {
    self.books.get(id)
  }

  /// Libros en orden de alta.
  pub fn list_books(&self) -> impl Iterator<Item = &Book> + '_ {
    self.books.values()
  }

  // -------- MEMBERS --------

  pub fn add_member(&mut self, member: Member) -> Result<AddOutcome, CoreError> {
    let outcome = self.admission(self.members.contains_key(&member.id));
    if outcome == AddOutcome::Duplicate {
      warn!(member_id = %member.id, "member id already exists, add rejected");
      return Ok(outcome);
    }

    let id = member.id.clone();
    if let Some(previous) = self.members.insert(id.clone(), member) {
      if !previous.borrowed().is_empty() {
        warn!(member_id = %id, loans = previous.borrowed().len(), "overwritten member had books on loan");
      }
    }
    self.save_members()?;

    info!(member_id = %id, ?outcome, "member stored");
    Ok(outcome)
  }

  pub fn remove_member(&mut self, id: &MemberId) -> Result<Outcome<Member>, CoreError> {
    let Some(member) = self.members.remove(id) else {
      return Ok(Outcome::NotFound(Missing::Member(id.clone())));
    };
    self.save_members()?;

    if !member.borrowed().is_empty() {
      warn!(member_id = %id, loans = member.borrowed().len(), "removed member still had books on loan");
    }

    info!(member_id = %id, "member removed");
    Ok(Outcome::Done(member))
  }

  pub fn update_member(&mut self, id: &MemberId, update: MemberUpdate) -> Result<Outcome, CoreError> {
    let Some(member) = self.members.get_mut(id) else {
      return Ok(Outcome::NotFound(Missing::Member(id.clone())));
    };
    update.apply(member);
    self.save_members()?;

    info!(member_id = %id, "member updated");
    Ok(Outcome::Done(()))
  }

  pub fn member(&self, id: &MemberId) -> Option<MemberView<'_>> {
    self.members.get(id).map(|member| MemberView { member, books: &self.books })
  }

  /// Socios en orden de alta, con sus préstamos resueltos.
  pub fn list_members(&self) -> impl Iterator<Item = MemberView<'_>> + '_ {
    self.members.values().map(|member| MemberView { member, books: &self.books })
  }

  // -------- LOANS --------

  /// Presta `book_id` a `member_id`.
  ///
  /// Si ambos existen se persisten las dos colecciones, se haya podido
  /// prestar o no; si falta alguno no se toca nada.
  pub fn issue_book(&mut self, book_id: &BookId, member_id: &MemberId) -> Result<Outcome<BorrowOutcome>, CoreError> {
    let Some(book) = self.books.get_mut(book_id) else {
      return Ok(Outcome::NotFound(Missing::Book(book_id.clone())));
    };
    let Some(member) = self.members.get_mut(member_id) else {
      return Ok(Outcome::NotFound(Missing::Member(member_id.clone())));
    };

    let result = member.borrow(book);
    self.save_books()?;
    self.save_members()?;

    match result {
      BorrowOutcome::Borrowed => info!(book_id = %book_id, member_id = %member_id, "book issued"),
      other => info!(book_id = %book_id, member_id = %member_id, outcome = ?other, "book not issued"),
    }
    Ok(Outcome::Done(result))
  }

  /// Devuelve `book_id` de parte de `member_id`. Misma política de guardado
  /// que [`issue_book`](Self::issue_book).
  pub fn return_book(&mut self, book_id: &BookId, member_id: &MemberId) -> Result<Outcome<ReturnOutcome>, CoreError> {
    let Some(book) = self.books.get_mut(book_id) else {
      return Ok(Outcome::NotFound(Missing::Book(book_id.clone())));
    };
    let Some(member) = self.members.get_mut(member_id) else {
      return Ok(Outcome::NotFound(Missing::Member(member_id.clone())));
    };

    let result = member.return_book(book);
    self.save_books()?;
    self.save_members()?;

    match result {
      ReturnOutcome::Returned => info!(book_id = %book_id, member_id = %member_id, "book returned"),
      ReturnOutcome::NotBorrowed => {
        info!(book_id = %book_id, member_id = %member_id, "book was not lent to this member")
      }
      ReturnOutcome::CopiesFull => warn!(book_id = %book_id, member_id = %member_id, "copy counter full, loan kept"),
    }
    Ok(Outcome::Done(result))
  }

  /// Borra `book_id` de los préstamos de todos los socios. Se usa cuando el
  /// libro sale del catálogo o se reemplaza: un libro nuevo con el mismo id
  /// no hereda préstamos del anterior. Solo persiste socios si algo cambió.
  fn release_loans(&mut self, book_id: &BookId) -> Result<(), CoreError> {
    let mut released = 0;
    for member in self.members.values_mut() {
      if member.forget(book_id) {
        warn!(book_id = %book_id, member_id = %member.id, "loan dropped, book removed or replaced");
        released += 1;
      }
    }

    if released > 0 {
      self.save_members()?;
    }
    Ok(())
  }

  // -------- PERSISTENCE --------

  fn admission(&self, exists: bool) -> AddOutcome {
    match (exists, self.options.on_duplicate) {
      (false, _) => AddOutcome::Added,
      (true, DuplicatePolicy::Overwrite) => AddOutcome::Replaced,
      (true, DuplicatePolicy::Reject) => AddOutcome::Duplicate,
    }
  }

  fn save_books(&self) -> Result<(), CoreError> {
    self.books_store.save_all(self.books.as_slice()).map_err(|e| CoreError::Repository(e.to_string()))?;
    debug!(count = self.books.len(), "books persisted");
    Ok(())
  }

  fn save_members(&self) -> Result<(), CoreError> {
    self.members_store.save_all(self.members.as_slice()).map_err(|e| CoreError::Repository(e.to_string()))?;
    debug!(count = self.members.len(), "members persisted");
    Ok(())
  }
}

fn load_registry<T, K, S>(store: &S, key_of: impl Fn(&T) -> K, kind: &str) -> Result<Registry<K, T>, CoreError>
where
  S: RecordStore<T>,
  K: Eq + Hash + Clone + std::fmt::Display,
{
  let mut registry = Registry::new();

  for record in store.load()? {
    let key = key_of(&record);
    if registry.insert(key.clone(), record).is_some() {
      warn!(kind, id = %key, "duplicate id in record store, keeping the last one");
    }
  }

  Ok(registry)
}
