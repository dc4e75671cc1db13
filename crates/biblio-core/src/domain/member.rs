use crate::domain::book::Book;
use crate::domain::ids::{BookId, MemberId};

/// Resultado de intentar prestar un libro a un socio.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowOutcome {
  Borrowed,
  /// No quedan ejemplares.
  Unavailable,
  /// El socio ya tiene este libro.
  AlreadyBorrowed,
}

/// Resultado de intentar devolver un libro.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
  Returned,
  /// El socio no tenía este libro.
  NotBorrowed,
  /// El contador de ejemplares ya está en `u32::MAX`; el préstamo se mantiene.
  CopiesFull,
}

/// Socio de la biblioteca.
///
/// Los libros prestados se guardan por id: el `Book` pertenece siempre a la
/// biblioteca y el socio solo lo referencia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
  /// Identificador único; no cambia una vez creado.
  pub id: MemberId,
  pub name: String,
  borrowed: Vec<BookId>,
}

impl Member {
  pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
    Self { id: id.into(), name: name.into(), borrowed: Vec::new() }
  }

  /// Reconstruye un socio con sus préstamos (p. ej. al leer del almacén).
  ///
  /// Los ids repetidos se descartan conservando la primera aparición.
  pub fn with_borrowed(id: impl Into<MemberId>, name: impl Into<String>, borrowed: Vec<BookId>) -> Self {
    let mut member = Self::new(id, name);
    for book_id in borrowed {
      if !member.has_borrowed(&book_id) {
        member.borrowed.push(book_id);
      }
    }
    member
  }

  /// Libros prestados, en el orden en que se prestaron.
  pub fn borrowed(&self) -> &[BookId] {
    &self.borrowed
  }

  pub fn has_borrowed(&self, book_id: &BookId) -> bool {
    self.borrowed.contains(book_id)
  }

  /// Presta un ejemplar de `book` a este socio.
  ///
  /// Sin ejemplares el resultado es siempre `Unavailable`, lo tenga o no el
  /// socio; con ejemplares, repetir un libro da `AlreadyBorrowed`. En ambos
  /// casos no cambia nada.
  pub fn borrow(&mut self, book: &mut Book) -> BorrowOutcome {
    if !book.is_available() {
      return BorrowOutcome::Unavailable;
    }
    if self.has_borrowed(&book.id) {
      return BorrowOutcome::AlreadyBorrowed;
    }
    if !book.take_copy() {
      return BorrowOutcome::Unavailable;
    }

    self.borrowed.push(book.id.clone());
    BorrowOutcome::Borrowed
  }

  /// Devuelve `book` si este socio lo tenía prestado.
  pub fn return_book(&mut self, book: &mut Book) -> ReturnOutcome {
    let Some(pos) = self.borrowed.iter().position(|id| *id == book.id) else {
      return ReturnOutcome::NotBorrowed;
    };
    if !book.put_back_copy() {
      return ReturnOutcome::CopiesFull;
    }

    self.borrowed.remove(pos);
    ReturnOutcome::Returned
  }

  /// Olvida el préstamo de `book_id` sin tocar ejemplares (el libro ya no es
  /// el mismo o ha desaparecido del catálogo). `true` si lo tenía.
  pub(crate) fn forget(&mut self, book_id: &BookId) -> bool {
    let before = self.borrowed.len();
    self.borrowed.retain(|id| id != book_id);
    self.borrowed.len() != before
  }
}

/// Cambios parciales sobre un socio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberUpdate {
  pub name: Option<String>,
}

impl MemberUpdate {
  pub(crate) fn apply(self, member: &mut Member) {
    if let Some(name) = self.name {
      member.name = name;
    }
  }
}
