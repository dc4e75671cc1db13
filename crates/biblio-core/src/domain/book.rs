use crate::domain::ids::BookId;

/// Un título del catálogo y cuántos ejemplares quedan en estantería.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
  /// Identificador único; no cambia una vez creado.
  pub id: BookId,
  pub title: String,
  pub author: String,
  /// Ejemplares disponibles para préstamo (no los que posee la biblioteca).
  pub copies: u32,
}

impl Book {
  pub fn new(id: impl Into<BookId>, title: impl Into<String>, author: impl Into<String>, copies: u32) -> Self {
    Self { id: id.into(), title: title.into(), author: author.into(), copies }
  }

  /// `true` si queda al menos un ejemplar.
  pub fn is_available(&self) -> bool {
    self.copies > 0
  }

  /// Retira un ejemplar. `false` (sin tocar nada) si no quedaba ninguno.
  pub(crate) fn take_copy(&mut self) -> bool {
    match self.copies.checked_sub(1) {
      Some(left) => {
        self.copies = left;
        true
      }
      None => false,
    }
  }

  /// Repone un ejemplar. `false` (sin tocar nada) si el contador está lleno.
  pub(crate) fn put_back_copy(&mut self) -> bool {
    match self.copies.checked_add(1) {
      Some(total) => {
        self.copies = total;
        true
      }
      None => false,
    }
  }
}

/// Cambios parciales sobre un libro.
///
/// Cada campo es explícito: `None` = no tocar, `Some("")` = dejarlo vacío.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
  pub title: Option<String>,
  pub author: Option<String>,
  pub copies: Option<u32>,
}

impl BookUpdate {
  pub(crate) fn apply(self, book: &mut Book) {
    if let Some(title) = self.title {
      book.title = title;
    }
    if let Some(author) = self.author {
      book.author = author;
    }
    if let Some(copies) = self.copies {
      book.copies = copies;
    }
  }
}
