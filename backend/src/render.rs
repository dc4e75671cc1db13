//! User-facing text for every library outcome.
//!
//! The core only returns values; this is the single place that turns them
//! into console messages.

use biblio_core::domain::{Book, BorrowOutcome, Displayable, ReturnOutcome};
use biblio_core::services::{AddOutcome, MemberView, Missing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
  Book,
  Member,
}

impl Entity {
  fn noun(self) -> &'static str {
    match self {
      Entity::Book => "Libro",
      Entity::Member => "Socio",
    }
  }
}

pub fn added(entity: Entity, id: &str, label: &str, outcome: AddOutcome) -> String {
  match outcome {
    AddOutcome::Added => format!("✅ {} '{label}' añadido.", entity.noun()),
    AddOutcome::Replaced => format!("🔄 {} '{label}' reemplazado (ID {id}).", entity.noun()),
    AddOutcome::Duplicate => format!("❌ Ya existe un {} con ID {id}.", entity.noun().to_lowercase()),
  }
}

pub fn removed(entity: Entity) -> String {
  format!("🗑️ {} eliminado.", entity.noun())
}

pub fn updated(entity: Entity) -> String {
  format!("🔄 {} actualizado.", entity.noun())
}

pub fn not_found(missing: &Missing) -> String {
  match missing {
    Missing::Book(id) => format!("❌ Libro {id} no encontrado."),
    Missing::Member(id) => format!("❌ Socio {id} no encontrado."),
  }
}

pub fn borrow(outcome: BorrowOutcome, member_name: &str, book_title: &str) -> String {
  match outcome {
    BorrowOutcome::Borrowed => format!("{member_name} ha tomado prestado '{book_title}'"),
    BorrowOutcome::Unavailable => format!("'{book_title}' no está disponible"),
    BorrowOutcome::AlreadyBorrowed => format!("{member_name} ya tiene prestado '{book_title}'"),
  }
}

pub fn give_back(outcome: ReturnOutcome, member_name: &str, book_title: &str) -> String {
  match outcome {
    ReturnOutcome::Returned => format!("{member_name} ha devuelto '{book_title}'"),
    ReturnOutcome::NotBorrowed => format!("{member_name} no tiene prestado '{book_title}'"),
    ReturnOutcome::CopiesFull => format!("'{book_title}' ya tiene el máximo de ejemplares; el préstamo sigue abierto"),
  }
}

pub fn book_list<'a>(books: impl Iterator<Item = &'a Book>) -> String {
  let mut out = String::from("\n📚 Libros de la biblioteca:\n");
  let mut empty = true;
  for book in books {
    empty = false;
    out.push_str(&book.display_info());
  }
  if empty {
    out.push_str("No hay libros en la biblioteca.\n");
  }
  out
}

pub fn member_list<'a>(members: impl Iterator<Item = MemberView<'a>>) -> String {
  let mut out = String::from("\n👥 Socios registrados:\n");
  let mut empty = true;
  for member in members {
    empty = false;
    out.push_str(&member.display_info());
  }
  if empty {
    out.push_str("No hay socios registrados.\n");
  }
  out
}
