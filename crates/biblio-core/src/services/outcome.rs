use crate::domain::{BookId, MemberId};
use std::fmt;

/// Qué entidad faltaba cuando una operación no encontró su objetivo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
  Book(BookId),
  Member(MemberId),
}

impl fmt::Display for Missing {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Missing::Book(id) => write!(f, "book `{id}` not found"),
      Missing::Member(id) => write!(f, "member `{id}` not found"),
    }
  }
}

/// Resultado de una operación sobre una entidad identificada por id.
///
/// `NotFound` es un caso de negocio normal (id tecleado mal), no un error:
/// no hubo cambios ni se persistió nada.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
  Done(T),
  NotFound(Missing),
}

impl<T> Outcome<T> {
  pub fn is_done(&self) -> bool {
    matches!(self, Outcome::Done(_))
  }

  pub fn done(self) -> Option<T> {
    match self {
      Outcome::Done(v) => Some(v),
      Outcome::NotFound(_) => None,
    }
  }

  pub fn missing(&self) -> Option<&Missing> {
    match self {
      Outcome::Done(_) => None,
      Outcome::NotFound(m) => Some(m),
    }
  }
}

/// Resultado de un alta.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
  Added,
  /// El id existía y la política es `Overwrite`.
  Replaced,
  /// El id existía y la política es `Reject`; nada cambió.
  Duplicate,
}
