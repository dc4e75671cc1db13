use serde::{Deserialize, Serialize};
use std::fmt;

/// Identificador de un libro.
///
/// Lo elige quien da de alta el libro (código interno, ISBN, signatura...),
/// por eso es texto libre y no un UUID generado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
  pub fn new(id: impl Into<String>) -> Self {
    BookId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<String> for BookId {
  fn from(s: String) -> Self {
    BookId(s)
  }
}

impl From<&str> for BookId {
  fn from(s: &str) -> Self {
    BookId(s.to_owned())
  }
}

impl From<BookId> for String {
  fn from(id: BookId) -> Self {
    id.0
  }
}

impl fmt::Display for BookId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Identificador de un socio de la biblioteca.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
  pub fn new(id: impl Into<String>) -> Self {
    MemberId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<String> for MemberId {
  fn from(s: String) -> Self {
    MemberId(s)
  }
}

impl From<&str> for MemberId {
  fn from(s: &str) -> Self {
    MemberId(s.to_owned())
  }
}

impl From<MemberId> for String {
  fn from(id: MemberId) -> Self {
    id.0
  }
}

impl fmt::Display for MemberId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
