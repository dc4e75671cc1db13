use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qué hacer cuando se da de alta una entidad con un id que ya existe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
  /// Se rechaza el alta y la entidad existente queda intacta.
  #[default]
  Reject,
  /// La nueva entidad sustituye a la existente (misma posición).
  Overwrite,
}

impl fmt::Display for DuplicatePolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DuplicatePolicy::Reject => f.write_str("reject"),
      DuplicatePolicy::Overwrite => f.write_str("overwrite"),
    }
  }
}

impl FromStr for DuplicatePolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "reject" => Ok(DuplicatePolicy::Reject),
      "overwrite" => Ok(DuplicatePolicy::Overwrite),
      other => Err(format!("unknown duplicate policy `{other}` (expected reject|overwrite)")),
    }
  }
}

/// Ajustes de comportamiento del servicio; se cargan de la sección `[library]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryOptions {
  #[serde(default)]
  pub on_duplicate: DuplicatePolicy,
}
