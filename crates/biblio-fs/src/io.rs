use std::ffi::OsString;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Ruta del archivo temporal usado durante una escritura atómica.
///
/// Se añade `.tmp` a la extensión existente (`books.json` -> `books.json.tmp`)
/// para que dos archivos hermanos con distinta extensión no compartan temporal.
fn tmp_path_for(path: &Path) -> PathBuf {
  let mut ext = path.extension().map(OsString::from).unwrap_or_default();
  if !ext.is_empty() {
    ext.push(".");
  }
  ext.push("tmp");
  path.with_extension(ext)
}

/// Escribe `contents` en `path` de forma atómica: temporal + fsync + rename.
///
/// Crea el directorio padre si no existe.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let tmp_path = tmp_path_for(path);

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)?;
  Ok(())
}

/// Lee el archivo completo; `Ok(None)` si no existe.
pub fn read_to_string_if_exists(path: &Path) -> io::Result<Option<String>> {
  match fs::read_to_string(path) {
    Ok(content) => Ok(Some(content)),
    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
    Err(e) => Err(e),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn atomic_write_replaces_content_and_leaves_no_tmp() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("books.json");

    atomic_write_str(&path, "[1]").unwrap();
    atomic_write_str(&path, "[2]").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[2]");
    assert!(!tmp.path().join("books.json.tmp").exists());
  }

  #[test]
  fn atomic_write_creates_missing_parent_dirs() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("data").join("nested").join("members.json");

    atomic_write_str(&path, "[]").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
  }

  #[test]
  fn tmp_path_keeps_original_extension() {
    assert_eq!(tmp_path_for(Path::new("a/books.json")), PathBuf::from("a/books.json.tmp"));
    assert_eq!(tmp_path_for(Path::new("a/books")), PathBuf::from("a/books.tmp"));
  }

  #[test]
  fn missing_file_reads_as_none() {
    let tmp = tempdir().unwrap();
    assert!(read_to_string_if_exists(&tmp.path().join("nope.json")).unwrap().is_none());
  }
}
