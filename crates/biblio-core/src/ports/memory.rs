use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::ports::record_store::{RecordStore, RepoError};

/// Almacén en memoria.
///
/// Los clones comparten estado, así un test puede entregar un clon al servicio
/// y seguir inspeccionando lo que se guardó.
#[derive(Debug)]
pub struct MemoryRecordStore<T> {
  records: Rc<RefCell<Vec<T>>>,
  saves: Rc<Cell<usize>>,
  fail_saves: Rc<Cell<bool>>,
}

impl<T> Clone for MemoryRecordStore<T> {
  fn clone(&self) -> Self {
    Self { records: Rc::clone(&self.records), saves: Rc::clone(&self.saves), fail_saves: Rc::clone(&self.fail_saves) }
  }
}

impl<T> Default for MemoryRecordStore<T> {
  fn default() -> Self {
    Self::with_records(Vec::new())
  }
}

impl<T> MemoryRecordStore<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_records(records: Vec<T>) -> Self {
    Self { records: Rc::new(RefCell::new(records)), saves: Rc::new(Cell::new(0)), fail_saves: Rc::new(Cell::new(false)) }
  }

  /// Número de llamadas a `save_all` que terminaron bien.
  pub fn save_count(&self) -> usize {
    self.saves.get()
  }

  /// A partir de ahora `save_all` falla con `RepoError::Storage`.
  pub fn fail_saves(&self, fail: bool) {
    self.fail_saves.set(fail);
  }
}

impl<T: Clone> MemoryRecordStore<T> {
  pub fn snapshot(&self) -> Vec<T> {
    self.records.borrow().clone()
  }
}

impl<T: Clone> RecordStore<T> for MemoryRecordStore<T> {
  fn load(&self) -> Result<Vec<T>, RepoError> {
    Ok(self.snapshot())
  }

  fn save_all(&self, records: &[T]) -> Result<(), RepoError> {
    if self.fail_saves.get() {
      return Err(RepoError::Storage("memory store configured to fail".to_string()));
    }

    *self.records.borrow_mut() = records.to_vec();
    self.saves.set(self.saves.get() + 1);
    Ok(())
  }
}
