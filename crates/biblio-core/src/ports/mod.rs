pub mod memory;
pub mod record_store;

pub use memory::MemoryRecordStore;
pub use record_store::{RecordStore, RepoError};
