pub mod library_service;
pub mod options;
pub mod outcome;

pub use library_service::{LibraryService, MemberView};
pub use options::{DuplicatePolicy, LibraryOptions};
pub use outcome::{AddOutcome, Missing, Outcome};
