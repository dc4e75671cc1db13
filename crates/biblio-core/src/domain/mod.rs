pub mod book;
pub mod display;
pub mod ids;
pub mod member;
pub mod registry;

pub use book::{Book, BookUpdate};
pub use display::Displayable;
pub use ids::{BookId, MemberId};
pub use member::{BorrowOutcome, Member, MemberUpdate, ReturnOutcome};
pub use registry::Registry;
