pub mod cursor;
pub mod edit;
pub mod search;
pub mod session;
pub mod view;

pub use session::{SessionError, WorkLog};
