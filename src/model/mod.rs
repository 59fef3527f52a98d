pub mod config;
pub mod record;
pub mod store;

pub use config::*;
pub use record::*;
pub use store::*;
