//! CLI command implementations.

pub mod review;
pub mod search;

pub use review::{ReviewCommand, ReviewOptions};
pub use search::SearchCommand;
