//! Book and review records.

pub mod book;
pub mod review;

pub use book::{Book, BookImage, Creator, Service};
pub use review::Review;
