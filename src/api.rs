//! Lookup API seam shared by the services and the facade.

use crate::entity::Book;
use crate::error::Result;
use async_trait::async_trait;
use std::io::Read;

/// Readable stream of response or formatted bytes.
pub type ByteStream = Box<dyn Read + Send>;

/// Wraps owned bytes in a [`ByteStream`].
pub fn byte_stream(bytes: Vec<u8>) -> ByteStream {
    Box::new(std::io::Cursor::new(bytes))
}

/// Book lookup operations - enables mocking for tests.
#[async_trait]
pub trait LookupApi: Send + Sync {
    /// Fetches the raw API response for `id`.
    async fn lookup_raw_data(&self, id: &str) -> Result<ByteStream>;

    /// Fetches and decodes the book identified by `id`.
    async fn lookup_book(&self, id: &str) -> Result<Book>;
}
