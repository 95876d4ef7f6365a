//! books-data - Book metadata lookup through the Amazon Product Advertising API
//!
//! Resolves PA-API credentials from configuration, looks books up by ASIN or
//! ISBN and renders them as JSON or through Jinja templates.

pub mod api;
pub mod commands;
pub mod config;
pub mod ecode;
pub mod entity;
pub mod error;
pub mod facade;
pub mod format;
pub mod isbn;
pub mod paapi;

pub use api::{ByteStream, LookupApi};
pub use config::{Config, ConfigSource};
pub use ecode::ErrorCode;
pub use entity::{Book, Review};
pub use error::{Error, Result};
pub use facade::{Lookup, PaapiParams};
