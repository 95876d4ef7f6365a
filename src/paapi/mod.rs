//! Amazon Product Advertising API v5 client.

pub mod client;
pub mod marketplace;
pub mod models;
pub mod parser;
pub mod signer;

pub use client::{ClientOptions, PaapiClient};
pub use marketplace::Marketplace;
