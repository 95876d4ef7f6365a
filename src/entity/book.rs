//! Book record returned by the lookup services.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Structured metadata about a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// ASIN (ISBN-10 for most books)
    pub id: String,
    /// Book title
    pub title: String,
    /// Detail page URL
    #[serde(default)]
    pub url: String,
    /// Cover image
    #[serde(default)]
    pub image: Option<BookImage>,
    /// Binding or product type ("Paperback", "Kindle Edition", ...)
    #[serde(default)]
    pub product_type: String,
    /// Authors, translators and other contributors
    #[serde(default)]
    pub creators: Vec<Creator>,
    /// Publisher or manufacturer
    #[serde(default)]
    pub publisher: String,
    /// First publication date
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    /// Release date of this edition
    #[serde(default)]
    pub last_release: Option<NaiveDate>,
    /// Service the record was fetched from
    #[serde(default)]
    pub service: Service,
}

impl Book {
    /// Creates a book with only an id and a title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: String::new(),
            image: None,
            product_type: String::new(),
            creators: Vec::new(),
            publisher: String::new(),
            publication_date: None,
            last_release: None,
            service: Service::default(),
        }
    }
}

/// Cover image with its pixel size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookImage {
    pub url: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
}

/// A contributor and the role they played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl Creator {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self { name: name.into(), role: role.into() }
    }
}

/// Lookup service a record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub url: String,
}

impl Service {
    pub const PAAPI_NAME: &'static str = "PA-API";

    /// The Amazon Product Advertising API.
    pub fn paapi() -> Self {
        Self {
            name: Self::PAAPI_NAME.to_string(),
            url: "https://affiliate.amazon.co.jp/assoc_credentials/home".to_string(),
        }
    }
}

impl Default for Service {
    fn default() -> Self {
        Self::paapi()
    }
}
