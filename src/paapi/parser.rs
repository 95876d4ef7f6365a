//! Decodes PA-API `GetItems` responses into [`Book`] records.

use crate::ecode::ErrorCode;
use crate::entity::{Book, BookImage, Creator, Service};
use crate::error::{Error, Result};
use crate::paapi::models::{GetItemsResponse, Item};
use chrono::{DateTime, NaiveDate};
use tracing::{debug, warn};

/// Parses a `GetItems` response body and returns its first item as a book.
pub fn parse_book(body: &[u8], id: &str) -> Result<Book> {
    let resp: GetItemsResponse = serde_json::from_slice(body).map_err(|e| {
        Error::wrap(e, "malformed PA-API response")
            .with_code(ErrorCode::INVALID_API_RESPONSE)
            .with_param("id", id)
    })?;

    let items = resp.items_result.map(|r| r.items).unwrap_or_default();
    if items.is_empty() && !resp.errors.is_empty() {
        let messages: Vec<String> =
            resp.errors.iter().map(|e| format!("{}: {}", e.code, e.message)).collect();
        return Err(Error::new(ErrorCode::INVALID_API_RESPONSE, messages.join("; "))
            .with_param("id", id));
    }

    for e in &resp.errors {
        warn!("PA-API reported {} for {}: {}", e.code, id, e.message);
    }

    let item = items
        .into_iter()
        .next()
        .ok_or_else(|| Error::new(ErrorCode::NO_DATA, "no item returned").with_param("id", id))?;

    debug!("Decoded item {}", item.asin);
    Ok(item_to_book(item))
}

fn item_to_book(item: Item) -> Book {
    let mut book = Book::new(item.asin, String::new());
    book.url = item.detail_page_url.unwrap_or_default();
    book.service = Service::paapi();

    book.image = item
        .images
        .and_then(|i| i.primary)
        .and_then(|p| p.medium.or(p.large).or(p.small))
        .map(|img| BookImage { url: img.url, height: img.height, width: img.width });

    let Some(info) = item.item_info else {
        return book;
    };

    if let Some(title) = info.title {
        book.title = title.display_value;
    }

    if let Some(by_line) = info.by_line_info {
        book.creators =
            by_line.contributors.into_iter().map(|c| Creator::new(c.name, c.role)).collect();
        book.publisher = by_line
            .manufacturer
            .or(by_line.brand)
            .map(|v| v.display_value)
            .unwrap_or_default();
    }

    if let Some(class) = info.classifications {
        book.product_type = class
            .binding
            .or(class.product_group)
            .map(|v| v.display_value)
            .unwrap_or_default();
    }

    book.publication_date = info
        .content_info
        .and_then(|c| c.publication_date)
        .and_then(|v| parse_date(&v.display_value));
    book.last_release = info
        .product_info
        .and_then(|p| p.release_date)
        .and_then(|v| parse_date(&v.display_value));

    book
}

/// Parses the date formats PA-API emits: RFC 3339, `YYYY-MM-DD`, `YYYY-MM` and `YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01-01", s), "%Y-%m-%d") {
        return Some(d);
    }
    warn!("Unrecognized date: {}", s);
    None
}
