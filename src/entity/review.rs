//! Review record composed from a book and user-supplied fields.

use super::Book;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest rating a review can carry.
pub const MAX_RATING: u8 = 5;

/// A book review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewed book
    #[serde(default)]
    pub book: Option<Book>,
    /// Review date
    pub date: NaiveDate,
    /// Rating (0 means unrated)
    #[serde(default)]
    pub rating: u8,
    /// Filled stars for templates, derived from `rating`
    #[serde(default)]
    pub star: [bool; 5],
    /// Free-form review text
    #[serde(default)]
    pub description: String,
}

impl Review {
    /// Creates an unrated review dated `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self { book: None, date, rating: 0, star: [false; 5], description: String::new() }
    }

    /// Sets the rating, clamped to 0..=5, and refreshes the stars.
    pub fn set_rating(&mut self, rating: u8) {
        self.rating = rating.min(MAX_RATING);
        self.star = stars(self.rating);
    }

    /// Recomputes `star` from `rating`. Used after loading a review file.
    pub fn normalize(&mut self) {
        self.set_rating(self.rating);
    }

    /// Overrides the book detail page URL.
    pub fn set_bookpage_url(&mut self, url: impl Into<String>) {
        if let Some(book) = self.book.as_mut() {
            book.url = url.into();
        }
    }

    /// Overrides the cover image URL. Creates the image if the book had none.
    pub fn set_image_url(&mut self, url: impl Into<String>) {
        if let Some(book) = self.book.as_mut() {
            match book.image.as_mut() {
                Some(image) => image.url = url.into(),
                None => {
                    book.image = Some(super::BookImage { url: url.into(), height: 0, width: 0 })
                }
            }
        }
    }
}

fn stars(rating: u8) -> [bool; 5] {
    let mut star = [false; 5];
    for (i, s) in star.iter_mut().enumerate() {
        *s = i < rating as usize;
    }
    star
}
