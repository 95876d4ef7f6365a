//! Review command implementation.

use crate::config::Config;
use crate::ecode::ErrorCode;
use crate::entity::Review;
use crate::error::Error;
use crate::facade::{ApiFactory, Lookup, PaapiFactory, PaapiParams};
use crate::format::{BookFormatter, TemplateFormatter};
use crate::paapi::ClientOptions;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// User-supplied review fields. Unset fields keep the base review's values.
#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    /// Book to look up; replaces the book of the base review
    pub id: Option<String>,
    pub enable_isbn: bool,
    pub rating: Option<u8>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub bookpage_url: Option<String>,
    pub image_url: Option<String>,
    /// JSON review used as the base
    pub review_file: Option<PathBuf>,
}

/// Composes a review and renders it.
pub struct ReviewCommand {
    config: Config,
}

impl ReviewCommand {
    /// Creates a new review command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the command and returns the output bytes.
    pub async fn execute(&self, opts: &ReviewOptions) -> Result<Vec<u8>> {
        let factory = PaapiFactory::with_options(ClientOptions {
            base_url: None,
            proxy: self.config.proxy.clone(),
        });
        let lookup = Lookup::new(factory, TemplateFormatter::new(), None);

        self.execute_with_lookup(&lookup, opts).await
    }

    /// Executes the command with a provided dispatcher (for testing).
    pub async fn execute_with_lookup<F: ApiFactory, T: BookFormatter>(
        &self,
        lookup: &Lookup<F, T>,
        opts: &ReviewOptions,
    ) -> Result<Vec<u8>> {
        let review = self.compose(lookup, opts).await?;
        let output = lookup
            .formatter()
            .format_review(&review, self.config.review_template_file.as_deref())?;
        Ok(output)
    }

    /// Builds the review from the base review, the looked-up book and the overrides.
    pub async fn compose<F: ApiFactory, T: BookFormatter>(
        &self,
        lookup: &Lookup<F, T>,
        opts: &ReviewOptions,
    ) -> Result<Review> {
        let mut review = match &opts.review_file {
            Some(path) => load_review(path)?,
            None => Review::new(Local::now().date_naive()),
        };

        if let Some(id) = &opts.id {
            let params = PaapiParams::resolve(&self.config)?;
            info!("Looking up reviewed book: {}", id);
            review.book = Some(lookup.find(id, &params, opts.enable_isbn).await?);
        }

        if review.book.is_none() {
            return Err(Error::new(ErrorCode::NULL_REFERENCE, "review has no book").into());
        }

        if let Some(rating) = opts.rating {
            review.set_rating(rating);
        }
        if let Some(date) = opts.date {
            review.date = date;
        }
        if let Some(description) = &opts.description {
            review.description = description.clone();
        }
        if let Some(url) = &opts.bookpage_url {
            review.set_bookpage_url(url.as_str());
        }
        if let Some(url) = &opts.image_url {
            review.set_image_url(url.as_str());
        }

        Ok(review)
    }
}

/// Reads a JSON review file.
pub fn load_review(path: &Path) -> Result<Review> {
    debug!("Loading review from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read review file: {}", path.display()))?;
    let mut review: Review = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse review file: {}", path.display()))?;

    review.normalize();
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ByteStream, LookupApi};
    use crate::entity::{Book, BookImage};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    /// Mock lookup API returning a fixed book.
    #[derive(Clone)]
    struct MockApi {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl LookupApi for MockApi {
        async fn lookup_raw_data(&self, _id: &str) -> crate::error::Result<ByteStream> {
            unreachable!("review never asks for raw data")
        }

        async fn lookup_book(&self, id: &str) -> crate::error::Result<Book> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut book = Book::new(id, "Programming Rust");
            book.url = format!("https://www.amazon.co.jp/dp/{}", id);
            Ok(book)
        }
    }

    struct MockFactory {
        api: MockApi,
    }

    impl ApiFactory for MockFactory {
        fn create(
            &self,
            _params: &PaapiParams,
            _enable_isbn: bool,
        ) -> crate::error::Result<Box<dyn LookupApi>> {
            Ok(Box::new(self.api.clone()))
        }
    }

    fn make_config() -> Config {
        Config {
            associate_tag: "tag-22".to_string(),
            access_key: "AK".to_string(),
            secret_key: "SK".to_string(),
            ..Config::default()
        }
    }

    fn make_lookup() -> (Lookup<MockFactory, TemplateFormatter>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let api = MockApi { calls: calls.clone() };
        (Lookup::new(MockFactory { api }, TemplateFormatter::new(), None), calls)
    }

    fn write_review_file(review: &Review) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(review).unwrap()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_compose_with_lookup() {
        let (lookup, calls) = make_lookup();
        let cmd = ReviewCommand::new(make_config());
        let opts = ReviewOptions {
            id: Some("4873119030".to_string()),
            rating: Some(4),
            date: NaiveDate::from_ymd_opt(2024, 5, 6),
            description: Some("Great book".to_string()),
            ..ReviewOptions::default()
        };

        let review = cmd.compose(&lookup, &opts).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(review.book.as_ref().unwrap().id, "4873119030");
        assert_eq!(review.rating, 4);
        assert_eq!(review.star, [true, true, true, true, false]);
        assert_eq!(review.date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(review.description, "Great book");
    }

    #[tokio::test]
    async fn test_compose_clamps_rating() {
        let (lookup, _) = make_lookup();
        let cmd = ReviewCommand::new(make_config());
        let opts = ReviewOptions {
            id: Some("4873119030".to_string()),
            rating: Some(9),
            ..ReviewOptions::default()
        };

        let review = cmd.compose(&lookup, &opts).await.unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.star, [true; 5]);
    }

    #[tokio::test]
    async fn test_compose_without_book() {
        let (lookup, calls) = make_lookup();
        let cmd = ReviewCommand::new(make_config());

        let err = cmd.compose(&lookup, &ReviewOptions::default()).await.unwrap_err();
        let err = err.downcast_ref::<Error>().unwrap();
        assert_eq!(err.code(), Some(ErrorCode::NULL_REFERENCE));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_compose_from_review_file() {
        let mut base = Review::new(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        base.book = Some(Book::new("4621300253", "Old Title"));
        base.rating = 3;
        base.description = "first impression".to_string();
        let file = write_review_file(&base);

        let (lookup, calls) = make_lookup();
        let cmd = ReviewCommand::new(make_config());
        let opts = ReviewOptions {
            review_file: Some(file.path().to_path_buf()),
            bookpage_url: Some("https://example.com/book".to_string()),
            image_url: Some("https://example.com/cover.jpg".to_string()),
            ..ReviewOptions::default()
        };

        let review = cmd.compose(&lookup, &opts).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(review.date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(review.star, [true, true, true, false, false]);
        assert_eq!(review.description, "first impression");

        let book = review.book.unwrap();
        assert_eq!(book.title, "Old Title");
        assert_eq!(book.url, "https://example.com/book");
        assert_eq!(
            book.image,
            Some(BookImage { url: "https://example.com/cover.jpg".to_string(), height: 0, width: 0 })
        );
    }

    #[tokio::test]
    async fn test_compose_lookup_replaces_file_book() {
        let mut base = Review::new(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        base.book = Some(Book::new("4621300253", "Old Title"));
        let file = write_review_file(&base);

        let (lookup, _) = make_lookup();
        let cmd = ReviewCommand::new(make_config());
        let opts = ReviewOptions {
            id: Some("4873119030".to_string()),
            review_file: Some(file.path().to_path_buf()),
            ..ReviewOptions::default()
        };

        let review = cmd.compose(&lookup, &opts).await.unwrap();
        assert_eq!(review.book.unwrap().title, "Programming Rust");
        assert_eq!(review.date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    }

    #[tokio::test]
    async fn test_execute_with_template() {
        let mut template = NamedTempFile::new().unwrap();
        write!(template, "{{{{ book.title }}}}: {{{{ rating }}}}/5").unwrap();

        let config =
            Config { review_template_file: Some(template.path().to_path_buf()), ..make_config() };
        let (lookup, _) = make_lookup();
        let cmd = ReviewCommand::new(config);
        let opts = ReviewOptions {
            id: Some("4873119030".to_string()),
            rating: Some(5),
            ..ReviewOptions::default()
        };

        let output = cmd.execute_with_lookup(&lookup, &opts).await.unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "Programming Rust: 5/5");
    }

    #[test]
    fn test_load_review_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_review(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse review file"));
    }
}
