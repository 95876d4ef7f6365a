//! Book lookup dispatch over a pluggable API and formatter.

use crate::api::{byte_stream, ByteStream, LookupApi};
use crate::entity::Book;
use crate::error::{Error, Result};
use crate::facade::PaapiParams;
use crate::format::BookFormatter;
use crate::paapi::{ClientOptions, PaapiClient};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builds lookup API clients from resolved parameters.
pub trait ApiFactory: Send + Sync {
    fn create(&self, params: &PaapiParams, enable_isbn: bool) -> Result<Box<dyn LookupApi>>;
}

/// Factory for the PA-API client.
#[derive(Debug, Clone, Default)]
pub struct PaapiFactory {
    options: ClientOptions,
}

impl PaapiFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory whose clients use `options` (proxy, endpoint override).
    pub fn with_options(options: ClientOptions) -> Self {
        Self { options }
    }
}

impl ApiFactory for PaapiFactory {
    fn create(&self, params: &PaapiParams, enable_isbn: bool) -> Result<Box<dyn LookupApi>> {
        let client = PaapiClient::with_options(params, enable_isbn, &self.options)?;
        Ok(Box::new(client))
    }
}

/// Looks books up and renders them.
pub struct Lookup<F: ApiFactory, T: BookFormatter> {
    factory: F,
    formatter: T,
    template: Option<PathBuf>,
}

impl<F: ApiFactory, T: BookFormatter> Lookup<F, T> {
    /// Creates a dispatcher. `template` is used for structured output.
    pub fn new(factory: F, formatter: T, template: Option<PathBuf>) -> Self {
        Self { factory, formatter, template }
    }

    pub fn formatter(&self) -> &T {
        &self.formatter
    }

    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    /// Looks up `id` and returns either the raw API response or the formatted book.
    ///
    /// Raw results and errors are returned as the API produced them. Structured
    /// lookup and formatting failures are wrapped with the `id` parameter.
    pub async fn search(
        &self,
        id: &str,
        params: &PaapiParams,
        enable_isbn: bool,
        raw: bool,
    ) -> Result<ByteStream> {
        let api = self.factory.create(params, enable_isbn)?;

        if raw {
            debug!("Raw lookup: {}", id);
            return api.lookup_raw_data(id).await;
        }

        let book = api
            .lookup_book(id)
            .await
            .map_err(|e| Error::wrap(e, "failed to look up book").with_param("id", id))?;

        let bytes = self
            .formatter
            .format_book(&book, self.template())
            .map_err(|e| Error::wrap(e, "failed to format book").with_param("id", id))?;

        Ok(byte_stream(bytes))
    }

    /// Looks up `id` as a structured book. Errors are returned unmodified.
    pub async fn find(&self, id: &str, params: &PaapiParams, enable_isbn: bool) -> Result<Book> {
        let api = self.factory.create(params, enable_isbn)?;
        api.lookup_book(id).await
    }
}
