//! Search command implementation.

use crate::config::Config;
use crate::facade::{ApiFactory, Lookup, PaapiFactory, PaapiParams};
use crate::format::{BookFormatter, TemplateFormatter};
use crate::paapi::ClientOptions;
use anyhow::{Context, Result};
use std::io::Read;
use tracing::info;

/// Looks up a single book and renders it.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the lookup and returns the output bytes.
    pub async fn execute(&self, id: &str, enable_isbn: bool, raw: bool) -> Result<Vec<u8>> {
        let factory = PaapiFactory::with_options(ClientOptions {
            base_url: None,
            proxy: self.config.proxy.clone(),
        });
        let lookup =
            Lookup::new(factory, TemplateFormatter::new(), self.config.template_file.clone());

        self.execute_with_lookup(&lookup, id, enable_isbn, raw).await
    }

    /// Executes the lookup with a provided dispatcher (for testing).
    pub async fn execute_with_lookup<F: ApiFactory, T: BookFormatter>(
        &self,
        lookup: &Lookup<F, T>,
        id: &str,
        enable_isbn: bool,
        raw: bool,
    ) -> Result<Vec<u8>> {
        let params = PaapiParams::resolve(&self.config)?;
        info!("Searching for: {} (isbn: {}, raw: {})", id, enable_isbn, raw);

        let mut stream = lookup.search(id, &params, enable_isbn, raw).await?;

        let mut output = Vec::new();
        stream.read_to_end(&mut output).context("Failed to read lookup result")?;
        Ok(output)
    }
}
