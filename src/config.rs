//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default PA-API endpoint host.
pub const DEFAULT_MARKETPLACE: &str = "webservices.amazon.co.jp";

/// String-keyed configuration lookup. Unset keys read as an empty string.
pub trait ConfigSource {
    fn get_string(&self, key: &str) -> String;
}

impl ConfigSource for HashMap<String, String> {
    fn get_string(&self, key: &str) -> String {
        self.get(key).cloned().unwrap_or_default()
    }
}

/// Application configuration with layered loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// PA-API host or marketplace (e.g., webservices.amazon.co.jp)
    #[serde(default = "default_marketplace")]
    pub marketplace: String,

    /// Associate (partner) tag
    #[serde(default)]
    pub associate_tag: String,

    /// PA-API access key
    #[serde(default)]
    pub access_key: String,

    /// PA-API secret key
    #[serde(default)]
    pub secret_key: String,

    /// Template for `search` output
    #[serde(default)]
    pub template_file: Option<PathBuf>,

    /// Template for `review` output
    #[serde(default)]
    pub review_template_file: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,
}

fn default_marketplace() -> String {
    DEFAULT_MARKETPLACE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marketplace: default_marketplace(),
            associate_tag: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            template_file: None,
            review_template_file: None,
            proxy: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try user config directory
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                debug!("Found config in user config directory");
                return Self::from_file(config_path);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Returns `<config_dir>/books-data/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("books-data").join("config.toml"))
    }

    /// Applies environment variable overrides.
    pub fn with_env(self) -> Self {
        self.with_vars(|name| std::env::var(name).ok())
    }

    fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var("BOOKS_DATA_MARKETPLACE") {
            self.marketplace = v;
        }
        if let Some(v) = var("BOOKS_DATA_ASSOCIATE_TAG") {
            self.associate_tag = v;
        }
        if let Some(v) = var("BOOKS_DATA_ACCESS_KEY") {
            self.access_key = v;
        }
        if let Some(v) = var("BOOKS_DATA_SECRET_KEY") {
            self.secret_key = v;
        }
        if let Some(v) = var("BOOKS_DATA_TEMPLATE_FILE") {
            self.template_file = Some(PathBuf::from(v));
        }
        if let Some(v) = var("BOOKS_DATA_REVIEW_TEMPLATE_FILE") {
            self.review_template_file = Some(PathBuf::from(v));
        }
        if let Some(v) = var("BOOKS_DATA_PROXY") {
            self.proxy = Some(v);
        }
        self
    }
}

impl ConfigSource for Config {
    fn get_string(&self, key: &str) -> String {
        let path = |p: &Option<PathBuf>| {
            p.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
        };
        match key {
            "marketplace" => self.marketplace.clone(),
            "associate-tag" => self.associate_tag.clone(),
            "access-key" => self.access_key.clone(),
            "secret-key" => self.secret_key.clone(),
            "template-file" => path(&self.template_file),
            "review-template-file" => path(&self.review_template_file),
            "proxy" => self.proxy.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}
