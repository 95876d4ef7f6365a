//! PA-API parameter bundle assembled from a configuration source.

use crate::config::ConfigSource;
use crate::ecode::ErrorCode;
use crate::error::{Error, Result};

pub const MARKETPLACE_KEY: &str = "marketplace";
pub const ASSOCIATE_TAG_KEY: &str = "associate-tag";
pub const ACCESS_KEY_KEY: &str = "access-key";
pub const SECRET_KEY_KEY: &str = "secret-key";

/// Validated PA-API credentials and endpoint. Every field is non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct PaapiParams {
    marketplace: String,
    associate_tag: String,
    access_key: String,
    secret_key: String,
}

impl PaapiParams {
    /// Reads the four required values from `source`.
    ///
    /// Fields are checked in the order marketplace, associate tag, access key,
    /// secret key; the first empty one fails with `InvalidAPIParameter`.
    /// Values are kept exactly as read.
    pub fn resolve(source: &impl ConfigSource) -> Result<Self> {
        Ok(Self {
            marketplace: required(source, MARKETPLACE_KEY)?,
            associate_tag: required(source, ASSOCIATE_TAG_KEY)?,
            access_key: required(source, ACCESS_KEY_KEY)?,
            secret_key: required(source, SECRET_KEY_KEY)?,
        })
    }

    pub fn marketplace(&self) -> &str {
        &self.marketplace
    }

    pub fn associate_tag(&self) -> &str {
        &self.associate_tag
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for PaapiParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaapiParams")
            .field("marketplace", &self.marketplace)
            .field("associate_tag", &self.associate_tag)
            .field("access_key", &"***")
            .field("secret_key", &"***")
            .finish()
    }
}

fn required(source: &impl ConfigSource, key: &str) -> Result<String> {
    let value = source.get_string(key);
    if value.is_empty() {
        return Err(Error::new(ErrorCode::INVALID_API_PARAMETER, format!("{} is empty", key))
            .with_param("key", key));
    }
    Ok(value)
}
