//! Amazon marketplaces served by PA-API v5 and their endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported marketplaces with their PA-API hosts and AWS regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    Us,
    Uk,
    De,
    Fr,
    Es,
    It,
    Ca,
    Au,
    #[default]
    Jp,
    In,
    Br,
    Mx,
    Nl,
    Se,
    Pl,
}

impl Marketplace {
    /// Returns the Amazon domain for this marketplace.
    pub fn domain(&self) -> &'static str {
        match self {
            Marketplace::Us => "amazon.com",
            Marketplace::Uk => "amazon.co.uk",
            Marketplace::De => "amazon.de",
            Marketplace::Fr => "amazon.fr",
            Marketplace::Es => "amazon.es",
            Marketplace::It => "amazon.it",
            Marketplace::Ca => "amazon.ca",
            Marketplace::Au => "amazon.com.au",
            Marketplace::Jp => "amazon.co.jp",
            Marketplace::In => "amazon.in",
            Marketplace::Br => "amazon.com.br",
            Marketplace::Mx => "amazon.com.mx",
            Marketplace::Nl => "amazon.nl",
            Marketplace::Se => "amazon.se",
            Marketplace::Pl => "amazon.pl",
        }
    }

    /// Returns the PA-API host, e.g. `webservices.amazon.co.jp`.
    pub fn host(&self) -> String {
        format!("webservices.{}", self.domain())
    }

    /// Returns the marketplace name sent in requests, e.g. `www.amazon.co.jp`.
    pub fn marketplace(&self) -> String {
        format!("www.{}", self.domain())
    }

    /// Returns the PA-API endpoint base URL.
    pub fn base_url(&self) -> String {
        format!("https://{}", self.host())
    }

    /// Returns the AWS region used to sign requests for this marketplace.
    pub fn aws_region(&self) -> &'static str {
        match self {
            Marketplace::Us | Marketplace::Ca | Marketplace::Mx | Marketplace::Br => "us-east-1",
            Marketplace::Jp | Marketplace::Au => "us-west-2",
            Marketplace::Uk
            | Marketplace::De
            | Marketplace::Fr
            | Marketplace::Es
            | Marketplace::It
            | Marketplace::In
            | Marketplace::Nl
            | Marketplace::Se
            | Marketplace::Pl => "eu-west-1",
        }
    }

    /// Returns all supported marketplaces.
    pub fn all() -> &'static [Marketplace] {
        &[
            Marketplace::Us,
            Marketplace::Uk,
            Marketplace::De,
            Marketplace::Fr,
            Marketplace::Es,
            Marketplace::It,
            Marketplace::Ca,
            Marketplace::Au,
            Marketplace::Jp,
            Marketplace::In,
            Marketplace::Br,
            Marketplace::Mx,
            Marketplace::Nl,
            Marketplace::Se,
            Marketplace::Pl,
        ]
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Marketplace::Us => "us",
            Marketplace::Uk => "uk",
            Marketplace::De => "de",
            Marketplace::Fr => "fr",
            Marketplace::Es => "es",
            Marketplace::It => "it",
            Marketplace::Ca => "ca",
            Marketplace::Au => "au",
            Marketplace::Jp => "jp",
            Marketplace::In => "in",
            Marketplace::Br => "br",
            Marketplace::Mx => "mx",
            Marketplace::Nl => "nl",
            Marketplace::Se => "se",
            Marketplace::Pl => "pl",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Marketplace {
    type Err = ParseMarketplaceError;

    /// Accepts a locale code (`jp`), a PA-API host (`webservices.amazon.co.jp`),
    /// a marketplace name (`www.amazon.co.jp`) or a bare domain.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let domain = lower
            .strip_prefix("https://")
            .unwrap_or(&lower)
            .trim_end_matches('/')
            .trim_start_matches("webservices.")
            .trim_start_matches("www.");

        if let Some(m) = Marketplace::all().iter().find(|m| m.domain() == domain) {
            return Ok(*m);
        }

        match domain {
            "us" | "usa" => Ok(Marketplace::Us),
            "uk" | "gb" => Ok(Marketplace::Uk),
            "de" => Ok(Marketplace::De),
            "fr" => Ok(Marketplace::Fr),
            "es" => Ok(Marketplace::Es),
            "it" => Ok(Marketplace::It),
            "ca" => Ok(Marketplace::Ca),
            "au" => Ok(Marketplace::Au),
            "jp" | "japan" => Ok(Marketplace::Jp),
            "in" => Ok(Marketplace::In),
            "br" => Ok(Marketplace::Br),
            "mx" => Ok(Marketplace::Mx),
            "nl" => Ok(Marketplace::Nl),
            "se" => Ok(Marketplace::Se),
            "pl" => Ok(Marketplace::Pl),
            _ => Err(ParseMarketplaceError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown marketplace '{0}'. Run `books-data marketplaces` for the supported list")]
pub struct ParseMarketplaceError(String);
