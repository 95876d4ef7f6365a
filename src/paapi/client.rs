//! HTTP client for PA-API v5 `GetItems` requests.

use crate::api::{byte_stream, ByteStream, LookupApi};
use crate::ecode::ErrorCode;
use crate::entity::Book;
use crate::error::{Error, Result};
use crate::facade::PaapiParams;
use crate::isbn::Isbn;
use crate::paapi::marketplace::Marketplace;
use crate::paapi::models::{GetItemsRequest, GetItemsResponse};
use crate::paapi::parser;
use crate::paapi::signer::{Signer, CONTENT_ENCODING, CONTENT_TYPE};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

const GET_ITEMS_PATH: &str = "/paapi5/getitems";
const GET_ITEMS_TARGET: &str = "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetItems";

/// Transport options that do not belong to the API parameters.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Endpoint override (for testing)
    pub base_url: Option<String>,
    /// Proxy URL (e.g., socks5://host:port)
    pub proxy: Option<String>,
}

/// PA-API client for a single marketplace and partner tag.
pub struct PaapiClient {
    client: Client,
    marketplace: Marketplace,
    associate_tag: String,
    access_key: String,
    secret_key: String,
    enable_isbn: bool,
    base_url: Option<String>,
}

impl PaapiClient {
    /// Creates a client from validated parameters.
    pub fn new(params: &PaapiParams, enable_isbn: bool) -> Result<Self> {
        Self::with_options(params, enable_isbn, &ClientOptions::default())
    }

    /// Creates a client with transport options.
    pub fn with_options(
        params: &PaapiParams,
        enable_isbn: bool,
        options: &ClientOptions,
    ) -> Result<Self> {
        let marketplace: Marketplace = params.marketplace().parse().map_err(|e| {
            Error::wrap(e, "unsupported marketplace")
                .with_code(ErrorCode::INVALID_API_PARAMETER)
                .with_param("marketplace", params.marketplace())
        })?;

        let mut builder = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &options.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).map_err(|e| {
                Error::wrap(e, "failed to configure proxy")
                    .with_code(ErrorCode::INVALID_API_PARAMETER)
                    .with_param("proxy", proxy_url.as_str())
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| Error::wrap(e, "failed to create HTTP client"))?;

        Ok(Self {
            client,
            marketplace,
            associate_tag: params.associate_tag().to_string(),
            access_key: params.access_key().to_string(),
            secret_key: params.secret_key().to_string(),
            enable_isbn,
            base_url: options.base_url.clone(),
        })
    }

    pub fn marketplace(&self) -> Marketplace {
        self.marketplace
    }

    /// Returns the base URL (custom for testing, or marketplace-based for production).
    fn base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| self.marketplace.base_url())
    }

    /// Turns the user-supplied id into the ASIN sent to the API.
    ///
    /// In ISBN mode, 978-prefixed ISBN-13s become their ISBN-10, which is the
    /// ASIN of printed books.
    pub fn resolve_asin(&self, id: &str) -> Result<String> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::new(ErrorCode::INVALID_API_PARAMETER, "id is empty"));
        }
        if !self.enable_isbn {
            return Ok(id.to_string());
        }

        id.parse::<Isbn>().and_then(|isbn| isbn.to_isbn10()).map_err(|e| {
            Error::wrap(e, "cannot use id as ISBN")
                .with_code(ErrorCode::INVALID_API_PARAMETER)
                .with_param("id", id)
        })
    }

    /// Sends a signed `GetItems` request and returns the response body.
    async fn get_items(&self, asin: &str) -> Result<Vec<u8>> {
        let request =
            GetItemsRequest::book(asin, self.marketplace.marketplace(), &self.associate_tag);
        let payload = serde_json::to_string(&request)
            .map_err(|e| Error::wrap(e, "failed to encode request"))?;

        let signer =
            Signer::new(&self.access_key, &self.secret_key, self.marketplace.aws_region());
        let signed = signer.sign(
            &self.marketplace.host(),
            GET_ITEMS_PATH,
            GET_ITEMS_TARGET,
            &payload,
            Utc::now(),
        )?;

        let url = format!("{}{}", self.base_url(), GET_ITEMS_PATH);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json, text/javascript")
            .header("Content-Encoding", CONTENT_ENCODING)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Date", signed.amz_date.as_str())
            .header("X-Amz-Target", GET_ITEMS_TARGET)
            .header("Authorization", signed.authorization.as_str())
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::wrap(e, "failed to send request").with_param("url", url.as_str()))?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::wrap(e, "failed to read response body"))?
            .to_vec();

        if !status.is_success() {
            if status == 429 {
                warn!("Throttled by PA-API (429). Requests are limited per associate account.");
            }
            let detail = serde_json::from_slice::<GetItemsResponse>(&body)
                .ok()
                .map(|r| {
                    r.errors
                        .iter()
                        .map(|e| format!("{}: {}", e.code, e.message))
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .unwrap_or_default();
            let mut err = Error::new(
                ErrorCode::INVALID_API_RESPONSE,
                format!("request failed with status: {}", status),
            )
            .with_param("id", asin);
            if !detail.is_empty() {
                err = err.with_param("detail", detail);
            }
            return Err(err);
        }

        Ok(body)
    }
}

#[async_trait]
impl LookupApi for PaapiClient {
    async fn lookup_raw_data(&self, id: &str) -> Result<ByteStream> {
        let asin = self.resolve_asin(id)?;

        info!("Fetching raw data: {} ({})", asin, self.marketplace.marketplace());
        let body = self.get_items(&asin).await?;
        Ok(byte_stream(body))
    }

    async fn lookup_book(&self, id: &str) -> Result<Book> {
        let asin = self.resolve_asin(id)?;

        info!("Looking up book: {} ({})", asin, self.marketplace.marketplace());
        let body = self.get_items(&asin).await?;
        parser::parse_book(&body, &asin)
    }
}
