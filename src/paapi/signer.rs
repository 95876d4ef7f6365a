//! AWS Signature Version 4 for PA-API requests.

use crate::ecode::ErrorCode;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "ProductAdvertisingAPI";

pub const CONTENT_ENCODING: &str = "amz-1.0";
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Headers that must accompany a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

/// Signs PA-API requests with an access/secret key pair.
pub struct Signer<'a> {
    access_key: &'a str,
    secret_key: &'a str,
    region: &'a str,
}

impl<'a> Signer<'a> {
    pub fn new(access_key: &'a str, secret_key: &'a str, region: &'a str) -> Self {
        Self { access_key, secret_key, region }
    }

    /// Signs a POST to `path` on `host` with the given `x-amz-target` and body.
    pub fn sign(
        &self,
        host: &str,
        path: &str,
        target: &str,
        payload: &str,
        now: DateTime<Utc>,
    ) -> Result<SignedHeaders> {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();

        let signed_headers = "content-encoding;content-type;host;x-amz-date;x-amz-target";
        let canonical_headers = format!(
            "content-encoding:{}\ncontent-type:{}\nhost:{}\nx-amz-date:{}\nx-amz-target:{}\n",
            CONTENT_ENCODING, CONTENT_TYPE, host, amz_date, target
        );
        let canonical_request = format!(
            "POST\n{}\n\n{}\n{}\n{}",
            path,
            canonical_headers,
            signed_headers,
            sha256_hex(payload.as_bytes())
        );

        let scope = format!("{}/{}/{}/aws4_request", date, self.region, SERVICE);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            scope,
            sha256_hex(canonical_request.as_bytes())
        );

        let key = self.signing_key(&date)?;
        let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);

        Ok(SignedHeaders {
            authorization: format!(
                "{} Credential={}/{}, SignedHeaders={}, Signature={}",
                ALGORITHM, self.access_key, scope, signed_headers, signature
            ),
            amz_date,
        })
    }

    fn signing_key(&self, date: &str) -> Result<Vec<u8>> {
        let k_date = hmac(format!("AWS4{}", self.secret_key).as_bytes(), date.as_bytes())?;
        let k_region = hmac(&k_date, self.region.as_bytes())?;
        let k_service = hmac(&k_region, SERVICE.as_bytes())?;
        hmac(&k_service, b"aws4_request")
    }
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(key)
        .map_err(|_| Error::new(ErrorCode::INVALID_API_PARAMETER, "invalid signing key"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
