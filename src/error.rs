//! Tagged error type shared by the library.
//!
//! An [`Error`] carries an optional [`ErrorCode`] category, a message, named
//! diagnostic parameters and an optional cause. Wrapping builds a singly
//! linked chain that `std::error::Error::source` walks.

use crate::ecode::ErrorCode;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error with a category, named parameters and an owned cause.
pub struct Error {
    code: Option<ErrorCode>,
    message: String,
    params: BTreeMap<String, String>,
    source: Option<BoxError>,
}

impl Error {
    /// Creates a leaf error tagged with `code`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code: Some(code), message: message.into(), params: BTreeMap::new(), source: None }
    }

    /// Wraps `cause` with a message. The cause stays reachable through `source()`.
    pub fn wrap(cause: impl Into<BoxError>, message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            params: BTreeMap::new(),
            source: Some(cause.into()),
        }
    }

    /// Tags this error with a category.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Adds a named diagnostic parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns the first category found walking the chain from this error.
    pub fn code(&self) -> Option<ErrorCode> {
        let mut current = Some(self as &(dyn StdError + 'static));
        while let Some(err) = current {
            if let Some(e) = err.downcast_ref::<Error>() {
                if e.code.is_some() {
                    return e.code;
                }
            } else if let Some(code) = err.downcast_ref::<ErrorCode>() {
                return Some(*code);
            }
            current = err.source();
        }
        None
    }

    /// Returns true if `code` is the category of this chain.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code() == Some(code)
    }

    /// Returns the deepest error of the chain, or `self` if there is no cause.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, self.message.is_empty()) {
            (Some(code), false) => write!(f, "{}: {}", code, self.message)?,
            (Some(code), true) => write!(f, "{}", code)?,
            (None, _) => f.write_str(&self.message)?,
        }

        if !self.params.is_empty() {
            let params: Vec<String> =
                self.params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            write!(f, " ({})", params.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("params", &self.params)
            .field("source", &self.source)
            .finish()
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}
