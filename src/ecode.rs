//! Error categories used to tag failures across the crate.
//!
//! An [`ErrorCode`] is an integer-backed tag. The defined categories each
//! render to a fixed string; any other integer renders as
//! `unknown error (<n>)`, so rendering never fails.

use std::fmt;

/// Integer-backed failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(i32);

impl ErrorCode {
    /// A required reference (book, record, ...) was missing.
    pub const NULL_REFERENCE: ErrorCode = ErrorCode(1);
    /// No subcommand was given.
    pub const NO_COMMAND: ErrorCode = ErrorCode(2);
    /// API parameters are missing or malformed.
    pub const INVALID_API_PARAMETER: ErrorCode = ErrorCode(3);
    /// The API answered with something we cannot use.
    pub const INVALID_API_RESPONSE: ErrorCode = ErrorCode(4);
    /// The API answered without any item.
    pub const NO_DATA: ErrorCode = ErrorCode(5);
    /// A record came from a different lookup service than expected.
    pub const UNMATCHED_SERVICE_TYPE: ErrorCode = ErrorCode(6);

    /// All defined categories, in numeric order.
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::NULL_REFERENCE,
        ErrorCode::NO_COMMAND,
        ErrorCode::INVALID_API_PARAMETER,
        ErrorCode::INVALID_API_RESPONSE,
        ErrorCode::NO_DATA,
        ErrorCode::UNMATCHED_SERVICE_TYPE,
    ];

    /// Wraps a raw integer. Values outside the defined set are kept as-is.
    pub const fn from_raw(code: i32) -> Self {
        ErrorCode(code)
    }

    /// Returns the raw integer value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns true for the defined categories.
    pub fn is_defined(self) -> bool {
        self.description().is_some()
    }

    fn description(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("Null reference instance"),
            2 => Some("No command"),
            3 => Some("Invalid API parameters"),
            4 => Some("Invalid response data from API"),
            5 => Some("No response data"),
            6 => Some("Unmatch service type"),
            _ => None,
        }
    }
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode(0)
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        ErrorCode(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(s) => f.write_str(s),
            None => write!(f, "unknown error ({})", self.0),
        }
    }
}

impl std::error::Error for ErrorCode {}

/// Renders a raw error code.
pub fn render(code: i32) -> String {
    ErrorCode::from_raw(code).to_string()
}
