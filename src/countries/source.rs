use std::fmt;

use async_trait::async_trait;

use super::types::RawCountryRecord;

/// Errors that can occur while talking to a country data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Source misconfigured (bad base URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not the JSON we expected.
    Parse(String),
    /// The API answered with an empty collection.
    Empty,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Config(msg) => write!(f, "config error: {msg}"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
            SourceError::Empty => write!(f, "no matching country"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Where country records come from.
///
/// Lookups return the single record the API wraps in a one-element array.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source, for logs.
    fn name(&self) -> &str;

    /// Every country, with enough fields to feed the detail view directly.
    async fn all_countries(&self) -> Result<Vec<RawCountryRecord>, SourceError>;

    /// Exact, case-sensitive match on the common name.
    async fn by_name(&self, name: &str) -> Result<RawCountryRecord, SourceError>;

    /// Lookup by alpha country code (e.g. `"DEU"`).
    async fn by_code(&self, code: &str) -> Result<RawCountryRecord, SourceError>;
}
