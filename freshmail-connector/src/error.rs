//! Connector error types

use thiserror::Error;

/// Failure of a single provider API call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure reaching the provider
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Malformed or unrecognized response envelope
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Envelope with `status: "ERROR"`
    #[error("Provider error {code}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Upstream {
        code: String,
        message: Option<String>,
    },
}

/// Errors that escape the repository and pipeline.
///
/// Provider failures on list pages and reports are absorbed by the
/// repository; only these reach the host.
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Date string outside `YYYY-MM-DD` / `YYYY-MM-DD HH:MM:SS`
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Campaign list still returned items past the last allowed page
    #[error("Campaign list exceeded {0} pages")]
    PageLimitExceeded(u32),
}

pub type Result<T> = std::result::Result<T, ConnectorError>;
