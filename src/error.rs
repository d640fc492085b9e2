//! Failure taxonomy shared by the API client, the scanners and the notifier.

use thiserror::Error;

/// Failures of a single control-panel API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, TLS or timeout failure before a status line arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with something other than 200.
    #[error("{detail} (HTTP {status})")]
    HttpStatus { status: u16, detail: String },

    /// Status was 200 but the body was not JSON.
    #[error("JSON decode error: {0}")]
    Decode(String),
}

/// Failures while turning an API payload into accounts or usage samples.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// None of the known payload layouts matched.
    #[error("invalid API response format: {0}")]
    InvalidResponseFormat(String),
}

/// Failures delivering a message through the messaging webhook.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status} - {body}")]
    HttpStatus { status: u16, body: String },

    /// The webhook answered 200 but acknowledged with `ok: false`.
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("JSON decode error: {0}")]
    Decode(String),
}

/// Run-scoped failures that abort the scan and flip the exit code.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("API connection test failed")]
    Connectivity,

    #[error("no accounts found or API error")]
    NoAccounts,
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting `{flag}` (or env {env})")]
    Missing { flag: &'static str, env: &'static str },

    #[error("`{0}` is still set to its placeholder value")]
    Placeholder(&'static str),

    #[error("threshold must be a percentage in (0, 1000], got {0}")]
    Threshold(f64),

    #[error("unknown timezone `{0}`")]
    Timezone(String),
}

/// Truncates `text` to at most `max` characters without splitting a code point.
pub(crate) fn excerpt(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
