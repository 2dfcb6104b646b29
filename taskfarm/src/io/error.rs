//! Transport errors raised by the remote service adapters.

use thiserror::Error;

/// Failure talking to the remote service.
///
/// Every variant is fatal for the current run. Soft ineligibility (the
/// service answering without a title) is not an error; see
/// [`ActionReply`](crate::core::types::ActionReply).
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network, TLS or timeout failure.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a status the caller cannot interpret.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The session token was refused.
    #[error("session rejected by {url} (HTTP {status})")]
    Unauthorized { url: String, status: u16 },

    /// The response body did not match the expected shape.
    #[error("malformed {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl GatewayError {
    pub(crate) fn decode(what: &'static str, source: serde_json::Error) -> Self {
        GatewayError::Decode { what, source }
    }
}
