//! Error taxonomy for the client.
//!
//! Every failure is returned to the caller as a typed `Error`; nothing is
//! retried or swallowed internally. `InvalidInput` is the deferred case:
//! detected when the input is bound, reported when the request executes.

use picsmize_core::RateLimitInfo;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Empty API key, at session construction or at send time.
    #[error("requires a valid API key for image processing")]
    InvalidCredential,

    /// Input-source validation failed (e.g. malformed fetch URL).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level failure reaching the service.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON of the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The service processed the request and explicitly reported failure.
    #[error("{message}")]
    Remote {
        /// Failure detail from the response's `message` field, verbatim.
        message: String,
        /// Rate-limit accounting from the failing response; headers are
        /// captured even when processing fails.
        rate_limit: RateLimitInfo,
    },
}
