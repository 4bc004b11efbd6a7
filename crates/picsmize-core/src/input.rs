//! Input-source selection and eager URL validation.
//!
//! Validation runs when the input is bound, but the failure only surfaces
//! when the request is executed; the client records the message as deferred
//! state in the meantime.

use url::Url;

/// Where the source image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Remote image fetched by the service from a URL.
    FetchUrl(String),
}

impl InputSource {
    /// The `img_url` to send on the wire, when the source is a fetch URL.
    pub fn img_url(&self) -> Option<&str> {
        match self {
            InputSource::FetchUrl(url) => Some(url),
        }
    }
}

/// Checks that `img_url` is a syntactically valid absolute URL.
///
/// Returns the message to report at execute time on failure.
pub fn validate_fetch_url(img_url: &str) -> Result<(), String> {
    match Url::parse(img_url) {
        Ok(_) => Ok(()),
        Err(_) => Err("fetch() requires a valid file URL passed as an argument".to_string()),
    }
}
