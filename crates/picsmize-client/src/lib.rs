//! Blocking client SDK for the Picsmize image-processing API.
//!
//! A [`Picsmize`] session holds a validated API key. [`Picsmize::fetch`]
//! binds a source image URL and returns a [`ProcessBuilder`], on which
//! transformation directives (compress, resize, scale, crop, flip, filter,
//! watermark) are chained; [`ProcessBuilder::execute`] sends the accumulated
//! set in a single `POST /image/process` and returns the parsed result
//! together with rate-limit accounting.
//!
//! # Quick start
//!
//! ```no_run
//! use picsmize_client::{Options, Picsmize};
//! use serde_json::json;
//!
//! fn main() -> picsmize_client::Result<()> {
//!     let picsmize = Picsmize::new("your-api-key")?;
//!
//!     let mut compress = Options::new();
//!     compress.insert("quality".into(), json!(75));
//!
//!     let (result, rate_limit) = picsmize
//!         .fetch("https://example.com/photo.jpg")
//!         .compress(compress)
//!         .flip("horizontal")
//!         .execute()?;
//!
//!     println!("processed: {:?}", result.extra.get("url"));
//!     println!("{} of {} calls remaining", rate_limit.remaining, rate_limit.limit);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod error;

use std::time::Duration;

use reqwest::blocking::Client;

use picsmize_core::{validate_fetch_url, InputSource};

// Re-export the types callers interact with.
pub use crate::builder::ProcessBuilder;
pub use crate::error::{Error, Result};
pub use picsmize_core::{Options, ProcessResult, RateLimitInfo};

/// Production API endpoint.
pub const API_ENDPOINT: &str = "https://api.picsmize.com";

/// A session against the Picsmize API: validated credential plus the HTTP
/// client shared by every request it spawns.
///
/// Construction validates the credential and builds the transport; no
/// network call is made until a builder executes.
#[derive(Debug, Clone)]
pub struct Picsmize {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl Picsmize {
    /// Creates a session against the production endpoint.
    ///
    /// Fails with [`Error::InvalidCredential`] when `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(api_key, API_ENDPOINT)
    }

    /// Creates a session against a custom base endpoint (staging, mock
    /// server in tests). Same credential rules as [`Picsmize::new`].
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::InvalidCredential);
        }

        let http = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            api_key,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Creates a session from the environment: `PICSMIZE_API_KEY`
    /// (credential, required) and `PICSMIZE_API_URL` (endpoint override,
    /// optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("PICSMIZE_API_KEY").unwrap_or_default();
        let endpoint =
            std::env::var("PICSMIZE_API_URL").unwrap_or_else(|_| API_ENDPOINT.to_string());
        Self::with_endpoint(api_key, endpoint)
    }

    /// Binds a source image URL for processing and returns the builder.
    ///
    /// Never fails synchronously. The URL is validated here, but a
    /// malformed URL is recorded on the builder and only surfaces as
    /// [`Error::InvalidInput`] when [`ProcessBuilder::execute`] is called;
    /// directive chaining on such a builder still succeeds.
    pub fn fetch(&self, img_url: impl Into<String>) -> ProcessBuilder<'_> {
        let img_url = img_url.into();
        let deferred = validate_fetch_url(&img_url).err();
        ProcessBuilder::new(self, InputSource::FetchUrl(img_url), deferred)
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn process_url(&self) -> String {
        format!("{}/image/process", self.endpoint)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}
