//! Directive accumulation and request execution.

use picsmize_core::{
    InputSource, Options, ProcessRequest, ProcessResult, ProcessSpec, RateLimitInfo,
};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::Picsmize;

/// Accumulates transformation directives for one `/image/process` call.
///
/// Each directive method consumes and returns the builder, so calls chain;
/// calling the same directive twice replaces the earlier value entirely.
/// Directive arguments are not validated locally; the configuration shape
/// is the service's contract. [`ProcessBuilder::execute`] sends the
/// accumulated state.
#[derive(Debug, Clone)]
pub struct ProcessBuilder<'a> {
    session: &'a Picsmize,
    source: InputSource,
    process: ProcessSpec,
    /// Invalid-input message recorded at bind time, surfaced at execute
    /// time. Chaining on a poisoned builder still succeeds.
    deferred: Option<String>,
}

impl<'a> ProcessBuilder<'a> {
    pub(crate) fn new(
        session: &'a Picsmize,
        source: InputSource,
        deferred: Option<String>,
    ) -> Self {
        Self {
            session,
            source,
            process: ProcessSpec::default(),
            deferred,
        }
    }

    /// Compress the image. The configuration is sent under `compress`
    /// as-is.
    pub fn compress(mut self, options: Options) -> Self {
        self.process.compress = Some(Value::Object(options));
        self
    }

    /// Resize the image. `mode` is injected into the configuration under
    /// the `mode` key, replacing any caller-supplied value.
    pub fn resize(mut self, mode: &str, mut options: Options) -> Self {
        options.insert("mode".to_string(), Value::String(mode.to_string()));
        self.process.resize = Some(Value::Object(options));
        self
    }

    /// Scale the image by a size factor; sent as `{"size": <factor>}`.
    pub fn scale(mut self, size: f64) -> Self {
        self.process.scale = Some(json!({ "size": size }));
        self
    }

    /// Crop the image. Same `mode` injection as [`ProcessBuilder::resize`].
    pub fn crop(mut self, mode: &str, mut options: Options) -> Self {
        options.insert("mode".to_string(), Value::String(mode.to_string()));
        self.process.crop = Some(Value::Object(options));
        self
    }

    /// Flip the image; `direction` becomes the key: `{"<direction>": true}`.
    pub fn flip(mut self, direction: &str) -> Self {
        let mut wrapped = Options::new();
        wrapped.insert(direction.to_string(), Value::Bool(true));
        self.process.flip = Some(Value::Object(wrapped));
        self
    }

    /// Apply a named filter; sent as `{"<kind>": <configuration>}`.
    pub fn filter(mut self, kind: &str, options: Options) -> Self {
        let mut wrapped = Options::new();
        wrapped.insert(kind.to_string(), Value::Object(options));
        self.process.filter = Some(Value::Object(wrapped));
        self
    }

    /// Overlay a watermark. The configuration is sent under `watermark`
    /// as-is.
    pub fn watermark(mut self, options: Options) -> Self {
        self.process.watermark = Some(Value::Object(options));
        self
    }

    /// The request body for the current builder state.
    fn request(&self) -> ProcessRequest {
        ProcessRequest {
            img_url: self.source.img_url().map(str::to_string),
            process: self.process.clone(),
        }
    }

    /// Sends the accumulated directive set in a single blocking `POST
    /// /image/process` and returns the parsed result with rate-limit
    /// accounting.
    ///
    /// Checks run in order, each short-circuiting: deferred input error
    /// (no network call occurs), empty credential, body encoding, the
    /// network round-trip, response parsing, and finally the service's own
    /// `status` verdict. Rate-limit headers are captured before the verdict
    /// is inspected, so a [`Error::Remote`] failure still carries them.
    /// The HTTP status code itself is not inspected; the body's `status`
    /// field is the service's contract.
    ///
    /// The builder is reusable: executing again resends the same state.
    pub fn execute(&self) -> Result<(ProcessResult, RateLimitInfo)> {
        if let Some(message) = &self.deferred {
            return Err(Error::InvalidInput(message.clone()));
        }
        // The session rejects empty keys at construction; re-checked here
        // so the invariant holds at send time no matter how the session
        // was produced.
        if self.session.api_key().is_empty() {
            return Err(Error::InvalidCredential);
        }

        let body = serde_json::to_vec(&self.request())?;
        let url = self.session.process_url();
        tracing::debug!(%url, bytes = body.len(), "sending image process request");

        let response = self
            .session
            .http()
            .post(&url)
            .header("content-type", "application/json")
            .header("apikey", self.session.api_key())
            .body(body)
            .send()?;

        let rate_limit = RateLimitInfo {
            limit: header_string(&response, "x-ratelimit-limit"),
            remaining: header_string(&response, "x-ratelimit-remaining"),
        };
        let http_status = response.status();
        let text = response.text()?;
        tracing::debug!(
            %http_status,
            limit = %rate_limit.limit,
            remaining = %rate_limit.remaining,
            "received image process response"
        );

        let result: ProcessResult =
            serde_json::from_str(&text).map_err(Error::MalformedResponse)?;

        if !result.status {
            let message = result.message.unwrap_or_default();
            tracing::debug!(%message, "service reported processing failure");
            return Err(Error::Remote {
                message,
                rate_limit,
            });
        }

        Ok((result, rate_limit))
    }
}

fn header_string(response: &reqwest::blocking::Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Picsmize {
        Picsmize::new("test-key").unwrap()
    }

    fn options(value: Value) -> Options {
        value.as_object().cloned().unwrap()
    }

    fn body_json(builder: &ProcessBuilder<'_>) -> Value {
        serde_json::to_value(builder.request()).unwrap()
    }

    #[test]
    fn resize_injects_mode_into_options() {
        let session = session();
        let builder = session
            .fetch("https://img.example/a.png")
            .resize("contain", options(json!({"width": 100})));
        assert_eq!(
            body_json(&builder)["process"]["resize"],
            json!({"mode": "contain", "width": 100})
        );
    }

    #[test]
    fn crop_injects_mode_and_overrides_caller_value() {
        let session = session();
        let builder = session
            .fetch("https://img.example/a.png")
            .crop("smart", options(json!({"mode": "ignored", "width": 80})));
        assert_eq!(
            body_json(&builder)["process"]["crop"],
            json!({"mode": "smart", "width": 80})
        );
    }

    #[test]
    fn flip_wraps_direction_as_boolean_key() {
        let session = session();
        let builder = session.fetch("https://img.example/a.png").flip("horizontal");
        assert_eq!(
            body_json(&builder)["process"]["flip"],
            json!({"horizontal": true})
        );
    }

    #[test]
    fn filter_nests_options_under_kind() {
        let session = session();
        let builder = session
            .fetch("https://img.example/a.png")
            .filter("sepia", options(json!({"intensity": 50})));
        assert_eq!(
            body_json(&builder)["process"]["filter"],
            json!({"sepia": {"intensity": 50}})
        );
    }

    #[test]
    fn scale_wraps_factor_under_size() {
        let session = session();
        let builder = session.fetch("https://img.example/a.png").scale(0.5);
        assert_eq!(body_json(&builder)["process"]["scale"], json!({"size": 0.5}));
    }

    #[test]
    fn repeated_directive_keeps_only_the_last_value() {
        let session = session();
        let builder = session
            .fetch("https://img.example/a.png")
            .scale(0.5)
            .flip("vertical")
            .scale(2.0);
        let body = body_json(&builder);
        assert_eq!(body["process"]["scale"], json!({"size": 2.0}));
        assert_eq!(body["process"]["flip"], json!({"vertical": true}));
    }

    #[test]
    fn unset_directives_are_absent_from_the_body() {
        let session = session();
        let builder = session.fetch("https://img.example/a.png");
        assert_eq!(body_json(&builder)["process"], json!({}));
    }

    #[test]
    fn compress_and_watermark_pass_options_through() {
        let session = session();
        let builder = session
            .fetch("https://img.example/a.png")
            .compress(options(json!({"quality": 75})))
            .watermark(options(json!({"text": "(c)", "opacity": 0.4})));
        let body = body_json(&builder);
        assert_eq!(body["process"]["compress"], json!({"quality": 75}));
        assert_eq!(
            body["process"]["watermark"],
            json!({"text": "(c)", "opacity": 0.4})
        );
    }

    #[test]
    fn serialized_key_order_ignores_call_order() {
        let session = session();
        let builder = session
            .fetch("https://img.example/a.png")
            .watermark(options(json!({"text": "x"})))
            .flip("horizontal")
            .compress(options(json!({"quality": 75})));
        let encoded = serde_json::to_string(&builder.request()).unwrap();
        let compress = encoded.find("\"compress\"").unwrap();
        let flip = encoded.find("\"flip\"").unwrap();
        let watermark = encoded.find("\"watermark\"").unwrap();
        assert!(compress < flip && flip < watermark, "got {}", encoded);
    }
}
