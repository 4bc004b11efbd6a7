//! Wire model for the `/image/process` endpoint.
//!
//! The request side (`ProcessSpec`, `ProcessRequest`) must serialize with a
//! fixed key order for wire compatibility; the response side
//! (`ProcessResult`) is owned by the service beyond `status`/`message`, so
//! unknown fields are preserved rather than dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque directive configuration, passed through to the service
/// unvalidated. The internal shape of each directive is the service's
/// contract, not ours.
pub type Options = serde_json::Map<String, Value>;

/// The transformation directives accumulated for one request.
///
/// At most one value per directive; a later write replaces the earlier one
/// entirely. Field declaration order is the wire key order (`compress`,
/// `resize`, `scale`, `crop`, `flip`, `filter`, `watermark`); unset
/// directives are omitted from the serialized object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compress: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<Value>,
}

/// Request body for `POST /image/process`.
///
/// `img_url` is present only when the input source is a fetch URL;
/// `process` is always present, as an empty object when no directive was
/// set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    pub process: ProcessSpec,
}

/// Parsed response body from the service.
///
/// `status` reports whether processing succeeded; `message` carries the
/// failure detail. Everything else in the body (result URL, dimensions,
/// whatever the service chooses to return) lands in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Rate-limit accounting captured from the `x-ratelimit-limit` and
/// `x-ratelimit-remaining` response headers on every call, success or
/// failure. A missing header yields an empty string, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: String,
    pub remaining: String,
}
