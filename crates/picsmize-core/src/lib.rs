//! Picsmize Core Library
//!
//! This crate provides the wire data model and input validation shared by
//! the Picsmize client: the directive set sent to `/image/process`, the
//! parsed response, rate-limit accounting, and the input-source type.
//! It has no HTTP dependency; the client crate owns the transport.

pub mod input;
pub mod models;

// Re-export commonly used types
pub use input::{validate_fetch_url, InputSource};
pub use models::{Options, ProcessRequest, ProcessResult, ProcessSpec, RateLimitInfo};
