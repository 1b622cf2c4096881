//! Error types for a capture run.
//!
//! `CaptureError` ends a run. `ResponseError` only ever describes a single
//! response: the orchestrator logs it and moves on to the next event.

use thiserror::Error;

/// Fatal error for one capture run.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Rejected before any browser is launched (empty or unusable URL, unknown file type).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The page itself failed to load.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Navigation did not settle within the configured timeout.
    #[error("navigation to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// The run was aborted through its `CaptureControl`.
    #[error("capture of {url} cancelled")]
    Cancelled { url: String },

    /// The browser could not be configured, launched or driven.
    #[error("browser: {0}")]
    Browser(String),

    /// A HAR replay source could not be read or parsed.
    #[error("HAR: {0}")]
    Har(String),
}

/// Failure while handling a single response. Never aborts a run.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Request or response headers could not be read.
    #[error("headers unavailable for {url}: {reason}")]
    Headers { url: String, reason: String },

    /// The body could not be retrieved from the browser.
    #[error("body unavailable for {url}: {reason}")]
    Body { url: String, reason: String },

    /// A response arrived for a request that was never announced.
    #[error("response for unknown request {request_id}")]
    UnknownRequest { request_id: String },
}
