//! Data passed through a capture run: the request, raw response events, and matches.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::CaptureError;
use crate::file_type::FileType;

/// What to capture. Fixed for the whole run once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub url: String,
    pub keywords: Vec<String>,
    pub file_types: BTreeSet<FileType>,
}

impl CaptureRequest {
    /// Validates the URL and builds the request.
    ///
    /// Accepts http, https and file URLs; anything else (or an empty string)
    /// is an `InvalidInput` error so the run never starts.
    pub fn new(
        url: &str,
        keywords: Vec<String>,
        file_types: impl IntoIterator<Item = FileType>,
    ) -> Result<Self, CaptureError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(CaptureError::InvalidInput("please enter a valid URL".to_string()));
        }
        let parsed = url::Url::parse(url)
            .map_err(|e| CaptureError::InvalidInput(format!("invalid URL {:?}: {}", url, e)))?;
        match parsed.scheme() {
            "http" | "https" | "file" => {}
            other => {
                return Err(CaptureError::InvalidInput(format!(
                    "unsupported URL scheme {:?} in {}",
                    other, url
                )))
            }
        }
        Ok(Self {
            url: url.to_string(),
            keywords,
            file_types: file_types.into_iter().collect(),
        })
    }

    pub fn wants(&self, file_type: FileType) -> bool {
        self.file_types.contains(&file_type)
    }
}

/// One network response observed during a page load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseEvent {
    pub method: String,
    /// Request headers in the order the source reported them.
    pub request_headers: Vec<(String, String)>,
    pub post_body: Option<String>,
    pub url: String,
    pub status: u16,
    /// `Content-Type` response header; empty when absent.
    pub content_type: String,
    /// Body decoded as text; `None` when binary or unreadable.
    pub body_text: Option<String>,
}

/// A response that passed both the file-type filter and the keyword match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedMatch {
    pub method: String,
    pub url: String,
    pub status: u16,
    pub file_type: FileType,
    pub request_headers: Vec<(String, String)>,
    pub post_body: Option<String>,
    pub body_snippet: String,
}

impl CapturedMatch {
    /// Builds a match from an event, keeping at most `snippet_chars` characters of body.
    pub fn from_event(event: &ResponseEvent, file_type: FileType, body: &str, snippet_chars: usize) -> Self {
        Self {
            method: event.method.clone(),
            url: event.url.clone(),
            status: event.status,
            file_type,
            request_headers: event.request_headers.clone(),
            post_body: event.post_body.clone(),
            body_snippet: truncate_chars(body, snippet_chars),
        }
    }
}

/// HTTP/2 pseudo-headers (`:authority`, `:path`, ...) are not real request
/// headers and cannot be replayed.
pub fn is_pseudo_header(name: &str) -> bool {
    name.starts_with(':')
}

/// First `max` characters (not bytes) of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
