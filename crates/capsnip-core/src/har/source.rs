//! Replay a recorded HAR file as a stream of response events.

use base64::Engine;
use std::path::Path;

use crate::capture::{ResponseSink, ResponseSource};
use crate::error::CaptureError;
use crate::model::{is_pseudo_header, ResponseEvent};

use super::parse::{get_header, HarEntry, HarLog};

/// `ResponseSource` over the entries of a HAR file, in file order.
#[derive(Debug)]
pub struct HarSource {
    pub(super) events: Vec<ResponseEvent>,
}

impl HarSource {
    /// Read and parse a HAR file. A file with no entries is an error.
    pub fn open(path: &Path) -> Result<Self, CaptureError> {
        let bytes = std::fs::read(path)
            .map_err(|e| CaptureError::Har(format!("read {}: {}", path.display(), e)))?;
        Self::from_slice(&bytes)
            .map_err(|e| match e {
                CaptureError::Har(msg) => CaptureError::Har(format!("{}: {}", path.display(), msg)),
                other => other,
            })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CaptureError> {
        let har: HarLog = serde_json::from_slice(bytes)
            .map_err(|e| CaptureError::Har(format!("parse HAR JSON: {}", e)))?;
        if har.log.entries.is_empty() {
            return Err(CaptureError::Har("HAR file has no entries".to_string()));
        }
        Ok(Self {
            events: har.log.entries.into_iter().map(to_event).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ResponseSource for HarSource {
    /// Replays every entry; `url` is not fetched.
    async fn navigate(&mut self, url: &str, sink: ResponseSink) -> Result<(), CaptureError> {
        tracing::debug!(url, entries = self.events.len(), "replaying HAR");
        for event in &self.events {
            if sink.send(Ok(event.clone())).is_err() {
                break;
            }
        }
        Ok(())
    }
}

fn to_event(entry: HarEntry) -> ResponseEvent {
    let HarEntry { request, response } = entry;
    let content_type = get_header(&response.headers, "Content-Type")
        .map(String::from)
        .or(response.content.mime_type.clone())
        .unwrap_or_default();
    let body_text = decode_content(
        response.content.text,
        response.content.encoding.as_deref(),
    );
    ResponseEvent {
        method: request.method,
        request_headers: request
            .headers
            .into_iter()
            .filter(|h| !is_pseudo_header(&h.name))
            .map(|h| (h.name, h.value))
            .collect(),
        post_body: request.post_data.and_then(|p| p.text),
        url: request.url,
        status: response.status,
        content_type,
        body_text,
    }
}

/// Text body of an entry; base64 content counts only if it decodes to UTF-8.
fn decode_content(text: Option<String>, encoding: Option<&str>) -> Option<String> {
    let text = text?;
    match encoding {
        Some(enc) if enc.eq_ignore_ascii_case("base64") => {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(text.trim())
                .ok()?;
            String::from_utf8(bytes).ok()
        }
        _ => Some(text),
    }
}
