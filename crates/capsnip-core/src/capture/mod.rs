//! Capture orchestrator: drive one page load, classify and filter each
//! response as it arrives, and collect the matches in arrival order.

mod source;

pub use source::{ResponseSink, ResponseSource, SourceItem};

use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::CapsnipConfig;
use crate::control::CaptureControl;
use crate::error::CaptureError;
use crate::file_type::classify;
use crate::keyword;
use crate::model::{CaptureRequest, CapturedMatch, ResponseEvent};

/// Run-level knobs taken from config (or CLI overrides).
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Upper bound on the whole navigation, network-idle wait included.
    pub timeout: Duration,
    /// Maximum characters kept in `CapturedMatch::body_snippet`.
    pub body_snippet_chars: usize,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::from(&CapsnipConfig::default())
    }
}

impl From<&CapsnipConfig> for CaptureOptions {
    fn from(cfg: &CapsnipConfig) -> Self {
        Self {
            timeout: Duration::from_secs(cfg.navigation_timeout_secs),
            body_snippet_chars: cfg.body_snippet_chars,
        }
    }
}

/// Capture every response of one page load that matches `request`.
///
/// Subscribes before navigating (the channel exists before `navigate` is
/// called) and consumes events concurrently with navigation. Navigation
/// failure, timeout, or an abort through `control` is fatal for the run and
/// no partial results are returned; per-response failures are logged and the
/// event dropped.
pub async fn capture<S: ResponseSource>(
    request: &CaptureRequest,
    source: &mut S,
    options: &CaptureOptions,
    control: Option<&CaptureControl>,
) -> Result<Vec<CapturedMatch>, CaptureError> {
    tracing::info!(
        url = %request.url,
        keywords = ?request.keywords,
        file_types = ?request.file_types,
        "capture started"
    );

    let (sink, events) = mpsc::unbounded_channel();
    let url = request.url.clone();
    let timeout = options.timeout;

    let navigation = async {
        match tokio::time::timeout(timeout, source.navigate(&url, sink)).await {
            Ok(result) => result,
            Err(_) => Err(CaptureError::Timeout {
                url: url.clone(),
                secs: timeout.as_secs(),
            }),
        }
    };
    let run = async {
        tokio::join!(navigation, collect(events, request, options.body_snippet_chars))
    };
    let cancelled = async {
        match control {
            Some(c) => c.aborted().await,
            None => std::future::pending::<()>().await,
        }
    };

    let (navigated, matches) = tokio::select! {
        out = run => out,
        _ = cancelled => {
            tracing::info!(url = %request.url, "capture cancelled");
            return Err(CaptureError::Cancelled { url: request.url.clone() });
        }
    };

    if let Err(e) = navigated {
        tracing::warn!(
            url = %request.url,
            discarded_matches = matches.len(),
            "capture failed: {}",
            e
        );
        return Err(e);
    }

    tracing::info!(url = %request.url, matches = matches.len(), "capture finished");
    Ok(matches)
}

/// Drain `events` until the source drops its sink.
async fn collect(
    mut events: mpsc::UnboundedReceiver<SourceItem>,
    request: &CaptureRequest,
    snippet_chars: usize,
) -> Vec<CapturedMatch> {
    let mut matches = Vec::new();
    while let Some(item) = events.recv().await {
        match item {
            Ok(event) => {
                if let Some(m) = evaluate(&event, request, snippet_chars) {
                    tracing::debug!(url = %m.url, file_type = %m.file_type, "match");
                    matches.push(m);
                }
            }
            Err(e) => tracing::warn!("skipping response: {}", e),
        }
    }
    matches
}

/// Classify, filter and keyword-match a single event.
pub fn evaluate(
    event: &ResponseEvent,
    request: &CaptureRequest,
    snippet_chars: usize,
) -> Option<CapturedMatch> {
    let file_type = classify(&event.content_type, &event.url);
    if !request.wants(file_type) {
        tracing::trace!(url = %event.url, %file_type, "file type filtered");
        return None;
    }
    let Some(body) = event.body_text.as_deref() else {
        tracing::trace!(url = %event.url, "no text body");
        return None;
    };
    if !keyword::matches(body, &request.keywords) {
        tracing::trace!(url = %event.url, "no keyword");
        return None;
    }
    Some(CapturedMatch::from_event(event, file_type, body, snippet_chars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_type::FileType;

    fn request(keywords: &[&str], types: &[FileType]) -> CaptureRequest {
        CaptureRequest::new(
            "https://example.com",
            keywords.iter().map(|s| s.to_string()).collect(),
            types.iter().copied(),
        )
        .unwrap()
    }

    fn event(url: &str, content_type: &str, body: Option<&str>) -> ResponseEvent {
        ResponseEvent {
            method: "GET".to_string(),
            url: url.to_string(),
            status: 200,
            content_type: content_type.to_string(),
            body_text: body.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn css_is_discarded_when_not_in_filter() {
        let req = request(&["token"], &[FileType::Json, FileType::Html]);
        let ev = event("https://x/site.css", "text/css", Some("/* token */"));
        assert!(evaluate(&ev, &req, 1000).is_none());
    }

    #[test]
    fn undecodable_body_is_discarded() {
        let req = request(&["token"], &[FileType::Other]);
        let ev = event("https://x/blob", "application/octet-stream", None);
        assert!(evaluate(&ev, &req, 1000).is_none());
    }

    #[test]
    fn matching_event_becomes_a_match() {
        let req = request(&["token"], &[FileType::Json]);
        let ev = event("https://x/api/me", "application/json", Some("{\"Token\":1}"));
        let m = evaluate(&ev, &req, 1000).unwrap();
        assert_eq!(m.file_type, FileType::Json);
        assert_eq!(m.url, "https://x/api/me");
        assert_eq!(m.body_snippet, "{\"Token\":1}");
    }

    #[test]
    fn keyword_miss_is_discarded() {
        let req = request(&["token"], &[FileType::Json]);
        let ev = event("https://x/api/me", "application/json", Some("{}"));
        assert!(evaluate(&ev, &req, 1000).is_none());
    }
}
