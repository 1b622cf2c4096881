//! In-memory `ResponseSource` that plays back a fixed script of events.

use std::time::Duration;

use capsnip_core::capture::{ResponseSink, ResponseSource, SourceItem};
use capsnip_core::{CaptureError, ResponseEvent};

/// What the scripted navigation does after emitting its events.
#[derive(Debug, Clone)]
pub enum Outcome {
    Settle,
    Fail(String),
    /// Never settles (exercises timeout and cancellation).
    Hang,
}

pub struct ScriptedSource {
    pub items: Vec<SourceItem>,
    pub outcome: Outcome,
    /// Delay between events, to interleave with the collector.
    pub gap: Duration,
    pub navigated_to: Vec<String>,
}

impl ScriptedSource {
    pub fn new(items: Vec<SourceItem>) -> Self {
        Self {
            items,
            outcome: Outcome::Settle,
            gap: Duration::ZERO,
            navigated_to: Vec::new(),
        }
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_gap(mut self, gap: Duration) -> Self {
        self.gap = gap;
        self
    }
}

impl ResponseSource for ScriptedSource {
    async fn navigate(&mut self, url: &str, sink: ResponseSink) -> Result<(), CaptureError> {
        self.navigated_to.push(url.to_string());
        for item in self.items.drain(..) {
            if !self.gap.is_zero() {
                tokio::time::sleep(self.gap).await;
            }
            let _ = sink.send(item);
        }
        match &self.outcome {
            Outcome::Settle => Ok(()),
            Outcome::Fail(reason) => Err(CaptureError::Navigation {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            Outcome::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }
}

pub fn response(url: &str, content_type: &str, body: Option<&str>) -> ResponseEvent {
    ResponseEvent {
        method: "GET".to_string(),
        request_headers: vec![
            ("accept".to_string(), "*/*".to_string()),
            ("user-agent".to_string(), "capsnip-test".to_string()),
        ],
        post_body: None,
        url: url.to_string(),
        status: 200,
        content_type: content_type.to_string(),
        body_text: body.map(String::from),
    }
}
