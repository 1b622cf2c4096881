//! Headless Chrome response source over the DevTools protocol (`chromiumoxide`).
//!
//! One browser per run: launch, open a page, subscribe to the Network domain
//! events, navigate, and report every finished response until the network
//! has been idle for the configured quiet window. Network events are drained
//! before navigation and idle checks so a response is never read ahead of
//! the request it answers. The browser is closed on every exit path; if the
//! run future is dropped (timeout, abort) `BrowserSession` stops the handler
//! task and the `Browser` drop kills the child process.

mod convert;
mod tracker;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
    EventResponseReceived, GetRequestPostDataParams, GetResponseBodyParams, Request, RequestId,
};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::capture::{ResponseSink, ResponseSource, SourceItem};
use crate::config::{BrowserSettings, CapsnipConfig};
use crate::error::{CaptureError, ResponseError};
use crate::model::is_pseudo_header;

use convert::{content_type, decode_body, decode_post_entries, header_pairs};
use tracker::{Finished, NetworkTracker, RequestInfo};

/// `ResponseSource` backed by a freshly launched Chrome/Chromium per navigation.
#[derive(Debug, Clone)]
pub struct ChromeSource {
    settings: BrowserSettings,
    idle_window: Duration,
}

impl ChromeSource {
    pub fn new(settings: BrowserSettings, idle_window: Duration) -> Self {
        Self {
            settings,
            idle_window,
        }
    }

    pub fn from_config(cfg: &CapsnipConfig) -> Self {
        Self::new(cfg.browser.clone(), Duration::from_millis(cfg.network_idle_ms))
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    pub fn idle_window(&self) -> Duration {
        self.idle_window
    }

    fn browser_config(&self) -> Result<BrowserConfig, CaptureError> {
        let mut builder = BrowserConfig::builder();
        if !self.settings.headless {
            builder = builder.with_head();
        }
        if let Some(exe) = &self.settings.executable {
            builder = builder.chrome_executable(exe);
        }
        if !self.settings.extra_args.is_empty() {
            builder = builder.args(self.settings.extra_args.iter().cloned());
        }
        builder.build().map_err(CaptureError::Browser)
    }
}

/// Task handle that aborts the task when dropped.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A launched browser and the task pumping its DevTools connection.
///
/// Dropping the session without `close` (the run future was cancelled)
/// still stops the handler task.
struct BrowserSession {
    browser: Browser,
    handler_task: AbortOnDrop,
}

impl BrowserSession {
    async fn launch(config: BrowserConfig) -> Result<Self, CaptureError> {
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| CaptureError::Browser(format!("launch failed: {}", e)))?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler: {}", e);
                }
            }
        });
        Ok(Self {
            browser,
            handler_task: AbortOnDrop(handler_task),
        })
    }

    async fn close(&mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("browser close: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("browser wait: {}", e);
        }
        self.handler_task.0.abort();
    }
}

impl ResponseSource for ChromeSource {
    async fn navigate(&mut self, url: &str, sink: ResponseSink) -> Result<(), CaptureError> {
        let config = self.browser_config()?;
        let mut session = BrowserSession::launch(config).await?;
        tracing::debug!(url, "browser launched");

        let result = drive(&session.browser, url, &sink, self.idle_window).await;

        session.close().await;
        tracing::debug!(url, "browser closed");

        result
    }
}

fn browser_err(e: impl std::fmt::Display) -> CaptureError {
    CaptureError::Browser(e.to_string())
}

/// Subscribe, navigate, and forward responses until the network settles.
async fn drive(
    browser: &Browser,
    url: &str,
    sink: &ResponseSink,
    idle_window: Duration,
) -> Result<(), CaptureError> {
    let page = browser.new_page("about:blank").await.map_err(browser_err)?;

    let mut sent = page
        .event_listener::<EventRequestWillBeSent>()
        .await
        .map_err(browser_err)?;
    let mut received = page
        .event_listener::<EventResponseReceived>()
        .await
        .map_err(browser_err)?;
    let mut finished = page
        .event_listener::<EventLoadingFinished>()
        .await
        .map_err(browser_err)?;
    let mut failed = page
        .event_listener::<EventLoadingFailed>()
        .await
        .map_err(browser_err)?;
    page.execute(EnableParams::default())
        .await
        .map_err(browser_err)?;

    let mut tracker = NetworkTracker::default();
    let mut loaded = false;
    let navigation = page.goto(url);
    tokio::pin!(navigation);
    let quiet = tokio::time::sleep(idle_window);
    tokio::pin!(quiet);

    loop {
        // Arms are polled in protocol order: a request before its response,
        // a response before its completion, all of them before idle.
        tokio::select! {
            biased;
            Some(ev) = sent.next() => {
                let id = ev.request_id.inner().clone();
                match header_pairs(ev.request.headers.inner()) {
                    Ok(headers) => tracker.request_sent(
                        id,
                        ev.request.url.clone(),
                        request_info(&ev.request, headers),
                    ),
                    Err(reason) => {
                        tracker.request_unreadable(id, ev.request.url.clone());
                        let _ = sink.send(Err(ResponseError::Headers {
                            url: ev.request.url.clone(),
                            reason,
                        }));
                    }
                }
            }
            Some(ev) = received.next() => {
                let id = ev.request_id.inner().clone();
                let status = u16::try_from(ev.response.status).unwrap_or(0);
                let item = header_pairs(ev.response.headers.inner())
                    .map_err(|reason| ResponseError::Headers {
                        url: ev.response.url.clone(),
                        reason,
                    })
                    .and_then(|headers| {
                        tracker.response_received(
                            &id,
                            ev.response.url.clone(),
                            status,
                            content_type(&headers),
                        )
                    });
                if let Err(e) = item {
                    tracker.loading_failed(&id);
                    let _ = sink.send(Err(e));
                }
            }
            Some(ev) = finished.next() => {
                if let Some(done) = tracker.loading_finished(ev.request_id.inner()) {
                    let item = fetch_body(&page, ev.request_id.clone(), done).await;
                    let _ = sink.send(item);
                }
            }
            Some(ev) = failed.next() => {
                if let Some(failed_url) = tracker.loading_failed(ev.request_id.inner()) {
                    tracing::debug!(url = %failed_url, error = %ev.error_text, "request failed");
                }
            }
            res = &mut navigation, if !loaded => {
                res.map_err(|e| CaptureError::Navigation {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
                loaded = true;
                tracing::debug!(url, in_flight = tracker.in_flight(), "page loaded, waiting for network idle");
            }
            _ = &mut quiet, if loaded && tracker.is_idle() => break,
            else => break,
        }
        quiet
            .as_mut()
            .reset(tokio::time::Instant::now() + idle_window);
    }

    tracing::debug!(url, "network idle");
    Ok(())
}

/// Method, headers and body of an outgoing request.
///
/// The body comes from `postDataEntries`; when Chrome only flags that a body
/// exists it is fetched once the response finishes.
fn request_info(request: &Request, headers: Vec<(String, String)>) -> RequestInfo {
    let entries: Vec<String> = request
        .post_data_entries
        .iter()
        .flatten()
        .filter_map(|entry| entry.bytes.as_ref())
        .filter_map(|bytes| match serde_json::to_value(bytes) {
            Ok(serde_json::Value::String(b64)) => Some(b64),
            _ => None,
        })
        .collect();
    let post_body = decode_post_entries(&entries);
    let post_body_pending = post_body.is_none() && request.has_post_data == Some(true);
    RequestInfo {
        method: request.method.clone(),
        headers: headers
            .into_iter()
            .filter(|(name, _)| !is_pseudo_header(name))
            .collect(),
        post_body,
        post_body_pending,
    }
}

/// Complete a finished response with its body (and request body, if still
/// missing); a body fetch failure is a per-response error.
async fn fetch_body(page: &Page, request_id: RequestId, done: Finished) -> SourceItem {
    let Finished {
        mut event,
        post_body_pending,
    } = done;
    if post_body_pending {
        match page
            .execute(GetRequestPostDataParams::new(request_id.clone()))
            .await
        {
            Ok(resp) => event.post_body = Some(resp.result.post_data.clone()),
            Err(e) => tracing::debug!(url = %event.url, "request body unavailable: {}", e),
        }
    }
    match page.execute(GetResponseBodyParams::new(request_id)).await {
        Ok(resp) => {
            let body = resp.result.body.clone();
            event.body_text = decode_body(body, resp.result.base64_encoded);
            if event.body_text.is_none() {
                tracing::trace!(url = %event.url, "binary body");
            }
            Ok(event)
        }
        Err(e) => Err(ResponseError::Body {
            url: event.url,
            reason: e.to_string(),
        }),
    }
}
