//! Source of response events for one page load.
//!
//! The orchestrator only depends on this trait and does not know whether
//! events come from a live browser or a recorded HAR file.

use tokio::sync::mpsc;

use crate::error::{CaptureError, ResponseError};
use crate::model::ResponseEvent;

/// One item per observed response: either the event or why it could not be read.
pub type SourceItem = Result<ResponseEvent, ResponseError>;

/// Channel half the source pushes events into, in arrival order.
pub type ResponseSink = mpsc::UnboundedSender<SourceItem>;

/// Trait implemented by response sources (headless Chrome, HAR replay, test fakes).
#[allow(async_fn_in_trait)]
pub trait ResponseSource {
    /// Load `url` and push every response into `sink` until the network is idle.
    ///
    /// Returning drops `sink`, which tells the orchestrator that no more events
    /// will arrive. A page-level failure is returned as `CaptureError`;
    /// per-response failures go into the sink as `Err` items instead.
    async fn navigate(&mut self, url: &str, sink: ResponseSink) -> Result<(), CaptureError>;
}
