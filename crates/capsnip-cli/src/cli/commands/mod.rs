//! CLI command handlers.

mod capture;
mod config;
mod har;

pub use capture::{run_capture, BrowserOverrides};
pub use config::run_config;
pub use har::run_har;

use anyhow::Result;
use capsnip_core::capture::ResponseSource;
use capsnip_core::control::CaptureControl;
use capsnip_core::{CaptureOptions, CaptureRequest, CapturedMatch};
use std::sync::Arc;

/// Run one capture; Ctrl-C aborts it.
async fn capture_interruptible<S: ResponseSource>(
    request: &CaptureRequest,
    source: &mut S,
    options: &CaptureOptions,
) -> Result<Vec<CapturedMatch>> {
    let control = Arc::new(CaptureControl::new());
    let listener = {
        let control = Arc::clone(&control);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, aborting capture");
                control.request_abort();
            }
        })
    };
    let result = capsnip_core::capture(request, source, options, Some(control.as_ref())).await;
    listener.abort();
    Ok(result?)
}
