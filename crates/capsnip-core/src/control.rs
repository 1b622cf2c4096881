//! Capture control: a shareable abort handle for a running capture.
//!
//! The orchestrator races navigation against `CaptureControl::aborted`; any
//! holder of the handle (e.g. a Ctrl-C listener in the CLI) can end the run.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct CaptureControl {
    aborted: AtomicBool,
    notify: Notify,
}

impl CaptureControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request abort. Idempotent; wakes every task waiting in `aborted()`.
    pub fn request_abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    /// Resolves once abort has been requested (immediately if it already was).
    pub async fn aborted(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_aborted() {
                return;
            }
            notified.await;
        }
    }
}
