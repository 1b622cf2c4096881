//! `capsnip har <path>` – filter and render a recorded HAR session.

use anyhow::{Context, Result};
use capsnip_core::config::CapsnipConfig;
use capsnip_core::har::HarSource;
use capsnip_core::CaptureOptions;
use std::path::Path;

use crate::cli::report;
use crate::cli::{FilterArgs, OutputArgs};

use super::capture_interruptible;

pub async fn run_har(
    cfg: &CapsnipConfig,
    path: &Path,
    filter: &FilterArgs,
    output: &OutputArgs,
) -> Result<()> {
    let mut source = HarSource::open(path)?;
    let abs = std::fs::canonicalize(path)
        .with_context(|| format!("resolve HAR path: {}", path.display()))?;
    let url = url::Url::from_file_path(&abs)
        .map_err(|_| anyhow::anyhow!("HAR path is not absolute: {}", abs.display()))?;
    let request = filter.to_request(url.as_str(), cfg)?;
    tracing::info!(path = %path.display(), entries = source.len(), "replaying HAR");

    let matches = capture_interruptible(&request, &mut source, &CaptureOptions::from(cfg)).await?;
    report::emit(&matches, &request, cfg.script_preview_chars, output)
}
