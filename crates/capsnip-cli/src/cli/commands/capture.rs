//! `capsnip capture <url>` – live capture through headless Chrome.

use anyhow::Result;
use capsnip_core::chrome::ChromeSource;
use capsnip_core::config::CapsnipConfig;
use capsnip_core::CaptureOptions;
use std::path::PathBuf;

use crate::cli::report;
use crate::cli::{FilterArgs, OutputArgs};

use super::capture_interruptible;

/// Per-run overrides of the `[browser]` config section.
#[derive(Debug, Clone, Default)]
pub struct BrowserOverrides {
    pub timeout_secs: Option<u64>,
    pub headless: Option<bool>,
    pub executable: Option<PathBuf>,
}

impl BrowserOverrides {
    pub fn apply(&self, cfg: &CapsnipConfig) -> CapsnipConfig {
        let mut cfg = cfg.clone();
        if let Some(secs) = self.timeout_secs {
            cfg.navigation_timeout_secs = secs;
        }
        if let Some(headless) = self.headless {
            cfg.browser.headless = headless;
        }
        if let Some(exe) = &self.executable {
            cfg.browser.executable = Some(exe.clone());
        }
        cfg
    }
}

pub async fn run_capture(
    cfg: &CapsnipConfig,
    url: &str,
    filter: &FilterArgs,
    output: &OutputArgs,
    overrides: &BrowserOverrides,
) -> Result<()> {
    let request = filter.to_request(url, cfg)?;
    let cfg = overrides.apply(cfg);
    let mut source = ChromeSource::from_config(&cfg);
    let options = CaptureOptions::from(&cfg);

    eprintln!("Capturing requests from {} ...", request.url);
    let matches = capture_interruptible(&request, &mut source, &options).await?;
    report::emit(&matches, &request, cfg.script_preview_chars, output)
}
