//! `capsnip config` – show config path and effective values.

use anyhow::Result;
use capsnip_core::config::{self, CapsnipConfig};
use capsnip_core::logging;

pub fn run_config(cfg: &CapsnipConfig) -> Result<()> {
    println!("config: {}", config::config_path()?.display());
    if let Ok(log) = logging::log_file_path() {
        println!("log:    {}", log.display());
    }
    println!();
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
