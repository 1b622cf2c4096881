use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::file_type::FileType;

/// Browser launch parameters (optional `[browser]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Chrome/Chromium executable; auto-detected when unset.
    pub executable: Option<PathBuf>,
    /// Run without a visible window.
    pub headless: bool,
    /// Extra command-line switches passed to the browser.
    pub extra_args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
            extra_args: Vec::new(),
        }
    }
}

/// Global configuration loaded from `~/.config/capsnip/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapsnipConfig {
    /// Upper bound in seconds for one navigation, network-idle wait included.
    pub navigation_timeout_secs: u64,
    /// Quiet window in milliseconds with no requests in flight that counts as "network idle".
    pub network_idle_ms: u64,
    /// Characters of response body kept per match.
    pub body_snippet_chars: usize,
    /// Characters of response text the generated Python snippet prints.
    pub script_preview_chars: usize,
    /// File types captured when none are given on the command line.
    pub default_file_types: Vec<FileType>,
    /// Keywords used when none are given on the command line.
    pub default_keywords: Vec<String>,
    pub browser: BrowserSettings,
}

impl Default for CapsnipConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_secs: 60,
            network_idle_ms: 500,
            body_snippet_chars: 1000,
            script_preview_chars: 500,
            default_file_types: vec![FileType::Json, FileType::Html],
            default_keywords: vec!["user".to_string(), "token".to_string(), "error".to_string()],
            browser: BrowserSettings::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("capsnip")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CapsnipConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CapsnipConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: CapsnipConfig = toml::from_str(&data)
        .with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = CapsnipConfig::default();
        assert_eq!(cfg.navigation_timeout_secs, 60);
        assert_eq!(cfg.network_idle_ms, 500);
        assert_eq!(cfg.body_snippet_chars, 1000);
        assert_eq!(cfg.script_preview_chars, 500);
        assert_eq!(cfg.default_file_types, vec![FileType::Json, FileType::Html]);
        assert_eq!(cfg.default_keywords, vec!["user", "token", "error"]);
        assert!(cfg.browser.headless);
        assert!(cfg.browser.executable.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = CapsnipConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: CapsnipConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            navigation_timeout_secs = 15
            default_file_types = ["js", "css"]
        "#;
        let cfg: CapsnipConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.navigation_timeout_secs, 15);
        assert_eq!(cfg.default_file_types, vec![FileType::Js, FileType::Css]);
        assert_eq!(cfg.network_idle_ms, 500);
        assert_eq!(cfg.body_snippet_chars, 1000);
        assert!(cfg.browser.headless);
    }

    #[test]
    fn config_toml_browser_section() {
        let toml = r#"
            [browser]
            executable = "/usr/bin/chromium"
            headless = false
            extra_args = ["--no-sandbox"]
        "#;
        let cfg: CapsnipConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            cfg.browser.executable.as_deref(),
            Some(std::path::Path::new("/usr/bin/chromium"))
        );
        assert!(!cfg.browser.headless);
        assert_eq!(cfg.browser.extra_args, vec!["--no-sandbox"]);
    }

    #[test]
    fn config_toml_rejects_unknown_file_type() {
        let toml = r#"default_file_types = ["png"]"#;
        assert!(toml::from_str::<CapsnipConfig>(toml).is_err());
    }
}
