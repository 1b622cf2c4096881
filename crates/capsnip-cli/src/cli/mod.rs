//! CLI for capsnip.

mod commands;
mod report;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use capsnip_core::config::{self, CapsnipConfig};
use capsnip_core::keyword::parse_keyword_list;
use capsnip_core::{CaptureRequest, FileType};
use std::path::PathBuf;

use commands::{run_capture, run_config, run_har, BrowserOverrides};

/// Top-level CLI for capsnip.
#[derive(Debug, Parser)]
#[command(name = "capsnip")]
#[command(
    about = "capsnip: capture network responses matching keywords and render them as curl/Python snippets",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Load a URL in headless Chrome and capture matching responses.
    Capture {
        /// Target URL (http, https or file).
        url: String,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Navigation timeout in seconds (overrides config).
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Show the browser window instead of running headless.
        #[arg(long)]
        no_headless: bool,

        /// Path to the Chrome/Chromium executable (overrides config).
        #[arg(long, value_name = "PATH")]
        chrome: Option<PathBuf>,
    },

    /// Filter and render the responses recorded in a HAR file.
    Har {
        /// Path to the HAR file.
        path: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

/// Keyword and file-type filter shared by capture commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Comma-separated keywords; a response matches if its body contains any (case-insensitive).
    #[arg(short, long, value_name = "LIST")]
    pub keywords: Option<String>,

    /// File types to keep: json, html, js, css, xml, txt, other.
    #[arg(short = 't', long = "types", value_name = "TYPES", value_delimiter = ',')]
    pub file_types: Vec<FileType>,
}

impl FilterArgs {
    /// Build the capture request, filling unset filters from config.
    pub fn to_request(&self, url: &str, cfg: &CapsnipConfig) -> Result<CaptureRequest> {
        let keywords = match &self.keywords {
            Some(list) => parse_keyword_list(list),
            None => cfg.default_keywords.clone(),
        };
        let file_types = if self.file_types.is_empty() {
            cfg.default_file_types.clone()
        } else {
            self.file_types.clone()
        };
        if keywords.is_empty() {
            tracing::warn!("empty keyword list: nothing will match");
        }
        Ok(CaptureRequest::new(url, keywords, file_types)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Capture {
                url,
                filter,
                output,
                timeout,
                no_headless,
                chrome,
            } => {
                let overrides = BrowserOverrides {
                    timeout_secs: timeout,
                    headless: if no_headless { Some(false) } else { None },
                    executable: chrome,
                };
                run_capture(&cfg, &url, &filter, &output, &overrides).await?;
            }
            CliCommand::Har {
                path,
                filter,
                output,
            } => run_har(&cfg, &path, &filter, &output).await?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
