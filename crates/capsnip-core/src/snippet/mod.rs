//! Render a captured match as ready-to-run request snippets.
//!
//! Both renderers are pure functions of the match; header order follows the
//! order the request was recorded in.

mod python;
mod shell;

use serde::Serialize;

use crate::model::CapturedMatch;

pub use python::to_python;
pub use shell::{shell_quote, to_curl};

/// Characters of response text the Python snippet prints by default.
pub const DEFAULT_SCRIPT_PREVIEW_CHARS: usize = 500;

/// A match plus its two textual reproductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMatch {
    #[serde(flatten)]
    pub captured: CapturedMatch,
    /// `curl` command line.
    pub curl: String,
    /// Python program using `requests`.
    pub python: String,
}

/// Render with the default preview length.
pub fn render(m: &CapturedMatch) -> RenderedMatch {
    render_with(m, DEFAULT_SCRIPT_PREVIEW_CHARS)
}

/// Render, printing at most `preview_chars` characters of response text in the script form.
pub fn render_with(m: &CapturedMatch, preview_chars: usize) -> RenderedMatch {
    RenderedMatch {
        captured: m.clone(),
        curl: to_curl(m),
        python: to_python(m, preview_chars),
    }
}

/// Post body worth reproducing: present and non-empty.
fn post_body(m: &CapturedMatch) -> Option<&str> {
    m.post_body.as_deref().filter(|b| !b.is_empty())
}
