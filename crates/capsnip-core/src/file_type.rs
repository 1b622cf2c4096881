//! File-type classification from a `Content-Type` header or, failing that, the URL.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CaptureError;

/// Coarse file-type tag used to filter captured responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Json,
    Html,
    Js,
    Css,
    Xml,
    Txt,
    Other,
}

impl FileType {
    pub const ALL: [FileType; 7] = [
        FileType::Json,
        FileType::Html,
        FileType::Js,
        FileType::Css,
        FileType::Xml,
        FileType::Txt,
        FileType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Json => "json",
            FileType::Html => "html",
            FileType::Js => "js",
            FileType::Css => "css",
            FileType::Xml => "xml",
            FileType::Txt => "txt",
            FileType::Other => "other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        FileType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| {
                CaptureError::InvalidInput(format!(
                    "unknown file type {:?} (expected one of json, html, js, css, xml, txt, other)",
                    tag
                ))
            })
    }
}

/// Content-type substrings in precedence order; first hit wins.
const CONTENT_TYPE_RULES: [(&str, FileType); 6] = [
    ("json", FileType::Json),
    ("html", FileType::Html),
    ("javascript", FileType::Js),
    ("css", FileType::Css),
    ("xml", FileType::Xml),
    ("text/plain", FileType::Txt),
];

/// URL path suffixes, checked in order when there is no content type.
const SUFFIX_RULES: [(&str, FileType); 7] = [
    (".js", FileType::Js),
    (".css", FileType::Css),
    (".json", FileType::Json),
    (".xml", FileType::Xml),
    (".txt", FileType::Txt),
    (".html", FileType::Html),
    (".htm", FileType::Html),
];

/// Classify a response. Total: every input maps to some `FileType`.
///
/// A non-empty `content_type` decides on its own (case-insensitive substring
/// match, see `CONTENT_TYPE_RULES`). Otherwise the URL's path suffix is used;
/// query string and fragment are ignored so `app.js?v=3` still counts as js.
pub fn classify(content_type: &str, url: &str) -> FileType {
    let content_type = content_type.trim();
    if !content_type.is_empty() {
        let ct = content_type.to_ascii_lowercase();
        return CONTENT_TYPE_RULES
            .iter()
            .find(|(needle, _)| ct.contains(needle))
            .map(|(_, t)| *t)
            .unwrap_or(FileType::Other);
    }

    suffix_type(&url_path(url).to_ascii_lowercase())
        .or_else(|| suffix_type(&url.to_ascii_lowercase()))
        .unwrap_or(FileType::Other)
}

fn suffix_type(s: &str) -> Option<FileType> {
    SUFFIX_RULES
        .iter()
        .find(|(suffix, _)| s.ends_with(suffix))
        .map(|(_, t)| *t)
}

fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
