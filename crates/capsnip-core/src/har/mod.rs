//! HAR (HTTP Archive) replay: filter and render a recorded session without a browser.
//!
//! Each entry becomes one `ResponseEvent`: request method, headers in file
//! order (HTTP/2 pseudo-headers dropped), `postData.text`, response status, `Content-Type` (header, else
//! `content.mimeType`) and `content.text`.

mod parse;
mod source;

pub use source::HarSource;
