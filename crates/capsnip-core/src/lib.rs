pub mod config;
pub mod logging;

pub mod capture;
pub mod chrome;
pub mod control;
pub mod error;
pub mod file_type;
pub mod har;
pub mod keyword;
pub mod model;
pub mod snippet;

pub use capture::{capture, CaptureOptions, ResponseSink, ResponseSource};
pub use error::{CaptureError, ResponseError};
pub use file_type::{classify, FileType};
pub use keyword::matches;
pub use model::{CaptureRequest, CapturedMatch, ResponseEvent};
pub use snippet::{render, RenderedMatch};
