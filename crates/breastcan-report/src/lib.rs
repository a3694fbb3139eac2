//! Plain-text export of a therapy recommendation.

#![deny(unsafe_code)]

mod error;
mod render;
mod text;

pub use error::{ReportError, Result};
pub use render::{DATE_FORMAT, REPORT_TITLE, ReportHeader, render_report, write_report};
pub use text::{clean_text, report_file_name};
