//! # Mesh Doctor Report
//!
//! Renders [`ValidationResult`]s as text, markdown or JSON.
//!
//! ```text
//! &[ValidationResult] ──> reporter_for(format, theme)
//!                           ├─ TextReporter      aligned tables, optional color
//!                           ├─ MarkdownReporter  pipe tables, `---` between results
//!                           └─ JsonReporter      object for one result, array otherwise
//! ```
//!
//! The table layout of each result is picked from its first finding.

mod error;
mod format;
mod json;
mod layout;
mod markdown;
mod table;
mod text;
mod theme;

pub use error::{ReportError, Result};
pub use format::ReportFormat;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use text::TextReporter;
pub use theme::{Theme, Tone};

use mesh_doctor_analysis::ValidationResult;

/// Turns analyzer output into one printable document.
pub trait Reporter {
    fn render(&self, results: &[ValidationResult]) -> Result<String>;
}

/// Picks the reporter for `format`. Only the text reporter uses `theme`.
pub fn reporter_for(format: ReportFormat, theme: Theme) -> Box<dyn Reporter> {
    match format {
        ReportFormat::Text => Box::new(TextReporter::new(theme)),
        ReportFormat::Markdown => Box::new(MarkdownReporter),
        ReportFormat::Json => Box::new(JsonReporter),
    }
}
