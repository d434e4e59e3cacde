//! Output formatting module
//!
//! Results render either as aligned plain text or as pretty-printed JSON.

pub mod human;
pub mod json;

use crate::engine::ExecutionResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

pub fn format_output(result: &ExecutionResult, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => human::format_human(result),
        OutputFormat::Json => json::format_json(result),
    }
}
