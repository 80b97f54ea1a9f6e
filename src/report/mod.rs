pub mod json;
pub mod md;

use crate::error::CommitScoreError;
use md::ToMarkdown;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render<T>(value: &T, format: OutputFormat) -> Result<String, CommitScoreError>
where
    T: Serialize + ToMarkdown,
{
    match format {
        OutputFormat::Json => json::to_json(value).map_err(CommitScoreError::Json),
        OutputFormat::Md => Ok(value.to_markdown()),
    }
}
