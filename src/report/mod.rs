pub mod json;
pub mod md;
pub mod text;

use crate::error::MaintenanceError;
use crate::types::estimate::MaintenanceResult;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Md,
    Json,
}

pub fn render(result: &MaintenanceResult, format: OutputFormat) -> Result<String, MaintenanceError> {
    match format {
        OutputFormat::Text => Ok(text::to_text(result)),
        OutputFormat::Md => Ok(md::to_markdown(result)),
        OutputFormat::Json => json::to_json(result).map_err(MaintenanceError::Json),
    }
}

pub(crate) fn money(amount: f64) -> String {
    format!("${amount:.2}")
}
