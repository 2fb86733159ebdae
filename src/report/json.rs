use crate::types::estimate::MaintenanceResult;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a> {
    version: &'static str,
    generated_at: String,
    #[serde(flatten)]
    result: &'a MaintenanceResult,
}

pub fn to_json(result: &MaintenanceResult) -> Result<String, serde_json::Error> {
    let envelope = Envelope {
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now().to_rfc3339(),
        result,
    };
    serde_json::to_string_pretty(&envelope)
}
