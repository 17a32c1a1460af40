use crate::store::{Fields, Record};
use serde::{Deserialize, Serialize};

/// Response of `GET /v0/{base}/{table}`
#[derive(Debug, Clone, Deserialize)]
pub struct AirtableListResponse {
    #[serde(default)]
    pub records: Vec<Record>,
}

/// Body of a PATCH or POST against a table
#[derive(Debug, Clone, Serialize)]
pub struct AirtableWriteRequest {
    pub fields: Fields,
}

/// Error envelope. Airtable sends either `{"error": "NOT_FOUND"}` or
/// `{"error": {"type": "...", "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AirtableErrorResponse {
    pub error: serde_json::Value,
}

impl AirtableErrorResponse {
    pub fn message(&self) -> Option<String> {
        self.error
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| self.error.as_str())
            .map(str::to_string)
    }
}
