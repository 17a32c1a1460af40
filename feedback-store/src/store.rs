use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column name to value map, as the store represents a row
pub type Fields = Map<String, Value>;

/// A single row returned by the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Fields,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
            created_time: None,
        }
    }

    /// Read a text column. Lookup and rollup columns come back as arrays,
    /// in which case the first string element is used.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            Value::String(s) if !s.is_empty() => Some(s.as_str()),
            Value::Array(items) => items
                .iter()
                .find_map(|item| item.as_str().filter(|s| !s.is_empty())),
            _ => None,
        }
    }
}

/// Core trait for the tabular store behind the feedback forms
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Return the rows of `table` matching `filter_formula`, in store order
    async fn find_records(&self, table: &str, filter_formula: &str)
        -> Result<Vec<Record>, StoreError>;

    /// Overwrite the given columns of an existing row
    async fn update_record(
        &self,
        table: &str,
        record_id: &str,
        fields: Fields,
    ) -> Result<Record, StoreError>;

    /// Insert a new row
    async fn create_record(&self, table: &str, fields: Fields) -> Result<Record, StoreError>;

    /// Get store name (e.g., "airtable")
    fn store_name(&self) -> &str;
}
