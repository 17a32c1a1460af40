use actix_web::{test, web, App};
use async_trait::async_trait;
use feedback_api::config::TableNames;
use feedback_api::cors_headers;
use feedback_api::handlers::{configure, AppState};
use feedback_store::{Fields, Record, RecordStore, StoreError};
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Find {
        table: String,
        formula: String,
    },
    Update {
        table: String,
        record_id: String,
        fields: Fields,
    },
    Create {
        table: String,
        fields: Fields,
    },
}

/// In-memory store that records every call made against it
pub struct MockStore {
    pub records: Mutex<Vec<Record>>,
    pub failure: Mutex<Option<(u16, Option<Value>)>>,
    pub calls: Mutex<Vec<StoreCall>>,
}

impl MockStore {
    pub fn new() -> Self {
        MockStore {
            records: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let store = MockStore::new();
        *store.records.lock().unwrap() = records;
        store
    }

    /// Make every call fail with `status` and the given `error` payload
    pub fn failing(status: u16, details: Option<Value>) -> Self {
        let store = MockStore::new();
        *store.failure.lock().unwrap() = Some((status, details));
        store
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: StoreCall) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some((status, details)) => {
                let message = details
                    .as_ref()
                    .and_then(|d| d.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or("Unprocessable Entity")
                    .to_string();
                Err(StoreError::api_error(status, message, details))
            }
            None => Ok(()),
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn find_records(
        &self,
        table: &str,
        filter_formula: &str,
    ) -> Result<Vec<Record>, StoreError> {
        self.record_call(StoreCall::Find {
            table: table.to_string(),
            formula: filter_formula.to_string(),
        })?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn update_record(
        &self,
        table: &str,
        record_id: &str,
        fields: Fields,
    ) -> Result<Record, StoreError> {
        self.record_call(StoreCall::Update {
            table: table.to_string(),
            record_id: record_id.to_string(),
            fields: fields.clone(),
        })?;
        Ok(Record::new(record_id, fields))
    }

    async fn create_record(&self, table: &str, fields: Fields) -> Result<Record, StoreError> {
        self.record_call(StoreCall::Create {
            table: table.to_string(),
            fields: fields.clone(),
        })?;
        Ok(Record::new("recCreated", fields))
    }

    fn store_name(&self) -> &str {
        "mock"
    }
}

pub fn test_tables() -> TableNames {
    TableNames {
        demo: "Demo".to_string(),
        tuition: "Tuition".to_string(),
    }
}

pub fn record(id: &str, fields: Value) -> Record {
    Record::new(id, fields.as_object().cloned().unwrap_or_default())
}

pub fn state_with(store: &Arc<MockStore>) -> AppState {
    AppState::new(store.clone(), test_tables())
}

pub async fn setup_test_app(
    state: AppState,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(cors_headers())
            .configure(configure),
    )
    .await
}
