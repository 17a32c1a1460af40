pub mod feedback;
pub mod health;

use crate::config::{AirtableConfig, TableNames};
use crate::error::{AppError, AppResult};
use actix_web::web;
use feedback_store::{airtable::AirtableClient, RecordStore};
use std::sync::Arc;
use tracing::{error, info};

/// Store handle and table selection shared by the feedback handlers
#[derive(Clone)]
pub struct FeedbackBackend {
    pub store: Arc<dyn RecordStore>,
    pub tables: TableNames,
}

pub struct AppState {
    backend: Option<FeedbackBackend>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, tables: TableNames) -> Self {
        Self {
            backend: Some(FeedbackBackend { store, tables }),
        }
    }

    /// State for a deployment missing store credentials. Every feedback
    /// request fails with a configuration error.
    pub fn unconfigured() -> Self {
        Self { backend: None }
    }

    pub fn from_config(config: &AirtableConfig) -> Self {
        let Some((api_key, base_id)) = config.credentials() else {
            error!("AIRTABLE_API_KEY and AIRTABLE_BASE_ID must be set; feedback requests will fail");
            return Self::unconfigured();
        };

        match AirtableClient::new(api_key, base_id) {
            Ok(client) => {
                let tables = config.table_names();
                info!(
                    store = client.store_name(),
                    base_id = base_id,
                    demo_table = %tables.demo,
                    tuition_table = %tables.tuition,
                    "Airtable store configured"
                );
                Self::new(Arc::new(client.with_base_url(&config.api_url)), tables)
            }
            Err(e) => {
                error!(error = %e, "Failed to create Airtable client");
                Self::unconfigured()
            }
        }
    }

    pub fn backend(&self) -> AppResult<&FeedbackBackend> {
        self.backend.as_ref().ok_or_else(|| {
            error!("Feedback request rejected: store is not configured");
            AppError::configuration()
        })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health::health_check))
        .service(web::resource("/api/feedback").to(feedback::feedback));
}
