use crate::models::HealthResponse;
use actix_web::{HttpResponse, Result};
use chrono::Utc;

pub async fn health_check() -> Result<HttpResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    Ok(HttpResponse::Ok().json(response))
}
