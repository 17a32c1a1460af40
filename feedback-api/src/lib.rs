pub mod config;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod models;
pub mod schema;

use actix_web::middleware::DefaultHeaders;

/// Permissive CORS headers attached to every response, errors included
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}
