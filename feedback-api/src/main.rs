use actix_web::{middleware::Logger, web, App, HttpServer};
use feedback_api::config::AppConfig;
use feedback_api::cors_headers;
use feedback_api::handlers::{self, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration first to get logging settings
    let config = AppConfig::load().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting feedback-api on {}:{}",
        config.server.host, config.server.port
    );

    let state = web::Data::new(AppState::from_config(&config.airtable));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors_headers())
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
