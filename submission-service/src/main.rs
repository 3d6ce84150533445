use dotenvy::dotenv;
use service_core::observability::logging::init_tracing;
use std::sync::Arc;
use submission_service::config::Settings;
use submission_service::services::{
    database::Database, jwt::JwtService, storage::LocalStorage,
};
use submission_service::startup::build_router;
use submission_service::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = Settings::from_env().map_err(|e| anyhow::anyhow!("configuration: {}", e))?;
    init_tracing("submission-service", &settings.log_level);

    let db = Arc::new(Database::new());
    if settings.seed_demo {
        db.seed_demo("changeme")
            .await
            .map_err(|e| anyhow::anyhow!("seeding: {}", e))?;
    }

    let jwt = Arc::new(JwtService::new(
        &settings.jwt.secret,
        settings.jwt.session_ttl_hours,
    ));
    let storage = Arc::new(
        LocalStorage::new(&settings.storage.upload_dir)
            .await
            .map_err(|e| anyhow::anyhow!("storage: {}", e))?,
    );

    let app = build_router(AppState::new(db, jwt, storage));

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting submission-service on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
