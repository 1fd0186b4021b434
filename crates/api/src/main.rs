use std::sync::Arc;

use taxgate_auth::{AuthConfig, TokenCodec};

#[tokio::main]
async fn main() {
    taxgate_observability::init();

    // Missing auth configuration is fatal at startup, never per-request.
    let config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid auth configuration");
            std::process::exit(1);
        }
    };

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::error!("DATABASE_URL not set");
            std::process::exit(1);
        }
    };
    let pool = match sqlx::PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };

    let codec = Arc::new(TokenCodec::new(&config));
    let services = Arc::new(taxgate_api::app::services::build_services(
        pool,
        Arc::clone(&codec),
    ));

    let app = taxgate_api::app::build_app(services, codec);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
