use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use cookbook_auth_types::identity::JwtSecret;
use cookbook_core::config::Config;
use cookbook_core::tracing::init_tracing;

use cookbook_api::config::ApiConfig;
use cookbook_api::infra::mail::build_mailer;
use cookbook_api::jobs::JobRegistry;
use cookbook_api::router::build_router;
use cookbook_api::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing("info,sqlx=warn,tower_http=info");

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = build_mailer(&config).expect("failed to build mailer");

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        jobs: Arc::new(JobRegistry::new()),
        mailer,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("cookbook api listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
