use std::sync::Arc;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod state;
mod users;

use crate::{config::AppConfig, state::AppState, users::repo::PgUserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "unidate=debug,axum=info,tower_http=info,sqlx=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    tracing::debug!(
        redis = %config.redis.address(),
        redis_auth = !config.redis.password.is_empty(),
        "cache settings loaded; not used by the auth flow"
    );

    let pool = db::connect(&config.database).await?;
    db::migrate(&pool).await?;

    let state = AppState::new(config.clone(), Arc::new(PgUserStore::new(pool)));
    let app = app::build_app(state);
    app::serve(app, &config.server).await
}
