mod app;
mod collaborations;
mod comments;
mod config;
mod error;
mod ideas;
mod state;
mod stats;
mod storage;
mod users;
mod validation;
mod votes;


use crate::{app::build_app, config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "sideproject=debug,axum=info,tower_http=info".to_string());
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

    let config = AppConfig::from_env()?;
    tracing::info!(
        seed_demo_data = config.seed_demo_data,
        featured_limit = config.featured_limit,
        "config loaded"
    );

    let app_state = AppState::init(config)?;
    let app = build_app(app_state.clone());
    app::serve(&app_state.config, app).await
}
