use std::sync::Arc;

use readstack::config::Config;
use readstack::db::{create_pool, PgUserStore};
use readstack::routes::create_router;
use readstack::services::providers::GeminiProvider;
use readstack::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "readstack=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let store = Arc::new(PgUserStore::new(pool));
    let recommender = Arc::new(GeminiProvider::new(
        config.gemini_api_key.clone(),
        config.gemini_api_url.clone(),
        config.gemini_model.clone(),
    ));

    let state = AppState::new(store, recommender, config.jwt_secret.clone());
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "readstack backend listening");
    axum::serve(listener, app).await?;

    Ok(())
}
