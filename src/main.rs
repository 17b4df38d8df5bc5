mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Video-room config is optional: provisioning is disabled without it.
    let daily = services::live::DailyConfig::from_env();
    if daily.is_none() {
        tracing::warn!("DAILY_API_KEY not set — live session provisioning disabled");
    }

    let storage = services::storage::MaterialStore::from_env();
    tracing::info!(root = %storage.root().display(), "materials store ready");

    let state = state::AppState::new(pool, daily, storage);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "edportal listening");
    axum::serve(listener, app).await.expect("server failed");
}
