use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::app::build_router;
use api::state::AppState;
use infra::db::Db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let db = Db::new();

    // Directory data normally comes from the member/staff services; seed a
    // handful of rows for standalone runs (enable with SEED_DEMO_DATA=true).
    let seed = std::env::var("SEED_DEMO_DATA")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);
    if seed {
        api::seed::seed_demo_data(&db);
    }

    let state = AppState::new(db);
    let app = build_router(state);

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()?;
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
