use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use engine_audit::UciOracle;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use server::config::Config;
use server::routes;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Arc::new(Config::from_env());
    tracing::info!(
        engine_path = %config.engine_path,
        depth = config.search_depth,
        "Config loaded"
    );

    // The engine process itself spawns lazily on the first analysis.
    let oracle: server::SharedOracle = Arc::new(Mutex::new(UciOracle::new(
        config.engine_path.clone(),
        Duration::from_secs(config.eval_timeout_secs),
    )));

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/analyze", post(routes::analyze::analyze))
        // Shared state
        .layer(Extension(config.clone()))
        .layer(Extension(oracle.clone()))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Release the engine process; tolerates one that already exited.
    oracle.lock().await.shutdown().await;
    tracing::info!("Shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
