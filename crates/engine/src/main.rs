//! Holocron Engine - Main entry point.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use holocron_engine::{
    api,
    infrastructure::{
        config::{load_dotenv, AppConfig},
        correlation::request_span,
        sqlite::SqliteRepositories,
    },
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv(
        &std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join(".."),
    );

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "holocron_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Holocron Engine");

    let config = AppConfig::from_env()?;

    tracing::info!(database_url = %config.database_url, "Opening SQLite database");
    let repos = SqliteRepositories::connect(&config.database_url).await?;

    let app = Arc::new(App::new(repos));

    let mut router = api::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| request_span(request)));

    if let Some(cors) = config.cors_allowed_origins.as_deref().and_then(build_cors_layer) {
        router = router.layer(cors);
    }

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_cors_layer(allowed_origins: &str) -> Option<CorsLayer> {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!(allowed_origins, "No usable CORS origins, CORS layer disabled");
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
