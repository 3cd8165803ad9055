use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use murmur_api::config::{log_filter, Config, StoreBackend};
use murmur_api::graphql::GraphQLService;
use murmur_api::routes::app_router;
use murmur_api::store::{MemoryStore, PgStore, Store};

/// Build the CORS layer based on configuration.
///
/// In production mode:
/// - If `CORS_ORIGINS` is set, only those origins are allowed
/// - If `CORS_ORIGINS` is not set, CORS requests are rejected (no origins allowed)
///
/// In development mode:
/// - If `CORS_ORIGINS` is set, those origins are used
/// - If `CORS_ORIGINS` is not set, permissive CORS is used for convenience
fn build_cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                CorsLayer::new()
            } else {
                tracing::info!(
                    "CORS configured with {} allowed origin(s): {:?}",
                    allowed_origins.len(),
                    origins
                );
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                    .max_age(std::time::Duration::from_secs(3600))
            }
        }
        _ if config.is_production() => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected. Set CORS_ORIGINS to allow cross-origin requests."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!(
                "Using permissive CORS in development mode. \
                 Set CORS_ORIGINS for production-like behavior."
            );
            CorsLayer::permissive()
        }
    }
}

/// Open the configured store, running migrations for PostgreSQL
async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let store = PgStore::connect(config.database()).await?;
            tracing::info!("Database connection established");

            tracing::info!("Running database migrations...");
            store.migrate().await?;
            tracing::info!("Migrations completed successfully");

            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env first so RUST_LOG from it reaches the filter
    let dotenv_loaded = murmur_shared_config::load_dotenv();

    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenv_loaded {
        tracing::debug!("Loaded .env file");
    }

    let config = Config::from_env()?;

    tracing::info!(
        environment = %config.environment(),
        store = %config.store_backend,
        "Starting Murmur API server on port {}",
        config.port
    );

    let store = open_store(&config).await?;

    // Schema is built once; loaders are created per request
    let service = GraphQLService::new(store, config.loader);
    tracing::info!(
        batch_delay_ms = config.loader.batch_delay.as_millis() as u64,
        max_batch_size = config.loader.max_batch_size,
        "GraphQL schema built"
    );

    let app = app_router(service, config.playground_enabled)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    if config.playground_enabled {
        tracing::info!(
            "GraphQL Playground available at http://{}:{}/",
            addr.ip(),
            addr.port()
        );
    }

    axum::serve(listener, app).await?;

    Ok(())
}
