use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use mvg_server::cache::{CacheConfig, DEFAULT_CACHE_MINUTES, IncidentCache};
use mvg_server::mvg::{MvgClient, MvgConfig};
use mvg_server::web::{AppState, create_router};

/// Default port for the HTTP listener.
const DEFAULT_PORT: u16 = 3000;

/// Read a numeric environment override, falling back to the default.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("Warning: ignoring unparseable {name}={value}");
            default
        }),
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Startup overrides; core defaults apply when unset.
    let cache_minutes: u64 = env_or("MVG_CACHE_MINUTES", DEFAULT_CACHE_MINUTES);
    let timeout_secs: u64 = env_or("MVG_TIMEOUT_SECS", 30);
    let port: u16 = env_or("MVG_PORT", DEFAULT_PORT);

    let client = MvgClient::new(MvgConfig::new().with_timeout(timeout_secs))
        .expect("Failed to create MVG client");
    let cache = IncidentCache::new(client, &CacheConfig::minutes(cache_minutes));

    let state = AppState::new(cache);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!(%addr, cache_minutes, "MVG disruption server listening");
    tracing::info!("Endpoints:");
    tracing::info!("  GET /health                - Health check");
    tracing::info!("  GET /api/incidents         - Current incidents (cached)");
    tracing::info!("  GET /api/incidents/search  - Search incidents");
    tracing::info!("  GET /api/cache-status      - Cache introspection");
    tracing::info!("  GET /resources/incidents   - Incident collection document");
    tracing::info!("  GET /resources/cache-info  - Cache status document");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
