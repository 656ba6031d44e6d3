//! HTTP route handlers.
//!
//! Thin glue between the wire and the core: handlers validate input,
//! delegate to the cache, and serialize the result. All substance lives
//! in [`crate::cache`] and [`crate::search`].

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::mvg::MvgError;
use crate::search::filter_incidents;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/incidents", get(get_incidents))
        .route("/api/incidents/search", get(search_incidents))
        .route("/api/cache-status", get(cache_status))
        .route("/resources/incidents", get(incidents_resource))
        .route("/resources/cache-info", get(cache_info_resource))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current incidents, served from cache unless stale or forced.
async fn get_incidents(
    State(state): State<AppState>,
    Query(req): Query<GetIncidentsRequest>,
) -> Result<Json<IncidentsResponse>, AppError> {
    let incidents = state.cache.get_incidents(req.force_refresh).await?;
    let cache_info = state.cache.status().await;

    Ok(Json(IncidentsResponse {
        count: incidents.len(),
        incidents: incidents.as_ref().clone(),
        cache_info,
    }))
}

/// Search cached incidents by query and optional line filter.
///
/// Goes through the normal (non-forced) cache read path, so a stale cache
/// is refreshed first and fetch failures surface to the caller.
async fn search_incidents(
    State(state): State<AppState>,
    Query(req): Query<SearchIncidentsRequest>,
) -> Result<Json<SearchIncidentsResponse>, AppError> {
    // Validate before touching the cache.
    let query = req
        .query
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation {
            message: "missing required parameter: query".to_string(),
        })?;

    let incidents = state.cache.get_incidents(false).await?;
    let matches = filter_incidents(&incidents, query, req.line.as_deref());

    Ok(Json(SearchIncidentsResponse {
        count: matches.len(),
        incidents: matches,
        query: query.to_string(),
        line: req.line,
        total_incidents: incidents.len(),
    }))
}

/// Cache status introspection. Never triggers a fetch.
async fn cache_status(State(state): State<AppState>) -> Json<crate::cache::CacheStatus> {
    Json(state.cache.status().await)
}

/// Read-only resource: the current incident collection as a JSON document.
async fn incidents_resource(State(state): State<AppState>) -> Result<Response, AppError> {
    let incidents = state.cache.get_incidents(false).await?;
    json_document(incidents.as_ref())
}

/// Read-only resource: the current cache status as a JSON document.
async fn cache_info_resource(State(state): State<AppState>) -> Result<Response, AppError> {
    let status = state.cache.status().await;
    json_document(&status)
}

/// Serialize a value as a pretty-printed JSON document response.
fn json_document<T: serde::Serialize>(value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_string_pretty(value).map_err(|e| AppError::Internal {
        message: format!("serialization error: {e}"),
    })?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed tool arguments, rejected before any cache interaction.
    Validation { message: String },
    /// The upstream fetch failed.
    Upstream(MvgError),
    Internal { message: String },
}

impl From<MvgError> for AppError {
    fn from(e: MvgError) -> Self {
        AppError::Upstream(e)
    }
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation",
            AppError::Upstream(e) => e.kind(),
            AppError::Internal { .. } => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
        };

        tracing::error!(kind = self.kind(), %status, "{message}");

        let body = Json(ErrorResponse {
            kind: self.kind().to_string(),
            error: message,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_bad_request() {
        let response = AppError::Validation {
            message: "missing required parameter: query".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_errors_map_to_bad_gateway() {
        let network = AppError::from(MvgError::Network {
            message: "timeout".into(),
        });
        assert_eq!(network.kind(), "network");
        assert_eq!(network.into_response().status(), StatusCode::BAD_GATEWAY);

        let format = AppError::from(MvgError::UpstreamFormat {
            message: "not a list".into(),
            body: None,
        });
        assert_eq!(format.kind(), "upstream_format");
        assert_eq!(format.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_error_maps_to_500() {
        let response = AppError::Internal {
            message: "oops".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
