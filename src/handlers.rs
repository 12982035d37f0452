use crate::config::Config;
use crate::errors::AppError;
use crate::models::{SuggestionQueryParams, SuggestionRequest, SuggestionResponse};
use crate::suggestions::SuggestionEngine;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use moka::future::Cache;
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// The suggestion engine, configured for the active variant.
    pub engine: SuggestionEngine,
    /// Cache of computed suggestion lists keyed by trimmed DNI.
    /// The engine is deterministic, so entries never go stale before TTL.
    pub suggestion_cache: Cache<String, Vec<String>>,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-cuil-api",
            "version": "0.1.0"
        })),
    )
}

/// GET /api/v1/cuil/suggestions
///
/// Derives CUIL/CUIT suggestions for the DNI given as a query parameter.
/// This is what the web form calls on submit.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `params` - Query parameters containing the DNI.
///
/// # Returns
///
/// * `Result<Json<SuggestionResponse>, AppError>` - The suggestion list
///   (possibly empty) or a bad-request error when the parameter is missing.
#[utoipa::path(
    get,
    path = "/api/v1/cuil/suggestions",
    params(SuggestionQueryParams),
    responses(
        (status = 200, description = "Suggestions for the DNI (empty list means none)", body = SuggestionResponse),
        (status = 400, description = "Missing 'dni' parameter")
    )
)]
pub async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestionQueryParams>,
) -> Result<Json<SuggestionResponse>, AppError> {
    tracing::info!("GET /api/v1/cuil/suggestions - params: {:?}", params);

    let dni = params
        .dni
        .as_deref()
        .map(str::trim)
        .filter(|dni| !dni.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'dni' parameter".to_string()))?;

    let suggestions = cached_suggestions(&state, dni).await;
    Ok(Json(suggestion_response(dni, suggestions)))
}

/// POST /api/v1/cuil/suggestions
///
/// Same as the GET variant, taking the DNI in a JSON body. Invalid DNIs
/// produce an empty suggestion list, not an error: the empty list is the
/// caller's cue to render its "no suggestions" placeholder.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - JSON body containing the DNI.
///
/// # Returns
///
/// * `Result<Json<SuggestionResponse>, AppError>` - The suggestion list
///   (possibly empty) or a bad-request error when the field is blank.
#[utoipa::path(
    post,
    path = "/api/v1/cuil/suggestions",
    request_body = SuggestionRequest,
    responses(
        (status = 200, description = "Suggestions for the DNI (empty list means none)", body = SuggestionResponse),
        (status = 400, description = "Blank 'dni' field")
    )
)]
pub async fn post_suggestions(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    tracing::info!("POST /api/v1/cuil/suggestions - dni: {:?}", request.dni);

    let dni = request.dni.trim();
    if dni.is_empty() {
        return Err(AppError::BadRequest("'dni' must not be blank".to_string()));
    }

    let suggestions = cached_suggestions(&state, dni).await;
    Ok(Json(suggestion_response(dni, suggestions)))
}

/// Read-through cache around the engine.
async fn cached_suggestions(state: &Arc<AppState>, dni: &str) -> Vec<String> {
    let cache_key = dni.to_string();

    if let Some(cached) = state.suggestion_cache.get(&cache_key).await {
        tracing::debug!("Suggestion cache HIT for DNI: {}", dni);
        return cached;
    }

    tracing::info!("Suggestion cache MISS - generating for DNI: {}", dni);
    let suggestions = state.engine.generate(dni);
    state
        .suggestion_cache
        .insert(cache_key, suggestions.clone())
        .await;

    suggestions
}

fn suggestion_response(dni: &str, suggestions: Vec<String>) -> SuggestionResponse {
    if suggestions.is_empty() {
        tracing::warn!("No suggestions for DNI: {}", dni);
    } else {
        tracing::info!("{} suggestion(s) for DNI: {}", suggestions.len(), dni);
    }
    SuggestionResponse {
        dni: dni.to_string(),
        count: suggestions.len(),
        suggestions,
        generated_at: Utc::now(),
    }
}
