/// Handler-level tests for the HTTP layer
/// Drives the axum handlers directly with constructed extractors
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use rust_cuil_api::config::{Config, SuggestionVariant};
use rust_cuil_api::errors::AppError;
use rust_cuil_api::handlers::{self, AppState};
use rust_cuil_api::models::{SuggestionQueryParams, SuggestionRequest};
use rust_cuil_api::suggestions::SuggestionEngine;

fn test_state(variant: SuggestionVariant) -> Arc<AppState> {
    let config = Config {
        port: 3000,
        variant,
        min_dni_digits: None,
        max_dni_digits: None,
        cache_ttl_secs: 60,
        cache_capacity: 100,
    };
    let engine = SuggestionEngine::new(config.engine_config());
    let suggestion_cache = Cache::builder()
        .time_to_live(Duration::from_secs(config.cache_ttl_secs))
        .max_capacity(config.cache_capacity)
        .build();
    Arc::new(AppState {
        config,
        engine,
        suggestion_cache,
    })
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, Json(body)) = handlers::health().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "rust-cuil-api");
}

#[tokio::test]
async fn get_suggestions_returns_full_variant_list() {
    let state = test_state(SuggestionVariant::Full);
    let params = SuggestionQueryParams {
        dni: Some("12345678".to_string()),
    };

    let Json(body) = handlers::get_suggestions(State(state), Query(params))
        .await
        .expect("request should succeed");

    assert_eq!(body.dni, "12345678");
    assert_eq!(body.count, 9);
    assert_eq!(body.suggestions.len(), 9);
    assert_eq!(body.suggestions[0], "20123456786 - PERSONA FÍSICA");
}

#[tokio::test]
async fn get_suggestions_requires_dni_parameter() {
    let state = test_state(SuggestionVariant::Full);
    let params = SuggestionQueryParams { dni: None };

    let result = handlers::get_suggestions(State(state.clone()), Query(params)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    // Blank counts as missing
    let params = SuggestionQueryParams {
        dni: Some("   ".to_string()),
    };
    let result = handlers::get_suggestions(State(state), Query(params)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn post_suggestions_returns_simple_variant_list() {
    let state = test_state(SuggestionVariant::Simple);
    let request = SuggestionRequest {
        dni: "12345678".to_string(),
    };

    let Json(body) = handlers::post_suggestions(State(state), Json(request))
        .await
        .expect("request should succeed");

    assert_eq!(body.count, 5);
    assert_eq!(body.suggestions[0], "20123456786");
}

#[tokio::test]
async fn post_suggestions_fails_soft_on_invalid_dni() {
    let state = test_state(SuggestionVariant::Full);
    for dni in ["abcdefgh", "123456", "123456789", "00000000"] {
        let request = SuggestionRequest {
            dni: dni.to_string(),
        };
        let Json(body) = handlers::post_suggestions(State(state.clone()), Json(request))
            .await
            .expect("invalid DNIs still answer 200");
        assert_eq!(body.count, 0, "expected no suggestions for {:?}", dni);
        assert!(body.suggestions.is_empty());
    }
}

#[tokio::test]
async fn post_suggestions_rejects_blank_dni() {
    let state = test_state(SuggestionVariant::Full);
    let request = SuggestionRequest {
        dni: "  ".to_string(),
    };
    let result = handlers::post_suggestions(State(state), Json(request)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn repeated_requests_hit_the_cache_and_agree() {
    let state = test_state(SuggestionVariant::Full);
    let params = || SuggestionQueryParams {
        dni: Some("12345676".to_string()),
    };

    let Json(first) = handlers::get_suggestions(State(state.clone()), Query(params()))
        .await
        .unwrap();
    let Json(second) = handlers::get_suggestions(State(state.clone()), Query(params()))
        .await
        .unwrap();

    assert_eq!(first.suggestions, second.suggestions);
    // The cached list is the deduplicated one
    assert_eq!(first.count, 8);

    // The cache holds the computed entry
    assert!(state
        .suggestion_cache
        .get(&"12345676".to_string())
        .await
        .is_some());
}

#[tokio::test]
async fn whitespace_is_trimmed_before_lookup() {
    let state = test_state(SuggestionVariant::Full);
    let params = SuggestionQueryParams {
        dni: Some("  12345678  ".to_string()),
    };

    let Json(body) = handlers::get_suggestions(State(state), Query(params))
        .await
        .unwrap();
    assert_eq!(body.dni, "12345678");
    assert_eq!(body.count, 9);
}
