use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tsx_dividends_core::{errors::Error as CoreError, CacheStatus};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Serialize)]
struct RefreshResponse {
    success: bool,
    count: usize,
    updated: String,
}

#[derive(Serialize)]
struct StatusResponse {
    success: bool,
    cache: CacheStatus,
}

#[derive(Serialize)]
struct InvalidateResponse {
    success: bool,
}

/// Drop the cached listing and fetch it again right away.
async fn refresh_cache(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshResponse>> {
    let count = state
        .dividend_service
        .refresh()
        .await
        .map_err(|e| match e {
            CoreError::UpstreamUnavailable(reason) => {
                tracing::warn!("Listing refresh failed: {}", reason);
                ApiError::ServiceUnavailable(
                    "Dividend data source is temporarily unavailable".to_string(),
                )
            }
            other => other.into(),
        })?;

    Ok(Json(RefreshResponse {
        success: true,
        count,
        updated: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
    }))
}

async fn invalidate_cache(State(state): State<Arc<AppState>>) -> Json<InvalidateResponse> {
    state.dividend_service.invalidate().await;
    Json(InvalidateResponse { success: true })
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let cache = state.dividend_service.cache_status().await;
    Json(StatusResponse {
        success: true,
        cache,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cache", delete(invalidate_cache))
        .route("/cache/refresh", post(refresh_cache))
        .route("/status", get(get_status))
}
