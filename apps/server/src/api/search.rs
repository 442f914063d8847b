use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tsx_dividends_core::{errors::Error as CoreError, ShapedRecord};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const MISSING_SYMBOL: &str = "Please provide a stock symbol";
const SEARCH_UNAVAILABLE: &str = "Search service is temporarily unavailable";

#[derive(Deserialize)]
struct SearchQuery {
    symbol: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    data: Vec<ShapedRecord>,
    symbol: String,
    message: String,
}

async fn search_stocks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let raw = query.symbol.unwrap_or_default();
    let results = state
        .dividend_service
        .search_symbol(&raw)
        .await
        .map_err(|e| match e {
            CoreError::Validation(_) => ApiError::BadRequest(MISSING_SYMBOL.to_string()),
            CoreError::SearchUnavailable(reason) => {
                tracing::warn!("Search for '{}' failed: {}", raw.trim(), reason);
                ApiError::ServiceUnavailable(SEARCH_UNAVAILABLE.to_string())
            }
            other => other.into(),
        })?;

    let message = match results.records.len() {
        0 => format!("No dividend information found for {}", results.symbol),
        n => format!("Found {} result(s) for {}", n, results.symbol),
    };

    Ok(Json(SearchResponse {
        success: true,
        data: results.records,
        symbol: results.symbol,
        message,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/search", get(search_stocks))
}
