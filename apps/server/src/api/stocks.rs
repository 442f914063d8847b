use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tsx_dividends_core::ShapedRecord;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct StocksQuery {
    days: Option<String>,
}

#[derive(Serialize)]
struct StocksResponse {
    success: bool,
    data: Vec<ShapedRecord>,
    updated: String,
}

/// Lenient window parsing: anything that isn't an integer means "no window".
fn parse_window(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}

async fn list_stocks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StocksQuery>,
) -> ApiResult<Json<StocksResponse>> {
    let window = parse_window(query.days.as_deref());
    let data = state.dividend_service.list_upcoming(window).await?;
    Ok(Json(StocksResponse {
        success: true,
        data,
        updated: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stocks", get(list_stocks))
}

#[cfg(test)]
mod tests {
    use super::parse_window;

    #[test]
    fn window_parsing_is_lenient() {
        assert_eq!(parse_window(Some("30")), Some(30));
        assert_eq!(parse_window(Some(" 7 ")), Some(7));
        assert_eq!(parse_window(Some("-1")), Some(-1));
        assert_eq!(parse_window(Some("soon")), None);
        assert_eq!(parse_window(Some("")), None);
        assert_eq!(parse_window(None), None);
    }
}
