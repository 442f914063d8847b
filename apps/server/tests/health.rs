use axum::{body::Body, http::Request};
use tower::ServiceExt;
use tsx_dividends_server::{api::app_router, build_state, config::Config};

#[tokio::test]
async fn healthz_works() {
    let config = Config::default();
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn status_reports_empty_cache_before_first_request() {
    let config = Config::default();
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["cache"]["populated"], false);
    assert_eq!(json["cache"]["records"], 0);
}
