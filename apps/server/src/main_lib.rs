use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use tsx_dividends_core::{DividendService, DividendServiceTrait};
use tsx_dividends_market_data::{DividendProvider, ExDividendProvider};

pub struct AppState {
    pub dividend_service: Arc<dyn DividendServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("TSX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider: Arc<dyn DividendProvider> =
        Arc::new(ExDividendProvider::new(config.provider_config())?);
    tracing::info!(
        "Upstream dividend source: {} ({})",
        config.upstream_url,
        provider.id()
    );

    let settings = config.cache_settings();
    match settings.ttl {
        Some(ttl) => tracing::info!(
            "Dividend listing: {} day fetch window, refreshed after {}s",
            settings.fetch_window_days,
            ttl.num_seconds()
        ),
        None => tracing::info!(
            "Dividend listing: {} day fetch window, kept until refreshed",
            settings.fetch_window_days
        ),
    }

    let dividend_service: Arc<dyn DividendServiceTrait + Send + Sync> =
        Arc::new(DividendService::new(provider, settings));

    Ok(Arc::new(AppState { dividend_service }))
}
