//! TSX ex-dividend site provider.
//!
//! The site guards its JSON endpoints with an informal anti-forgery scheme:
//! 1. `POST /t/` with the declared browser identity returns `{"data": "<token>"}`
//!    (or the literal text `null` when it refuses).
//! 2. `POST /stocks/` or `POST /search/` with the token in the `csrf` field
//!    returns the data.
//!
//! Both requests go through one cookie-carrying client so they share a session.
//! The contract is reverse-engineered and may change without notice.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde_json::json;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{DividendRecord, RawItem, SearchPayload};
use crate::provider::DividendProvider;

use models::{BulkResponse, TokenResponse};

const PROVIDER_ID: &str = "EXDIVIDEND";

pub const DEFAULT_BASE_URL: &str = "https://tsx.exdividend.ca";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

const TOKEN_PATH: &str = "/t/";
const STOCKS_PATH: &str = "/stocks/";
const SEARCH_PATH: &str = "/search/";

const ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// Connection settings for [`ExDividendProvider`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Scheme and host, without a trailing path
    pub base_url: String,
    /// Browser identity sent as header and as token payload
    pub user_agent: String,
    /// Per-call timeout for the token request
    pub token_timeout: Duration,
    /// Per-call timeout for listing and search requests
    pub data_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token_timeout: Duration::from_secs(5),
            data_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the TSX ex-dividend site.
pub struct ExDividendProvider {
    client: Client,
    config: ProviderConfig,
}

impl ExDividendProvider {
    /// Create a provider with its own session-carrying HTTP client.
    pub fn new(config: ProviderConfig) -> Result<Self, MarketDataError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Read the body of a 200 response; any other status is an error.
    async fn read_body(response: Response) -> Result<String, MarketDataError> {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(MarketDataError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::from_transport(PROVIDER_ID, e))
    }

    /// Step 1 of the handshake.
    async fn request_token(&self) -> Result<String, MarketDataError> {
        let identity = json!([{ "key": "userAgent", "value": self.config.user_agent }]).to_string();

        let response = self
            .client
            .post(self.endpoint(TOKEN_PATH))
            .timeout(self.config.token_timeout)
            .form(&[("n", identity.as_str())])
            .send()
            .await
            .map_err(|e| MarketDataError::from_transport(PROVIDER_ID, e))?;

        let body = Self::read_body(response).await?;
        if body.trim() == "null" {
            return Err(MarketDataError::MissingToken {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| MarketDataError::malformed(PROVIDER_ID, e))?;

        parsed
            .data
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| MarketDataError::MissingToken {
                provider: PROVIDER_ID.to_string(),
            })
    }

    /// Step 2 of the handshake: a fresh token, then the data call.
    async fn post_with_token(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<String, MarketDataError> {
        let token = self.request_token().await?;

        let mut form: Vec<(&str, &str)> = params.to_vec();
        form.push(("csrf", token.as_str()));

        debug!("{} request: {} with {} params", PROVIDER_ID, path, params.len());

        let response = self
            .client
            .post(self.endpoint(path))
            .timeout(self.config.data_timeout)
            .form(&form)
            .send()
            .await
            .map_err(|e| MarketDataError::from_transport(PROVIDER_ID, e))?;

        Self::read_body(response).await
    }

    async fn try_fetch_bulk(&self, window_days: u32) -> Result<Vec<DividendRecord>, MarketDataError> {
        let days = window_days.to_string();
        let body = self.post_with_token(STOCKS_PATH, &[("days", days.as_str())]).await?;

        let parsed: BulkResponse = serde_json::from_str(&body)
            .map_err(|e| MarketDataError::malformed(PROVIDER_ID, e))?;
        let rows = parsed.data.ok_or_else(|| MarketDataError::NoData {
            provider: PROVIDER_ID.to_string(),
        })?;

        let total = rows.len();
        let records: Vec<DividendRecord> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<DividendRecord>(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("{}: skipping undecodable row: {}", PROVIDER_ID, e);
                    None
                }
            })
            .collect();

        if records.len() < total {
            warn!(
                "{}: kept {} of {} rows from bulk listing",
                PROVIDER_ID,
                records.len(),
                total
            );
        }

        Ok(records)
    }

    async fn try_search(&self, term: &str) -> Result<Vec<RawItem>, MarketDataError> {
        let body = self.post_with_token(SEARCH_PATH, &[("term", term)]).await?;

        let payload: SearchPayload = serde_json::from_str(&body)
            .map_err(|e| MarketDataError::malformed(PROVIDER_ID, e))?;

        Ok(payload.into_items())
    }
}

#[async_trait]
impl DividendProvider for ExDividendProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_anti_forgery_token(&self) -> Option<String> {
        match self.request_token().await {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Failed to obtain anti-forgery token: {}", e);
                None
            }
        }
    }

    async fn fetch_bulk_dividends(&self, window_days: u32) -> Option<Vec<DividendRecord>> {
        match self.try_fetch_bulk(window_days).await {
            Ok(records) => {
                debug!(
                    "{}: fetched {} dividend records ({} day window)",
                    PROVIDER_ID,
                    records.len(),
                    window_days
                );
                Some(records)
            }
            Err(e) => {
                warn!("Bulk dividend fetch failed: {}", e);
                None
            }
        }
    }

    async fn search_by_symbol(&self, term: &str) -> Option<Vec<RawItem>> {
        match self.try_search(term).await {
            Ok(items) => Some(items),
            Err(e) => {
                warn!("Dividend search for '{}' failed: {}", term, e);
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
