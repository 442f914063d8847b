//! Wire models for the ex-dividend site's JSON endpoints.

use serde::Deserialize;
use serde_json::Value;

/// Response of the token endpoint when a token is issued.
/// (When it isn't, the body is the literal text `null`.)
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub data: Option<String>,
}

/// Response of the bulk listing endpoint.
///
/// Rows stay untyped here so one bad row can be dropped without losing the batch.
#[derive(Debug, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}
