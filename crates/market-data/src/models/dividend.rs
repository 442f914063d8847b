//! Dividend disclosure model.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de::value_as_text;

/// Listing currency for TSX equities.
pub const DEFAULT_CURRENCY: &str = "CAD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// One equity's dividend disclosure as published upstream.
///
/// Field names follow the upstream wire format (`code`, `company`,
/// `dividend_date`, ...). Decoding also accepts the variants seen on other
/// endpoints; when a row carries several names for one field, the wire name
/// wins. Dates stay as the raw upstream text; use
/// [`parsed_ex_dividend_date`](Self::parsed_ex_dividend_date) to interpret them.
/// Fields this model doesn't know about are carried through untouched in
/// [`extra`](Self::extra).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct DividendRecord {
    /// Ticker (e.g., "ENB", "BNS")
    #[serde(rename = "code")]
    pub symbol: String,

    #[serde(rename = "company")]
    pub company_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    /// Dividend amount per share
    #[serde(rename = "dividend", skip_serializing_if = "Option::is_none")]
    pub dividend_amount: Option<String>,

    /// Annualized yield, percent
    #[serde(rename = "yield", skip_serializing_if = "Option::is_none")]
    pub yield_value: Option<String>,

    #[serde(rename = "dividend_currency")]
    pub currency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_frequency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<String>,

    /// Ex-dividend date, raw upstream text
    #[serde(rename = "dividend_date", skip_serializing_if = "Option::is_none")]
    pub ex_dividend_date: Option<String>,

    /// Payable date, raw upstream text
    #[serde(rename = "dividend_payable_date", skip_serializing_if = "Option::is_none")]
    pub payable_date: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Accepted names per field, wire name first.
const SYMBOL_KEYS: &[&str] = &["code", "symbol"];
const COMPANY_KEYS: &[&str] = &["company", "name", "company_name"];
const SECTOR_KEYS: &[&str] = &["sector"];
const DIVIDEND_KEYS: &[&str] = &["dividend", "dividend_amount", "amount"];
const YIELD_KEYS: &[&str] = &["yield", "yield_value"];
const CURRENCY_KEYS: &[&str] = &["dividend_currency", "currency"];
const FREQUENCY_KEYS: &[&str] = &["payout_frequency", "frequency"];
const PRICE_KEYS: &[&str] = &["last_price", "price"];
const EX_DATE_KEYS: &[&str] = &["dividend_date", "ex_dividend_date", "ex_date"];
const PAY_DATE_KEYS: &[&str] = &["dividend_payable_date", "payable_date", "pay_date"];

/// Remove every name in `keys` from `fields` and return the first one that
/// holds usable text.
fn take_text(fields: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.remove(*key))
        .fold(None, |found, value| found.or_else(|| value_as_text(&value)))
}

impl TryFrom<Map<String, Value>> for DividendRecord {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let symbol = take_text(&mut fields, SYMBOL_KEYS)
            .ok_or_else(|| "missing field `code`".to_string())?;

        Ok(Self {
            symbol,
            company_name: take_text(&mut fields, COMPANY_KEYS).unwrap_or_default(),
            sector: take_text(&mut fields, SECTOR_KEYS),
            dividend_amount: take_text(&mut fields, DIVIDEND_KEYS),
            yield_value: take_text(&mut fields, YIELD_KEYS),
            currency: take_text(&mut fields, CURRENCY_KEYS).unwrap_or_else(default_currency),
            payout_frequency: take_text(&mut fields, FREQUENCY_KEYS),
            last_price: take_text(&mut fields, PRICE_KEYS),
            ex_dividend_date: take_text(&mut fields, EX_DATE_KEYS),
            payable_date: take_text(&mut fields, PAY_DATE_KEYS),
            extra: fields,
        })
    }
}

impl DividendRecord {
    /// Create a record with only the required fields set.
    pub fn new(symbol: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            company_name: company_name.into(),
            sector: None,
            dividend_amount: None,
            yield_value: None,
            currency: default_currency(),
            payout_frequency: None,
            last_price: None,
            ex_dividend_date: None,
            payable_date: None,
            extra: Map::new(),
        }
    }

    /// Set the raw ex-dividend date.
    pub fn with_ex_dividend_date(mut self, date: impl Into<String>) -> Self {
        self.ex_dividend_date = Some(date.into());
        self
    }

    /// Set the raw payable date.
    pub fn with_payable_date(mut self, date: impl Into<String>) -> Self {
        self.payable_date = Some(date.into());
        self
    }

    /// The ex-dividend date, if present and parsable.
    pub fn parsed_ex_dividend_date(&self) -> Option<NaiveDate> {
        self.ex_dividend_date.as_deref().and_then(parse_upstream_date)
    }

    /// The payable date, if present and parsable.
    pub fn parsed_payable_date(&self) -> Option<NaiveDate> {
        self.payable_date.as_deref().and_then(parse_upstream_date)
    }
}

/// Parse a date as the upstream writes it.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a time (`YYYY-MM-DD HH:MM:SS`
/// or RFC 3339). The time part is discarded.
pub fn parse_upstream_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
