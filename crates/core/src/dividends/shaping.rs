//! Turning upstream records into what the API serves.
//!
//! - [`shape_record`] adds the request-time display fields
//! - [`select_upcoming`] applies the ex-dividend window
//! - [`map_search_item`] maps a loosely-typed search hit onto [`DividendRecord`]

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tsx_dividends_market_data::{value_as_text, DividendRecord, RawItem, DEFAULT_CURRENCY};

use crate::constants::NOT_AVAILABLE;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::{days_between, format_display_date};

use super::model::ShapedRecord;

const SYMBOL_KEYS: &[&str] = &["symbol", "code", "ticker"];
const COMPANY_KEYS: &[&str] = &["name", "company", "company_name"];
const SECTOR_KEYS: &[&str] = &["sector"];
const DIVIDEND_KEYS: &[&str] = &["dividend", "dividend_amount", "amount"];
const YIELD_KEYS: &[&str] = &["yield", "yield_value", "dividend_yield"];
const FREQUENCY_KEYS: &[&str] = &["payout_frequency", "frequency"];
const PRICE_KEYS: &[&str] = &["last_price", "price"];
const EX_DATE_KEYS: &[&str] = &["dividend_date", "ex_dividend_date", "ex_date"];
const PAY_DATE_KEYS: &[&str] = &["dividend_payable_date", "payable_date", "pay_date"];

/// Trim and uppercase a caller-supplied ticker.
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ValidationError::MissingField("symbol".to_string()).into());
    }
    Ok(symbol)
}

/// Attach `days_until`, `upcoming_date` and `formatted_pay_date`.
pub fn shape_record(record: DividendRecord, today: NaiveDate) -> ShapedRecord {
    let ex_date = record.parsed_ex_dividend_date();
    let pay_date = record.parsed_payable_date();

    ShapedRecord {
        days_until: ex_date.map(|date| days_between(today, date)),
        upcoming_date: ex_date.map(format_display_date),
        formatted_pay_date: pay_date.map(format_display_date),
        record,
    }
}

/// Shape `batch` and keep records whose ex-dividend date falls in the window.
///
/// With `window_days` set, keeps `0 <= days_until <= window_days`; without it,
/// keeps every record whose ex-dividend date parses. Upstream order is kept.
pub fn select_upcoming(
    batch: &[DividendRecord],
    window_days: Option<i64>,
    today: NaiveDate,
) -> Vec<ShapedRecord> {
    batch
        .iter()
        .cloned()
        .map(|record| shape_record(record, today))
        .filter(|shaped| match (shaped.days_until, window_days) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(days), Some(window)) => (0..=window).contains(&days),
        })
        .collect()
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(value_as_text)
}

fn text_or_na(fields: &Map<String, Value>, keys: &[&str]) -> String {
    first_text(fields, keys).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Map one search hit onto the canonical record shape.
///
/// Fails when the hit is not an object or carries no usable ticker.
pub fn map_search_item(item: &RawItem) -> Result<DividendRecord> {
    let fields = item
        .as_object()
        .ok_or_else(|| Error::PartialData(format!("search item is not an object: {}", item)))?;

    let symbol = first_text(fields, SYMBOL_KEYS)
        .map(|s| s.to_uppercase())
        .ok_or_else(|| Error::PartialData("search item has no symbol".to_string()))?;

    let mut record = DividendRecord::new(symbol, text_or_na(fields, COMPANY_KEYS));
    record.sector = Some(text_or_na(fields, SECTOR_KEYS));
    record.dividend_amount = Some(text_or_na(fields, DIVIDEND_KEYS));
    record.yield_value = Some(text_or_na(fields, YIELD_KEYS));
    record.currency = DEFAULT_CURRENCY.to_string();
    record.payout_frequency = Some(text_or_na(fields, FREQUENCY_KEYS));
    record.last_price = Some(text_or_na(fields, PRICE_KEYS));
    record.ex_dividend_date = first_text(fields, EX_DATE_KEYS);
    record.payable_date = first_text(fields, PAY_DATE_KEYS);

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" enb ").unwrap(), "ENB");
        assert_eq!(normalize_symbol("BCE").unwrap(), "BCE");
        assert!(matches!(
            normalize_symbol("   "),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(normalize_symbol("").is_err());
    }

    #[test]
    fn test_shape_record_formats_dates() {
        let record: DividendRecord = serde_json::from_value(json!({
            "code": "ENB",
            "company": "Enbridge Inc.",
            "dividend_date": "2024-03-01",
            "dividend_payable_date": "2024-03-15"
        }))
        .unwrap();

        let shaped = shape_record(record, date(2024, 2, 20));
        assert_eq!(shaped.days_until, Some(10));
        assert_eq!(shaped.upcoming_date.as_deref(), Some("Mar 01, 2024"));
        assert_eq!(shaped.formatted_pay_date.as_deref(), Some("Mar 15, 2024"));

        let value = serde_json::to_value(&shaped).unwrap();
        assert_eq!(value["code"], "ENB");
        assert_eq!(value["days_until"], 10);
        assert_eq!(value["upcoming_date"], "Mar 01, 2024");
    }

    #[test]
    fn test_shape_record_omits_missing_derived_fields() {
        let shaped = shape_record(DividendRecord::new("TD", "TD Bank"), date(2024, 2, 20));
        assert_eq!(shaped.days_until, None);

        let value = serde_json::to_value(&shaped).unwrap();
        assert!(value.get("days_until").is_none());
        assert!(value.get("upcoming_date").is_none());
        assert!(value.get("formatted_pay_date").is_none());
    }

    #[test]
    fn test_select_upcoming_window_and_order() {
        let today = date(2024, 2, 20);
        let batch = vec![
            DividendRecord::new("PAST", "Past").with_ex_dividend_date("2024-02-19"),
            DividendRecord::new("TODAY", "Today").with_ex_dividend_date("2024-02-20"),
            DividendRecord::new("NODATE", "No date"),
            DividendRecord::new("BAD", "Bad date").with_ex_dividend_date("soon"),
            DividendRecord::new("EDGE", "Edge").with_ex_dividend_date("2024-02-27"),
            DividendRecord::new("FAR", "Far").with_ex_dividend_date("2024-02-28"),
        ];

        let symbols = |records: Vec<ShapedRecord>| -> Vec<String> {
            records.into_iter().map(|r| r.record.symbol).collect()
        };

        assert_eq!(
            symbols(select_upcoming(&batch, Some(7), today)),
            vec!["TODAY", "EDGE"]
        );
        assert_eq!(
            symbols(select_upcoming(&batch, None, today)),
            vec!["PAST", "TODAY", "EDGE", "FAR"]
        );
        assert_eq!(symbols(select_upcoming(&batch, Some(0), today)), vec!["TODAY"]);
    }

    #[test]
    fn test_map_search_item_aliases_and_defaults() {
        let item = json!({
            "symbol": " enb ",
            "name": "Enbridge Inc.",
            "yield": 7.1,
            "ex_dividend_date": "2024-03-01"
        });

        let record = map_search_item(&item).unwrap();
        assert_eq!(record.symbol, "ENB");
        assert_eq!(record.company_name, "Enbridge Inc.");
        assert_eq!(record.yield_value.as_deref(), Some("7.1"));
        assert_eq!(record.sector.as_deref(), Some("N/A"));
        assert_eq!(record.dividend_amount.as_deref(), Some("N/A"));
        assert_eq!(record.payout_frequency.as_deref(), Some("N/A"));
        assert_eq!(record.last_price.as_deref(), Some("N/A"));
        assert_eq!(record.currency, "CAD");
        assert_eq!(record.ex_dividend_date.as_deref(), Some("2024-03-01"));
        assert_eq!(record.payable_date, None);
    }

    #[test]
    fn test_map_search_item_prefers_symbol_over_code() {
        let item = json!({ "code": "XXX", "symbol": "RY", "company": "Royal Bank" });
        let record = map_search_item(&item).unwrap();
        assert_eq!(record.symbol, "RY");
        assert_eq!(record.company_name, "Royal Bank");
    }

    #[test]
    fn test_map_search_item_rejects_unusable_items() {
        assert!(matches!(
            map_search_item(&json!("ENB")),
            Err(Error::PartialData(_))
        ));
        assert!(matches!(
            map_search_item(&json!({ "name": "Nameless" })),
            Err(Error::PartialData(_))
        ));
        assert!(matches!(
            map_search_item(&json!({ "symbol": "  " })),
            Err(Error::PartialData(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_window_bounds_days_until(
            offsets in prop::collection::vec(-90i64..90, 0..40),
            window in 0i64..120,
        ) {
            let today = date(2024, 6, 15);
            let batch: Vec<DividendRecord> = offsets
                .iter()
                .enumerate()
                .map(|(i, offset)| {
                    let ex_date = today + chrono::Duration::days(*offset);
                    DividendRecord::new(format!("S{}", i), "Co")
                        .with_ex_dividend_date(ex_date.format("%Y-%m-%d").to_string())
                })
                .collect();

            let selected = select_upcoming(&batch, Some(window), today);
            for shaped in &selected {
                let days = shaped.days_until.unwrap();
                prop_assert!(days >= 0 && days <= window);
            }
            let expected = offsets.iter().filter(|o| **o >= 0 && **o <= window).count();
            prop_assert_eq!(selected.len(), expected);

            let unbounded = select_upcoming(&batch, None, today);
            prop_assert_eq!(unbounded.len(), batch.len());
        }
    }
}
