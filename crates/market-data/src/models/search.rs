//! Search payload models.
//!
//! The search endpoint answers either with a bare JSON array or with an object
//! wrapping the array in `data`. [`SearchPayload`] captures both shapes so the
//! caller only ever sees a flat list of items.

use serde::Deserialize;
use serde_json::Value;

/// A search hit exactly as the upstream sent it.
///
/// Field names vary between responses (`symbol`/`code`, `name`/`company`), so
/// items stay untyped until the query layer maps them.
pub type RawItem = Value;

/// The two response shapes of the search endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SearchPayload {
    /// `[ {...}, {...} ]`
    Items(Vec<RawItem>),
    /// `{ "data": [ {...}, {...} ] }`. An object without a `data` array (an
    /// error body, `"data": null`) matches neither shape.
    Wrapped { data: Vec<RawItem> },
}

impl SearchPayload {
    /// Flatten either shape into the list of items.
    pub fn into_items(self) -> Vec<RawItem> {
        match self {
            SearchPayload::Items(items) => items,
            SearchPayload::Wrapped { data } => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_and_wrapped_normalize_identically() {
        let items = json!([{"symbol": "ENB", "name": "Enbridge"}, {"code": "TD"}]);
        let bare: SearchPayload = serde_json::from_value(items.clone()).unwrap();
        let wrapped: SearchPayload = serde_json::from_value(json!({ "data": items })).unwrap();

        assert!(matches!(bare, SearchPayload::Items(_)));
        assert!(matches!(wrapped, SearchPayload::Wrapped { .. }));
        assert_eq!(bare.into_items(), wrapped.into_items());
    }

    #[test]
    fn test_object_without_data_array_is_rejected() {
        for body in [
            json!({"error": "invalid csrf"}),
            json!({"data": null}),
            json!({}),
            json!({"data": "ENB"}),
        ] {
            assert!(
                serde_json::from_value::<SearchPayload>(body.clone()).is_err(),
                "{} should not decode",
                body
            );
        }
    }

    #[test]
    fn test_empty_matches_are_still_valid() {
        let bare: SearchPayload = serde_json::from_value(json!([])).unwrap();
        let wrapped: SearchPayload = serde_json::from_value(json!({"data": []})).unwrap();
        assert!(bare.into_items().is_empty());
        assert!(wrapped.into_items().is_empty());
    }

    #[test]
    fn test_scalar_payload_is_rejected() {
        assert!(serde_json::from_str::<SearchPayload>("null").is_err());
        assert!(serde_json::from_str::<SearchPayload>("\"oops\"").is_err());
    }
}
