//! Export Envelope
//!
//! Every projection request produces exactly one `Envelope`: the fixed
//! status/statusText wrapper around the projected `data` map. The mapping is
//! closed - `200 OK` for a found page, `404 NOT FOUND` for a missing one -
//! and is never extended with transport-level status codes here.
//!
//! Invariants:
//!
//! - `status == 404` carries no `created`, `modified`, or `data` keys
//! - `status == 200` always carries `data` (possibly empty)
//! - `data` preserves insertion order, which is the template's field
//!   declaration order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status line for a found page.
pub const STATUS_OK: u16 = 200;
/// Status line for a missing page.
pub const STATUS_NOT_FOUND: u16 = 404;

/// The status + data wrapper returned for every projection request.
///
/// Serializes to the wire contract consumed by the transport layer:
///
/// ```json
/// {"status":200,"statusText":"OK","created":1388534400,"modified":1391212800,"data":{}}
/// ```
///
/// Timestamps serialize as epoch seconds. A fresh envelope is built per
/// call; envelopes are never partially reused across projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// `200` or `404`
    pub status: u16,

    /// `"OK"` or `"NOT FOUND"`
    pub status_text: String,

    /// Page creation time (present only on 200)
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,

    /// Page modification time (present only on 200)
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified: Option<DateTime<Utc>>,

    /// Projected field values in declaration order (present only on 200)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl Envelope {
    /// Build the success envelope around a projected data map.
    pub fn ok(
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
        data: Map<String, Value>,
    ) -> Self {
        Self {
            status: STATUS_OK,
            status_text: "OK".to_string(),
            created: Some(created),
            modified: Some(modified),
            data: Some(data),
        }
    }

    /// Build the not-found envelope. Carries no other keys.
    pub fn not_found() -> Self {
        Self {
            status: STATUS_NOT_FOUND,
            status_text: "NOT FOUND".to_string(),
            created: None,
            modified: None,
            data: None,
        }
    }

    /// Whether this envelope represents a found page.
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Consume the envelope, yielding its data map.
    ///
    /// Used when folding a recursively projected child into its parent;
    /// a 404 envelope yields an empty map.
    pub fn into_data(self) -> Map<String, Value> {
        self.data.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_not_found_shape_is_exact() {
        let envelope = Envelope::not_found();
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value, json!({"status": 404, "statusText": "NOT FOUND"}));
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_ok_envelope_carries_timestamps_and_data() {
        let created = Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap();
        let modified = Utc.with_ymd_and_hms(2014, 2, 1, 0, 0, 0).unwrap();

        let envelope = Envelope::ok(created, modified, Map::new());
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["status"], 200);
        assert_eq!(value["statusText"], "OK");
        // Epoch seconds on the wire
        assert_eq!(value["created"], json!(1388534400));
        assert_eq!(value["modified"], json!(1391212800));
        assert_eq!(value["data"], json!({}));
    }

    #[test]
    fn test_ok_with_empty_data_still_has_data_key() {
        let now = Utc::now();
        let envelope = Envelope::ok(now, now, Map::new());

        assert!(envelope.is_ok());
        assert!(envelope.data.is_some());
    }

    #[test]
    fn test_into_data_on_not_found_is_empty() {
        assert!(Envelope::not_found().into_data().is_empty());
    }

    #[test]
    fn test_data_preserves_insertion_order() {
        let mut data = Map::new();
        data.insert("zeta".to_string(), json!(1));
        data.insert("alpha".to_string(), json!(2));
        data.insert("mid".to_string(), json!(3));

        let now = Utc::now();
        let envelope = Envelope::ok(now, now, data);
        let serialized = serde_json::to_string(&envelope).unwrap();

        let zeta = serialized.find("zeta").unwrap();
        let alpha = serialized.find("alpha").unwrap();
        let mid = serialized.find("mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn test_envelope_round_trip() {
        let created = Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap();
        let mut data = Map::new();
        data.insert("title".to_string(), json!("Launch"));

        let envelope = Envelope::ok(created, created, data);
        let json = serde_json::to_string(&envelope).unwrap();
        let deserialized: Envelope = serde_json::from_str(&json).unwrap();

        assert_eq!(envelope, deserialized);
    }
}
