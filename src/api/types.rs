//! Request normalization and error body types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::billing::types::ConsumptionPayload;

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Legacy request shape predating the tagged payload format.
///
/// Early clients posted bare meter readings with no group tag; those map
/// to the two-register household group.
#[derive(Debug, Deserialize)]
struct LegacyRequest {
    /// Maps to `a1_kwh`.
    #[serde(default)]
    consumption_high_rate: f64,
    /// Maps to `a2_kwh`.
    #[serde(default)]
    consumption_low_rate: f64,
}

/// Normalizes a parsed JSON body into the canonical engine payload.
///
/// A body carrying a `group` tag must deserialize as a tagged
/// [`ConsumptionPayload`]; an unrecognized tag or missing fields are
/// rejected here rather than silently degraded to a default group. A body
/// without a tag is treated as a legacy request: `consumption_high_rate`
/// and `consumption_low_rate` (each defaulting to 0) become a
/// `household_two` payload.
///
/// # Errors
///
/// Returns a message suitable for an [`ErrorResponse`] when the body is
/// not an object or fails to deserialize.
pub fn normalize_request(body: Value) -> Result<ConsumptionPayload, String> {
    let Some(map) = body.as_object() else {
        return Err("request body must be a JSON object".to_string());
    };

    if map.contains_key("group") {
        return serde_json::from_value(body).map_err(|e| format!("invalid payload: {e}"));
    }

    let legacy: LegacyRequest =
        serde_json::from_value(body).map_err(|e| format!("invalid payload: {e}"))?;
    Ok(ConsumptionPayload::HouseholdTwo {
        a1_kwh: legacy.consumption_high_rate,
        a2_kwh: legacy.consumption_low_rate,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::billing::types::TariffGroup;

    #[test]
    fn tagged_body_passes_through() {
        let payload = normalize_request(json!({
            "group": "group_4",
            "total_kwh": 1000.0,
        }));
        let payload = payload.expect("tagged body should normalize");
        assert_eq!(payload.group(), TariffGroup::Group4);
    }

    #[test]
    fn legacy_fields_map_to_household_two() {
        let payload = normalize_request(json!({
            "consumption_high_rate": 300.0,
            "consumption_low_rate": 200.0,
        }));
        match payload.expect("legacy body should normalize") {
            ConsumptionPayload::HouseholdTwo { a1_kwh, a2_kwh } => {
                assert_eq!(a1_kwh, 300.0);
                assert_eq!(a2_kwh, 200.0);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn empty_object_defaults_to_zero_household_two() {
        match normalize_request(json!({})).expect("empty body should normalize") {
            ConsumptionPayload::HouseholdTwo { a1_kwh, a2_kwh } => {
                assert_eq!(a1_kwh, 0.0);
                assert_eq!(a2_kwh, 0.0);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn unrecognized_group_tag_is_rejected() {
        let result = normalize_request(json!({
            "group": "group_9",
            "total_kwh": 100.0,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn tagged_body_with_missing_fields_is_rejected() {
        let result = normalize_request(json!({ "group": "household_two" }));
        assert!(result.is_err());
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(normalize_request(json!([1, 2, 3])).is_err());
        assert!(normalize_request(json!("text")).is_err());
    }
}
