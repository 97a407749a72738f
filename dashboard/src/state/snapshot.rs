//! State Snapshot
//!
//! The robot state exactly as the server publishes it. Nothing is validated:
//! leaf values stay raw JSON and are only interpreted when projected. A
//! nested section that is not a JSON object (an array, a string, a number)
//! has no fields, so it reads as absent.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Full state object from one WebSocket message
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(deserialize_with = "object")]
    pub vision: Option<VisionStatus>,
    #[serde(deserialize_with = "object")]
    pub arm: Option<ArmStatus>,
    #[serde(deserialize_with = "object")]
    pub counts: Option<Counts>,
    /// Last update time (ms since epoch)
    pub last_update_ms: Option<Value>,
}

impl Snapshot {
    /// Decode a snapshot; anything that is not an object is an empty snapshot
    pub fn from_value(value: &Value) -> Self {
        decode_object(value).unwrap_or_default()
    }

    /// The latest vision reading, if the server sent a non-null one.
    ///
    /// A reading that is present but not an object has no fields.
    pub fn reading(&self) -> Option<VisionReading> {
        let latest = self.vision.as_ref()?.latest.as_ref()?;
        Some(decode_object(latest).unwrap_or_default())
    }
}

/// Vision subsystem status
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisionStatus {
    pub online: Option<Value>,
    pub latest: Option<Value>,
}

/// A single detected item
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisionReading {
    pub label: Option<Value>,
    pub recyclable: Option<Value>,
    /// Fraction in 0..=1
    pub confidence: Option<Value>,
    #[serde(deserialize_with = "object")]
    pub location: Option<Location>,
}

/// Item position reported by the vision pipeline
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "number")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "number")]
    pub y: Option<f64>,
}

/// Arm subsystem status
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArmStatus {
    pub status: Option<Value>,
}

/// Cumulative counters
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Counts {
    pub total: Option<Value>,
    pub recyclable: Option<Value>,
    pub trash: Option<Value>,
    pub errors: Option<Value>,
}

/// Decode `T` from a JSON object only; serde would otherwise build structs
/// from arrays by position
fn decode_object<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match value {
        Value::Object(_) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode_object(&value))
}

/// JSON number, anything else is absent
fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_snapshot() {
        let snapshot = Snapshot::from_value(&json!({
            "last_update_ms": 1700000000000i64,
            "vision": {
                "online": true,
                "last_seen_ms": 1700000000000i64,
                "latest": {"label": "can", "recyclable": true, "confidence": 0.5, "location": {"x": 1, "y": 2.5}}
            },
            "arm": {"online": true, "status": "idle", "latest": null},
            "counts": {"total": 3, "recyclable": 2, "trash": 1, "errors": 0}
        }));

        let reading = snapshot.reading().unwrap();
        assert_eq!(reading.label, Some(json!("can")));
        assert_eq!(reading.recyclable, Some(json!(true)));
        assert_eq!(reading.location.unwrap().x, Some(1.0));
        assert_eq!(snapshot.arm.unwrap().status, Some(json!("idle")));
        assert_eq!(snapshot.counts.unwrap().total, Some(json!(3)));
        assert_eq!(snapshot.last_update_ms, Some(json!(1700000000000i64)));
    }

    #[test]
    fn test_missing_and_null_fields_are_none() {
        let snapshot = Snapshot::from_value(&json!({"counts": {"total": 5, "trash": null}}));

        assert!(snapshot.vision.is_none());
        assert!(snapshot.arm.is_none());
        assert!(snapshot.last_update_ms.is_none());

        let counts = snapshot.counts.unwrap();
        assert_eq!(counts.total, Some(json!(5)));
        assert_eq!(counts.trash, None);
        assert_eq!(counts.recyclable, None);
    }

    #[test]
    fn test_leaf_values_kept_as_sent() {
        let snapshot = Snapshot::from_value(&json!({
            "vision": {"online": 1, "latest": {"label": 7, "confidence": "high"}},
            "arm": {"status": 3},
            "counts": {"total": "5", "errors": -1}
        }));

        assert_eq!(snapshot.vision.as_ref().unwrap().online, Some(json!(1)));

        let reading = snapshot.reading().unwrap();
        assert_eq!(reading.label, Some(json!(7)));
        assert_eq!(reading.confidence, Some(json!("high")));

        assert_eq!(snapshot.arm.unwrap().status, Some(json!(3)));
        let counts = snapshot.counts.unwrap();
        assert_eq!(counts.total, Some(json!("5")));
        assert_eq!(counts.errors, Some(json!(-1)));
    }

    #[test]
    fn test_non_object_is_empty() {
        assert_eq!(Snapshot::from_value(&json!(42)), Snapshot::default());
        assert_eq!(Snapshot::from_value(&json!("state")), Snapshot::default());
        assert_eq!(
            Snapshot::from_value(&json!([{"online": true, "latest": {"label": "can"}}, {"status": "jam"}, [7, 1, 2, 3]])),
            Snapshot::default()
        );
    }

    #[test]
    fn test_array_sections_are_absent() {
        let snapshot = Snapshot::from_value(&json!({
            "counts": [5, 3],
            "vision": [true, {"label": "x"}],
            "arm": ["jam"]
        }));
        assert_eq!(snapshot, Snapshot::default());

        let snapshot = Snapshot::from_value(&json!({
            "vision": {"latest": {"label": "x", "location": [1.005, 2]}}
        }));
        assert_eq!(snapshot.reading().unwrap().location, None);
    }

    #[test]
    fn test_non_object_reading_has_no_fields() {
        let snapshot = Snapshot::from_value(&json!({"vision": {"latest": "x"}}));
        assert_eq!(snapshot.reading(), Some(VisionReading::default()));

        let snapshot = Snapshot::from_value(&json!({"vision": {"latest": [{"label": "can"}]}}));
        assert_eq!(snapshot.reading(), Some(VisionReading::default()));
    }

    #[test]
    fn test_null_latest_has_no_reading() {
        let snapshot = Snapshot::from_value(&json!({"vision": {"online": false, "latest": null}}));
        assert!(snapshot.reading().is_none());
    }

    #[test]
    fn test_location_needs_numbers() {
        let snapshot = Snapshot::from_value(&json!({
            "vision": {"latest": {"location": {"x": "1", "y": 2}}}
        }));
        let location = snapshot.reading().unwrap().location.unwrap();
        assert_eq!(location.x, None);
        assert_eq!(location.y, Some(2.0));
    }
}
