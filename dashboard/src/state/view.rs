//! Display Projection
//!
//! Turns a [`Snapshot`] into the text of every dashboard slot. The projection
//! is pure; the components only copy these strings into the DOM.

use chrono::{DateTime, Local};
use serde_json::Value;

use super::coerce::{display_text, is_truthy, number_text, to_number};
use super::snapshot::{Location, Snapshot};

/// Text shown for a value the server did not send
pub const PLACEHOLDER: &str = "—";

/// Latest instant a browser `Date` can hold (ms)
const MAX_DATE_MS: i64 = 8_640_000_000_000_000;

/// A text slot on the dashboard, identified in the DOM by [`SlotId::id`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    Label,
    Recyclable,
    Confidence,
    Location,
    Total,
    CountRec,
    CountTrash,
    Errors,
    Vision,
    Arm,
    LastUpdate,
}

impl SlotId {
    #[cfg(test)]
    pub const ALL: [SlotId; 11] = [
        SlotId::Label,
        SlotId::Recyclable,
        SlotId::Confidence,
        SlotId::Location,
        SlotId::Total,
        SlotId::CountRec,
        SlotId::CountTrash,
        SlotId::Errors,
        SlotId::Vision,
        SlotId::Arm,
        SlotId::LastUpdate,
    ];

    /// DOM element id
    pub fn id(self) -> &'static str {
        match self {
            SlotId::Label => "label",
            SlotId::Recyclable => "recyclable",
            SlotId::Confidence => "confidence",
            SlotId::Location => "location",
            SlotId::Total => "total",
            SlotId::CountRec => "countRec",
            SlotId::CountTrash => "countTrash",
            SlotId::Errors => "errors",
            SlotId::Vision => "vision",
            SlotId::Arm => "arm",
            SlotId::LastUpdate => "lastUpdate",
        }
    }

    /// Caption printed next to the value
    pub fn caption(self) -> &'static str {
        match self {
            SlotId::Label => "Item",
            SlotId::Recyclable => "Recyclable",
            SlotId::Confidence => "Confidence",
            SlotId::Location => "Location",
            SlotId::Total => "Total",
            SlotId::CountRec => "Recyclable",
            SlotId::CountTrash => "Trash",
            SlotId::Errors => "Errors",
            SlotId::Vision => "Vision",
            SlotId::Arm => "Arm",
            SlotId::LastUpdate => "Last update",
        }
    }
}

/// Rendered text of every slot
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayView {
    pub label: String,
    pub recyclable: String,
    pub confidence: String,
    pub location: String,
    pub total: String,
    pub count_rec: String,
    pub count_trash: String,
    pub errors: String,
    pub vision: String,
    pub arm: String,
    pub last_update: String,
}

impl DisplayView {
    /// Project a snapshot; every slot is recomputed, nothing carries over
    pub fn project(snapshot: &Snapshot) -> Self {
        let reading = snapshot.reading();
        let counts = snapshot.counts.clone().unwrap_or_default();
        let text_or = |value: Option<&Value>, fallback: &str| {
            value.map(display_text).unwrap_or_else(|| fallback.to_string())
        };

        Self {
            label: text_or(reading.as_ref().and_then(|r| r.label.as_ref()), PLACEHOLDER),
            recyclable: match &reading {
                None => PLACEHOLDER.to_string(),
                Some(r) if r.recyclable.as_ref().is_some_and(is_truthy) => "Yes".to_string(),
                Some(_) => "No".to_string(),
            },
            confidence: format_confidence(
                reading
                    .as_ref()
                    .and_then(|r| r.confidence.as_ref())
                    .map(to_number),
            ),
            location: format_location(reading.as_ref().and_then(|r| r.location.as_ref())),
            total: text_or(counts.total.as_ref(), "0"),
            count_rec: text_or(counts.recyclable.as_ref(), "0"),
            count_trash: text_or(counts.trash.as_ref(), "0"),
            errors: text_or(counts.errors.as_ref(), "0"),
            vision: if snapshot
                .vision
                .as_ref()
                .and_then(|v| v.online.as_ref())
                .is_some_and(is_truthy)
            {
                "online".to_string()
            } else {
                "offline".to_string()
            },
            arm: text_or(snapshot.arm.as_ref().and_then(|a| a.status.as_ref()), "unknown"),
            last_update: format_timestamp(snapshot.last_update_ms.as_ref().and_then(epoch_millis)),
        }
    }

    /// What the page shows before the first message
    pub fn placeholder() -> Self {
        Self::project(&Snapshot::default())
    }

    pub fn text(&self, slot: SlotId) -> &str {
        match slot {
            SlotId::Label => &self.label,
            SlotId::Recyclable => &self.recyclable,
            SlotId::Confidence => &self.confidence,
            SlotId::Location => &self.location,
            SlotId::Total => &self.total,
            SlotId::CountRec => &self.count_rec,
            SlotId::CountTrash => &self.count_trash,
            SlotId::Errors => &self.errors,
            SlotId::Vision => &self.vision,
            SlotId::Arm => &self.arm,
            SlotId::LastUpdate => &self.last_update,
        }
    }
}

impl Default for DisplayView {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Whole percent, halves rounding up (`0.873` -> `87%`); a value that is
/// not a number prints `NaN%`
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(c) => format!("{}%", number_text(round_half_up(c * 100.0))),
        None => PLACEHOLDER.to_string(),
    }
}

fn round_half_up(value: f64) -> f64 {
    if value.is_finite() {
        (value + 0.5).floor()
    } else {
        value
    }
}

/// Timestamp in whole milliseconds; only JSON numbers count
fn epoch_millis(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

/// `x=<x>, y=<y>` with two decimals; both coordinates are required
pub fn format_location(location: Option<&Location>) -> String {
    match location {
        Some(Location {
            x: Some(x),
            y: Some(y),
        }) => format!("x={}, y={}", to_fixed(*x, 2), to_fixed(*y, 2)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Viewer-local date and time of an epoch-millisecond timestamp
pub fn format_timestamp(ms: Option<i64>) -> String {
    let Some(ms) = ms.filter(|ms| *ms != 0 && ms.abs() <= MAX_DATE_MS) else {
        return PLACEHOLDER.to_string();
    };

    DateTime::from_timestamp_millis(ms)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Fixed-point text with `digits` decimals.
///
/// Rounds the shortest decimal form of `value` half-up, so `1.005` gives
/// `1.01` even though the nearest double sits just below it.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // f64 Display never switches to exponent notation
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
        }
    }

    let split = kept.len() - digits;
    let text: String = kept.iter().map(|d| char::from(b'0' + d)).collect();
    let sign = if value < 0.0 { "-" } else { "" };

    if digits == 0 {
        format!("{}{}", sign, text)
    } else {
        format!("{}{}.{}", sign, &text[..split], &text[split..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(value: serde_json::Value) -> DisplayView {
        DisplayView::project(&Snapshot::from_value(&value))
    }

    #[test]
    fn test_full_projection() {
        let view = project(json!({
            "last_update_ms": 1700000000000i64,
            "vision": {
                "online": true,
                "latest": {"label": "bottle", "recyclable": true, "confidence": 0.873, "location": {"x": 1.005, "y": 2}}
            },
            "arm": {"status": "picking"},
            "counts": {"total": 5, "recyclable": 3, "trash": 2, "errors": 1}
        }));

        assert_eq!(view.label, "bottle");
        assert_eq!(view.recyclable, "Yes");
        assert_eq!(view.confidence, "87%");
        assert_eq!(view.location, "x=1.01, y=2.00");
        assert_eq!(view.total, "5");
        assert_eq!(view.count_rec, "3");
        assert_eq!(view.count_trash, "2");
        assert_eq!(view.errors, "1");
        assert_eq!(view.vision, "online");
        assert_eq!(view.arm, "picking");
        assert_ne!(view.last_update, PLACEHOLDER);
    }

    #[test]
    fn test_placeholder_view() {
        let view = DisplayView::placeholder();

        for slot in [
            SlotId::Label,
            SlotId::Recyclable,
            SlotId::Confidence,
            SlotId::Location,
            SlotId::LastUpdate,
        ] {
            assert_eq!(view.text(slot), PLACEHOLDER, "slot {}", slot.id());
        }
        for slot in [SlotId::Total, SlotId::CountRec, SlotId::CountTrash, SlotId::Errors] {
            assert_eq!(view.text(slot), "0", "slot {}", slot.id());
        }
        assert_eq!(view.vision, "offline");
        assert_eq!(view.arm, "unknown");
    }

    #[test]
    fn test_only_total_is_full_replace() {
        let view = project(json!({"counts": {"total": 5}}));

        let expected = DisplayView {
            total: "5".to_string(),
            ..DisplayView::placeholder()
        };
        assert_eq!(view, expected);
    }

    #[test]
    fn test_recyclable_needs_a_reading() {
        assert_eq!(project(json!({"vision": {"latest": {}}})).recyclable, "No");
        assert_eq!(
            project(json!({"vision": {"latest": {"recyclable": false}}})).recyclable,
            "No"
        );
        assert_eq!(project(json!({"vision": {"latest": null}})).recyclable, PLACEHOLDER);
    }

    #[test]
    fn test_values_render_as_sent() {
        let view = project(json!({
            "vision": {"online": 1, "latest": {"label": 7, "recyclable": 1, "confidence": "0.5"}},
            "arm": {"status": 3},
            "counts": {"total": "5", "recyclable": -1, "trash": 2.0, "errors": 1.5}
        }));

        assert_eq!(view.label, "7");
        assert_eq!(view.recyclable, "Yes");
        assert_eq!(view.confidence, "50%");
        assert_eq!(view.arm, "3");
        assert_eq!(view.vision, "online");
        assert_eq!(view.total, "5");
        assert_eq!(view.count_rec, "-1");
        assert_eq!(view.count_trash, "2");
        assert_eq!(view.errors, "1.5");
    }

    #[test]
    fn test_non_numeric_confidence_is_nan() {
        let view = project(json!({"vision": {"latest": {"confidence": "high"}}}));
        assert_eq!(view.confidence, "NaN%");
    }

    #[test]
    fn test_non_object_reading() {
        let view = project(json!({"vision": {"online": true, "latest": "x"}}));

        assert_eq!(view.label, PLACEHOLDER);
        assert_eq!(view.recyclable, "No");
        assert_eq!(view.confidence, PLACEHOLDER);
        assert_eq!(view.location, PLACEHOLDER);
        assert_eq!(view.vision, "online");
    }

    #[test]
    fn test_array_shaped_state_renders_placeholders() {
        let view = project(json!([{"online": true, "latest": {"label": "can"}}, {"status": "jam"}, [7, 1, 2, 3]]));
        assert_eq!(view, DisplayView::placeholder());

        let view = project(json!({
            "counts": [5, 3],
            "vision": [true, {"label": "x", "location": [1.005, 2]}]
        }));
        assert_eq!(view, DisplayView::placeholder());
    }

    #[test]
    fn test_falsy_timestamp_is_placeholder() {
        assert_eq!(project(json!({"last_update_ms": 0})).last_update, PLACEHOLDER);
        assert_eq!(project(json!({"last_update_ms": ""})).last_update, PLACEHOLDER);
        assert_ne!(project(json!({"last_update_ms": 1.7e12})).last_update, PLACEHOLDER);
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(Some(0.873)), "87%");
        assert_eq!(format_confidence(Some(0.875)), "88%");
        assert_eq!(format_confidence(Some(0.005)), "1%");
        assert_eq!(format_confidence(Some(1.0)), "100%");
        assert_eq!(format_confidence(Some(0.0)), "0%");
        assert_eq!(format_confidence(Some(-0.001)), "0%");
        assert_eq!(format_confidence(Some(f64::NAN)), "NaN%");
        assert_eq!(format_confidence(None), PLACEHOLDER);
    }

    #[test]
    fn test_format_location() {
        let location = Location {
            x: Some(1.005),
            y: Some(2.0),
        };
        assert_eq!(format_location(Some(&location)), "x=1.01, y=2.00");

        let partial = Location {
            x: Some(1.0),
            y: None,
        };
        assert_eq!(format_location(Some(&partial)), PLACEHOLDER);
        assert_eq!(format_location(None), PLACEHOLDER);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.005, 2), "1.01");
        assert_eq!(to_fixed(2.0, 2), "2.00");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(9.999, 2), "10.00");
        assert_eq!(to_fixed(-1.5, 0), "-2");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(123.4, 2), "123.40");
        assert_eq!(to_fixed(0.1 + 0.2, 2), "0.30");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), PLACEHOLDER);
        assert_eq!(format_timestamp(Some(0)), PLACEHOLDER);
        assert_eq!(format_timestamp(Some(i64::MAX)), PLACEHOLDER);

        let rendered = format_timestamp(Some(1700000000000));
        assert_eq!(rendered.len(), "2023-11-14 22:13:20".len());
        assert!(rendered.starts_with("2023-11-1"));
    }

    #[test]
    fn test_slot_ids_are_unique() {
        let mut ids: Vec<&str> = SlotId::ALL.iter().map(|s| s.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SlotId::ALL.len());
    }
}
