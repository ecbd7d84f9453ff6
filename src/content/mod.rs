//! Display entities and the normalizers that build them from CMS posts.
//!
//! WordPress returns `title`/`content` as `{ "rendered": "..." }` objects and
//! the custom fields plugin adds an `acf` map whose values may be missing,
//! `null`, `false`, an empty string, a number or (for images) an object with a
//! `url`. The helpers here collapse all of that into `Option<String>` so the
//! entity constructors only have to pick a fallback.

pub mod benefit;
pub mod event;
pub mod interior;
pub mod menu;
pub mod product;
pub mod team;
pub mod vacancy;

pub use benefit::Benefit;
pub use event::Event;
pub use interior::{InteriorGallery, InteriorImages};
pub use menu::MenuItem;
pub use product::{Product, ProductType};
pub use team::TeamMember;
pub use vacancy::Vacancy;

use crate::error::{Result, SiteError};
use crate::types::RawRecord;
use serde_json::Value;

/// The post id, which must be a non-negative integer.
pub(crate) fn record_id(record: &RawRecord) -> Result<u64> {
    record
        .get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| SiteError::MissingField("numeric id".into()))
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `record[key].rendered`
pub(crate) fn rendered(record: &RawRecord, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(|v| v.get("rendered"))
        .and_then(text)
}

/// A plain top-level string such as `slug` or `date`
pub(crate) fn field(record: &RawRecord, key: &str) -> Option<String> {
    record.get(key).and_then(text)
}

/// `record.acf[key]` as text
pub(crate) fn acf(record: &RawRecord, key: &str) -> Option<String> {
    acf_value(record, key).and_then(text)
}

pub(crate) fn acf_value<'a>(record: &'a RawRecord, key: &str) -> Option<&'a Value> {
    record.get("acf").and_then(|a| a.get(key))
}

/// `record.acf[key]` as an image URL. Accepts both the URL and the array
/// return formats of the image field; `"false"` marks an empty field.
pub(crate) fn acf_image(record: &RawRecord, key: &str) -> Option<String> {
    let value = acf_value(record, key)?;
    let url = match value {
        Value::Object(map) => map.get("url").and_then(text),
        other => text(other),
    };
    url.filter(|u| u != "false")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_requires_unsigned_integer() {
        assert_eq!(record_id(&json!({ "id": 7 })).unwrap(), 7);
        assert!(record_id(&json!({ "id": "7" })).is_err());
        assert!(record_id(&json!({ "id": -1 })).is_err());
        assert!(record_id(&json!({ "id": 1.5 })).is_err());
        assert!(record_id(&json!({ "title": { "rendered": "x" } })).is_err());
    }

    #[test]
    fn acf_text_treats_empty_null_and_false_as_missing() {
        let record = json!({
            "acf": { "a": "", "b": null, "c": false, "d": 12.5, "e": "value" }
        });
        assert_eq!(acf(&record, "a"), None);
        assert_eq!(acf(&record, "b"), None);
        assert_eq!(acf(&record, "c"), None);
        assert_eq!(acf(&record, "d").as_deref(), Some("12.5"));
        assert_eq!(acf(&record, "e").as_deref(), Some("value"));
        assert_eq!(acf(&record, "missing"), None);
        assert_eq!(acf(&json!({ "acf": false }), "e"), None);
    }

    #[test]
    fn acf_image_reads_url_objects_and_skips_false_string() {
        let record = json!({
            "acf": {
                "obj": { "url": "https://cdn.example/a.jpg", "alt": "" },
                "plain": "https://cdn.example/b.jpg",
                "off": "false"
            }
        });
        assert_eq!(acf_image(&record, "obj").as_deref(), Some("https://cdn.example/a.jpg"));
        assert_eq!(acf_image(&record, "plain").as_deref(), Some("https://cdn.example/b.jpg"));
        assert_eq!(acf_image(&record, "off"), None);
    }
}
