use super::{acf, acf_image, record_id, rendered};
use crate::constants::STATIC_BENEFITS;
use crate::error::Result;
use crate::types::{CmsEntity, RawRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl CmsEntity for Benefit {
    const KIND: &'static str = "benefit";

    fn from_record(record: &RawRecord) -> Result<Self> {
        Ok(Benefit {
            id: record_id(record)?,
            title: rendered(record, "title").unwrap_or_default(),
            description: rendered(record, "content")
                .or_else(|| acf(record, "description"))
                .unwrap_or_default(),
            icon: acf_image(record, "icon").unwrap_or_default(),
        })
    }
}

/// The built-in list shown when the CMS publishes no benefits
pub fn static_benefits() -> Vec<Benefit> {
    STATIC_BENEFITS
        .iter()
        .map(|(id, title, description)| Benefit {
            id: *id,
            title: title.to_string(),
            description: description.to_string(),
            icon: String::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_content_over_acf_description() {
        let record = json!({
            "id": 1,
            "title": { "rendered": "Питание" },
            "content": { "rendered": "Бесплатные обеды" },
            "acf": { "description": "unused", "icon": "/icons/food.svg" }
        });
        let benefit = Benefit::from_record(&record).unwrap();
        assert_eq!(benefit.description, "Бесплатные обеды");
        assert_eq!(benefit.icon, "/icons/food.svg");
    }

    #[test]
    fn empty_record_defaults() {
        let benefit = Benefit::from_record(&json!({ "id": 2, "content": { "rendered": "" } })).unwrap();
        assert_eq!(benefit.title, "");
        assert_eq!(benefit.description, "");
        assert_eq!(benefit.icon, "");
    }

    #[test]
    fn static_list_has_four_entries() {
        let benefits = static_benefits();
        assert_eq!(benefits.len(), 4);
        assert_eq!(benefits[0].title, "ГИБКИЙ ГРАФИК");
    }
}
