use super::{acf, acf_image, field, record_id, rendered};
use crate::constants::PLACEHOLDER_IMAGE;
use crate::error::{Result, SiteError};
use crate::types::{CmsEntity, RawRecord};
use serde::{Deserialize, Serialize};

const GALLERY_FIELDS: [&str; 3] = ["gallery_image_1", "gallery_image_2", "gallery_image_3"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u64,
    /// External lookup key for the event detail page
    pub slug: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub image: String,
    pub gallery_images: Vec<String>,
}

impl CmsEntity for Event {
    const KIND: &'static str = "event";

    fn from_record(record: &RawRecord) -> Result<Self> {
        let id = record_id(record)?;
        let slug = field(record, "slug").ok_or_else(|| SiteError::MissingField("slug".into()))?;

        Ok(Event {
            id,
            slug,
            title: rendered(record, "title").unwrap_or_default(),
            date: acf(record, "event_date")
                .or_else(|| field(record, "date"))
                .unwrap_or_default(),
            description: acf(record, "description")
                .or_else(|| rendered(record, "content"))
                .unwrap_or_default(),
            image: acf_image(record, "main_image")
                .or_else(|| acf_image(record, "image"))
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            gallery_images: GALLERY_FIELDS
                .iter()
                .filter_map(|key| acf_image(record, key))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_full_record() {
        let record = json!({
            "id": 40,
            "slug": "autumn-tasting",
            "date": "2025-09-01T10:00:00",
            "title": { "rendered": "Осенняя дегустация" },
            "content": { "rendered": "<p>ignored</p>" },
            "acf": {
                "event_date": "2025-10-12",
                "description": "Вечер вин и стейков",
                "main_image": "https://cdn.example/main.jpg",
                "gallery_image_1": "https://cdn.example/1.jpg",
                "gallery_image_2": "https://cdn.example/2.jpg",
                "gallery_image_3": "https://cdn.example/3.jpg"
            }
        });

        let event = Event::from_record(&record).unwrap();
        assert_eq!(
            event,
            Event {
                id: 40,
                slug: "autumn-tasting".into(),
                title: "Осенняя дегустация".into(),
                date: "2025-10-12".into(),
                description: "Вечер вин и стейков".into(),
                image: "https://cdn.example/main.jpg".into(),
                gallery_images: vec![
                    "https://cdn.example/1.jpg".into(),
                    "https://cdn.example/2.jpg".into(),
                    "https://cdn.example/3.jpg".into(),
                ],
            }
        );
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let event = Event::from_record(&json!({ "id": 2, "slug": "jazz" })).unwrap();
        assert_eq!(event.title, "");
        assert_eq!(event.date, "");
        assert_eq!(event.description, "");
        assert_eq!(event.image, PLACEHOLDER_IMAGE);
        assert!(event.gallery_images.is_empty());
    }

    #[test]
    fn falls_back_to_post_date_and_content() {
        let record = json!({
            "id": 3,
            "slug": "quiz",
            "date": "2025-11-02T19:00:00",
            "content": { "rendered": "<p>Квиз</p>" },
            "acf": { "gallery_image_1": "false", "gallery_image_2": "", "gallery_image_3": "https://cdn.example/q.jpg" }
        });
        let event = Event::from_record(&record).unwrap();
        assert_eq!(event.date, "2025-11-02T19:00:00");
        assert_eq!(event.description, "<p>Квиз</p>");
        assert_eq!(event.gallery_images, vec!["https://cdn.example/q.jpg".to_string()]);
    }

    #[test]
    fn rejects_record_without_slug() {
        assert!(Event::from_record(&json!({ "id": 9 })).is_err());
        assert!(Event::from_record(&json!({ "id": 9, "slug": "" })).is_err());
        assert!(Event::from_record(&json!({ "slug": "no-id" })).is_err());
    }
}
