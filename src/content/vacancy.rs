use super::{acf, acf_value, record_id, rendered};
use crate::error::Result;
use crate::types::{CmsEntity, RawRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
}

impl CmsEntity for Vacancy {
    const KIND: &'static str = "vacancy";

    fn from_record(record: &RawRecord) -> Result<Self> {
        Ok(Vacancy {
            id: record_id(record)?,
            title: rendered(record, "title").unwrap_or_default(),
            description: acf(record, "description")
                .or_else(|| rendered(record, "content"))
                .unwrap_or_default(),
            requirements: string_list(acf_value(record, "requirements")),
            responsibilities: string_list(acf_value(record, "responsibilities")),
        })
    }
}

/// Lists arrive as a plain array, an ACF repeater (array of single-field
/// rows) or a textarea with one entry per line.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(list_entry).collect(),
        Some(Value::String(text)) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn list_entry(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(row) => row.values().find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_array_lists() {
        let record = json!({
            "id": 8,
            "title": { "rendered": "Официант" },
            "acf": {
                "description": "Работа в зале",
                "requirements": ["Опыт от 1 года", "Вежливость"],
                "responsibilities": ["Обслуживание гостей"]
            }
        });
        let vacancy = Vacancy::from_record(&record).unwrap();
        assert_eq!(vacancy.title, "Официант");
        assert_eq!(vacancy.description, "Работа в зале");
        assert_eq!(vacancy.requirements, vec!["Опыт от 1 года", "Вежливость"]);
        assert_eq!(vacancy.responsibilities, vec!["Обслуживание гостей"]);
    }

    #[test]
    fn accepts_repeater_rows_and_textarea() {
        let record = json!({
            "id": 9,
            "content": { "rendered": "<p>Повар</p>" },
            "acf": {
                "requirements": [{ "requirement": "Санкнижка" }, { "requirement": "" }],
                "responsibilities": "Заготовки\n\n  Работа на гриле  \n"
            }
        });
        let vacancy = Vacancy::from_record(&record).unwrap();
        assert_eq!(vacancy.description, "<p>Повар</p>");
        assert_eq!(vacancy.requirements, vec!["Санкнижка"]);
        assert_eq!(vacancy.responsibilities, vec!["Заготовки", "Работа на гриле"]);
    }

    #[test]
    fn missing_lists_are_empty() {
        let vacancy = Vacancy::from_record(&json!({ "id": 10, "acf": { "requirements": false } })).unwrap();
        assert_eq!(vacancy.title, "");
        assert_eq!(vacancy.description, "");
        assert!(vacancy.requirements.is_empty());
        assert!(vacancy.responsibilities.is_empty());
    }
}
