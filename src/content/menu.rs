use super::{acf, acf_image, record_id, rendered};
use crate::constants::{PLACEHOLDER_IMAGE, UNCATEGORIZED};
use crate::error::Result;
use crate::types::{CmsEntity, RawRecord};
use serde::{Deserialize, Serialize};

/// A line of the main or game menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: u64,
    pub title: String,
    pub price: String,
    pub weight: String,
    pub ingredients: String,
    pub category: String,
    pub image: String,
}

impl CmsEntity for MenuItem {
    const KIND: &'static str = "menu_item";

    fn from_record(record: &RawRecord) -> Result<Self> {
        Ok(MenuItem {
            id: record_id(record)?,
            title: rendered(record, "title").unwrap_or_default(),
            price: acf(record, "price").unwrap_or_default(),
            weight: acf(record, "weight").unwrap_or_default(),
            ingredients: acf(record, "ingredients").unwrap_or_default(),
            category: acf(record, "category").unwrap_or_default(),
            image: acf_image(record, "image").unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        })
    }
}

/// Menu items of one category, in the order the CMS returned them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSection {
    pub category: String,
    pub items: Vec<MenuItem>,
}

/// Groups items by category, keeping first-seen category order. Items without
/// a category are collected under a catch-all heading.
pub fn group_by_category(items: Vec<MenuItem>) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = Vec::new();
    for item in items {
        let category = if item.category.trim().is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            item.category.clone()
        };
        match sections.iter_mut().find(|s| s.category == category) {
            Some(section) => section.items.push(item),
            None => sections.push(MenuSection {
                category,
                items: vec![item],
            }),
        }
    }
    sections
}
