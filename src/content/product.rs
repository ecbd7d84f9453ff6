use super::{acf, acf_image, record_id, rendered};
use crate::constants::{PLACEHOLDER_IMAGE, UNTITLED_PRODUCT};
use crate::error::Result;
use crate::types::{CmsEntity, RawRecord};
use serde::{Deserialize, Serialize};

/// Which menu carousel a product belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Special,
    Dish,
    Drink,
}

impl ProductType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "special" => Some(ProductType::Special),
            "dish" => Some(ProductType::Dish),
            "drink" => Some(ProductType::Drink),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Special => "special",
            ProductType::Dish => "dish",
            ProductType::Drink => "drink",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: String,
    pub weight: String,
    pub ingredients: String,
    pub category: String,
    /// Products with an unknown type are listed but not placed in a carousel
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
}

impl CmsEntity for Product {
    const KIND: &'static str = "product";

    fn from_record(record: &RawRecord) -> Result<Self> {
        let id = record_id(record)?;
        let product_type = acf(record, "product_type")
            .or_else(|| acf(record, "type"))
            .and_then(|t| ProductType::parse(&t));

        Ok(Product {
            id,
            name: rendered(record, "title").unwrap_or_else(|| UNTITLED_PRODUCT.to_string()),
            image: acf_image(record, "product_image")
                .or_else(|| acf_image(record, "image"))
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            description: acf(record, "short_description")
                .or_else(|| acf(record, "description"))
                .unwrap_or_default(),
            price: acf(record, "price").unwrap_or_default(),
            weight: acf(record, "weight").unwrap_or_default(),
            ingredients: acf(record, "ingredients").unwrap_or_default(),
            category: acf(record, "category").unwrap_or_default(),
            product_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_every_field_verbatim() {
        let record = json!({
            "id": 11,
            "title": { "rendered": "Стейк Рибай" },
            "acf": {
                "product_image": "https://cdn.example/ribeye.jpg",
                "short_description": "Мраморная говядина",
                "price": "45 BYN",
                "weight": "350 г",
                "ingredients": "говядина, соль, перец",
                "category": "Стейки",
                "product_type": "special"
            }
        });

        let product = Product::from_record(&record).unwrap();
        assert_eq!(
            product,
            Product {
                id: 11,
                name: "Стейк Рибай".into(),
                image: "https://cdn.example/ribeye.jpg".into(),
                description: "Мраморная говядина".into(),
                price: "45 BYN".into(),
                weight: "350 г".into(),
                ingredients: "говядина, соль, перец".into(),
                category: "Стейки".into(),
                product_type: Some(ProductType::Special),
            }
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let product = Product::from_record(&json!({ "id": 3, "acf": null })).unwrap();
        assert_eq!(product.name, UNTITLED_PRODUCT);
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
        assert_eq!(product.description, "");
        assert_eq!(product.price, "");
        assert_eq!(product.weight, "");
        assert_eq!(product.ingredients, "");
        assert_eq!(product.category, "");
        assert_eq!(product.product_type, None);
    }

    #[test]
    fn secondary_keys_are_used_when_primary_missing() {
        let record = json!({
            "id": 4,
            "acf": { "image": "/img/b.jpg", "description": "long", "type": "Drink", "price": 12 }
        });
        let product = Product::from_record(&record).unwrap();
        assert_eq!(product.image, "/img/b.jpg");
        assert_eq!(product.description, "long");
        assert_eq!(product.product_type, Some(ProductType::Drink));
        assert_eq!(product.price, "12");
    }

    #[test]
    fn serializes_type_under_its_wire_name() {
        let product = Product::from_record(&json!({ "id": 5, "acf": { "type": "dish" } })).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["type"], "dish");

        let untyped = Product::from_record(&json!({ "id": 6 })).unwrap();
        let value = serde_json::to_value(&untyped).unwrap();
        assert!(value.get("type").is_none());
    }
}
