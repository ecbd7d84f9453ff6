use super::acf_image;
use crate::constants::PLACEHOLDER_IMAGE;
use crate::types::RawRecord;
use serde::{Deserialize, Serialize};

const TOP_FIELDS: [&str; 3] = ["top_image_1", "top_image_2", "top_image_3"];
const CENTER_FIELD: &str = "center_image";
const BOTTOM_FIELDS: [&str; 3] = ["bottom_image_1", "bottom_image_2", "bottom_image_3"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorImages {
    pub top: Vec<String>,
    pub center: String,
    pub bottom: Vec<String>,
}

/// Interior photos stored as custom fields on a regular CMS page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorGallery {
    pub page: u64,
    pub images: InteriorImages,
}

impl InteriorGallery {
    pub fn empty(page: u64) -> Self {
        Self {
            page,
            images: InteriorImages {
                top: Vec::new(),
                center: PLACEHOLDER_IMAGE.to_string(),
                bottom: Vec::new(),
            },
        }
    }

    pub fn from_page(page: u64, document: &RawRecord) -> Self {
        let collect = |keys: &[&str]| -> Vec<String> {
            keys.iter().filter_map(|key| acf_image(document, key)).collect()
        };
        Self {
            page,
            images: InteriorImages {
                top: collect(&TOP_FIELDS),
                center: acf_image(document, CENTER_FIELD)
                    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
                bottom: collect(&BOTTOM_FIELDS),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.top.is_empty()
            && self.images.bottom.is_empty()
            && self.images.center == PLACEHOLDER_IMAGE
    }
}
