use super::{acf, acf_image, record_id, rendered};
use crate::constants::{PLACEHOLDER_IMAGE, UNNAMED_TEAM_MEMBER};
use crate::error::Result;
use crate::types::{CmsEntity, RawRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: u64,
    pub name: String,
    pub position: String,
    pub description: String,
    pub short_description: String,
    pub image: String,
}

impl CmsEntity for TeamMember {
    const KIND: &'static str = "team_member";

    fn from_record(record: &RawRecord) -> Result<Self> {
        Ok(TeamMember {
            id: record_id(record)?,
            name: rendered(record, "title").unwrap_or_else(|| UNNAMED_TEAM_MEMBER.to_string()),
            position: acf(record, "position").unwrap_or_default(),
            description: acf(record, "description")
                .or_else(|| acf(record, "short_description"))
                .unwrap_or_default(),
            short_description: acf(record, "short_description").unwrap_or_default(),
            image: acf_image(record, "photo")
                .or_else(|| acf_image(record, "image"))
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        })
    }
}
