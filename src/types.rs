use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A CMS post exactly as returned by the REST API
pub type RawRecord = serde_json::Value;

/// A display-ready entity built from one CMS post.
pub trait CmsEntity: Sized + Send {
    /// Short resource name used in logs and metrics
    const KIND: &'static str;

    /// Maps a raw post into the entity, filling defaults for every optional
    /// field. Fails only when the record does not pass the shape check.
    fn from_record(record: &RawRecord) -> Result<Self>;
}

/// Result of a form submission as reported back to the visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}
