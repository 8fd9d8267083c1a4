use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Year {
    pub year: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Meta {
    #[serde(default)]
    pub contained_types: Vec<String>,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_by: Option<String>,
}

/// Album, track or any other catalog node. Albums carry their tracks in `children`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Item {
    #[serde(rename = "_meta", default)]
    pub meta: Meta,
    #[serde(default)]
    pub bmm_id: serde_json::Value,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(rename = "children", default)]
    pub tracks: Vec<Item>,
    #[serde(default)]
    pub transcription_languages: Vec<String>,
    #[serde(default)]
    pub has_transcription: bool,
}

impl Item {
    pub fn is_album(&self) -> bool {
        self.item_type == "album"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Overview {
    pub name: String,
    #[serde(default)]
    pub languages: Vec<String>,
}
