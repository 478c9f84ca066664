//! Video model and its public projection.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Resolutions a video may be offered in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Resolution {
    P144,
    P240,
    P360,
    P480,
    P720,
    P1080,
    P1440,
    P2160,
}

impl Resolution {
    pub const ALL: [Resolution; 8] = [
        Resolution::P144,
        Resolution::P240,
        Resolution::P360,
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
        Resolution::P1440,
        Resolution::P2160,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::P144 => "P144",
            Resolution::P240 => "P240",
            Resolution::P360 => "P360",
            Resolution::P480 => "P480",
            Resolution::P720 => "P720",
            Resolution::P1080 => "P1080",
            Resolution::P1440 => "P1440",
            Resolution::P2160 => "P2160",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

/// A stored video record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub can_be_downloaded: bool,
    pub min_age_restriction: Option<u8>,
    pub created_at: String,
    pub publication_date: String,
    pub available_resolutions: Option<Vec<Resolution>>,
}

/// Public shape of a video as returned by the list and get endpoints.
///
/// Field-identical to [`Video`] today; kept separate so the stored record can
/// grow fields that are not exposed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoView {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub can_be_downloaded: bool,
    pub min_age_restriction: Option<u8>,
    pub created_at: String,
    pub publication_date: String,
    pub available_resolutions: Option<Vec<Resolution>>,
}

impl From<&Video> for VideoView {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id,
            title: video.title.clone(),
            author: video.author.clone(),
            can_be_downloaded: video.can_be_downloaded,
            min_age_restriction: video.min_age_restriction,
            created_at: video.created_at.clone(),
            publication_date: video.publication_date.clone(),
            available_resolutions: video.available_resolutions.clone(),
        }
    }
}

/// Validated data for a new video.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub author: String,
    pub available_resolutions: Option<Vec<Resolution>>,
}

/// Validated changes to an existing video. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct VideoPatch {
    pub title: String,
    pub author: String,
    pub can_be_downloaded: Option<bool>,
    pub min_age_restriction: Option<u8>,
    pub available_resolutions: Option<Vec<Resolution>>,
    pub publication_date: Option<String>,
}

/// Request body for creating a video.
///
/// Fields stay as raw JSON so validation can tell a missing field from an
/// explicit `null` or a value of the wrong type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub available_resolutions: Option<Value>,
}

/// Request body for updating a video.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub available_resolutions: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub can_be_downloaded: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub min_age_restriction: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub publication_date: Option<Value>,
}

/// Maps a present field (including `null`) to `Some`; absent fields fall back
/// to `None` through `#[serde(default)]`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
