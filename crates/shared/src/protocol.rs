use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    domain::POWER_ON,
    error::{BackendRejection, CommandAck},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// Master volume in decibels. Absent or non-numeric values decode to `None`.
    #[serde(default, deserialize_with = "lenient_decibels")]
    pub volume: Option<f64>,
    #[serde(default)]
    pub muted: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusSnapshot {
    pub fn is_powered_on(&self) -> bool {
        self.power.as_deref() == Some(POWER_ON)
    }
}

fn lenient_decibels<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|db| db.is_finite()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_resolved: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countrycode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl Station {
    pub fn stream_url(&self) -> &str {
        self.url_resolved
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.url)
    }

    pub fn matches_url(&self, url: &str) -> bool {
        self.url_resolved.as_deref() == Some(url) || self.url == url
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRequest {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRequest {
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRequest {
    pub name: String,
    pub url: Option<String>,
    pub favicon: Option<String>,
    pub bitrate: Option<u32>,
    pub countrycode: Option<String>,
}

impl From<&Station> for FavoriteRequest {
    fn from(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            url: station.url_resolved.clone(),
            favicon: station.favicon.clone(),
            bitrate: station.bitrate,
            countrycode: station.countrycode.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteFavoriteRequest {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesAck {
    #[serde(flatten)]
    pub ack: CommandAck,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Vec<Station>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayUrlAck {
    #[serde(flatten)]
    pub ack: CommandAck,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastPlayed {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now_playing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyAuthStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SpotifyUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyCurrent {
    #[serde(default)]
    pub track: Option<SpotifyTrack>,
    #[serde(default)]
    pub playing: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tracks_total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyPlaylistTrack {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyControlRequest {
    pub action: String,
}

/// `POST /api/spotify/play` body: either a context (playlist) or explicit tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpotifyPlayRequest {
    Context { context_uri: String },
    Tracks { track_uris: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListOrError<T> {
    Items(Vec<T>),
    Error { error: String },
}

impl<T> ListOrError<T> {
    pub fn into_result(self) -> Result<Vec<T>, BackendRejection> {
        match self {
            Self::Items(items) => Ok(items),
            Self::Error { error } => Err(BackendRejection {
                message: Some(error),
            }),
        }
    }
}
