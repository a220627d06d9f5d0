use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::SpotifyAction,
    error::CommandAck,
    protocol::{
        DeleteFavoriteRequest, FavoriteRequest, FavoritesAck, InputRequest, LastPlayed,
        ListOrError, PlayUrlAck, SpotifyAuthStatus, SpotifyControlRequest, SpotifyCurrent,
        SpotifyPlayRequest, SpotifyPlaylist, SpotifyPlaylistTrack, Station, StatusSnapshot,
        StreamMetadata, VolumeRequest,
    },
};
use tracing::debug;
use url::Url;

pub mod controller;
pub mod debounce;
pub mod error;
pub mod favorites;
pub mod poller;
pub mod view;
pub mod volume;

pub use controller::{ControllerOptions, PanelController, PanelEvent, UiState};
pub use error::ControlError;

pub const SPOTIFY_LOGIN_PATH: &str = "/spotify/login";

/// The backend device-control API, one method per endpoint.
#[async_trait]
pub trait ControlApi: Send + Sync {
    async fn status(&self) -> Result<StatusSnapshot, ControlError>;
    async fn set_input(&self, input: &str) -> Result<CommandAck, ControlError>;
    async fn set_volume(&self, db: f64) -> Result<CommandAck, ControlError>;
    async fn toggle_mute(&self) -> Result<CommandAck, ControlError>;
    async fn set_power(&self, on: bool) -> Result<CommandAck, ControlError>;
    async fn search(&self, name: &str) -> Result<Vec<Station>, ControlError>;
    async fn favorites(&self) -> Result<Vec<Station>, ControlError>;
    async fn add_favorite(&self, favorite: &FavoriteRequest) -> Result<FavoritesAck, ControlError>;
    async fn delete_favorite(&self, url: &str) -> Result<FavoritesAck, ControlError>;
    async fn play_url(&self, url: &str, name: Option<&str>) -> Result<PlayUrlAck, ControlError>;
    async fn last_played(&self) -> Result<LastPlayed, ControlError>;
    async fn metadata(&self, url: &str) -> Result<StreamMetadata, ControlError>;
    async fn spotify_status(&self) -> Result<SpotifyAuthStatus, ControlError>;
    async fn spotify_current(&self) -> Result<SpotifyCurrent, ControlError>;
    async fn spotify_playlists(&self) -> Result<Vec<SpotifyPlaylist>, ControlError>;
    async fn spotify_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<SpotifyPlaylistTrack>, ControlError>;
    async fn spotify_control(&self, action: SpotifyAction) -> Result<CommandAck, ControlError>;
    async fn spotify_play(&self, request: &SpotifyPlayRequest) -> Result<CommandAck, ControlError>;
    async fn spotify_logout(&self) -> Result<(), ControlError>;
    fn spotify_login_url(&self) -> String;
}

pub struct HttpControlApi {
    http: Client,
    base: Url,
    base_url: String,
}

impl HttpControlApi {
    pub fn new(base_url: &str) -> Result<Self, ControlError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ControlError> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ControlError> {
        let base = Url::parse(base_url.trim()).map_err(|err| ControlError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ControlError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        let base_url = base.as_str().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn playlist_tracks_url(&self, playlist_id: &str) -> Result<Url, ControlError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ControlError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "spotify", "playlist", playlist_id, "tracks"]);
        Ok(url)
    }

    async fn post_command(&self, path: &str) -> Result<CommandAck, ControlError> {
        let response = self.http.post(self.endpoint(path)).send().await?;
        decode(response).await
    }
}

/// Decodes a JSON body regardless of HTTP status: the backend reports
/// failures as `{error}` bodies on 4xx/5xx responses.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ControlError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| ControlError::Decode {
        status: status.as_u16(),
        source,
    })
}

async fn decode_list<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, ControlError> {
    let body: ListOrError<T> = decode(response).await?;
    Ok(body.into_result()?)
}

#[async_trait]
impl ControlApi for HttpControlApi {
    async fn status(&self) -> Result<StatusSnapshot, ControlError> {
        let response = self.http.get(self.endpoint("/api/status")).send().await?;
        let snapshot: StatusSnapshot = decode(response).await?;
        if let Some(error) = snapshot.error {
            return Err(ControlError::Rejected(shared::error::BackendRejection {
                message: Some(error),
            }));
        }
        Ok(snapshot)
    }

    async fn set_input(&self, input: &str) -> Result<CommandAck, ControlError> {
        let response = self
            .http
            .post(self.endpoint("/api/input"))
            .json(&InputRequest {
                input: input.to_string(),
            })
            .send()
            .await?;
        decode(response).await
    }

    async fn set_volume(&self, db: f64) -> Result<CommandAck, ControlError> {
        let response = self
            .http
            .post(self.endpoint("/api/volume"))
            .json(&VolumeRequest { volume: db })
            .send()
            .await?;
        decode(response).await
    }

    async fn toggle_mute(&self) -> Result<CommandAck, ControlError> {
        self.post_command("/api/mute/toggle").await
    }

    async fn set_power(&self, on: bool) -> Result<CommandAck, ControlError> {
        let path = if on { "/api/power/on" } else { "/api/power/off" };
        self.post_command(path).await
    }

    async fn search(&self, name: &str) -> Result<Vec<Station>, ControlError> {
        let response = self
            .http
            .get(self.endpoint("/api/search"))
            .query(&[("name", name)])
            .send()
            .await?;
        decode_list(response).await
    }

    async fn favorites(&self) -> Result<Vec<Station>, ControlError> {
        let response = self.http.get(self.endpoint("/api/favorites")).send().await?;
        decode_list(response).await
    }

    async fn add_favorite(&self, favorite: &FavoriteRequest) -> Result<FavoritesAck, ControlError> {
        let response = self
            .http
            .post(self.endpoint("/api/favorites"))
            .json(favorite)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_favorite(&self, url: &str) -> Result<FavoritesAck, ControlError> {
        let response = self
            .http
            .post(self.endpoint("/api/favorites/delete"))
            .json(&DeleteFavoriteRequest {
                url: url.to_string(),
            })
            .send()
            .await?;
        decode(response).await
    }

    async fn play_url(&self, url: &str, name: Option<&str>) -> Result<PlayUrlAck, ControlError> {
        let mut query = vec![("url", url)];
        if let Some(name) = name.filter(|name| !name.is_empty()) {
            query.push(("name", name));
        }
        let response = self
            .http
            .get(self.endpoint("/api/play_url"))
            .query(&query)
            .send()
            .await?;
        decode(response).await
    }

    async fn last_played(&self) -> Result<LastPlayed, ControlError> {
        Ok(self
            .http
            .get(self.endpoint("/api/last_played"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    async fn metadata(&self, url: &str) -> Result<StreamMetadata, ControlError> {
        let response = self
            .http
            .get(self.endpoint("/api/metadata"))
            .query(&[("url", url)])
            .send()
            .await?;
        decode(response).await
    }

    async fn spotify_status(&self) -> Result<SpotifyAuthStatus, ControlError> {
        let response = self
            .http
            .get(self.endpoint("/api/spotify/status"))
            .send()
            .await?;
        decode(response).await
    }

    async fn spotify_current(&self) -> Result<SpotifyCurrent, ControlError> {
        let response = self
            .http
            .get(self.endpoint("/api/spotify/current"))
            .send()
            .await?;
        decode(response).await
    }

    async fn spotify_playlists(&self) -> Result<Vec<SpotifyPlaylist>, ControlError> {
        let response = self
            .http
            .get(self.endpoint("/api/spotify/playlists"))
            .send()
            .await?;
        decode_list(response).await
    }

    async fn spotify_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<SpotifyPlaylistTrack>, ControlError> {
        let url = self.playlist_tracks_url(playlist_id)?;
        let response = self.http.get(url).send().await?;
        decode_list(response).await
    }

    async fn spotify_control(&self, action: SpotifyAction) -> Result<CommandAck, ControlError> {
        let response = self
            .http
            .post(self.endpoint("/api/spotify/control"))
            .json(&SpotifyControlRequest {
                action: action.as_str().to_string(),
            })
            .send()
            .await?;
        // Only the HTTP status counts here; successful bodies vary by backend version.
        if response.status().is_success() {
            debug!(action = action.as_str(), "spotify control accepted");
            return Ok(CommandAck::success());
        }
        match decode::<CommandAck>(response).await {
            Ok(ack) => Ok(CommandAck {
                status: None,
                error: ack.error,
            }),
            Err(ControlError::Decode { .. }) => Ok(CommandAck::default()),
            Err(err) => Err(err),
        }
    }

    async fn spotify_play(&self, request: &SpotifyPlayRequest) -> Result<CommandAck, ControlError> {
        let response = self
            .http
            .post(self.endpoint("/api/spotify/play"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn spotify_logout(&self) -> Result<(), ControlError> {
        self.http
            .post(self.endpoint("/api/spotify/logout"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn spotify_login_url(&self) -> String {
        self.endpoint(SPOTIFY_LOGIN_PATH)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
