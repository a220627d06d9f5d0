use std::{
    future::Future,
    sync::{Arc, Weak},
    time::Duration,
};

use shared::{
    domain::{InputSection, SpotifyAction, NETWORK_INPUT},
    error::CommandAck,
    protocol::{
        FavoriteRequest, LastPlayed, SpotifyPlayRequest, SpotifyPlaylist, SpotifyPlaylistTrack,
        Station,
    },
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    debounce::Debouncer,
    error::ControlError,
    favorites::{self, SortKey, Step},
    poller::Poller,
    view::{
        project_status, LiveInfo, PlaylistCard, PlaylistGridView, SpotifyAuthView,
        SpotifyNowPlayingView, StationInfoView, StatusView, TrackListBody, TrackListView,
        TrackRow,
    },
    volume, ControlApi,
};

pub const MIN_SEARCH_LEN: usize = 3;

pub const POWER_ON_REFRESH: [Duration; 3] = [
    Duration::ZERO,
    Duration::from_millis(1000),
    Duration::from_millis(2500),
];
pub const POWER_ON_VOLUME_DELAY: Duration = Duration::from_millis(1500);
pub const POWER_OFF_REFRESH: [Duration; 3] = [
    Duration::ZERO,
    Duration::from_millis(500),
    Duration::from_millis(1500),
];
pub const INPUT_REFRESH: [Duration; 3] = [
    Duration::ZERO,
    Duration::from_millis(500),
    Duration::from_millis(1500),
];
pub const PLAY_REFRESH: [Duration; 1] = [Duration::from_millis(2000)];
pub const SPOTIFY_CONTROL_REFRESH: Duration = Duration::from_millis(500);

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub volume_debounce: Duration,
    pub spotify_poll_interval: Duration,
    /// Display volume applied shortly after power-on; `None` leaves it alone.
    pub power_on_volume: Option<f64>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            volume_debounce: Duration::from_millis(300),
            spotify_poll_interval: Duration::from_secs(5),
            power_on_volume: Some(25.0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub current_input: Option<String>,
    pub section: InputSection,
    pub search_results: Vec<Station>,
    pub favorites: Vec<Station>,
    pub playing_url: Option<String>,
    pub volume_focus: bool,
    pub volume_display: Option<f64>,
    volume_focus_ticket: u64,
    pub status: Option<StatusView>,
    pub header: String,
    pub spotify_playlists: Vec<SpotifyPlaylist>,
    pub open_playlist: Option<SpotifyPlaylist>,
    pub playlist_tracks: Vec<SpotifyPlaylistTrack>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    StatusUpdated(StatusView),
    HeaderChanged(String),
    VolumePreview(f64),
    SectionChanged(InputSection),
    SearchStarted(String),
    SearchResults(Vec<Station>),
    SearchFailed(String),
    FavoritesUpdated(Vec<Station>),
    StationInfo(StationInfoView),
    SpotifyAuth(SpotifyAuthView),
    SpotifyPlaylists(PlaylistGridView),
    SpotifyTracks(TrackListView),
    SpotifyNowPlaying(SpotifyNowPlayingView),
    Alert(String),
}

pub struct PanelController {
    api: Arc<dyn ControlApi>,
    options: ControllerOptions,
    ui: Mutex<UiState>,
    poller: Mutex<Option<Poller>>,
    volume_debounce: Debouncer,
    pending: Mutex<Vec<JoinHandle<()>>>,
    events: broadcast::Sender<PanelEvent>,
}

impl PanelController {
    pub fn new(api: Arc<dyn ControlApi>) -> Arc<Self> {
        Self::with_options(api, ControllerOptions::default())
    }

    pub fn with_options(api: Arc<dyn ControlApi>, options: ControllerOptions) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            api,
            volume_debounce: Debouncer::new(options.volume_debounce),
            options,
            ui: Mutex::new(UiState::default()),
            poller: Mutex::new(None),
            pending: Mutex::new(Vec::new()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PanelEvent> {
        self.events.subscribe()
    }

    pub async fn ui_state(&self) -> UiState {
        self.ui.lock().await.clone()
    }

    pub fn spotify_login_url(&self) -> String {
        self.api.spotify_login_url()
    }

    fn emit(&self, event: PanelEvent) {
        let _ = self.events.send(event);
    }

    fn alert(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "alerting user");
        self.emit(PanelEvent::Alert(message));
    }

    async fn set_header(&self, header: impl Into<String>) {
        let header = header.into();
        self.ui.lock().await.header = header.clone();
        self.emit(PanelEvent::HeaderChanged(header));
    }

    pub async fn initialize(self: &Arc<Self>) {
        self.refresh_status().await;
        self.load_favorites().await;
        self.check_spotify_auth().await;
    }

    pub async fn settle(&self) {
        loop {
            let handles = std::mem::take(&mut *self.pending.lock().await);
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                let _ = handle.await;
            }
        }
    }

    async fn track(&self, handle: JoinHandle<()>) {
        let mut pending = self.pending.lock().await;
        pending.retain(|task| !task.is_finished());
        pending.push(handle);
    }

    async fn run_after<F>(&self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            action.await;
        });
        self.track(handle).await;
    }

    /// Schedules one status re-fetch per offset, measured from now. Each fetch
    /// runs whatever the outcome of the others.
    pub async fn schedule_reconciliation(self: &Arc<Self>, offsets: &[Duration]) {
        for &offset in offsets {
            debug!(
                offset_ms = offset.as_millis() as u64,
                "scheduling status reconciliation"
            );
            let controller = Arc::clone(self);
            self.run_after(offset, async move { controller.refresh_status().await })
                .await;
        }
    }

    pub async fn refresh_status(&self) {
        let snapshot = match self.api.status().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "failed to fetch status; keeping previous view");
                return;
            }
        };

        let view = {
            let mut ui = self.ui.lock().await;
            let view = project_status(&snapshot, ui.volume_focus, ui.status.as_ref());
            if !ui.volume_focus {
                ui.volume_display = view.volume;
            }
            ui.header = view.header.clone();
            ui.status = Some(view.clone());
            view
        };
        self.emit(PanelEvent::StatusUpdated(view));
    }

    fn accept_ack(&self, intent: &str, result: Result<CommandAck, ControlError>) -> bool {
        match result {
            Ok(ack) => match ack.into_result() {
                Ok(()) => true,
                Err(rejection) => {
                    self.alert(format!(
                        "Failed to {intent}: {}",
                        rejection.message_or(UNKNOWN_ERROR)
                    ));
                    false
                }
            },
            Err(err) => {
                warn!(intent, %err, "command request failed");
                self.alert(format!("Failed to {intent}: {err}"));
                false
            }
        }
    }

    pub async fn power_on(self: &Arc<Self>) -> bool {
        let accepted = self.accept_ack("power on", self.api.set_power(true).await);
        if accepted {
            info!("receiver powering on");
            self.schedule_reconciliation(&POWER_ON_REFRESH).await;
            if let Some(display) = self.options.power_on_volume {
                let controller = Arc::clone(self);
                self.run_after(POWER_ON_VOLUME_DELAY, async move {
                    controller.send_volume(display).await;
                })
                .await;
            }
        }
        accepted
    }

    pub async fn power_off(self: &Arc<Self>) -> bool {
        let accepted = self.accept_ack("power off", self.api.set_power(false).await);
        if accepted {
            info!("receiver powering off");
            self.schedule_reconciliation(&POWER_OFF_REFRESH).await;
        }
        accepted
    }

    pub async fn toggle_mute(self: &Arc<Self>) -> bool {
        let accepted = self.accept_ack("toggle mute", self.api.toggle_mute().await);
        if accepted {
            self.refresh_status().await;
        }
        accepted
    }

    pub async fn set_source(self: &Arc<Self>, input: &str) -> bool {
        self.ui.lock().await.current_input = Some(input.to_string());
        self.show_input_section(InputSection::for_input(input)).await;

        match self.api.set_input(input).await {
            Ok(ack) if ack.is_success() => {
                info!(input, "input selected");
                self.schedule_reconciliation(&INPUT_REFRESH).await;
                true
            }
            Ok(ack) => {
                self.alert(format!(
                    "Failed to set source: {}",
                    ack.error.as_deref().unwrap_or(UNKNOWN_ERROR)
                ));
                false
            }
            Err(err) => {
                warn!(input, %err, "set input request failed");
                self.alert("Network error while setting source. Check AVR connection.");
                false
            }
        }
    }

    pub async fn show_input_section(self: &Arc<Self>, section: InputSection) {
        let mut poller = self.poller.lock().await;
        self.ui.lock().await.section = section;

        if section != InputSection::Spotify {
            if let Some(active) = poller.take() {
                debug!("stopping spotify now-playing poller");
                active.stop();
            }
        } else if poller.is_none() {
            debug!(
                period_ms = self.options.spotify_poll_interval.as_millis() as u64,
                "starting spotify now-playing poller"
            );
            let weak: Weak<Self> = Arc::downgrade(self);
            *poller = Some(Poller::spawn(
                self.options.spotify_poll_interval,
                move || {
                    let weak = weak.clone();
                    async move {
                        match weak.upgrade() {
                            Some(controller) => {
                                controller.update_spotify_now_playing().await;
                                true
                            }
                            None => false,
                        }
                    }
                },
            ));
        }
        drop(poller);

        self.emit(PanelEvent::SectionChanged(section));
    }

    pub async fn is_polling_spotify(&self) -> bool {
        self.poller
            .lock()
            .await
            .as_ref()
            .is_some_and(Poller::is_running)
    }

    pub async fn slide_volume(self: &Arc<Self>, display: f64) {
        let display = volume::clamp_display(display);
        let ticket = {
            let mut ui = self.ui.lock().await;
            ui.volume_focus = true;
            ui.volume_display = Some(display);
            ui.volume_focus_ticket += 1;
            ui.volume_focus_ticket
        };
        self.emit(PanelEvent::VolumePreview(display));

        let controller = Arc::clone(self);
        let handle = self.volume_debounce.call(async move {
            controller.send_volume(display).await;
            // A newer slider value may still be waiting to be sent.
            let mut ui = controller.ui.lock().await;
            if ui.volume_focus_ticket == ticket {
                ui.volume_focus = false;
            }
        });
        self.track(handle).await;
    }

    pub async fn change_volume(self: &Arc<Self>, delta: f64) -> f64 {
        let display = {
            let mut ui = self.ui.lock().await;
            let current = ui.volume_display.unwrap_or(volume::DISPLAY_MIN);
            let display = volume::clamp_display(current + delta);
            ui.volume_display = Some(display);
            display
        };
        self.emit(PanelEvent::VolumePreview(display));
        self.send_volume(display).await;
        display
    }

    async fn send_volume(&self, display_volume: f64) -> bool {
        let db = volume::display_to_db(display_volume);
        debug!(display_volume, db, "sending volume");
        self.accept_ack("set volume", self.api.set_volume(db).await)
    }

    pub async fn search(&self, query: &str) -> bool {
        if query.chars().count() < MIN_SEARCH_LEN {
            debug!(query, "search query too short");
            return false;
        }

        self.emit(PanelEvent::SearchStarted(query.to_string()));
        match self.api.search(query).await {
            Ok(results) => {
                self.ui.lock().await.search_results = results.clone();
                self.emit(PanelEvent::SearchResults(results));
            }
            Err(err) => {
                warn!(query, %err, "station search failed");
                self.emit(PanelEvent::SearchFailed("Search failed".to_string()));
            }
        }
        true
    }

    pub async fn sort_results(&self, key: SortKey) {
        let results = {
            let mut ui = self.ui.lock().await;
            favorites::sort_stations(&mut ui.search_results, key);
            ui.search_results.clone()
        };
        if !results.is_empty() {
            self.emit(PanelEvent::SearchResults(results));
        }
    }

    async fn search_result(&self, index: usize) -> Option<Station> {
        let station = self.ui.lock().await.search_results.get(index).cloned();
        if station.is_none() {
            self.alert(format!("No search result #{}", index + 1));
        }
        station
    }

    async fn favorite_at(&self, index: usize) -> Option<Station> {
        let station = self.ui.lock().await.favorites.get(index).cloned();
        if station.is_none() {
            self.alert(format!("No favorite #{}", index + 1));
        }
        station
    }

    pub async fn play_result(self: &Arc<Self>, index: usize) -> bool {
        match self.search_result(index).await {
            Some(station) => {
                self.play_url(station.stream_url(), Some(station.name.as_str()))
                    .await
            }
            None => false,
        }
    }

    pub async fn result_info(&self, index: usize) -> Option<StationInfoView> {
        let station = self.search_result(index).await?;
        Some(self.station_info(&station).await)
    }

    pub async fn favorite_result(&self, index: usize) -> bool {
        match self.search_result(index).await {
            Some(station) => self.add_favorite(&station).await,
            None => false,
        }
    }

    pub async fn play_url(self: &Arc<Self>, url: &str, name: Option<&str>) -> bool {
        let name = name.filter(|name| !name.is_empty());
        if let Some(name) = name {
            self.set_header(name).await;
        }

        match self.api.play_url(url, name).await {
            Ok(ack) if ack.ack.is_success() => {
                info!(url, played = ack.played.as_deref(), "stream started");
                self.ui.lock().await.playing_url = Some(url.to_string());
                self.schedule_reconciliation(&PLAY_REFRESH).await;
                true
            }
            Ok(ack) => {
                self.alert(format!(
                    "Failed to play stream: {}",
                    ack.ack.error.as_deref().unwrap_or(UNKNOWN_ERROR)
                ));
                self.refresh_status().await;
                false
            }
            Err(err) => {
                warn!(url, %err, "play request failed");
                self.alert("Command failed");
                self.refresh_status().await;
                false
            }
        }
    }

    pub async fn play_favorite(self: &Arc<Self>, index: usize) -> bool {
        match self.favorite_at(index).await {
            Some(station) => self.play_url(&station.url, Some(station.name.as_str())).await,
            None => false,
        }
    }

    pub async fn play_next_favorite(self: &Arc<Self>) -> bool {
        self.step_favorite(Step::Next).await
    }

    pub async fn play_prev_favorite(self: &Arc<Self>) -> bool {
        self.step_favorite(Step::Previous).await
    }

    async fn step_favorite(self: &Arc<Self>, step: Step) -> bool {
        let target = {
            let ui = self.ui.lock().await;
            favorites::step_from(&ui.favorites, ui.playing_url.as_deref(), step).cloned()
        };
        match target {
            Some(station) => self.play_url(&station.url, Some(station.name.as_str())).await,
            None => {
                debug!(?step, "playing stream is not a favorite; navigation skipped");
                false
            }
        }
    }

    pub async fn resume_radio(self: &Arc<Self>) -> bool {
        self.ui.lock().await.current_input = Some(NETWORK_INPUT.to_string());
        self.show_input_section(InputSection::Radio).await;

        match self.api.last_played().await {
            Ok(LastPlayed {
                url: Some(url),
                name,
            }) if !url.is_empty() => {
                info!(url, name = name.as_deref(), "resuming last station");
                return self.play_url(&url, name.as_deref()).await;
            }
            Ok(_) => {}
            Err(err) => warn!(%err, "failed to fetch last played station"),
        }

        self.alert("No last played station found. Please select a station from the list first.");
        false
    }

    pub async fn load_favorites(&self) {
        match self.api.favorites().await {
            Ok(favorites) => {
                self.ui.lock().await.favorites = favorites.clone();
                self.emit(PanelEvent::FavoritesUpdated(favorites));
            }
            Err(err) => warn!(%err, "failed to load favorites"),
        }
    }

    pub async fn add_favorite(&self, station: &Station) -> bool {
        match self.api.add_favorite(&FavoriteRequest::from(station)).await {
            Ok(ack) if ack.ack.is_success() => {
                info!(name = %station.name, "favorite saved");
                self.load_favorites().await;
                true
            }
            Ok(ack) => {
                self.alert(format!(
                    "Failed to save favorite: {}",
                    ack.ack.error.as_deref().unwrap_or(UNKNOWN_ERROR)
                ));
                false
            }
            Err(err) => {
                warn!(name = %station.name, %err, "failed to save favorite");
                false
            }
        }
    }

    pub async fn delete_favorite(&self, url: &str) {
        if let Err(err) = self.api.delete_favorite(url).await {
            warn!(url, %err, "failed to delete favorite");
        }
        self.load_favorites().await;
    }

    pub async fn delete_favorite_at(&self, index: usize) -> bool {
        match self.favorite_at(index).await {
            Some(station) => {
                self.delete_favorite(&station.url).await;
                true
            }
            None => false,
        }
    }

    pub async fn favorite_info(&self, index: usize) -> Option<StationInfoView> {
        let station = self.favorite_at(index).await?;
        Some(self.station_info(&station).await)
    }

    pub async fn station_info(&self, station: &Station) -> StationInfoView {
        let view = StationInfoView::connecting(station);
        self.emit(PanelEvent::StationInfo(view.clone()));

        let live = match self.api.metadata(&view.stream_url).await {
            Ok(metadata) => LiveInfo::from_metadata(&metadata),
            Err(err) => {
                warn!(url = %view.stream_url, %err, "failed to fetch stream metadata");
                LiveInfo::Unavailable
            }
        };
        let view = view.with_live(live);
        self.emit(PanelEvent::StationInfo(view.clone()));
        view
    }

    pub async fn check_spotify_auth(&self) -> SpotifyAuthView {
        let view = match self.api.spotify_status().await {
            Ok(status) => SpotifyAuthView::from(&status),
            Err(err) => {
                warn!(%err, "failed to check spotify authentication");
                SpotifyAuthView::Unavailable(
                    "Failed to check Spotify authentication status.".to_string(),
                )
            }
        };
        self.emit(PanelEvent::SpotifyAuth(view.clone()));
        if matches!(view, SpotifyAuthView::LoggedIn { .. }) {
            self.load_spotify_playlists().await;
        }
        view
    }

    pub async fn logout_spotify(&self) -> bool {
        match self.api.spotify_logout().await {
            Ok(()) => {
                self.check_spotify_auth().await;
                true
            }
            Err(err) => {
                warn!(%err, "spotify logout failed");
                false
            }
        }
    }

    pub async fn load_spotify_playlists(&self) {
        self.emit(PanelEvent::SpotifyPlaylists(PlaylistGridView::Loading));
        let grid = match self.api.spotify_playlists().await {
            Ok(playlists) => {
                let cards: Vec<PlaylistCard> = playlists.iter().map(PlaylistCard::from).collect();
                self.ui.lock().await.spotify_playlists = playlists;
                if cards.is_empty() {
                    PlaylistGridView::Empty
                } else {
                    PlaylistGridView::Playlists(cards)
                }
            }
            Err(err) => {
                warn!(%err, "failed to load spotify playlists");
                PlaylistGridView::Failed(
                    err.backend_message()
                        .unwrap_or("Failed to load playlists.")
                        .to_string(),
                )
            }
        };
        self.emit(PanelEvent::SpotifyPlaylists(grid));
    }

    pub async fn open_playlist(&self, index: usize) -> Option<TrackListView> {
        let playlist = {
            let mut ui = self.ui.lock().await;
            let playlist = ui.spotify_playlists.get(index).cloned();
            ui.open_playlist = playlist.clone();
            ui.playlist_tracks.clear();
            playlist
        };
        let Some(playlist) = playlist else {
            self.alert(format!("No playlist #{}", index + 1));
            return None;
        };

        let title = playlist.name.clone();
        let info = format!("{} tracks", playlist.tracks_total);
        self.emit(PanelEvent::SpotifyTracks(TrackListView {
            title: title.clone(),
            info: info.clone(),
            body: TrackListBody::Loading,
        }));

        let body = match self.api.spotify_playlist_tracks(&playlist.id).await {
            Ok(tracks) => {
                let rows: Vec<TrackRow> = tracks.iter().map(TrackRow::from).collect();
                self.ui.lock().await.playlist_tracks = tracks;
                if rows.is_empty() {
                    TrackListBody::Empty
                } else {
                    TrackListBody::Tracks(rows)
                }
            }
            Err(err) => {
                warn!(playlist = %playlist.id, %err, "failed to load playlist tracks");
                TrackListBody::Failed(
                    err.backend_message()
                        .unwrap_or("Failed to load tracks.")
                        .to_string(),
                )
            }
        };
        let view = TrackListView { title, info, body };
        self.emit(PanelEvent::SpotifyTracks(view.clone()));
        Some(view)
    }

    pub async fn play_open_playlist(self: &Arc<Self>) -> bool {
        let playlist = self.ui.lock().await.open_playlist.clone();
        match playlist {
            Some(playlist) => {
                self.play_playlist(playlist.uri.as_deref(), &playlist.name)
                    .await
            }
            None => {
                self.alert("Open a playlist first.");
                false
            }
        }
    }

    pub async fn play_playlist(self: &Arc<Self>, uri: Option<&str>, name: &str) -> bool {
        let Some(uri) = uri.filter(|uri| !uri.is_empty()) else {
            self.alert("Cannot play this playlist directly. Try playing individual tracks.");
            return false;
        };

        let request = SpotifyPlayRequest::Context {
            context_uri: uri.to_string(),
        };
        match self.api.spotify_play(&request).await {
            Ok(ack) if ack.is_success() => {
                info!(uri, "spotify playlist started");
                self.set_header(format!("\u{1F3B5} {name}")).await;
                self.schedule_reconciliation(&PLAY_REFRESH).await;
                true
            }
            Ok(ack) => {
                self.alert(format!(
                    "Error: {}",
                    ack.error.as_deref().unwrap_or("Failed to start playback")
                ));
                false
            }
            Err(err) => {
                warn!(uri, %err, "spotify play request failed");
                self.alert(
                    "Failed to start Spotify playback. Make sure AVR is on and Spotify input is available.",
                );
                false
            }
        }
    }

    pub async fn play_track(self: &Arc<Self>, index: usize) -> bool {
        let track = self.ui.lock().await.playlist_tracks.get(index).cloned();
        match track {
            Some(track) => {
                let label = format!("{} - {}", track.name, track.artists);
                self.play_tracks(vec![track.uri], &label).await
            }
            None => {
                self.alert(format!("No track #{}", index + 1));
                false
            }
        }
    }

    pub async fn play_tracks(self: &Arc<Self>, track_uris: Vec<String>, label: &str) -> bool {
        let request = SpotifyPlayRequest::Tracks { track_uris };
        match self.api.spotify_play(&request).await {
            Ok(ack) if ack.is_success() => {
                info!(label, "spotify track started");
                self.set_header(label).await;
                self.schedule_reconciliation(&PLAY_REFRESH).await;
                true
            }
            Ok(ack) => {
                self.alert(format!(
                    "Error: {}",
                    ack.error.as_deref().unwrap_or("Failed to play track")
                ));
                false
            }
            Err(err) => {
                warn!(label, %err, "spotify track request failed");
                self.alert("Failed to play track.");
                false
            }
        }
    }

    pub async fn spotify_control(self: &Arc<Self>, action: SpotifyAction) -> bool {
        let name = action.as_str();
        match self.api.spotify_control(action).await {
            Ok(ack) if ack.is_success() => {
                debug!(action = name, "spotify control succeeded");
                let controller = Arc::clone(self);
                self.run_after(SPOTIFY_CONTROL_REFRESH, async move {
                    controller.update_spotify_now_playing().await;
                })
                .await;
                true
            }
            Ok(ack) => {
                self.alert(format!(
                    "Failed to {name}: {}",
                    ack.error.as_deref().unwrap_or(UNKNOWN_ERROR)
                ));
                false
            }
            Err(err) => {
                warn!(action = name, %err, "spotify control request failed");
                self.alert(format!("Network error during {name}"));
                false
            }
        }
    }

    pub async fn update_spotify_now_playing(&self) {
        let view = match self.api.spotify_current().await {
            Ok(current) => SpotifyNowPlayingView::from(&current),
            Err(err) => {
                warn!(%err, "failed to update spotify now playing");
                SpotifyNowPlayingView::hidden()
            }
        };
        self.emit(PanelEvent::SpotifyNowPlaying(view));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
