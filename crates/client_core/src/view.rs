use shared::{
    domain::is_radio_source,
    protocol::{
        SpotifyAuthStatus, SpotifyCurrent, SpotifyPlaylist, SpotifyPlaylistTrack, Station,
        StatusSnapshot, StreamMetadata,
    },
};

use crate::{favorites::country_flag, volume};

pub const IDLE_HEADER: &str = "DENON AVR";
const RADIO_HEADER: &str = "Radio";
const PLACEHOLDER: &str = "-";

pub const MUTED_ICON: &str = "\u{1F507}";
pub const UNMUTED_ICON: &str = "\u{1F50A}";

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub power_on: bool,
    pub show_power_button: bool,
    pub show_volume_controls: bool,
    pub power_label: String,
    pub source_label: String,
    pub source_detail: Option<String>,
    pub muted: Option<bool>,
    pub volume: Option<f64>,
    pub now_playing: String,
    pub header: String,
}

impl StatusView {
    pub fn volume_label(&self) -> String {
        self.volume
            .map(volume::format_display)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn mute_icon(&self) -> Option<&'static str> {
        self.muted
            .map(|muted| if muted { MUTED_ICON } else { UNMUTED_ICON })
    }
}

/// Projects a status snapshot. While `volume_focus` is set the volume of
/// `previous` is carried over so a user dragging the slider is not overridden.
pub fn project_status(
    snapshot: &StatusSnapshot,
    volume_focus: bool,
    previous: Option<&StatusView>,
) -> StatusView {
    let power_on = snapshot.is_powered_on();
    let source = snapshot.source.as_deref().filter(|s| !s.is_empty());

    let volume = if volume_focus {
        previous.and_then(|view| view.volume)
    } else {
        snapshot.volume.and_then(volume::db_to_display)
    };

    let mut header = IDLE_HEADER.to_string();
    let mut now_playing = PLACEHOLDER.to_string();
    match (
        non_empty(&snapshot.artist),
        non_empty(&snapshot.title),
        non_empty(&snapshot.station),
        non_empty(&snapshot.name),
    ) {
        (Some(artist), Some(title), _, _) => {
            now_playing = format!("{artist} - {title}");
            header = now_playing.clone();
        }
        (_, _, Some(station), _) => {
            now_playing = station.to_string();
            header = now_playing.clone();
        }
        (_, _, _, Some(name)) => now_playing = name.to_string(),
        _ => {}
    }

    let mut source_detail = None;
    match source {
        Some(source) if is_radio_source(source) => {
            if header == IDLE_HEADER {
                header = RADIO_HEADER.to_string();
            }
            source_detail = Some(now_playing.clone());
        }
        Some(source) => header = source.to_string(),
        None => {}
    }

    StatusView {
        power_on,
        show_power_button: !power_on,
        show_volume_controls: power_on,
        power_label: non_empty(&snapshot.power).unwrap_or(PLACEHOLDER).to_string(),
        source_label: source.unwrap_or(PLACEHOLDER).to_string(),
        source_detail,
        muted: snapshot.muted,
        volume,
        now_playing,
        header,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveInfo {
    Connecting,
    Loaded {
        now_playing: String,
        server: Option<String>,
    },
    Unavailable,
}

impl LiveInfo {
    pub fn from_metadata(metadata: &StreamMetadata) -> Self {
        let now_playing = match non_empty(&metadata.now_playing) {
            Some(title) if title != "Unknown" => format!("\u{1F3B5} {title}"),
            _ => "No playing info available".to_string(),
        };
        Self::Loaded {
            now_playing,
            server: non_empty(&metadata.server_name).map(|name| format!("Server: {name}")),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Connecting => vec!["Connecting to stream...".to_string()],
            Self::Loaded {
                now_playing,
                server,
            } => std::iter::once(now_playing.clone())
                .chain(server.clone())
                .collect(),
            Self::Unavailable => vec!["Could not fetch metadata.".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationInfoView {
    pub name: String,
    pub logo_url: Option<String>,
    pub homepage: Option<String>,
    pub bitrate: String,
    pub codec: String,
    pub country: String,
    pub tags: String,
    pub stream_url: String,
    pub live: LiveInfo,
}

impl StationInfoView {
    pub fn connecting(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            logo_url: non_empty(&station.favicon).map(str::to_string),
            homepage: non_empty(&station.homepage).map(str::to_string),
            bitrate: match station.bitrate {
                Some(bitrate) if bitrate > 0 => format!("{bitrate} kbps"),
                _ => "? kbps".to_string(),
            },
            codec: non_empty(&station.codec).unwrap_or("MP3").to_string(),
            country: non_empty(&station.country).unwrap_or(PLACEHOLDER).to_string(),
            tags: non_empty(&station.tags).unwrap_or(PLACEHOLDER).to_string(),
            stream_url: station.stream_url().to_string(),
            live: LiveInfo::Connecting,
        }
    }

    pub fn with_live(mut self, live: LiveInfo) -> Self {
        self.live = live;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRow {
    pub name: String,
    pub country: String,
    pub bitrate: String,
}

impl From<&Station> for StationRow {
    fn from(station: &Station) -> Self {
        let code = non_empty(&station.countrycode).unwrap_or_default();
        let country = match country_flag(code) {
            Some(flag) => format!("{} {flag}", code.to_ascii_uppercase()),
            None => code.to_string(),
        };
        Self {
            name: station.name.clone(),
            country,
            bitrate: station
                .bitrate
                .map(|bitrate| format!("{bitrate}k"))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotifyAuthView {
    LoggedIn { display_name: String },
    LoggedOut,
    Unavailable(String),
}

impl From<&SpotifyAuthStatus> for SpotifyAuthView {
    fn from(status: &SpotifyAuthStatus) -> Self {
        match (&status.user, status.authenticated) {
            (Some(user), true) => Self::LoggedIn {
                display_name: non_empty(&user.display_name)
                    .unwrap_or(user.id.as_str())
                    .to_string(),
            },
            (None, true) => Self::LoggedIn {
                display_name: "Spotify user".to_string(),
            },
            (_, false) => Self::LoggedOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyNowPlayingView {
    pub visible: bool,
    pub track: String,
    pub artist: String,
    pub art_url: Option<String>,
    pub playing: bool,
}

impl SpotifyNowPlayingView {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            track: String::new(),
            artist: String::new(),
            art_url: None,
            playing: false,
        }
    }
}

impl From<&SpotifyCurrent> for SpotifyNowPlayingView {
    fn from(current: &SpotifyCurrent) -> Self {
        let Some(track) = &current.track else {
            return Self::hidden();
        };
        Self {
            visible: true,
            track: non_empty(&track.name).unwrap_or("Unknown Track").to_string(),
            artist: non_empty(&track.artists)
                .unwrap_or("Unknown Artist")
                .to_string(),
            art_url: non_empty(&track.image_url).map(str::to_string),
            playing: current.playing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistCard {
    pub name: String,
    pub image_url: Option<String>,
    pub track_count: String,
}

impl From<&SpotifyPlaylist> for PlaylistCard {
    fn from(playlist: &SpotifyPlaylist) -> Self {
        Self {
            name: playlist.name.clone(),
            image_url: non_empty(&playlist.image_url).map(str::to_string),
            track_count: format!("{} tracks", playlist.tracks_total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistGridView {
    Loading,
    Empty,
    Failed(String),
    Playlists(Vec<PlaylistCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub name: String,
    pub artists: String,
    pub duration: String,
    pub image_url: Option<String>,
}

impl From<&SpotifyPlaylistTrack> for TrackRow {
    fn from(track: &SpotifyPlaylistTrack) -> Self {
        Self {
            name: track.name.clone(),
            artists: track.artists.clone(),
            duration: track.duration_ms.map(format_duration).unwrap_or_default(),
            image_url: non_empty(&track.image_url).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackListBody {
    Loading,
    Empty,
    Failed(String),
    Tracks(Vec<TrackRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackListView {
    pub title: String,
    pub info: String,
    pub body: TrackListBody,
}

pub fn format_duration(duration_ms: u64) -> String {
    let total_seconds = duration_ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use shared::protocol::{SpotifyTrack, SpotifyUser};

    use super::*;

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot {
            power: Some("ON".into()),
            source: Some("TV".into()),
            volume: Some(-40.0),
            muted: Some(false),
            ..StatusSnapshot::default()
        }
    }

    #[test]
    fn powered_on_snapshot_shows_volume_controls() {
        let view = project_status(&snapshot(), false, None);
        assert!(view.power_on);
        assert!(!view.show_power_button);
        assert!(view.show_volume_controls);
        assert_eq!(view.volume, Some(40.0));
        assert_eq!(view.volume_label(), "40");
        assert_eq!(view.mute_icon(), Some(UNMUTED_ICON));
        assert_eq!(view.header, "TV");
    }

    #[test]
    fn standby_snapshot_shows_power_button() {
        let mut standby = snapshot();
        standby.power = Some("STANDBY".into());
        standby.muted = Some(true);
        let view = project_status(&standby, false, None);
        assert!(view.show_power_button);
        assert!(!view.show_volume_controls);
        assert_eq!(view.power_label, "STANDBY");
        assert_eq!(view.mute_icon(), Some(MUTED_ICON));
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let view = project_status(&StatusSnapshot::default(), false, None);
        assert_eq!(view.power_label, "-");
        assert_eq!(view.source_label, "-");
        assert_eq!(view.volume_label(), "-");
        assert_eq!(view.mute_icon(), None);
        assert_eq!(view.header, IDLE_HEADER);
        assert_eq!(view.now_playing, "-");
    }

    #[test]
    fn focused_volume_keeps_previous_value() {
        let previous = project_status(&snapshot(), false, None);
        let mut louder = snapshot();
        louder.volume = Some(-20.0);
        let view = project_status(&louder, true, Some(&previous));
        assert_eq!(view.volume, Some(40.0));

        let unfocused = project_status(&louder, false, Some(&previous));
        assert_eq!(unfocused.volume, Some(60.0));
    }

    #[test]
    fn radio_source_prefers_artist_and_title() {
        let mut radio = snapshot();
        radio.source = Some("NET".into());
        radio.artist = Some("Miles Davis".into());
        radio.title = Some("So What".into());
        radio.station = Some("Jazz FM".into());
        let view = project_status(&radio, false, None);
        assert_eq!(view.header, "Miles Davis - So What");
        assert_eq!(view.source_detail.as_deref(), Some("Miles Davis - So What"));
    }

    #[test]
    fn radio_source_without_metadata_reads_radio() {
        let mut radio = snapshot();
        radio.source = Some("IRADIO".into());
        radio.name = Some("Living Room".into());
        let view = project_status(&radio, false, None);
        assert_eq!(view.header, "Radio");
        assert_eq!(view.now_playing, "Living Room");
        assert_eq!(view.source_detail.as_deref(), Some("Living Room"));
    }

    #[test]
    fn non_radio_source_overrides_station_header() {
        let mut tv = snapshot();
        tv.station = Some("Jazz FM".into());
        let view = project_status(&tv, false, None);
        assert_eq!(view.now_playing, "Jazz FM");
        assert_eq!(view.header, "TV");
        assert_eq!(view.source_detail, None);
    }

    #[test]
    fn live_info_ignores_unknown_titles() {
        let unknown = StreamMetadata {
            now_playing: Some("Unknown".into()),
            server_name: Some("Icecast".into()),
            ..StreamMetadata::default()
        };
        assert_eq!(
            LiveInfo::from_metadata(&unknown).lines(),
            vec!["No playing info available", "Server: Icecast"]
        );

        let known = StreamMetadata {
            now_playing: Some("Song".into()),
            ..StreamMetadata::default()
        };
        assert_eq!(
            LiveInfo::from_metadata(&known).lines(),
            vec!["\u{1F3B5} Song"]
        );
    }

    #[test]
    fn station_info_defaults() {
        let station = Station {
            name: "Bare".into(),
            url: "http://bare".into(),
            ..Station::default()
        };
        let view = StationInfoView::connecting(&station);
        assert_eq!(view.bitrate, "? kbps");
        assert_eq!(view.codec, "MP3");
        assert_eq!(view.country, "-");
        assert_eq!(view.tags, "-");
        assert_eq!(view.live, LiveInfo::Connecting);
    }

    #[test]
    fn spotify_views() {
        let auth = SpotifyAuthStatus {
            authenticated: true,
            user: Some(SpotifyUser {
                id: "user-1".into(),
                display_name: None,
            }),
        };
        assert_eq!(
            SpotifyAuthView::from(&auth),
            SpotifyAuthView::LoggedIn {
                display_name: "user-1".into()
            }
        );

        let current = SpotifyCurrent {
            track: Some(SpotifyTrack {
                name: None,
                artists: Some("Band".into()),
                image_url: None,
            }),
            playing: true,
        };
        let view = SpotifyNowPlayingView::from(&current);
        assert!(view.visible);
        assert_eq!(view.track, "Unknown Track");
        assert_eq!(view.artist, "Band");

        let idle = SpotifyNowPlayingView::from(&SpotifyCurrent::default());
        assert!(!idle.visible);
    }

    #[test]
    fn formats_track_durations() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(61_000), "1:01");
        assert_eq!(format_duration(3_599_999), "59:59");
    }
}
