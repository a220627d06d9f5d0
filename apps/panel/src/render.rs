use client_core::{
    view::{
        PlaylistGridView, SpotifyAuthView, SpotifyNowPlayingView, StationInfoView,
        StationRow, StatusView, TrackListBody, TrackListView,
    },
    PanelEvent,
};
use shared::{domain::InputSection, protocol::Station};

use crate::prefs::Theme;

pub fn render(event: &PanelEvent, theme: Theme) -> Vec<String> {
    match event {
        PanelEvent::StatusUpdated(view) => status_lines(view),
        PanelEvent::HeaderChanged(header) => vec![banner(header, theme)],
        PanelEvent::VolumePreview(display) => vec![format!(
            "volume -> {}",
            client_core::volume::format_display(*display)
        )],
        PanelEvent::SectionChanged(section) => match section {
            InputSection::Radio => vec!["[radio] search, favorites and playback".to_string()],
            InputSection::Spotify => vec!["[spotify] playlists and playback".to_string()],
            InputSection::None => Vec::new(),
        },
        PanelEvent::SearchStarted(query) => vec![format!("Searching for \"{query}\"...")],
        PanelEvent::SearchResults(stations) => station_table("Results", stations),
        PanelEvent::SearchFailed(message) => vec![message.clone()],
        PanelEvent::FavoritesUpdated(stations) => station_table("Favorites", stations),
        PanelEvent::StationInfo(view) => station_info_lines(view),
        PanelEvent::SpotifyAuth(view) => vec![match view {
            SpotifyAuthView::LoggedIn { display_name } => {
                format!("Spotify: logged in as {display_name}")
            }
            SpotifyAuthView::LoggedOut => {
                "Spotify: not connected (use `spotify login`)".to_string()
            }
            SpotifyAuthView::Unavailable(message) => format!("Spotify: {message}"),
        }],
        PanelEvent::SpotifyPlaylists(grid) => playlist_lines(grid),
        PanelEvent::SpotifyTracks(view) => track_lines(view),
        PanelEvent::SpotifyNowPlaying(view) => now_playing_lines(view),
        PanelEvent::Alert(message) => vec![format!("!! {message}")],
    }
}

fn banner(text: &str, theme: Theme) -> String {
    match theme {
        Theme::Light => format!("\x1b[1;34m== {text} ==\x1b[0m"),
        Theme::Dark => format!("\x1b[1;36m== {text} ==\x1b[0m"),
    }
}

fn status_lines(view: &StatusView) -> Vec<String> {
    let mut lines = vec![format!(
        "power {}  source {}  volume {}{}",
        view.power_label,
        view.source_label,
        if view.show_volume_controls {
            view.volume_label()
        } else {
            "-".to_string()
        },
        view.mute_icon()
            .map(|icon| format!("  {icon}"))
            .unwrap_or_default(),
    )];
    if let Some(detail) = &view.source_detail {
        lines.push(format!("  {detail}"));
    } else if view.now_playing != "-" {
        lines.push(format!("  now playing: {}", view.now_playing));
    }
    if view.show_power_button {
        lines.push("  receiver is off (`power on`)".to_string());
    }
    lines
}

fn station_table(title: &str, stations: &[Station]) -> Vec<String> {
    if stations.is_empty() {
        return vec![format!("{title}: none")];
    }
    let mut lines = vec![format!("{title}:")];
    lines.extend(stations.iter().enumerate().map(|(i, station)| {
        let row = StationRow::from(station);
        format!("{:>3}. {:<40} {:<8} {}", i + 1, row.name, row.country, row.bitrate)
    }));
    lines
}

fn station_info_lines(view: &StationInfoView) -> Vec<String> {
    let mut lines = vec![format!("{} ({}, {})", view.name, view.bitrate, view.codec)];
    lines.push(format!("  country: {}  tags: {}", view.country, view.tags));
    if let Some(homepage) = &view.homepage {
        lines.push(format!("  homepage: {homepage}"));
    }
    lines.push(format!("  stream: {}", view.stream_url));
    lines.extend(view.live.lines().into_iter().map(|line| format!("  {line}")));
    lines
}

fn playlist_lines(grid: &PlaylistGridView) -> Vec<String> {
    match grid {
        PlaylistGridView::Loading => vec!["Loading playlists...".to_string()],
        PlaylistGridView::Empty => vec!["No playlists found.".to_string()],
        PlaylistGridView::Failed(message) => vec![message.clone()],
        PlaylistGridView::Playlists(cards) => {
            let mut lines = vec!["Playlists:".to_string()];
            lines.extend(
                cards
                    .iter()
                    .enumerate()
                    .map(|(i, card)| format!("{:>3}. {} ({})", i + 1, card.name, card.track_count)),
            );
            lines
        }
    }
}

fn track_lines(view: &TrackListView) -> Vec<String> {
    let mut lines = vec![format!("{} - {}", view.title, view.info)];
    match &view.body {
        TrackListBody::Loading => lines.push("  Loading tracks...".to_string()),
        TrackListBody::Empty => lines.push("  No tracks found.".to_string()),
        TrackListBody::Failed(message) => lines.push(format!("  {message}")),
        TrackListBody::Tracks(rows) => lines.extend(rows.iter().enumerate().map(|(i, row)| {
            format!("{:>3}. {} - {} {}", i + 1, row.name, row.artists, row.duration)
        })),
    }
    lines
}

fn now_playing_lines(view: &SpotifyNowPlayingView) -> Vec<String> {
    if !view.visible {
        return Vec::new();
    }
    let state = if view.playing { "\u{25B6}" } else { "\u{23F8}" };
    vec![format!("{state} {} - {}", view.track, view.artist)]
}

#[cfg(test)]
mod tests {
    use client_core::view::PlaylistCard;

    use super::*;

    fn status(power_on: bool) -> StatusView {
        StatusView {
            power_on,
            show_power_button: !power_on,
            show_volume_controls: power_on,
            power_label: if power_on { "ON" } else { "STANDBY" }.to_string(),
            source_label: "TV".to_string(),
            source_detail: None,
            muted: Some(true),
            volume: Some(40.5),
            now_playing: "-".to_string(),
            header: "TV".to_string(),
        }
    }

    #[test]
    fn status_line_includes_volume_and_mute_icon() {
        let lines = render(&PanelEvent::StatusUpdated(status(true)), Theme::Light);
        assert_eq!(lines, vec!["power ON  source TV  volume 40.5  \u{1F507}"]);
    }

    #[test]
    fn standby_hides_volume_and_offers_power() {
        let lines = render(&PanelEvent::StatusUpdated(status(false)), Theme::Dark);
        assert_eq!(lines[0], "power STANDBY  source TV  volume -  \u{1F507}");
        assert_eq!(lines[1], "  receiver is off (`power on`)");
    }

    #[test]
    fn station_tables_are_numbered_from_one() {
        let stations = vec![Station {
            name: "Jazz FM".into(),
            url: "http://jazz".into(),
            countrycode: Some("gb".into()),
            bitrate: Some(128),
            ..Station::default()
        }];
        let lines = render(&PanelEvent::FavoritesUpdated(stations), Theme::Light);
        assert_eq!(lines[0], "Favorites:");
        assert!(lines[1].starts_with("  1. Jazz FM"));
        assert!(lines[1].contains("GB \u{1F1EC}\u{1F1E7}"));
        assert!(lines[1].ends_with("128k"));

        let empty = render(&PanelEvent::SearchResults(Vec::new()), Theme::Light);
        assert_eq!(empty, vec!["Results: none"]);
    }

    #[test]
    fn theme_changes_banner_colour() {
        let light = render(&PanelEvent::HeaderChanged("Radio".into()), Theme::Light);
        let dark = render(&PanelEvent::HeaderChanged("Radio".into()), Theme::Dark);
        assert_ne!(light, dark);
        assert!(light[0].contains("== Radio =="));
    }

    #[test]
    fn playlists_and_alerts() {
        let grid = PlaylistGridView::Playlists(vec![PlaylistCard {
            name: "Morning".into(),
            image_url: None,
            track_count: "12 tracks".into(),
        }]);
        assert_eq!(
            render(&PanelEvent::SpotifyPlaylists(grid), Theme::Light),
            vec!["Playlists:", "  1. Morning (12 tracks)"]
        );
        assert_eq!(
            render(&PanelEvent::Alert("Command failed".into()), Theme::Light),
            vec!["!! Command failed"]
        );
        assert!(render(
            &PanelEvent::SpotifyNowPlaying(SpotifyNowPlayingView::hidden()),
            Theme::Light
        )
        .is_empty());
    }
}
