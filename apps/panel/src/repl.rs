//! Line parser for the interactive panel. Indexes are typed 1-based and
//! stored 0-based.

use anyhow::{anyhow, bail, Result};
use client_core::favorites::SortKey;
use shared::domain::SpotifyAction;

/// Volume change applied by `vol up` / `vol down`.
pub const VOLUME_STEP: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Help,
    Quit,
    Status,
    Power(bool),
    Input(String),
    ResumeRadio,
    Mute,
    /// Slider movement, debounced.
    Volume(f64),
    VolumeStep(f64),
    Search(String),
    Sort(SortKey),
    PlayResult(usize),
    ResultInfo(usize),
    SaveResult(usize),
    Favorites,
    PlayFavorite(usize),
    FavoriteInfo(usize),
    DeleteFavorite(usize),
    NextFavorite,
    PrevFavorite,
    PlayUrl { url: String, name: Option<String> },
    SpotifyStatus,
    SpotifyLogin,
    SpotifyLogout,
    SpotifyPlaylists,
    OpenPlaylist(usize),
    PlayOpenPlaylist,
    PlayTrack(usize),
    SpotifyControl(SpotifyAction),
    ToggleTheme,
}

pub const HELP: &str = "\
status                      refresh receiver status
power on|off                switch the receiver
input <NAME>                select an input (NETWORK, SPOTIFY, TV, ...)
radio                       resume the last radio station
mute                        toggle mute
vol <0-98> | vol up|down    set or step the volume
search <query>              search stations (3+ characters)
sort name|country|bitrate   reorder search results
play <n> | info <n> | save <n>   act on search result n
favs                        list favorites
fav play|info|del <n>       act on favorite n
next | prev                 step through favorites
url <stream-url> [name]     play an arbitrary stream
spotify status|login|logout|playlists
playlist <n> | playlist play   open or play a playlist
track <n>                   play a track of the open playlist
sp play|pause|next|prev     Spotify playback control
theme                       toggle light/dark theme
quit";

pub fn parse(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "" => bail!("empty command"),
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        "status" => ReplCommand::Status,
        "power" => match rest.to_ascii_lowercase().as_str() {
            "on" => ReplCommand::Power(true),
            "off" => ReplCommand::Power(false),
            _ => bail!("usage: power on|off"),
        },
        "input" => {
            if rest.is_empty() {
                bail!("usage: input <NAME>");
            }
            ReplCommand::Input(rest.to_ascii_uppercase())
        }
        "radio" => ReplCommand::ResumeRadio,
        "mute" => ReplCommand::Mute,
        "vol" | "volume" => match rest {
            "up" | "+" => ReplCommand::VolumeStep(VOLUME_STEP),
            "down" | "-" => ReplCommand::VolumeStep(-VOLUME_STEP),
            value => {
                let display: f64 = value
                    .parse()
                    .map_err(|_| anyhow!("usage: vol <0-98> | vol up|down"))?;
                if !display.is_finite() {
                    bail!("volume must be a number");
                }
                ReplCommand::Volume(display)
            }
        },
        "search" => ReplCommand::Search(rest.to_string()),
        "sort" => ReplCommand::Sort(
            SortKey::parse(rest).ok_or_else(|| anyhow!("usage: sort name|country|bitrate"))?,
        ),
        "play" => ReplCommand::PlayResult(index(rest)?),
        "info" => ReplCommand::ResultInfo(index(rest)?),
        "save" => ReplCommand::SaveResult(index(rest)?),
        "favs" | "favorites" => ReplCommand::Favorites,
        "fav" => {
            let (action, n) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: fav play|info|del <n>"))?;
            let n = index(n.trim())?;
            match action {
                "play" => ReplCommand::PlayFavorite(n),
                "info" => ReplCommand::FavoriteInfo(n),
                "del" | "delete" | "rm" => ReplCommand::DeleteFavorite(n),
                _ => bail!("usage: fav play|info|del <n>"),
            }
        }
        "next" => ReplCommand::NextFavorite,
        "prev" | "previous" => ReplCommand::PrevFavorite,
        "url" => {
            let (url, name) = match rest.split_once(char::is_whitespace) {
                Some((url, name)) => (url, Some(name.trim().to_string())),
                None => (rest, None),
            };
            if url.is_empty() {
                bail!("usage: url <stream-url> [name]");
            }
            ReplCommand::PlayUrl {
                url: url.to_string(),
                name: name.filter(|name| !name.is_empty()),
            }
        }
        "spotify" => match rest.to_ascii_lowercase().as_str() {
            "" | "status" => ReplCommand::SpotifyStatus,
            "login" => ReplCommand::SpotifyLogin,
            "logout" => ReplCommand::SpotifyLogout,
            "playlists" => ReplCommand::SpotifyPlaylists,
            _ => bail!("usage: spotify status|login|logout|playlists"),
        },
        "playlist" => match rest {
            "play" => ReplCommand::PlayOpenPlaylist,
            n => ReplCommand::OpenPlaylist(index(n)?),
        },
        "track" => ReplCommand::PlayTrack(index(rest)?),
        "sp" => ReplCommand::SpotifyControl(
            SpotifyAction::parse(rest).ok_or_else(|| anyhow!("usage: sp play|pause|next|prev"))?,
        ),
        "theme" => ReplCommand::ToggleTheme,
        other => bail!("unknown command `{other}`; type `help`"),
    };
    Ok(command)
}

fn index(raw: &str) -> Result<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => bail!("expected a list number starting at 1, got `{raw}`"),
    }
}
