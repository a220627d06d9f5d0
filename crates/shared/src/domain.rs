use serde::{Deserialize, Serialize};

pub const POWER_ON: &str = "ON";

pub const NETWORK_INPUT: &str = "NETWORK";
pub const SPOTIFY_INPUT: &str = "SPOTIFY";

/// Source names the receiver reports while playing network radio.
pub const RADIO_SOURCES: [&str; 2] = ["NET", "IRADIO"];

pub fn is_radio_source(source: &str) -> bool {
    RADIO_SOURCES.contains(&source)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSection {
    Radio,
    Spotify,
    #[default]
    None,
}

impl InputSection {
    pub fn for_input(input: &str) -> Self {
        match input {
            NETWORK_INPUT | "resumeRadio" => Self::Radio,
            SPOTIFY_INPUT => Self::Spotify,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotifyAction {
    Play,
    Pause,
    Next,
    Previous,
}

impl SpotifyAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "play" => Some(Self::Play),
            "pause" => Some(Self::Pause),
            "next" => Some(Self::Next),
            "previous" | "prev" => Some(Self::Previous),
            _ => None,
        }
    }
}
