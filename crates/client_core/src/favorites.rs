use std::cmp::Ordering;

use shared::protocol::Station;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    CountryCode,
    Bitrate,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "country" | "countrycode" => Some(Self::CountryCode),
            "bitrate" => Some(Self::Bitrate),
            _ => None,
        }
    }
}

pub fn playing_index(favorites: &[Station], playing_url: Option<&str>) -> Option<usize> {
    let playing_url = playing_url?;
    favorites
        .iter()
        .position(|station| station.matches_url(playing_url))
}

/// Favorite one step away from the playing one, wrapping at both ends.
/// Returns `None` when nothing is playing or the playing stream is not a favorite.
pub fn step_from<'a>(
    favorites: &'a [Station],
    playing_url: Option<&str>,
    step: Step,
) -> Option<&'a Station> {
    let len = favorites.len();
    let current = playing_index(favorites, playing_url)?;
    let target = match step {
        Step::Next => (current + 1) % len,
        Step::Previous => (current + len - 1) % len,
    };
    favorites.get(target)
}

pub fn sort_stations(stations: &mut [Station], key: SortKey) {
    match key {
        SortKey::Name => stations.sort_by(|a, b| compare_text(Some(&a.name), Some(&b.name))),
        SortKey::CountryCode => stations.sort_by(|a, b| {
            compare_text(a.countrycode.as_deref(), b.countrycode.as_deref())
        }),
        SortKey::Bitrate => stations.sort_by(|a, b| {
            b.bitrate.unwrap_or_default().cmp(&a.bitrate.unwrap_or_default())
        }),
    }
}

fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.unwrap_or_default().to_lowercase();
    let b = b.unwrap_or_default().to_lowercase();
    a.cmp(&b)
}

pub fn country_flag(countrycode: &str) -> Option<String> {
    let code = countrycode.trim().to_ascii_uppercase();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    code.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}
