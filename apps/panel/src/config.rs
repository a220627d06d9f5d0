use std::{fs, path::Path, time::Duration};

use client_core::ControllerOptions;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "panel.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub log_filter: String,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub volume_debounce_ms: u64,
    /// Display volume applied after power-on; `None` disables it.
    pub power_on_volume: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:5000".into(),
            log_filter: "info".into(),
            request_timeout_secs: 10,
            poll_interval_secs: 5,
            volume_debounce_ms: 300,
            power_on_volume: Some(25.0),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            volume_debounce: Duration::from_millis(self.volume_debounce_ms),
            spotify_poll_interval: Duration::from_secs(self.poll_interval_secs),
            power_on_volume: self.power_on_volume,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    log_filter: Option<String>,
    request_timeout_secs: Option<u64>,
    poll_interval_secs: Option<u64>,
    volume_debounce_ms: Option<u64>,
    power_on_volume: Option<f64>,
    /// `false` turns the power-on volume off.
    set_volume_on_power: Option<bool>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(err) => tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("PANEL_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(parsed) = env("APP__REQUEST_TIMEOUT_SECS").and_then(|v| positive(&v)) {
        settings.request_timeout_secs = parsed;
    }
    if let Some(parsed) = env("APP__POLL_INTERVAL_SECS").and_then(|v| positive(&v)) {
        settings.poll_interval_secs = parsed;
    }
    if let Some(v) = env("APP__VOLUME_DEBOUNCE_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.volume_debounce_ms = parsed;
        }
    }

    settings
}

// Zero would mean an instant timeout or a busy poll loop.
fn positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|v| *v > 0)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs.filter(|v| *v > 0) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.poll_interval_secs.filter(|v| *v > 0) {
        settings.poll_interval_secs = v;
    }
    if let Some(v) = file_cfg.volume_debounce_ms {
        settings.volume_debounce_ms = v;
    }
    if let Some(v) = file_cfg.power_on_volume {
        settings.power_on_volume = Some(v);
    }
    if file_cfg.set_volume_on_power == Some(false) {
        settings.power_on_volume = None;
    }
}
