use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    controller::MIN_SEARCH_LEN, HttpControlApi, PanelController, PanelEvent,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing_subscriber::EnvFilter;

mod config;
mod prefs;
mod render;
mod repl;

use prefs::{Prefs, Theme};
use repl::ReplCommand;

#[derive(Parser, Debug)]
#[command(about = "Control panel for a network-connected AV receiver")]
struct Cli {
    /// Backend base URL; overrides panel.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the receiver status once.
    Status,
    Power {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Select an input such as NETWORK, SPOTIFY or TV.
    Input { name: String },
    /// Set the display volume (0-98).
    Volume { display: f64 },
    Mute,
    Search { query: Vec<String> },
    Favorites,
    /// Play a stream URL on the receiver.
    Play {
        url: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Replay the last radio station.
    Resume,
    SpotifyLoginUrl,
    /// Interactive panel (the default).
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let api = HttpControlApi::with_timeout(&settings.api_url, settings.request_timeout())
        .with_context(|| format!("failed to create client for {}", settings.api_url))?;
    tracing::info!(api_url = api.base_url(), "panel starting");
    let controller = PanelController::with_options(Arc::new(api), settings.controller_options());

    let prefs_path = prefs::prefs_path()
        .map_err(|err| tracing::warn!(%err, "theme preference will not be saved"))
        .ok();
    let prefs = prefs_path.as_deref().map(prefs::load).unwrap_or_default();
    let (theme_tx, theme_rx) = watch::channel(prefs.theme);

    let printer = spawn_printer(controller.subscribe_events(), theme_rx);

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            controller.initialize().await;
            run_repl(&controller, &theme_tx, prefs_path.as_deref()).await?;
        }
        command => run_once(&controller, command).await,
    }

    controller.settle().await;
    drop(controller);
    let _ = printer.await;
    Ok(())
}

fn spawn_printer(
    mut events: broadcast::Receiver<PanelEvent>,
    theme: watch::Receiver<Theme>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    for line in render::render(&event, *theme.borrow()) {
                        println!("{line}");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "panel output fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

async fn run_once(controller: &Arc<PanelController>, command: Command) {
    match command {
        Command::Status => controller.refresh_status().await,
        Command::Power { state } => {
            match state {
                Switch::On => controller.power_on().await,
                Switch::Off => controller.power_off().await,
            };
        }
        Command::Input { name } => {
            controller.set_source(&name.to_ascii_uppercase()).await;
        }
        Command::Volume { display } => controller.slide_volume(display).await,
        Command::Mute => {
            controller.toggle_mute().await;
        }
        Command::Search { query } => search(controller, &query.join(" ")).await,
        Command::Favorites => controller.load_favorites().await,
        Command::Play { url, name } => {
            controller.play_url(&url, name.as_deref()).await;
        }
        Command::Resume => {
            controller.resume_radio().await;
        }
        Command::SpotifyLoginUrl => println!("{}", controller.spotify_login_url()),
        Command::Repl => {}
    }
}

async fn search(controller: &PanelController, query: &str) {
    if !controller.search(query).await {
        println!("Type at least {MIN_SEARCH_LEN} characters to search.");
    }
}

async fn run_repl(
    controller: &Arc<PanelController>,
    theme: &watch::Sender<Theme>,
    prefs_path: Option<&std::path::Path>,
) -> Result<()> {
    println!("Type `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match repl::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == ReplCommand::Quit {
            break;
        }
        dispatch(controller, command, theme, prefs_path).await;
    }
    Ok(())
}

async fn dispatch(
    controller: &Arc<PanelController>,
    command: ReplCommand,
    theme: &watch::Sender<Theme>,
    prefs_path: Option<&std::path::Path>,
) {
    match command {
        ReplCommand::Help => println!("{}", repl::HELP),
        ReplCommand::Quit => {}
        ReplCommand::Status => controller.refresh_status().await,
        ReplCommand::Power(true) => {
            controller.power_on().await;
        }
        ReplCommand::Power(false) => {
            controller.power_off().await;
        }
        ReplCommand::Input(name) => {
            controller.set_source(&name).await;
        }
        ReplCommand::ResumeRadio => {
            controller.resume_radio().await;
        }
        ReplCommand::Mute => {
            controller.toggle_mute().await;
        }
        ReplCommand::Volume(display) => controller.slide_volume(display).await,
        ReplCommand::VolumeStep(delta) => {
            controller.change_volume(delta).await;
        }
        ReplCommand::Search(query) => search(controller, &query).await,
        ReplCommand::Sort(key) => controller.sort_results(key).await,
        ReplCommand::PlayResult(index) => {
            controller.play_result(index).await;
        }
        ReplCommand::ResultInfo(index) => {
            controller.result_info(index).await;
        }
        ReplCommand::SaveResult(index) => {
            controller.favorite_result(index).await;
        }
        ReplCommand::Favorites => controller.load_favorites().await,
        ReplCommand::PlayFavorite(index) => {
            controller.play_favorite(index).await;
        }
        ReplCommand::FavoriteInfo(index) => {
            controller.favorite_info(index).await;
        }
        ReplCommand::DeleteFavorite(index) => {
            controller.delete_favorite_at(index).await;
        }
        ReplCommand::NextFavorite => {
            if !controller.play_next_favorite().await {
                println!("Nothing from favorites is playing.");
            }
        }
        ReplCommand::PrevFavorite => {
            if !controller.play_prev_favorite().await {
                println!("Nothing from favorites is playing.");
            }
        }
        ReplCommand::PlayUrl { url, name } => {
            controller.play_url(&url, name.as_deref()).await;
        }
        ReplCommand::SpotifyStatus => {
            controller.check_spotify_auth().await;
        }
        ReplCommand::SpotifyLogin => {
            println!(
                "Open {} in a browser, then run `spotify status`.",
                controller.spotify_login_url()
            );
        }
        ReplCommand::SpotifyLogout => {
            controller.logout_spotify().await;
        }
        ReplCommand::SpotifyPlaylists => controller.load_spotify_playlists().await,
        ReplCommand::OpenPlaylist(index) => {
            controller.open_playlist(index).await;
        }
        ReplCommand::PlayOpenPlaylist => {
            controller.play_open_playlist().await;
        }
        ReplCommand::PlayTrack(index) => {
            controller.play_track(index).await;
        }
        ReplCommand::SpotifyControl(action) => {
            controller.spotify_control(action).await;
        }
        ReplCommand::ToggleTheme => {
            let next = theme.borrow().toggled();
            theme.send_replace(next);
            println!("Theme: {}", next.as_str());
            if let Some(path) = prefs_path {
                if let Err(err) = prefs::save(path, &Prefs { theme: next }) {
                    tracing::warn!(%err, "failed to save theme preference");
                }
            }
        }
    }
}
