use std::{collections::HashMap, sync::Arc};

use super::*;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
    queries: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

impl ServerState {
    async fn record_body(&self, route: &str, body: Value) {
        self.bodies.lock().await.push((route.to_string(), body));
    }

    async fn record_query(&self, route: &str, query: HashMap<String, String>) {
        self.queries.lock().await.push((route.to_string(), query));
    }
}

async fn handle_status() -> Json<Value> {
    Json(json!({
        "power": "ON",
        "source": "NET",
        "volume": "-40.5",
        "muted": false,
        "name": "Living Room"
    }))
}

async fn handle_volume(State(state): State<ServerState>, Json(body): Json<Value>) -> Json<Value> {
    state.record_body("volume", body).await;
    Json(json!({ "status": "success" }))
}

async fn handle_input(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record_body("input", body).await;
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Invalid input" })),
    )
}

async fn handle_power_on() -> Json<Value> {
    Json(json!({ "status": "success" }))
}

async fn handle_search(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record_query("search", query).await;
    Json(json!([
        {
            "name": "Jazz FM",
            "url": "http://jazz.example/listen.pls",
            "url_resolved": "http://jazz.example/stream",
            "bitrate": 128,
            "countrycode": "GB"
        }
    ]))
}

async fn handle_favorites() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "favorites file unreadable" })),
    )
}

async fn handle_add_favorite(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.record_body("add_favorite", body).await;
    Json(json!({ "status": "success", "favorites": [] }))
}

async fn handle_play_url(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let played = query.get("url").cloned().unwrap_or_default();
    state.record_query("play_url", query).await;
    Json(json!({ "status": "success", "played": played }))
}

async fn handle_last_played() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn handle_playlist_tracks(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Json<Value> {
    let mut query = HashMap::new();
    query.insert("id".to_string(), id);
    state.record_query("playlist_tracks", query).await;
    Json(json!([
        { "uri": "spotify:track:1", "name": "Intro", "artists": "Band", "duration_ms": 61000 }
    ]))
}

async fn handle_spotify_control(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let action = body["action"].as_str().unwrap_or_default().to_string();
    state.record_body("spotify_control", body).await;
    if action == "next" {
        (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Premium required" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "ok": true })))
    }
}

async fn handle_spotify_play(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.record_body("spotify_play", body).await;
    Json(json!({ "status": "success" }))
}

async fn spawn_backend() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/status", get(handle_status))
        .route("/api/volume", post(handle_volume))
        .route("/api/input", post(handle_input))
        .route("/api/power/on", post(handle_power_on))
        .route("/api/search", get(handle_search))
        .route("/api/favorites", get(handle_favorites).post(handle_add_favorite))
        .route("/api/play_url", get(handle_play_url))
        .route("/api/last_played", get(handle_last_played))
        .route(
            "/api/spotify/playlist/:id/tracks",
            get(handle_playlist_tracks),
        )
        .route("/api/spotify/control", post(handle_spotify_control))
        .route("/api/spotify/play", post(handle_spotify_play))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

#[test]
fn rejects_unusable_base_urls() {
    assert!(matches!(
        HttpControlApi::new("not a url"),
        Err(ControlError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        HttpControlApi::new("mailto:someone@example.com"),
        Err(ControlError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn login_url_is_built_from_base() {
    let api = HttpControlApi::new("http://192.168.1.20:5000/").expect("api");
    assert_eq!(api.base_url(), "http://192.168.1.20:5000");
    assert_eq!(
        api.spotify_login_url(),
        "http://192.168.1.20:5000/spotify/login"
    );
}

#[tokio::test]
async fn status_accepts_string_volume() {
    let (base, _state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    let snapshot = api.status().await.expect("status");
    assert!(snapshot.is_powered_on());
    assert_eq!(snapshot.volume, Some(-40.5));
    assert_eq!(snapshot.name.as_deref(), Some("Living Room"));
}

#[tokio::test]
async fn volume_is_sent_in_decibels() {
    let (base, state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    let ack = api.set_volume(-55.0).await.expect("volume");
    assert!(ack.is_success());
    let bodies = state.bodies.lock().await;
    assert_eq!(bodies[0], ("volume".to_string(), json!({ "volume": -55.0 })));
}

#[tokio::test]
async fn error_body_on_failing_status_becomes_failed_ack() {
    let (base, state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    let ack = api.set_input("BOGUS").await.expect("ack");
    assert!(!ack.is_success());
    assert_eq!(ack.error.as_deref(), Some("Invalid input"));
    assert_eq!(
        state.bodies.lock().await[0].1,
        json!({ "input": "BOGUS" })
    );
}

#[tokio::test]
async fn power_on_acknowledges() {
    let (base, _state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");
    assert!(api.set_power(true).await.expect("power").is_success());
}

#[tokio::test]
async fn search_passes_name_query() {
    let (base, state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    let stations = api.search("jazz & blues").await.expect("search");
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].stream_url(), "http://jazz.example/stream");

    let queries = state.queries.lock().await;
    assert_eq!(queries[0].1.get("name").map(String::as_str), Some("jazz & blues"));
}

#[tokio::test]
async fn list_error_body_is_rejection() {
    let (base, _state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    let err = api.favorites().await.expect_err("favorites should fail");
    assert_eq!(err.backend_message(), Some("favorites file unreadable"));
}

#[tokio::test]
async fn add_favorite_posts_resolved_url() {
    let (base, state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");
    let station = Station {
        name: "Jazz FM".into(),
        url: "http://jazz.example/listen.pls".into(),
        url_resolved: Some("http://jazz.example/stream".into()),
        bitrate: Some(128),
        ..Station::default()
    };

    let ack = api
        .add_favorite(&FavoriteRequest::from(&station))
        .await
        .expect("add");
    assert!(ack.ack.is_success());
    assert_eq!(ack.favorites, Some(Vec::new()));

    let body = &state.bodies.lock().await[0].1;
    assert_eq!(body["url"], "http://jazz.example/stream");
    assert_eq!(body["name"], "Jazz FM");
    assert_eq!(body["bitrate"], 128);
}

#[tokio::test]
async fn play_url_omits_empty_name() {
    let (base, state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    let ack = api
        .play_url("http://jazz.example/stream?a=1&b=2", Some(""))
        .await
        .expect("play");
    assert!(ack.ack.is_success());
    assert_eq!(
        ack.played.as_deref(),
        Some("http://jazz.example/stream?a=1&b=2")
    );

    api.play_url("http://other.example", Some("Other"))
        .await
        .expect("play");

    let queries = state.queries.lock().await;
    assert!(!queries[0].1.contains_key("name"));
    assert_eq!(queries[1].1.get("name").map(String::as_str), Some("Other"));
}

#[tokio::test]
async fn last_played_failure_is_transport_error() {
    let (base, _state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    let err = api.last_played().await.expect_err("last played should fail");
    assert!(matches!(err, ControlError::Transport(_)));
}

#[tokio::test]
async fn playlist_id_is_path_encoded() {
    let (base, state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    let tracks = api
        .spotify_playlist_tracks("37i9dQ/ZF1")
        .await
        .expect("tracks");
    assert_eq!(tracks[0].name, "Intro");
    assert_eq!(tracks[0].duration_ms, Some(61_000));

    let queries = state.queries.lock().await;
    assert_eq!(queries[0].1.get("id").map(String::as_str), Some("37i9dQ/ZF1"));
}

#[tokio::test]
async fn spotify_control_judges_http_status() {
    let (base, state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    let ack = api.spotify_control(SpotifyAction::Pause).await.expect("pause");
    assert!(ack.is_success());

    let ack = api.spotify_control(SpotifyAction::Next).await.expect("next");
    assert!(!ack.is_success());
    assert_eq!(ack.error.as_deref(), Some("Premium required"));

    let bodies = state.bodies.lock().await;
    assert_eq!(bodies[0].1, json!({ "action": "pause" }));
    assert_eq!(bodies[1].1, json!({ "action": "next" }));
}

#[tokio::test]
async fn spotify_play_sends_context_or_tracks() {
    let (base, state) = spawn_backend().await;
    let api = HttpControlApi::new(&base).expect("api");

    api.spotify_play(&SpotifyPlayRequest::Context {
        context_uri: "spotify:playlist:1".into(),
    })
    .await
    .expect("context");
    api.spotify_play(&SpotifyPlayRequest::Tracks {
        track_uris: vec!["spotify:track:1".into()],
    })
    .await
    .expect("tracks");

    let bodies = state.bodies.lock().await;
    assert_eq!(bodies[0].1, json!({ "context_uri": "spotify:playlist:1" }));
    assert_eq!(bodies[1].1, json!({ "track_uris": ["spotify:track:1"] }));
}
