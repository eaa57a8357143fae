#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use fibtracks::config::Config;
use reqwest::Client;
use serde_json::{Value, json};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const REDIRECT_URI: &str = "http://127.0.0.1:5000/callback";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Canned responses served by the fake Spotify endpoints.
#[derive(Debug, Clone)]
pub struct Provider {
    pub token_status: StatusCode,
    pub token_body: Value,
    pub playlists_status: StatusCode,
    pub playlists_body: Value,
    pub track_count: usize,
    pub features_status: StatusCode,
    /// Report every track as danceable instead of alternating.
    pub all_danceable: bool,
}

impl Default for Provider {
    fn default() -> Self {
        Self {
            token_status: StatusCode::OK,
            token_body: json!({
                "access_token": "X",
                "refresh_token": "Y",
                "token_type": "Bearer",
                "scope": "user-library-read",
                "expires_in": 3600
            }),
            playlists_status: StatusCode::OK,
            playlists_body: json!({
                "items": [
                    { "id": "playlist-1", "name": "First" },
                    { "id": "playlist-2", "name": "Second" }
                ],
                "total": 2
            }),
            track_count: 40,
            features_status: StatusCode::OK,
            all_danceable: false,
        }
    }
}

struct Shared {
    provider: Provider,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct FakeSpotify {
    pub addr: SocketAddr,
    shared: Arc<Shared>,
}

impl FakeSpotify {
    pub async fn start(provider: Provider) -> Self {
        let shared = Arc::new(Shared {
            provider,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(Arc::clone(&shared));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, shared }
    }

    pub fn config(&self) -> Config {
        Config {
            client_id: Some(CLIENT_ID.to_string()),
            client_secret: Some(CLIENT_SECRET.to_string()),
            redirect_uri: Some(REDIRECT_URI.to_string()),
            auth_url: format!("http://{}/authorize", self.addr),
            token_url: format!("http://{}/api/token", self.addr),
            api_url: format!("http://{}/v1", self.addr),
            ..Config::default()
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.path.starts_with(prefix))
            .count()
    }
}

/// Client that ignores proxy settings from the environment so requests reach
/// the loopback fake.
pub fn http_client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

pub fn track_id(i: usize) -> String {
    format!("track{}", i)
}

/// Even tracks are danceable, odd ones are not.
pub fn danceability(i: usize) -> f64 {
    if i % 2 == 0 { 0.8 } else { 0.2 }
}

async fn handle(State(shared): State<Arc<Shared>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let path = parts.uri.path().to_string();

    shared.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        path: path.clone(),
        authorization: parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    let provider = &shared.provider;

    if path == "/api/token" {
        return (provider.token_status, Json(provider.token_body.clone())).into_response();
    }

    if path == "/v1/me/playlists" {
        return (provider.playlists_status, Json(provider.playlists_body.clone())).into_response();
    }

    if path.starts_with("/v1/playlists/") && path.ends_with("/tracks") {
        let mut items: Vec<Value> = (0..provider.track_count)
            .map(|i| json!({ "track": { "id": track_id(i), "name": format!("Song {}", i) } }))
            .collect();
        // Removed items and local files appear in real playlists
        items.push(json!({ "track": null }));
        items.push(json!({ "track": { "id": null, "name": "Local file" } }));
        return Json(json!({ "items": items, "total": items.len() })).into_response();
    }

    if let Some(id) = path.strip_prefix("/v1/audio-features/") {
        if provider.features_status != StatusCode::OK {
            return (provider.features_status, Json(json!({ "error": "nope" }))).into_response();
        }
        let i: usize = id.trim_start_matches("track").parse().unwrap_or(0);
        let (energy, tempo) = if i % 2 == 0 { (0.7, 120.0) } else { (0.3, 95.0) };
        return Json(json!({
            "id": id,
            "danceability": if provider.all_danceable { 0.8 } else { danceability(i) },
            "energy": energy,
            "tempo": tempo,
            "valence": 0.5
        }))
        .into_response();
    }

    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}
