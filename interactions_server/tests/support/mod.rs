// Shared bootstrapping for integration tests: a fake game player API that
// lives for the whole test binary, plus per-test interaction servers.
#![allow(dead_code)]

use axum::{Json, Router, http::StatusCode, routing::get};
use chrono::{TimeDelta, Utc};
use ed25519_dalek::{Signer, SigningKey};
use interactions_server::Settings;
use interactions_server::frameworks::config::FileConfig;
use serde_json::{Value, json};
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

// Base URL of the fake player API once it is bound.
static PLAYER_API_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the fake API bootstrap runs only once.
static PLAYER_API_READY: OnceLock<()> = OnceLock::new();

pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";
pub const TIMESTAMP: &str = "1714564800";

const PLATFORM_KEY_SEED: [u8; 32] = [7; 32];
const FORGED_KEY_SEED: [u8; 32] = [9; 32];

fn api_time(ago: TimeDelta) -> String {
    (Utc::now() - ago).format("%Y-%m-%d %H:%M:%S").to_string()
}

// Player list relative to the current time so the real clock can be used.
async fn players() -> Json<Value> {
    Json(json!([
        {"username": "Ace", "last_login": api_time(TimeDelta::minutes(1))},
        {"username": "Stale", "last_login": api_time(TimeDelta::minutes(3))},
        {"nickname": "Nick", "last_login": api_time(TimeDelta::days(2))},
        {"username": "Ghost", "last_login": "0000-00-00 00:00:00"},
        "not-a-player"
    ]))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database offline")
}

async fn garbage() -> &'static str {
    "<html>maintenance</html>"
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!([]))
}

fn player_api() -> Router {
    Router::new()
        .route("/players", get(players))
        .route("/broken", get(broken))
        .route("/garbage", get(garbage))
        .route("/slow", get(slow))
}

// Ensure the fake player API is running and return its base URL.
pub fn ensure_player_api() -> &'static str {
    PLAYER_API_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Own OS thread and runtime so the API outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                axum::serve(listener, player_api())
                    .await
                    .expect("player api failed");
            });
        });

        let base_url = loop {
            if let Some(url) = published_url.get() {
                break url.clone();
            }
            std::thread::sleep(Duration::from_millis(10));
        };
        let _ = PLAYER_API_URL.set(base_url);
    });

    PLAYER_API_URL
        .get()
        .expect("player api url should be initialized")
        .as_str()
}

pub fn platform_public_key_hex() -> String {
    hex::encode(SigningKey::from_bytes(&PLATFORM_KEY_SEED).verifying_key().to_bytes())
}

fn sign_with(seed: &[u8; 32], timestamp: &str, body: &str) -> String {
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body.as_bytes());
    hex::encode(SigningKey::from_bytes(seed).sign(&message).to_bytes())
}

pub fn sign(timestamp: &str, body: &str) -> String {
    sign_with(&PLATFORM_KEY_SEED, timestamp, body)
}

pub fn forge(timestamp: &str, body: &str) -> String {
    sign_with(&FORGED_KEY_SEED, timestamp, body)
}

// Start an interactions server backed by `player_path` on the fake API.
// The server task lives on the calling test's runtime.
pub async fn spawn_interactions_server(player_path: &str, timeout: Duration) -> String {
    let api = ensure_player_api();
    let public_key = platform_public_key_hex();
    let settings = Settings::resolve(FileConfig::default(), |key| match key {
        "INTERACTIONS_PUBLIC_KEY" => Some(public_key.clone()),
        "PLAYER_API_URL" => Some(format!("{api}{player_path}")),
        "PLAYER_API_TIMEOUT_MS" => Some(timeout.as_millis().to_string()),
        _ => None,
    })
    .expect("test settings should resolve");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        interactions_server::run(listener, settings)
            .await
            .expect("interactions server failed");
    });

    format!("http://{addr}")
}

pub async fn post_signed(base_url: &str, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base_url}/interactions"))
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, sign(TIMESTAMP, body))
        .header(TIMESTAMP_HEADER, TIMESTAMP)
        .body(body.to_string())
        .send()
        .await
        .expect("request should succeed")
}
