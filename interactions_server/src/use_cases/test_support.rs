use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use ed25519_dalek::{Signer, SigningKey};
use serde_json::Value;

use crate::domain::{Clock, PlayerRecord, PlayerSource};

const TEST_KEY_SEED: [u8; 32] = [7; 32];

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid test timestamp")
}

pub(crate) fn player(value: Value) -> PlayerRecord {
    PlayerRecord::from_value(value)
}

// Player source returning canned records and counting fetches.
#[derive(Clone)]
pub(crate) struct RecordingPlayerSource {
    players: Vec<PlayerRecord>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl RecordingPlayerSource {
    pub(crate) fn new(players: Vec<PlayerRecord>) -> Self {
        Self {
            players,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl PlayerSource for RecordingPlayerSource {
    async fn fetch_players(
        &self,
    ) -> Result<Vec<PlayerRecord>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err("player api unreachable".into());
        }
        Ok(self.players.clone())
    }
}

pub(crate) fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&TEST_KEY_SEED)
}

pub(crate) fn test_public_key_hex() -> String {
    hex::encode(signing_key().verifying_key().to_bytes())
}

// Hex signature the platform would send for this timestamp and body.
pub(crate) fn sign_request(timestamp: &str, body: &[u8]) -> String {
    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(signing_key().sign(&message).to_bytes())
}
