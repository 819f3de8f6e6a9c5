use crate::domain::{PlayerRecord, PlayerSource};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

// The clients defined here are for reqwest clients to communicate with external services.
// Thin wrapper around reqwest for the game server's player list.
#[derive(Clone)]
pub struct PlayerApiClient {
    http: Client,
    pub url: Url,
}

#[derive(Debug)]
pub enum PlayerApiError {
    Transport(reqwest::Error),
    Upstream { status: StatusCode },
    Decode(reqwest::Error),
}

impl fmt::Display for PlayerApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerApiError::Transport(err) => write!(f, "player api transport error: {err}"),
            PlayerApiError::Upstream { status } => write!(f, "player api upstream error {status}"),
            PlayerApiError::Decode(err) => write!(f, "player api response decode error: {err}"),
        }
    }
}

impl std::error::Error for PlayerApiError {}

impl PlayerApiClient {
    // The timeout covers connect, request and body read.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl PlayerSource for PlayerApiClient {
    async fn fetch_players(
        &self,
    ) -> Result<Vec<PlayerRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let res = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(PlayerApiError::Transport)?;
        let status = res.status();

        if !status.is_success() {
            return Err(Box::new(PlayerApiError::Upstream { status }));
        }

        // Decode loosely so one odd entry does not reject the whole list.
        let entries = res
            .json::<Vec<Value>>()
            .await
            .map_err(PlayerApiError::Decode)?;

        Ok(entries.into_iter().map(PlayerRecord::from_value).collect())
    }
}
