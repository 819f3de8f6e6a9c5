use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::player::PlayerRecord;

// Read-only access to the game server's player list.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    async fn fetch_players(
        &self,
    ) -> Result<Vec<PlayerRecord>, Box<dyn std::error::Error + Send + Sync>>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
