use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;

use crate::domain::{Clock, MessageReply, Pager, PlayerRecord, PlayerSource, StatusCommand};

pub const FETCH_FAILED_MESSAGE: &str = "❌ Unable to fetch player data.";

// Thresholds and record layout for the status commands.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSettings {
    pub online_threshold: TimeDelta,
    pub recent_threshold: TimeDelta,
    pub recent_page_size: usize,
    // Deployments without the `recent` command treat it as unknown.
    pub recent_enabled: bool,
    // Ordered fallbacks for the player name field.
    pub name_fields: Vec<String>,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            online_threshold: TimeDelta::minutes(2),
            recent_threshold: TimeDelta::days(7),
            recent_page_size: 10,
            recent_enabled: true,
            name_fields: vec!["username".to_string(), "nickname".to_string()],
        }
    }
}

// Runs one status command against the player source.
#[derive(Clone)]
pub struct PlayerStatusUseCase {
    pub clock: Arc<dyn Clock>,
    pub players: Arc<dyn PlayerSource>,
    pub settings: Arc<StatusSettings>,
}

impl PlayerStatusUseCase {
    // A failed fetch still yields a reply; the platform must not see an error.
    pub async fn execute(&self, command: StatusCommand) -> MessageReply {
        let players = match self.players.fetch_players().await {
            Ok(players) => players,
            Err(error) => {
                tracing::warn!(%error, command = command.as_str(), "failed to fetch player data");
                return MessageReply::text(FETCH_FAILED_MESSAGE);
            }
        };
        tracing::debug!(count = players.len(), "player data fetched");

        let now = self.clock.now();
        match command {
            StatusCommand::Online => online_reply(&players, now, &self.settings),
            StatusCommand::Recent => recent_reply(&players, now, &self.settings),
        }
    }
}

// Names of players seen within the online threshold, in source order.
pub fn online_players(
    players: &[PlayerRecord],
    now: DateTime<Utc>,
    settings: &StatusSettings,
) -> Vec<String> {
    players
        .iter()
        .filter(|player| player.active_within(now, settings.online_threshold))
        .map(|player| player.display_name(&settings.name_fields))
        .collect()
}

// `name (last_login)` lines for players seen within the recent threshold.
pub fn recent_players(
    players: &[PlayerRecord],
    now: DateTime<Utc>,
    settings: &StatusSettings,
) -> Vec<String> {
    players
        .iter()
        .filter(|player| player.active_within(now, settings.recent_threshold))
        .map(|player| {
            format!(
                "{} ({})",
                player.display_name(&settings.name_fields),
                player.last_login_raw().unwrap_or_default()
            )
        })
        .collect()
}

// Split into pages of at most `page_size` entries.
pub fn paginate<T: Clone>(items: &[T], page_size: usize) -> Vec<Vec<T>> {
    items
        .chunks(page_size.max(1))
        .map(|page| page.to_vec())
        .collect()
}

fn online_reply(
    players: &[PlayerRecord],
    now: DateTime<Utc>,
    settings: &StatusSettings,
) -> MessageReply {
    let window = describe_window(settings.online_threshold);
    let online = online_players(players, now, settings);

    if online.is_empty() {
        return MessageReply::text(format!("😴 No players online in the last {window}."));
    }

    MessageReply::text(format!(
        "🎮 Players online (last {window}): **{}**\n{}",
        online.len(),
        online.join("\n")
    ))
}

fn recent_reply(
    players: &[PlayerRecord],
    now: DateTime<Utc>,
    settings: &StatusSettings,
) -> MessageReply {
    let recent = recent_players(players, now, settings);

    if recent.is_empty() {
        let window = describe_window(settings.recent_threshold);
        return MessageReply::text(format!("😴 No players played in the last {window}."));
    }

    // Only the first page is rendered; the page buttons are not wired yet.
    let pages = paginate(&recent, settings.recent_page_size);
    let page = 0;
    MessageReply {
        content: format!(
            "Recent Players (Page {}/{}):\n{}",
            page + 1,
            pages.len(),
            pages[page].join("\n")
        ),
        pager: Some(Pager { page }),
    }
}

// Human wording for a threshold, e.g. "2 minutes" or "7 days".
fn describe_window(window: TimeDelta) -> String {
    let seconds = window.num_seconds();
    let (amount, unit) = if seconds > 0 && seconds % 86_400 == 0 {
        (seconds / 86_400, "day")
    } else if seconds % 60 == 0 {
        (seconds / 60, "minute")
    } else {
        (seconds, "second")
    };

    if amount == 1 {
        format!("1 {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}
