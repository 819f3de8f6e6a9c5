use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde_json::{Map, Value};

// Label used when none of the configured name fields carry a value.
pub const UNKNOWN_PLAYER_NAME: &str = "Unknown";

const LAST_LOGIN_FIELD: &str = "last_login";

// Zero dates the game API writes for accounts that never logged in.
const NEVER_LOGGED_IN: [&str; 2] = ["0000-00-00 00:00:00", "0000-00-00"];

const LAST_LOGIN_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// One entry of the player list. The schema differs between game API
// versions, so fields are looked up by name when read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRecord {
    fields: Map<String, Value>,
}

// Parsed state of a record's `last_login` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastLogin {
    Never,
    At(DateTime<Utc>),
    Unparsable(String),
}

impl PlayerRecord {
    // Non-object entries carry no usable fields and fall out of every filter.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    // First non-empty value among `name_fields`, in order.
    pub fn display_name(&self, name_fields: &[String]) -> String {
        name_fields
            .iter()
            .find_map(|field| match self.fields.get(field) {
                Some(Value::String(name)) if !name.trim().is_empty() => Some(name.clone()),
                Some(Value::Number(number)) => Some(number.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string())
    }

    // Raw `last_login` text as sent by the game API.
    pub fn last_login_raw(&self) -> Option<&str> {
        self.fields.get(LAST_LOGIN_FIELD).and_then(Value::as_str)
    }

    pub fn last_login(&self) -> LastLogin {
        match self.last_login_raw() {
            Some(raw) => parse_last_login(raw),
            None => LastLogin::Never,
        }
    }

    // True when the player logged in no longer than `window` before `now`.
    pub fn active_within(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        match self.last_login() {
            LastLogin::At(at) => now.signed_duration_since(at) <= window,
            LastLogin::Never | LastLogin::Unparsable(_) => false,
        }
    }
}

// Game API timestamps carry no zone and are UTC.
pub fn parse_last_login(raw: &str) -> LastLogin {
    let raw = raw.trim();
    if raw.is_empty() || NEVER_LOGGED_IN.contains(&raw) {
        return LastLogin::Never;
    }

    for format in LAST_LOGIN_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return LastLogin::At(naive.and_utc());
        }
    }

    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => LastLogin::At(at.with_timezone(&Utc)),
        Err(_) => LastLogin::Unparsable(raw.to_string()),
    }
}
