use chrono::TimeDelta;
use serde::Deserialize;
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use url::Url;

use crate::use_cases::{SignatureVerifier, StatusSettings};

// Runtime configuration, read once at startup.

pub const CONFIG_PATH_VAR: &str = "INTERACTIONS_CONFIG";

pub const DEFAULT_PORT: u16 = 3004;
pub const DEFAULT_PLAYER_API_URL: &str = "https://mainserver.serv00.net/API/players.php";
pub const DEFAULT_PLAYER_API_TIMEOUT_MS: u64 = 3000;

const PORT_VAR: &str = "INTERACTIONS_PORT";
const PUBLIC_KEY_VAR: &str = "INTERACTIONS_PUBLIC_KEY";
const PLAYER_API_URL_VAR: &str = "PLAYER_API_URL";
const PLAYER_API_TIMEOUT_VAR: &str = "PLAYER_API_TIMEOUT_MS";
const ONLINE_THRESHOLD_VAR: &str = "ONLINE_THRESHOLD_MINUTES";
const RECENT_THRESHOLD_VAR: &str = "RECENT_THRESHOLD_DAYS";
const RECENT_PAGE_SIZE_VAR: &str = "RECENT_PAGE_SIZE";
const RECENT_ENABLED_VAR: &str = "RECENT_COMMAND_ENABLED";
const NAME_FIELDS_VAR: &str = "PLAYER_NAME_FIELDS";

// Optional TOML file; every key may also come from the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub public_key: Option<String>,
    pub player_api_url: Option<String>,
    pub player_api_timeout_ms: Option<u64>,
    pub online_threshold_minutes: Option<u32>,
    pub recent_threshold_days: Option<u32>,
    pub recent_page_size: Option<usize>,
    pub recent_command_enabled: Option<bool>,
    pub player_name_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub verifier: SignatureVerifier,
    pub player_api_url: Url,
    pub player_api_timeout: Duration,
    pub status: StatusSettings,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, value, reason } => {
                write!(f, "invalid {key} value {value:?}: {reason}")
            }
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config file {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// Load settings from the optional config file, then the environment.
pub fn load() -> Result<Settings, ConfigError> {
    let file = match env::var(CONFIG_PATH_VAR) {
        Ok(path) if !path.trim().is_empty() => read_file(Path::new(path.trim()))?,
        _ => FileConfig::default(),
    };

    Settings::resolve(file, |key| env::var(key).ok())
}

pub fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    // Environment values override file values, which override defaults.
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let port = parsed(&lookup, PORT_VAR, file.port)?.unwrap_or(DEFAULT_PORT);

        let public_key = lookup(PUBLIC_KEY_VAR)
            .or(file.public_key)
            .ok_or(ConfigError::Missing(PUBLIC_KEY_VAR))?;
        let verifier =
            SignatureVerifier::from_hex(&public_key).map_err(|err| ConfigError::Invalid {
                key: PUBLIC_KEY_VAR,
                value: public_key.clone(),
                reason: err.to_string(),
            })?;

        let raw_url = lookup(PLAYER_API_URL_VAR)
            .or(file.player_api_url)
            .unwrap_or_else(|| DEFAULT_PLAYER_API_URL.to_string());
        let player_api_url = parse_http_url(&raw_url)?;

        let timeout_ms = parsed(&lookup, PLAYER_API_TIMEOUT_VAR, file.player_api_timeout_ms)?
            .unwrap_or(DEFAULT_PLAYER_API_TIMEOUT_MS);

        let defaults = StatusSettings::default();

        let online_threshold =
            match parsed::<u32>(&lookup, ONLINE_THRESHOLD_VAR, file.online_threshold_minutes)? {
                Some(minutes) => TimeDelta::minutes(i64::from(minutes)),
                None => defaults.online_threshold,
            };
        let recent_threshold =
            match parsed::<u32>(&lookup, RECENT_THRESHOLD_VAR, file.recent_threshold_days)? {
                Some(days) => TimeDelta::days(i64::from(days)),
                None => defaults.recent_threshold,
            };

        let recent_page_size = parsed(&lookup, RECENT_PAGE_SIZE_VAR, file.recent_page_size)?
            .unwrap_or(defaults.recent_page_size);
        if recent_page_size == 0 {
            return Err(ConfigError::Invalid {
                key: RECENT_PAGE_SIZE_VAR,
                value: "0".to_string(),
                reason: "page size must be at least 1".to_string(),
            });
        }

        let recent_enabled = match lookup(RECENT_ENABLED_VAR) {
            Some(raw) => parse_flag(RECENT_ENABLED_VAR, &raw)?,
            None => file
                .recent_command_enabled
                .unwrap_or(defaults.recent_enabled),
        };

        let name_fields = match lookup(NAME_FIELDS_VAR) {
            Some(raw) => raw.split(',').map(str::to_string).collect(),
            None => file.player_name_fields.unwrap_or(defaults.name_fields),
        };
        let name_fields: Vec<String> = name_fields
            .into_iter()
            .map(|field| field.trim().to_string())
            .filter(|field| !field.is_empty())
            .collect();
        if name_fields.is_empty() {
            return Err(ConfigError::Invalid {
                key: NAME_FIELDS_VAR,
                value: String::new(),
                reason: "at least one name field is required".to_string(),
            });
        }

        Ok(Settings {
            port,
            verifier,
            player_api_url,
            player_api_timeout: Duration::from_millis(timeout_ms),
            status: StatusSettings {
                online_threshold,
                recent_threshold,
                recent_page_size,
                recent_enabled,
                name_fields,
            },
        })
    }
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    fallback: Option<T>,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|err: T::Err| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: err.to_string(),
            }),
        None => Ok(fallback),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

fn parse_http_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: PLAYER_API_URL_VAR,
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(invalid(format!("unsupported scheme {scheme}"))),
    }
}
