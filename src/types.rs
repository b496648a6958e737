use crate::starfield::Region;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Starfield section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    pub enabled: bool,
    pub density: f64,
    pub speed: f64,
    /// Any color ratatui can parse: `#rrggbb`, a name, or an index.
    pub color: String,
    pub region: Region,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            density: 0.0012,
            speed: 0.035,
            color: "#ffffff".into(),
            region: Region::Full,
        }
    }
}

/// Top-level persisted config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    /// `env_logger` filter, e.g. `info` or `stellar_chat=debug`.
    pub log_level: Option<String>,
    pub starfield: StarfieldSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8787/chat".into(),
            request_timeout_secs: 60,
            log_level: None,
            starfield: StarfieldSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "You"),
            Role::Assistant => write!(f, "Assistant"),
        }
    }
}

/// One entry in the transcript. Serializes to the `{id, role, content}`
/// shape the chat endpoint expects.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(skip)]
    pub sent_at: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            sent_at: Local::now(),
        }
    }
}

/// Response body of the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reply {
    pub role: Role,
    pub content: String,
}
