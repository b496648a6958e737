use crate::starfield::StarfieldConfig;
use crate::types::{Config, StarfieldSettings};
use ratatui::style::Color;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to create config dir {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Densities above this would ask for millions of stars on a large terminal.
pub const MAX_DENSITY: f64 = 0.05;

/// `<config_dir>/stellar-chat/config.json`
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("stellar-chat").join("config.json")
}

/// Load the config at `path`. A missing file is written out with defaults so
/// there is something to edit; an unreadable one falls back to defaults.
///
/// This runs before logging is set up, so any problem is handed back to the
/// caller to report instead of being logged here.
pub fn load_or_init(path: &Path) -> (Config, Option<ConfigError>) {
    if !path.exists() {
        let config = Config::default();
        let problem = save_config(path, &config).err();
        return (config, problem);
    }
    match load_config(path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist the config to `path`, creating parent directories as needed.
pub fn save_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a user-supplied color, falling back to white.
pub fn parse_color(value: &str) -> Color {
    Color::from_str(value.trim()).unwrap_or_else(|_| {
        log::warn!("unknown star color {:?}, using white", value);
        Color::Rgb(255, 255, 255)
    })
}

impl StarfieldSettings {
    pub fn to_engine_config(&self) -> StarfieldConfig {
        let defaults = StarfieldConfig::default();
        StarfieldConfig {
            density: in_range("density", self.density, MAX_DENSITY, defaults.density),
            speed: in_range("speed", self.speed, f64::MAX, defaults.speed),
            color: parse_color(&self.color),
            region: self.region,
        }
    }
}

fn in_range(name: &str, value: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() && (0.0..=max).contains(&value) {
        value
    } else {
        log::warn!("star {} {} is out of range, using {}", name, value, fallback);
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starfield::Region;

    #[test]
    fn missing_file_is_initialised_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let (config, problem) = load_or_init(&path);

        assert_eq!(config, Config::default());
        assert!(problem.is_none());
        assert!(path.exists());
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.endpoint = "https://example.test/chat".into();
        config.starfield.region = Region::Transcript;
        config.starfield.density = 0.004;

        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"region\": \"transcript\""));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"endpoint":"http://x/chat","starfield":{"speed":0.1}}"#).unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.endpoint, "http://x/chat");
        assert_eq!(config.starfield.speed, 0.1);
        assert_eq!(config.starfield.density, StarfieldSettings::default().density);
        assert!(config.starfield.enabled);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let (config, problem) = load_or_init(&path);

        assert_eq!(config, Config::default());
        assert!(matches!(problem, Some(ConfigError::Parse { .. })));
    }

    #[test]
    fn unwritable_default_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.json");

        let (config, problem) = load_or_init(&path);

        assert_eq!(config, Config::default());
        assert!(matches!(problem, Some(ConfigError::CreateDir { .. })));
    }

    #[test]
    fn colors_parse_or_fall_back_to_white() {
        assert_eq!(parse_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("cyan"), Color::Cyan);
        assert_eq!(parse_color("not-a-color"), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn invalid_numbers_use_engine_defaults() {
        let settings = StarfieldSettings {
            density: -1.0,
            speed: f64::NAN,
            ..StarfieldSettings::default()
        };
        let engine = settings.to_engine_config();
        assert_eq!(engine.density, StarfieldConfig::default().density);
        assert_eq!(engine.speed, StarfieldConfig::default().speed);
    }

    #[test]
    fn absurd_density_is_rejected() {
        let huge = StarfieldSettings {
            density: 1000.0,
            ..StarfieldSettings::default()
        };
        assert_eq!(huge.to_engine_config().density, StarfieldConfig::default().density);

        let dense = StarfieldSettings {
            density: MAX_DENSITY,
            ..StarfieldSettings::default()
        };
        assert_eq!(dense.to_engine_config().density, MAX_DENSITY);
    }
}
