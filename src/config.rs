//! Server configuration from environment variables.
//!
//! - `HOST` (default `0.0.0.0`), `PORT` (default `8080`)
//! - `DATA_FILE`: JSON document holding players and match history
//! - `SESSION_IDLE_TIMEOUT`: e.g. `12h`, `30m`, `90s`; live games idle this long are dropped
//! - `SEED_PLAYERS`: comma-separated names added to an empty store

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub session_idle_timeout: Duration,
    pub seed_players: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/badminton.json")
}

fn default_idle_timeout() -> Duration {
    Duration::from_secs(12 * 3600)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            session_idle_timeout: default_idle_timeout(),
            seed_players: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(default_host);
        let port = match get("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: v.clone(),
            })?,
            None => default_port(),
        };
        let data_file = get("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_file);
        let session_idle_timeout = match get("SESSION_IDLE_TIMEOUT") {
            Some(v) => parse_duration(&v).ok_or(ConfigError::InvalidValue {
                key: "SESSION_IDLE_TIMEOUT",
                value: v.clone(),
            })?,
            None => default_idle_timeout(),
        };
        let seed_players = get("SEED_PLAYERS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            data_file,
            session_idle_timeout,
            seed_players,
        })
    }
}

/// Parse a human-friendly duration string (e.g., "6h", "30m", "90s"). Bare numbers are seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        (s, 1)
    };

    let num: u64 = num_str.parse().ok()?;
    Some(Duration::from_secs(num.checked_mul(multiplier)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_reads_all_keys() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DATA_FILE", "/tmp/b.json"),
            ("SESSION_IDLE_TIMEOUT", "30m"),
            ("SEED_PLAYERS", "Sam, Jo ,,Alex"),
        ]))
        .unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.data_file, PathBuf::from("/tmp/b.json"));
        assert_eq!(cfg.session_idle_timeout, Duration::from_secs(1800));
        assert_eq!(cfg.seed_players, vec!["Sam", "Jo", "Alex"]);
    }

    #[test]
    fn test_bad_port() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_bad_timeout() {
        assert!(AppConfig::from_lookup(lookup(&[("SESSION_IDLE_TIMEOUT", "soon")])).is_err());
    }

    #[test]
    fn test_blank_value_uses_default() {
        let cfg = AppConfig::from_lookup(lookup(&[("PORT", "  ")])).unwrap();
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("6h"), Some(Duration::from_secs(21600)));
        assert_eq!(parse_duration("30m"), Some(Duration::from_secs(1800)));
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration("120"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_parse_duration_overflow() {
        assert_eq!(parse_duration("99999999999999999h"), None);
        assert!(AppConfig::from_lookup(lookup(&[(
            "SESSION_IDLE_TIMEOUT",
            "99999999999999999h"
        )]))
        .is_err());
    }
}
