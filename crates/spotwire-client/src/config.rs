use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::endpoints;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unsupported host kind: {0} (expected demo or live)")]
    InvalidHost(String),
}

/// Runtime options of one session.
///
/// Every field has a working default, so a plain `Config::demo()` (or an
/// empty config document) connects as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_messages_per_second")]
    pub messages_per_second: u32,
    #[serde(
        default = "default_response_timeout",
        deserialize_with = "spotwire_helpers::de::duration"
    )]
    pub response_timeout: Duration,
    #[serde(
        default = "default_heartbeat_idle",
        deserialize_with = "spotwire_helpers::de::duration"
    )]
    pub heartbeat_idle: Duration,
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: u32,
    /// Verify the server certificate chain. Off by default, matching how
    /// the API endpoints are commonly driven; enable it where proper roots
    /// are available.
    #[serde(default)]
    pub verify_peer: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::demo()
    }
}

impl Config {
    pub fn demo() -> Self {
        Self::for_host(endpoints::DEMO_HOST)
    }

    pub fn live() -> Self {
        Self::for_host(endpoints::LIVE_HOST)
    }

    pub fn for_host_kind(kind: HostKind) -> Self {
        match kind {
            HostKind::Demo => Self::demo(),
            HostKind::Live => Self::live(),
        }
    }

    fn for_host(host: &str) -> Self {
        Self {
            host: host.to_string(),
            port: default_port(),
            messages_per_second: default_messages_per_second(),
            response_timeout: default_response_timeout(),
            heartbeat_idle: default_heartbeat_idle(),
            max_frame_bytes: default_max_frame_bytes(),
            verify_peer: false,
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.host = self.host.trim().to_string();
        if self.host.is_empty() {
            self.host = default_host();
        }
        self.messages_per_second = self.messages_per_second.max(1);
        if self.response_timeout.is_zero() {
            self.response_timeout = default_response_timeout();
        }
        if self.heartbeat_idle.is_zero() {
            self.heartbeat_idle = default_heartbeat_idle();
        }
        self.max_frame_bytes = self.max_frame_bytes.max(1024);
    }
}

fn default_host() -> String {
    endpoints::DEMO_HOST.to_string()
}

fn default_port() -> u16 {
    endpoints::PORT
}

fn default_messages_per_second() -> u32 {
    5
}

fn default_response_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_heartbeat_idle() -> Duration {
    Duration::from_secs(20)
}

fn default_max_frame_bytes() -> u32 {
    spotwire_proto::DEFAULT_MAX_FRAME_BYTES
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Demo,
    Live,
}

impl FromStr for HostKind {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(HostKind::Demo),
            "live" => Ok(HostKind::Live),
            other => Err(ConfigError::InvalidHost(other.to_string())),
        }
    }
}

/// Application credentials file, kept in the original field spelling.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "Secret")]
    pub secret: String,
    #[serde(rename = "Host", deserialize_with = "de_host_kind")]
    pub host: HostKind,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn de_host_kind<'de, D>(deserializer: D) -> Result<HostKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_environment() {
        let config = Config::demo();
        assert_eq!(config.host, "demo.ctraderapi.com");
        assert_eq!(config.port, 5035);
        assert_eq!(config.messages_per_second, 5);
        assert_eq!(config.response_timeout, Duration::from_secs(30));
        assert_eq!(config.heartbeat_idle, Duration::from_secs(20));
        assert_eq!(config.max_frame_bytes, 15_000_000);
        assert!(!config.verify_peer);
    }

    #[test]
    fn config_deserializes_with_humantime_durations() {
        let config: Config = serde_json::from_str(
            r#"{"host": "live.ctraderapi.com", "response_timeout": "5s", "heartbeat_idle": 10}"#,
        )
        .expect("parse");
        assert_eq!(config.host, "live.ctraderapi.com");
        assert_eq!(config.response_timeout, Duration::from_secs(5));
        assert_eq!(config.heartbeat_idle, Duration::from_secs(10));
    }

    #[test]
    fn normalize_clamps_degenerate_values() {
        let mut config = Config::demo();
        config.messages_per_second = 0;
        config.response_timeout = Duration::ZERO;
        config.host = "  ".to_string();
        config.normalize();
        assert_eq!(config.messages_per_second, 1);
        assert_eq!(config.response_timeout, Duration::from_secs(30));
        assert_eq!(config.host, "demo.ctraderapi.com");
    }

    #[test]
    fn credentials_parse_with_original_field_spelling() {
        let creds: Credentials = serde_json::from_str(
            r#"{"clientId": "app-1", "Secret": "s3cret", "Host": "Demo"}"#,
        )
        .expect("parse");
        assert_eq!(creds.client_id, "app-1");
        assert_eq!(creds.secret, "s3cret");
        assert_eq!(creds.host, HostKind::Demo);
    }

    #[test]
    fn host_kind_is_case_insensitive() {
        assert_eq!("LIVE".parse::<HostKind>().expect("parse"), HostKind::Live);
        assert_eq!("demo".parse::<HostKind>().expect("parse"), HostKind::Demo);
        assert!("staging".parse::<HostKind>().is_err());
    }
}
