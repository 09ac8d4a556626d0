//! Bridge configuration, loaded from JSON.

use chainbridge_alias::AliasConfig;
use chainbridge_core::ConfigError;
use chainbridge_observability::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest byte string accepted from a stream unless configured otherwise.
/// Matches the maximum size of an L2 message (256 KiB).
pub const DEFAULT_MAX_BYTESTRING_LEN: u64 = 256 * 1024;

/// Stream codec limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireConfig {
    /// Upper bound on a byte string's declared length
    #[serde(default = "default_max_bytestring_len")]
    pub max_bytestring_len: u64,
}

fn default_max_bytestring_len() -> u64 {
    DEFAULT_MAX_BYTESTRING_LEN
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_bytestring_len: DEFAULT_MAX_BYTESTRING_LEN,
        }
    }
}

/// Where the event schema comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Path to an ABI JSON file declaring `RedeemScheduled`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi_path: Option<PathBuf>,
}

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub alias: AliasConfig,
    #[serde(default)]
    pub wire: WireConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

impl BridgeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = BridgeConfig::from_json_str("{}").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.wire.max_bytestring_len, DEFAULT_MAX_BYTESTRING_LEN);
        assert_eq!(config.log.level, "info");
        assert!(config.alias.offset.is_none());
        assert!(config.events.abi_path.is_none());
    }

    #[test]
    fn full_json() {
        let config = BridgeConfig::from_json_str(
            r#"{
                "log":    { "level": "debug", "components": { "chainbridge-evm": "trace" }, "json": true },
                "alias":  { "offset": "0x1111000000000000000000000000000000001111" },
                "wire":   { "max_bytestring_len": 1024 },
                "events": { "abi_path": "fixtures/abi/ArbRetryableTx.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);
        assert_eq!(config.wire.max_bytestring_len, 1024);
        assert_eq!(
            config.events.abi_path.as_deref(),
            Some(Path::new("fixtures/abi/ArbRetryableTx.json"))
        );
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            BridgeConfig::from_json_str("{\"wire\": {\"max_bytestring_len\": -1}}"),
            Err(ConfigError::Serde(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            BridgeConfig::from_file("/nonexistent/chainbridge.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
