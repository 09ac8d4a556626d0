//! Tracing / logging initialisation helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing_subscriber::{
    filter::{LevelFilter, LevelParseError, ParseError},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    util::TryInitError,
    EnvFilter,
};

/// A `LogConfig` whose levels do not parse.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid log level '{level}': {source}")]
    Level {
        level: String,
        #[source]
        source: LevelParseError,
    },

    #[error("invalid log directives '{directives}': {source}")]
    Directives {
        directives: String,
        #[source]
        source: ParseError,
    },
}

/// Log level per component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: crate name → level, e.g. "chainbridge-evm" → "debug"
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// The `EnvFilter` directive string, e.g. `"info,chainbridge_evm=debug"`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }
}

/// Build the filter for `config`, rejecting a global level or component
/// level that does not parse.
///
/// The global level is checked on its own: `EnvFilter` would otherwise
/// read a misspelled level such as `"infoo"` as a target name.
pub fn try_build_filter(config: &LogConfig) -> Result<EnvFilter, FilterError> {
    config
        .level
        .parse::<LevelFilter>()
        .map_err(|source| FilterError::Level {
            level: config.level.clone(),
            source,
        })?;
    let directives = config.directives();
    EnvFilter::try_new(&directives).map_err(|source| FilterError::Directives { directives, source })
}

/// Build the filter for `config`, falling back to `info` if it does not parse.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    try_build_filter(config).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Call once at startup; a second call
/// returns an error and leaves the first subscriber in place.
///
/// An invalid `config` does not fail startup: the subscriber runs at
/// `info` and the rejected configuration is logged as a warning.
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    let (filter, rejected) = match try_build_filter(config) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()?;
    }

    if let Some(err) = rejected {
        tracing::warn!(error = %err, "log configuration rejected, using level info");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_rename_components() {
        let mut config = LogConfig::default();
        config
            .components
            .insert("chainbridge-evm".into(), "debug".into());
        config
            .components
            .insert("chainbridge-alias".into(), "trace".into());
        assert_eq!(
            config.directives(),
            "info,chainbridge_alias=trace,chainbridge_evm=debug"
        );
    }

    #[test]
    fn config_defaults_from_empty_json() {
        let config: LogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn valid_config_builds_filter() {
        let mut config = LogConfig::default();
        config
            .components
            .insert("chainbridge-evm".into(), "debug".into());
        assert!(try_build_filter(&config).is_ok());
    }

    #[test]
    fn misspelled_global_level_is_rejected() {
        let config = LogConfig {
            level: "infoo".into(),
            ..LogConfig::default()
        };
        let err = try_build_filter(&config).unwrap_err();
        assert!(matches!(err, FilterError::Level { ref level, .. } if level == "infoo"));
        assert!(err.to_string().contains("infoo"));
    }

    #[test]
    fn misspelled_component_level_is_rejected() {
        let mut config = LogConfig::default();
        config
            .components
            .insert("chainbridge-evm".into(), "debg".into());
        assert!(matches!(
            try_build_filter(&config),
            Err(FilterError::Directives { ref directives, .. })
                if directives == "info,chainbridge_evm=debg"
        ));
    }

    #[test]
    fn second_init_fails() {
        let config = LogConfig {
            level: "warn".into(),
            ..LogConfig::default()
        };
        // Other tests in this process may have installed one first.
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
