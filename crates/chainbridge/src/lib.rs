//! # chainbridge
//!
//! The L1/L2 boundary layer of an optimistic rollup node:
//!
//! - [`wire`]: fixed-layout binary stream codec
//! - [`alias`]: L1 → L2 sender address aliasing
//! - [`evm`]: schema-bound event log decoding
//! - [`types`]: shared errors and chain-word helpers
//!
//! [`BridgeContext`] ties them together. Build it once at startup from a
//! [`BridgeConfig`]; an error from [`BridgeContext::init`] is fatal.
//!
//! ```no_run
//! use chainbridge::{init_logging, BridgeConfig, BridgeContext};
//!
//! let config = BridgeConfig::from_file("chainbridge.json")?;
//! init_logging(&config).ok();
//! let ctx = BridgeContext::from_config(&config)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod context;

pub use chainbridge_alias as alias;
pub use chainbridge_core as types;
pub use chainbridge_evm as evm;
pub use chainbridge_wire as wire;

pub use config::{BridgeConfig, EventsConfig, WireConfig, DEFAULT_MAX_BYTESTRING_LEN};
pub use context::BridgeContext;

use chainbridge_core::{ConfigError, SchemaError};
use chainbridge_observability::TryInitError;
use thiserror::Error;

/// Startup failure. None of these are recoverable at runtime.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("event schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("events.abi_path is not set")]
    MissingAbiPath,
}

/// Install the global tracing subscriber described by `config.log`.
pub fn init_logging(config: &BridgeConfig) -> Result<(), TryInitError> {
    chainbridge_observability::init_tracing(&config.log)
}
