//! # chainbridge-observability
//!
//! Structured logging for ChainBridge.
//!
//! The library crates only emit `tracing` events; this crate installs the
//! subscriber that renders them. Output is human-readable text or JSON
//! (compatible with ELK, Loki, CloudWatch), with per-component levels:
//!
//! | Target                      | Level | Event                              |
//! |-----------------------------|-------|------------------------------------|
//! | `chainbridge_wire`          | warn  | byte-string length prefix rejected |
//! | `chainbridge_alias`         | trace | alias applied / removed            |
//! | `chainbridge_evm`           | debug | event decoder bound, batch errors  |
//! | `chainbridge`               | info  | bridge context initialised         |
//! | `chainbridge_observability` | warn  | log configuration rejected         |

pub mod tracing_setup;

pub use tracing_setup::{build_filter, init_tracing, try_build_filter, FilterError, LogConfig};
pub use tracing_subscriber::util::TryInitError;
