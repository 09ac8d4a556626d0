//! # chainbridge-core
//!
//! Shared primitives for the ChainBridge crates: the error types every
//! component returns, and the helpers that move integers and addresses in
//! and out of 32-byte chain words.
//!
//! Addresses, hashes and big integers are the `alloy-primitives` types and
//! are re-exported here so downstream crates agree on a single version.

pub mod error;
pub mod word;

pub use alloy_primitives::{Address, B256, U160, U256};
pub use error::{ConfigError, EventDecodeError, SchemaError, WireError};
pub use word::{address_to_hash, checked_hash_add, hash_plus_int, int_to_hash, uint_to_hash};
