//! # chainbridge-evm
//!
//! Schema-bound event decoding for EVM logs.
//!
//! An [`EventDecoder`] is built once from an externally supplied ABI and
//! then decodes any number of logs:
//! - Topics[0] → event signature hash (not consumed by decoding)
//! - Topics[1..] → indexed parameters, in declared order
//! - `data` → non-indexed parameters (ABI-encoded sequence)
//!
//! [`RedeemScheduledDecoder`] layers the typed retryable-ticket event on top.

pub mod batch;
pub mod decoder;
pub mod redeem;

pub use batch::{decode_batch, parallel_decode};
pub use decoder::{DecodedEvent, DecodedField, EventDecoder};
pub use redeem::{RedeemScheduled, RedeemScheduledDecoder, REDEEM_SCHEDULED};
