//! Rayon-powered batch decode over a slice of logs.
//!
//! A bound decoder is immutable, so every worker shares the same instance
//! without locking.

use alloy_primitives::LogData;
use chainbridge_core::EventDecodeError;
use rayon::prelude::*;

use crate::decoder::{DecodedEvent, EventDecoder};

/// Decode every log in parallel. Results keep the input order, so
/// `results[i]` belongs to `logs[i]`.
pub fn decode_batch(
    decoder: &EventDecoder,
    logs: &[LogData],
) -> Vec<Result<DecodedEvent, EventDecodeError>> {
    logs.par_iter().map(|log| decoder.decode(log)).collect()
}

/// Decode only the logs whose topic 0 matches the decoder's selector.
/// Returns `(successes, errors)`, each tagged with the index into `logs`.
pub fn parallel_decode(
    decoder: &EventDecoder,
    logs: &[LogData],
) -> (Vec<(usize, DecodedEvent)>, Vec<(usize, EventDecodeError)>) {
    let results: Vec<(usize, Result<DecodedEvent, EventDecodeError>)> = logs
        .par_iter()
        .enumerate()
        .filter(|(_, log)| decoder.matches(log))
        .map(|(idx, log)| (idx, decoder.decode(log)))
        .collect();

    let mut events = Vec::new();
    let mut errors = Vec::new();
    for (idx, r) in results {
        match r {
            Ok(e) => events.push((idx, e)),
            Err(e) => errors.push((idx, e)),
        }
    }
    if !errors.is_empty() {
        tracing::debug!(
            event = decoder.name(),
            failed = errors.len(),
            decoded = events.len(),
            "batch decode finished with errors"
        );
    }
    (events, errors)
}
