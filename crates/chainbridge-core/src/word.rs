//! Conversions between integers, addresses and 32-byte chain words.
//!
//! A word is a `B256` read as a big-endian unsigned integer. Results are
//! always reduced to the low 32 bytes, the same way a word-sized slot
//! truncates a wider value.

use alloy_primitives::{Address, B256, U256};

/// Right-align an address in a 32-byte word (12 leading zero bytes).
pub fn address_to_hash(address: Address) -> B256 {
    address.into_word()
}

/// Big-endian word holding `val`.
pub fn uint_to_hash(val: u64) -> B256 {
    B256::from(U256::from(val).to_be_bytes::<32>())
}

/// Word holding the magnitude of `val`.
///
/// Negative inputs are not two's-complement encoded: `int_to_hash(-5)`
/// equals `uint_to_hash(5)`. Persisted state written by earlier versions
/// depends on this encoding.
pub fn int_to_hash(val: i64) -> B256 {
    uint_to_hash(val.unsigned_abs())
}

/// Add a signed delta to a word.
///
/// Overflow wraps modulo 2^256. When the sum would drop below zero the
/// result is its magnitude, so `hash_plus_int(2, -5)` yields `3`. Use
/// [`checked_hash_add`] where a negative sum must be rejected instead.
pub fn hash_plus_int(x: B256, y: i64) -> B256 {
    let base = U256::from_be_bytes(x.0);
    let delta = U256::from(y.unsigned_abs());
    let sum = if y >= 0 {
        base.wrapping_add(delta)
    } else {
        match base.checked_sub(delta) {
            Some(v) => v,
            None => delta - base,
        }
    };
    B256::from(sum.to_be_bytes::<32>())
}

/// Add a signed delta to a word, returning `None` if the result falls
/// outside `[0, 2^256)`.
pub fn checked_hash_add(x: B256, y: i64) -> Option<B256> {
    let base = U256::from_be_bytes(x.0);
    let delta = U256::from(y.unsigned_abs());
    let sum = if y >= 0 {
        base.checked_add(delta)?
    } else {
        base.checked_sub(delta)?
    };
    Some(B256::from(sum.to_be_bytes::<32>()))
}
