//! # chainbridge-wire
//!
//! Byte-exact stream codec for values persisted or transmitted as chain
//! state. Every field is big-endian and byte-aligned:
//!
//! | Field                    | Width    | Layout                                  |
//! |--------------------------|----------|-----------------------------------------|
//! | Hash                     | 32       | raw bytes                               |
//! | Address                  | 20       | raw bytes                               |
//! | Address (256-bit padded) | 32       | 12 zero bytes, then the 20 address bytes |
//! | u64                      | 8        | big-endian                              |
//! | Byte string              | 8 + n    | 8-byte big-endian length, then n bytes  |
//!
//! Any `std::io::Read` is a source and any `std::io::Write` is a sink, so
//! the same code decodes from a slice, a file or a socket. Reads are always
//! full reads: a stream that ends early yields [`WireError::ShortRead`],
//! never a padded or truncated value.

pub mod codec;
pub mod reader;
pub mod writer;

pub use chainbridge_core::WireError;
pub use codec::Wire;
pub use reader::WireRead;
pub use writer::WireWrite;

/// Encoded width of a hash.
pub const HASH_LEN: usize = 32;
/// Encoded width of an unpadded address.
pub const ADDRESS_LEN: usize = 20;
/// Encoded width of an address stored as a 32-byte word.
pub const PADDED_ADDRESS_LEN: usize = 32;
/// Zero bytes preceding an address in its padded form.
pub const ADDRESS_PAD_LEN: usize = PADDED_ADDRESS_LEN - ADDRESS_LEN;
/// Encoded width of a `u64`.
pub const U64_LEN: usize = 8;
/// Width of the length prefix in front of a byte string.
pub const LENGTH_PREFIX_LEN: usize = U64_LEN;
