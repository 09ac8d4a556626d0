//! Fixed-width values as a single trait, for callers that encode records
//! field by field generically.

use std::io::{Read, Write};

use alloy_primitives::{Address, B256};
use chainbridge_core::WireError;

use crate::{WireRead, WireWrite, ADDRESS_LEN, HASH_LEN, PADDED_ADDRESS_LEN, U64_LEN};

/// A value with a fixed-width wire encoding.
pub trait Wire: Sized {
    /// Number of bytes `encode_to` writes and `decode_from` consumes.
    const ENCODED_LEN: usize;

    fn encode_to<W: Write + ?Sized>(&self, wr: &mut W) -> Result<(), WireError>;

    fn decode_from<R: Read + ?Sized>(rd: &mut R) -> Result<Self, WireError>;
}

impl Wire for B256 {
    const ENCODED_LEN: usize = HASH_LEN;

    fn encode_to<W: Write + ?Sized>(&self, wr: &mut W) -> Result<(), WireError> {
        wr.write_hash(self)
    }

    fn decode_from<R: Read + ?Sized>(rd: &mut R) -> Result<Self, WireError> {
        rd.read_hash()
    }
}

impl Wire for Address {
    const ENCODED_LEN: usize = ADDRESS_LEN;

    fn encode_to<W: Write + ?Sized>(&self, wr: &mut W) -> Result<(), WireError> {
        wr.write_address(self)
    }

    fn decode_from<R: Read + ?Sized>(rd: &mut R) -> Result<Self, WireError> {
        rd.read_address()
    }
}

impl Wire for u64 {
    const ENCODED_LEN: usize = U64_LEN;

    fn encode_to<W: Write + ?Sized>(&self, wr: &mut W) -> Result<(), WireError> {
        wr.write_u64(*self)
    }

    fn decode_from<R: Read + ?Sized>(rd: &mut R) -> Result<Self, WireError> {
        rd.read_u64()
    }
}

/// An address encoded in its 32-byte word form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Padded256(pub Address);

impl From<Address> for Padded256 {
    fn from(addr: Address) -> Self {
        Self(addr)
    }
}

impl Wire for Padded256 {
    const ENCODED_LEN: usize = PADDED_ADDRESS_LEN;

    fn encode_to<W: Write + ?Sized>(&self, wr: &mut W) -> Result<(), WireError> {
        wr.write_address_padded256(&self.0)
    }

    fn decode_from<R: Read + ?Sized>(rd: &mut R) -> Result<Self, WireError> {
        rd.read_address_padded256().map(Self)
    }
}
