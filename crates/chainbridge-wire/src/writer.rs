//! Encoding half of the stream codec.

use std::io::Write;

use alloy_primitives::{Address, B256};
use chainbridge_core::WireError;

use crate::ADDRESS_PAD_LEN;

fn put<W: Write + ?Sized>(wr: &mut W, bytes: &[u8], field: &'static str) -> Result<(), WireError> {
    wr.write_all(bytes)
        .map_err(|source| WireError::WriteFailed { field, source })
}

/// Typed writes over any byte sink. Implemented for every `std::io::Write`.
pub trait WireWrite: Write {
    fn write_hash(&mut self, val: &B256) -> Result<(), WireError> {
        put(self, val.as_slice(), "hash")
    }

    fn write_address(&mut self, val: &Address) -> Result<(), WireError> {
        put(self, val.as_slice(), "address")
    }

    /// Write an address as a 32-byte word: 12 zero bytes, then the address.
    fn write_address_padded256(&mut self, val: &Address) -> Result<(), WireError> {
        put(self, &[0u8; ADDRESS_PAD_LEN], "padded address")?;
        self.write_address(val)
    }

    fn write_u64(&mut self, val: u64) -> Result<(), WireError> {
        put(self, &val.to_be_bytes(), "u64")
    }

    /// Write `val` behind its 8-byte big-endian length.
    fn write_bytestring(&mut self, val: &[u8]) -> Result<(), WireError> {
        self.write_u64(val.len() as u64)?;
        put(self, val, "byte string")
    }
}

impl<W: Write + ?Sized> WireWrite for W {}
