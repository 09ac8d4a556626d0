//! Decoding half of the stream codec.

use std::io::{ErrorKind, Read};

use alloy_primitives::{Address, B256};
use chainbridge_core::WireError;

use crate::{ADDRESS_LEN, ADDRESS_PAD_LEN, HASH_LEN, PADDED_ADDRESS_LEN, U64_LEN};

/// Fill `buf` completely or fail.
fn fill<R: Read + ?Sized>(rd: &mut R, buf: &mut [u8], field: &'static str) -> Result<(), WireError> {
    let expected = buf.len();
    rd.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => WireError::ShortRead { field, expected },
        _ => WireError::Read { field, source: e },
    })
}

/// Typed reads over any byte source.
///
/// Implemented for every `std::io::Read`, so `&[u8]`, `File` and
/// `TcpStream` all decode the same way.
pub trait WireRead: Read {
    /// Read a 32-byte hash.
    fn read_hash(&mut self) -> Result<B256, WireError> {
        let mut buf = [0u8; HASH_LEN];
        fill(self, &mut buf, "hash")?;
        Ok(B256::from(buf))
    }

    /// Read a bare 20-byte address.
    fn read_address(&mut self) -> Result<Address, WireError> {
        let mut buf = [0u8; ADDRESS_LEN];
        fill(self, &mut buf, "address")?;
        Ok(Address::from(buf))
    }

    /// Read an address stored right-aligned in a 32-byte word.
    ///
    /// The 12 leading bytes are discarded without checking that they are
    /// zero. Writers always emit zeros there.
    fn read_address_padded256(&mut self) -> Result<Address, WireError> {
        let mut buf = [0u8; PADDED_ADDRESS_LEN];
        fill(self, &mut buf, "padded address")?;
        Ok(Address::from_slice(&buf[ADDRESS_PAD_LEN..]))
    }

    /// Read a big-endian `u64`.
    fn read_u64(&mut self) -> Result<u64, WireError> {
        let mut buf = [0u8; U64_LEN];
        fill(self, &mut buf, "u64")?;
        Ok(u64::from_be_bytes(buf))
    }

    /// Read a length-prefixed byte string of at most `max_len` bytes.
    ///
    /// The length is checked before anything past the prefix is read or
    /// allocated, so an oversized prefix leaves the payload in the stream.
    fn read_bytestring(&mut self, max_len: u64) -> Result<Vec<u8>, WireError> {
        let declared = self.read_u64()?;
        if declared > max_len {
            tracing::warn!(declared, max = max_len, "byte string length prefix rejected");
            return Err(WireError::SizeExceeded {
                declared,
                max: max_len,
            });
        }
        let len = usize::try_from(declared).map_err(|_| WireError::SizeExceeded {
            declared,
            max: max_len,
        })?;
        let mut buf = vec![0u8; len];
        fill(self, &mut buf, "byte string")?;
        Ok(buf)
    }
}

impl<R: Read + ?Sized> WireRead for R {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// A source that fails every read with a non-EOF error.
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::ConnectionReset, "peer reset"))
        }
    }

    #[test]
    fn read_u64_big_endian() {
        let mut rd: &[u8] = &[0, 0, 0, 0, 0, 0, 0x01, 0x02];
        assert_eq!(rd.read_u64().unwrap(), 0x0102);
        assert!(rd.is_empty());
    }

    #[test]
    fn read_padded_address_ignores_high_bytes() {
        let mut word = [0xeeu8; 32];
        word[12..].copy_from_slice(&[0x11; 20]);
        let mut rd: &[u8] = &word;
        let addr = rd.read_address_padded256().unwrap();
        assert_eq!(addr, Address::from([0x11u8; 20]));
    }

    #[test]
    fn read_hash_short() {
        let mut rd: &[u8] = &[0u8; 31];
        let err = rd.read_hash().unwrap_err();
        assert!(matches!(
            err,
            WireError::ShortRead { field: "hash", expected: 32 }
        ));
    }

    #[test]
    fn read_bytestring_over_limit_stops_after_prefix() {
        let mut bytes = 5u64.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"hello");
        let mut rd: &[u8] = &bytes;
        let err = rd.read_bytestring(4).unwrap_err();
        assert!(matches!(
            err,
            WireError::SizeExceeded { declared: 5, max: 4 }
        ));
        assert_eq!(rd, b"hello");
    }

    #[test]
    fn read_bytestring_at_limit() {
        let mut bytes = 5u64.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"hello");
        let mut rd: &[u8] = &bytes;
        assert_eq!(rd.read_bytestring(5).unwrap(), b"hello");
    }

    #[test]
    fn read_bytestring_huge_prefix_does_not_allocate() {
        let bytes = u64::MAX.to_be_bytes();
        let mut rd: &[u8] = &bytes;
        let err = rd.read_bytestring(1 << 20).unwrap_err();
        assert!(matches!(err, WireError::SizeExceeded { .. }));
    }

    #[test]
    fn read_bytestring_truncated_payload() {
        let mut bytes = 4u64.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"abc");
        let mut rd: &[u8] = &bytes;
        let err = rd.read_bytestring(16).unwrap_err();
        assert!(matches!(
            err,
            WireError::ShortRead { field: "byte string", expected: 4 }
        ));
    }

    #[test]
    fn non_eof_errors_are_not_short_reads() {
        let err = Broken.read_u64().unwrap_err();
        assert!(matches!(err, WireError::Read { field: "u64", .. }));
        assert!(!err.is_short_read());
    }
}
