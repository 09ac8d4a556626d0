//! The alias offset pair and the transform built on it.

use alloy_primitives::{address, Address, U160, U256};
use chainbridge_core::ConfigError;
use serde::{Deserialize, Serialize};

/// The offset the rollup adds to every L1 sender.
pub const DEFAULT_ALIAS_OFFSET: Address = address!("1111000000000000000000000000000000001111");

/// Alias offset configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Hex offset, e.g. "0x1111000000000000000000000000000000001111".
    /// `None` selects [`DEFAULT_ALIAS_OFFSET`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

/// The forward and inverse alias offsets.
///
/// Built once during setup and shared read-only; it holds no interior
/// mutability, so any number of threads may alias through one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasOffsets {
    offset: U256,
    inverse: U256,
}

impl Default for AliasOffsets {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasOffsets {
    /// Offsets for [`DEFAULT_ALIAS_OFFSET`].
    pub fn new() -> Self {
        Self::with_offset(U160::from_be_slice(DEFAULT_ALIAS_OFFSET.as_slice()))
    }

    /// Offsets for an arbitrary 160-bit offset. The inverse is `2^160 - offset`.
    pub fn with_offset(offset: U160) -> Self {
        let offset = U256::from_be_slice(&offset.to_be_bytes::<20>());
        let inverse = (U256::from(1u8) << 160) - offset;
        Self { offset, inverse }
    }

    /// Build offsets from configuration, falling back to the default offset.
    pub fn from_config(config: &AliasConfig) -> Result<Self, ConfigError> {
        let Some(raw) = config.offset.as_deref() else {
            return Ok(Self::new());
        };
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw);
        if digits.is_empty() {
            return Err(ConfigError::InvalidAliasOffset {
                value: raw.to_string(),
                reason: "empty hex string".into(),
            });
        }
        let offset =
            U160::from_str_radix(digits, 16).map_err(|e| ConfigError::InvalidAliasOffset {
                value: raw.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::with_offset(offset))
    }

    /// The forward offset as an address-sized value.
    pub fn offset(&self) -> Address {
        truncate_to_address(self.offset)
    }

    /// `2^160 - offset`. Equal to `2^160` when the offset is zero, which is
    /// why it is not narrowed to 160 bits.
    pub fn inverse_offset(&self) -> U256 {
        self.inverse
    }

    /// Map an L1 address to the address it acts as on L2.
    pub fn alias(&self, l1_address: Address) -> Address {
        let aliased = shift(l1_address, self.offset);
        tracing::trace!(%l1_address, %aliased, "applied L1-to-L2 alias");
        aliased
    }

    /// Recover the L1 address behind an aliased L2 address.
    pub fn unalias(&self, l2_address: Address) -> Address {
        let original = shift(l2_address, self.inverse);
        tracing::trace!(%l2_address, %original, "removed L1-to-L2 alias");
        original
    }
}

/// Alias with the default offset.
pub fn apply_l1_to_l2_alias(l1_address: Address) -> Address {
    AliasOffsets::new().alias(l1_address)
}

/// Undo [`apply_l1_to_l2_alias`].
pub fn undo_l1_to_l2_alias(l2_address: Address) -> Address {
    AliasOffsets::new().unalias(l2_address)
}

/// Add in 256 bits, then keep the trailing 20 bytes of the big-endian sum.
///
/// Both operands are below 2^161 so the sum never overflows; dropping the
/// high bytes is the reduction mod 2^160. The fixed 32-byte encoding also
/// covers sums shorter than 20 significant bytes (e.g. a zero address with
/// a zero offset) without a separate padding step.
fn shift(address: Address, by: U256) -> Address {
    let sum = U256::from_be_slice(address.as_slice()) + by;
    truncate_to_address(sum)
}

fn truncate_to_address(value: U256) -> Address {
    let bytes = value.to_be_bytes::<32>();
    Address::from_slice(&bytes[12..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_aliases_to_offset() {
        let offsets = AliasOffsets::new();
        assert_eq!(offsets.alias(Address::ZERO), DEFAULT_ALIAS_OFFSET);
        assert_eq!(offsets.unalias(DEFAULT_ALIAS_OFFSET), Address::ZERO);
    }

    #[test]
    fn all_ones_wraps_below_offset() {
        let offsets = AliasOffsets::new();
        let max = Address::from([0xffu8; 20]);
        let aliased = offsets.alias(max);
        // 0xff..ff + offset = offset - 1 (mod 2^160)
        assert_eq!(
            aliased,
            address!("1111000000000000000000000000000000001110")
        );
        assert!(aliased < DEFAULT_ALIAS_OFFSET);
        assert_eq!(offsets.unalias(aliased), max);
    }

    #[test]
    fn known_contract_alias() {
        let l1 = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
        let l2 = apply_l1_to_l2_alias(l1);
        assert_eq!(l2, address!("e9eb6bf26964af9d7eed9e03e53415d37aa97156"));
        assert_eq!(undo_l1_to_l2_alias(l2), l1);
    }

    #[test]
    fn inverse_offset_sums_to_modulus() {
        let offsets = AliasOffsets::new();
        let modulus = U256::from(1u8) << 160;
        let offset = U256::from_be_slice(offsets.offset().as_slice());
        assert_eq!(offset + offsets.inverse_offset(), modulus);
    }

    #[test]
    fn zero_offset_is_identity() {
        let offsets = AliasOffsets::with_offset(U160::ZERO);
        let addr = address!("00000000000000000000000000000000000000aa");
        assert_eq!(offsets.alias(addr), addr);
        assert_eq!(offsets.unalias(addr), addr);
        assert_eq!(offsets.alias(Address::ZERO), Address::ZERO);
    }

    #[test]
    fn config_default_and_custom() {
        let default = AliasOffsets::from_config(&AliasConfig::default()).unwrap();
        assert_eq!(default, AliasOffsets::new());

        let cfg = AliasConfig {
            offset: Some("0x1111000000000000000000000000000000001111".into()),
        };
        assert_eq!(AliasOffsets::from_config(&cfg).unwrap(), AliasOffsets::new());

        let cfg = AliasConfig {
            offset: Some("0x10".into()),
        };
        let offsets = AliasOffsets::from_config(&cfg).unwrap();
        assert_eq!(
            offsets.alias(Address::ZERO),
            address!("0000000000000000000000000000000000000010")
        );
    }

    #[test]
    fn config_rejects_bad_offsets() {
        for bad in ["", "0x", "0xzz", "0x1ffff000000000000000000000000000000001111"] {
            let cfg = AliasConfig {
                offset: Some(bad.into()),
            };
            assert!(
                matches!(
                    AliasOffsets::from_config(&cfg),
                    Err(ConfigError::InvalidAliasOffset { .. })
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn config_serde() {
        let cfg: AliasConfig = serde_json::from_str(r#"{"offset":"0x42"}"#).unwrap();
        assert_eq!(cfg.offset.as_deref(), Some("0x42"));
        let cfg: AliasConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.offset, None);
    }
}
