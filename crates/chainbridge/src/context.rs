//! The immutable process context built once at startup.

use std::io::Read;

use chainbridge_alias::{does_tx_type_alias, AliasOffsets};
use chainbridge_core::{Address, ConfigError, WireError};
use chainbridge_evm::RedeemScheduledDecoder;
use chainbridge_wire::WireRead;

use crate::config::BridgeConfig;
use crate::InitError;

/// Alias offsets, the bound `RedeemScheduled` decoder and the codec limits.
///
/// Construct it once before any concurrent use and share it by reference
/// or `Arc`; nothing in it changes after `init` returns.
#[derive(Debug, Clone)]
pub struct BridgeContext {
    offsets: AliasOffsets,
    redeem: RedeemScheduledDecoder,
    max_bytestring_len: u64,
}

impl BridgeContext {
    /// Build the context from `config` and an ABI document.
    ///
    /// A schema error here means no log can ever be decoded; callers should
    /// abort startup rather than continue without a context.
    pub fn init(config: &BridgeConfig, abi_json: &str) -> Result<Self, InitError> {
        let offsets = AliasOffsets::from_config(&config.alias)?;
        let redeem = RedeemScheduledDecoder::from_abi_json(abi_json)?;
        tracing::info!(
            alias_offset = %offsets.offset(),
            max_bytestring_len = config.wire.max_bytestring_len,
            redeem_selector = %redeem.event_decoder().selector(),
            "bridge context initialised"
        );
        Ok(Self {
            offsets,
            redeem,
            max_bytestring_len: config.wire.max_bytestring_len,
        })
    }

    /// Build the context, reading the ABI from `events.abi_path`.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, InitError> {
        let path = config
            .events
            .abi_path
            .as_ref()
            .ok_or(InitError::MissingAbiPath)?;
        let abi_json = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::init(config, &abi_json)
    }

    pub fn offsets(&self) -> &AliasOffsets {
        &self.offsets
    }

    pub fn redeem_decoder(&self) -> &RedeemScheduledDecoder {
        &self.redeem
    }

    pub fn max_bytestring_len(&self) -> u64 {
        self.max_bytestring_len
    }

    /// Read a byte string bounded by the configured maximum.
    pub fn read_bytestring<R: Read + ?Sized>(&self, rd: &mut R) -> Result<Vec<u8>, WireError> {
        rd.read_bytestring(self.max_bytestring_len)
    }

    /// The L1 address behind `sender` if transactions of `tx_type` carry an
    /// aliased sender, `None` otherwise.
    pub fn l1_origin(&self, tx_type: u8, sender: Address) -> Option<Address> {
        does_tx_type_alias(tx_type).then(|| self.offsets.unalias(sender))
    }
}
