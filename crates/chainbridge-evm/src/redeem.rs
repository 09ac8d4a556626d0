//! Typed decoding of the retryable-ticket `RedeemScheduled` event.
//!
//! ```text
//! event RedeemScheduled(
//!     bytes32 indexed ticketId,
//!     bytes32 indexed retryTxHash,
//!     uint64  indexed sequenceNum,
//!     uint64  donatedGas,
//!     address gasDonor,
//!     uint256 maxRefund,
//!     uint256 submissionFeeRefund
//! )
//! ```
//!
//! The schema itself comes from the caller's ABI; this module only maps the
//! decoded fields onto a struct.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::{Address, Log, LogData, B256, U256};
use chainbridge_core::{EventDecodeError, SchemaError};

use crate::decoder::{DecodedEvent, EventDecoder};

/// Event name in the retryable-ticket precompile ABI.
pub const REDEEM_SCHEDULED: &str = "RedeemScheduled";

const FIELDS: [&str; 7] = [
    "ticketId",
    "retryTxHash",
    "sequenceNum",
    "donatedGas",
    "gasDonor",
    "maxRefund",
    "submissionFeeRefund",
];

/// A retry of a retryable ticket has been scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemScheduled {
    pub ticket_id: B256,
    pub retry_tx_hash: B256,
    pub sequence_num: u64,
    pub donated_gas: u64,
    pub gas_donor: Address,
    pub max_refund: U256,
    pub submission_fee_refund: U256,
}

impl TryFrom<&DecodedEvent> for RedeemScheduled {
    type Error = EventDecodeError;

    fn try_from(event: &DecodedEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            ticket_id: word(event, "ticketId")?,
            retry_tx_hash: word(event, "retryTxHash")?,
            sequence_num: uint64(event, "sequenceNum")?,
            donated_gas: uint64(event, "donatedGas")?,
            gas_donor: address(event, "gasDonor")?,
            max_refund: uint256(event, "maxRefund")?,
            submission_fee_refund: uint256(event, "submissionFeeRefund")?,
        })
    }
}

fn mismatch(field: &str, expected: &'static str) -> EventDecodeError {
    EventDecodeError::FieldMismatch {
        field: field.to_string(),
        expected,
    }
}

fn word(event: &DecodedEvent, field: &str) -> Result<B256, EventDecodeError> {
    match event.field(field) {
        Some(DynSolValue::FixedBytes(w, 32)) => Ok(*w),
        _ => Err(mismatch(field, "bytes32")),
    }
}

fn uint64(event: &DecodedEvent, field: &str) -> Result<u64, EventDecodeError> {
    match event.field(field) {
        Some(DynSolValue::Uint(v, _)) => u64::try_from(*v).map_err(|_| mismatch(field, "uint64")),
        _ => Err(mismatch(field, "uint64")),
    }
}

fn uint256(event: &DecodedEvent, field: &str) -> Result<U256, EventDecodeError> {
    match event.field(field) {
        Some(DynSolValue::Uint(v, _)) => Ok(*v),
        _ => Err(mismatch(field, "uint256")),
    }
}

fn address(event: &DecodedEvent, field: &str) -> Result<Address, EventDecodeError> {
    match event.field(field) {
        Some(DynSolValue::Address(a)) => Ok(*a),
        _ => Err(mismatch(field, "address")),
    }
}

/// [`EventDecoder`] bound to `RedeemScheduled`, producing the typed struct.
#[derive(Debug, Clone)]
pub struct RedeemScheduledDecoder {
    inner: EventDecoder,
}

impl RedeemScheduledDecoder {
    /// Bind from an ABI document that declares `RedeemScheduled`.
    pub fn from_abi_json(abi_json: &str) -> Result<Self, SchemaError> {
        Self::new(EventDecoder::from_abi_json(abi_json, REDEEM_SCHEDULED)?)
    }

    /// Wrap a bound decoder after checking it carries every field the
    /// typed struct needs.
    pub fn new(inner: EventDecoder) -> Result<Self, SchemaError> {
        let indexed = inner.indexed_fields();
        let data = inner.data_fields();
        if let Some(missing) = FIELDS
            .iter()
            .find(|f| !indexed.contains(*f) && !data.contains(*f))
        {
            return Err(SchemaError::MissingField {
                event: inner.name().to_string(),
                field: missing.to_string(),
            });
        }
        Ok(Self { inner })
    }

    /// The untyped decoder underneath.
    pub fn event_decoder(&self) -> &EventDecoder {
        &self.inner
    }

    pub fn matches(&self, log: &LogData) -> bool {
        self.inner.matches(log)
    }

    pub fn decode(&self, log: &LogData) -> Result<RedeemScheduled, EventDecodeError> {
        let event = self.inner.decode(log)?;
        RedeemScheduled::try_from(&event)
    }

    pub fn decode_log(&self, log: &Log) -> Result<RedeemScheduled, EventDecodeError> {
        self.decode(&log.data)
    }
}
