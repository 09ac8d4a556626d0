//! # chainbridge-alias
//!
//! Address aliasing for calls that cross from the outer chain (L1) into the
//! rollup (L2).
//!
//! An L1 contract and an L2 contract may share an address without sharing an
//! owner. To keep an L1 sender from impersonating the L2 account at the same
//! address, the rollup shifts every L1 sender by a fixed offset:
//!
//! ```text
//! alias(a)   = (a + 0x1111000000000000000000000000000000001111) mod 2^160
//! unalias(a) = (a + 2^160 - offset)                             mod 2^160
//! ```
//!
//! Both directions are exact inverses over the whole 160-bit space.
//! [`tx_type`] says which inner-chain transactions carry an aliased sender.

pub mod offsets;
pub mod tx_type;

pub use offsets::{
    apply_l1_to_l2_alias, undo_l1_to_l2_alias, AliasConfig, AliasOffsets, DEFAULT_ALIAS_OFFSET,
};
pub use tx_type::{does_tx_type_alias, TxType};
