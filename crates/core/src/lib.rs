//! Core primitives for qrl-explorer.
//!
//! This crate provides the building blocks the projectors are made of:
//! - Byte/hex helpers and the `Bytes` wire type
//! - Fixed-point amount formatting
//! - The address codec (raw bytes, `Q` hex, bech32 text)
//! - The message payload decoder
//! - Transaction, block and account records as delivered by the node

pub mod account;
pub mod address;
pub mod amount;
pub mod block;
pub mod bytes;
pub mod hash;
pub mod message;
pub mod transaction;

// Re-export commonly used types at the crate root
pub use account::{AccountResponse, AccountState};
pub use address::{AddressError, AddressForms, RawAddress};
pub use amount::{format_units, Amount, QUANTA_DECIMALS, SHOR_PER_QUANTA};
pub use block::{BlockExtended, BlockHeader, BlockResponse};
pub use bytes::Bytes;
pub use hash::{sha256, sha256_concat, Hash, H256};
pub use message::{DecodedMessage, HashFunction, KeybaseAction, MessageDetail};
pub use transaction::{Transaction, TransactionExtended, TransactionResponse, TxKind};
