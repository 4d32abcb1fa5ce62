//! Account state representation.

use crate::bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An account's state as reported by the node.
///
/// Balances, nonces and counters are not interpreted and travel in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountState {
    #[serde(default)]
    pub address: Bytes,
    #[serde(default)]
    pub foundation_multi_sig_spend_txn_hash: Bytes,
    #[serde(default)]
    pub foundation_multi_sig_vote_txn_hash: Bytes,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The node's answer to an address lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountResponse {
    pub state: AccountState,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
