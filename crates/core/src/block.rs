//! Block records as delivered by the node.

use crate::bytes::Bytes;
use crate::transaction::TransactionExtended;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The header of a block. Only the binary fields are interpreted; counters
/// such as `block_number` or `reward_fee` are carried in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub hash_header: Bytes,
    #[serde(default)]
    pub hash_header_prev: Bytes,
    #[serde(default)]
    pub merkle_root: Bytes,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlockHeader {
    /// Block height, when the node supplied one.
    pub fn block_number(&self) -> Option<u64> {
        match self.extra.get("block_number")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// A block with its transactions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockExtended {
    #[serde(default)]
    pub header: BlockHeader,
    #[serde(default)]
    pub extended_transactions: Vec<TransactionExtended>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlockExtended {
    /// Get the number of transactions in this block.
    pub fn tx_count(&self) -> usize {
        self.extended_transactions.len()
    }
}

/// The node's answer to a block lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockResponse {
    pub block_extended: BlockExtended,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_block() {
        let block: BlockResponse = serde_json::from_value(json!({
            "block_extended": {
                "header": {
                    "hash_header": [1, 2],
                    "block_number": "42",
                    "hash_header_prev": [3],
                    "merkle_root": [4],
                    "reward_fee": 10
                },
                "extended_transactions": [
                    {"tx": {"transactionType": "coinbase", "coinbase": {}}, "addr_from": []}
                ],
                "size": 900
            }
        }))
        .unwrap();

        let header = &block.block_extended.header;
        assert_eq!(header.hash_header.as_slice(), &[1, 2]);
        assert_eq!(header.block_number(), Some(42));
        assert_eq!(header.extra["reward_fee"], json!(10));
        assert_eq!(block.block_extended.tx_count(), 1);
        assert_eq!(block.block_extended.extra["size"], json!(900));
    }

    #[test]
    fn test_block_number_absent() {
        assert_eq!(BlockHeader::default().block_number(), None);
    }
}
