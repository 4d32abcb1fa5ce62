//! Transaction records as delivered by the node.
//!
//! Every field the explorer does not interpret is kept in an `extra` map so a
//! record can be re-serialized without losing data.

use crate::amount::{de_u64, Amount};
use crate::block::BlockHeader;
use crate::bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kinds of transaction the explorer knows how to project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    Coinbase,
    Transfer,
    TransferToken,
    Token,
    Slave,
    LatticePk,
    Message,
    MultiSigCreate,
    MultiSigVote,
    MultiSigSpend,
}

impl TxKind {
    pub const ALL: [TxKind; 10] = [
        TxKind::Coinbase,
        TxKind::Transfer,
        TxKind::TransferToken,
        TxKind::Token,
        TxKind::Slave,
        TxKind::LatticePk,
        TxKind::Message,
        TxKind::MultiSigCreate,
        TxKind::MultiSigVote,
        TxKind::MultiSigSpend,
    ];

    /// Parse a `transactionType` tag. Both the node spelling and the long form
    /// are accepted for token creation and lattice keys.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "coinbase" => Some(Self::Coinbase),
            "transfer" => Some(Self::Transfer),
            "transfer_token" => Some(Self::TransferToken),
            "token" | "token_create" => Some(Self::Token),
            "slave" => Some(Self::Slave),
            "latticePK" | "lattice_pk" => Some(Self::LatticePk),
            "message" => Some(Self::Message),
            "multi_sig_create" => Some(Self::MultiSigCreate),
            "multi_sig_vote" => Some(Self::MultiSigVote),
            "multi_sig_spend" => Some(Self::MultiSigSpend),
            _ => None,
        }
    }

    /// The node's tag, which is also the name of the payload field.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Coinbase => "coinbase",
            Self::Transfer => "transfer",
            Self::TransferToken => "transfer_token",
            Self::Token => "token",
            Self::Slave => "slave",
            Self::LatticePk => "latticePK",
            Self::Message => "message",
            Self::MultiSigCreate => "multi_sig_create",
            Self::MultiSigVote => "multi_sig_vote",
            Self::MultiSigSpend => "multi_sig_spend",
        }
    }

    /// Explorer label. Message transactions are relabelled by their payload.
    pub fn label(self) -> &'static str {
        match self {
            Self::Coinbase => "COINBASE",
            Self::Transfer => "TRANSFER",
            Self::TransferToken => "TRANSFER TOKEN",
            Self::Token => "CREATE TOKEN",
            Self::Slave => "SLAVE",
            Self::LatticePk => "LATTICE PK",
            Self::Message => "MESSAGE",
            Self::MultiSigCreate => "MULTISIG_CREATE",
            Self::MultiSigVote => "MULTISIG_VOTE",
            Self::MultiSigSpend => "MULTISIG_SPEND",
        }
    }

    /// Coinbase transactions only ever exist inside a block.
    pub fn is_confirmed_only(self) -> bool {
        matches!(self, Self::Coinbase)
    }
}

/// An address paired with an amount.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressAmount {
    pub address: Bytes,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Coinbase {
    pub addr_to: Bytes,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transfer {
    pub addrs_to: Vec<Bytes>,
    pub amounts: Vec<Amount>,
    pub message_data: Bytes,
}

/// Token creation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Token {
    pub symbol: Bytes,
    pub name: Bytes,
    pub owner: Bytes,
    #[serde(deserialize_with = "de_u64")]
    pub decimals: u64,
    pub initial_balances: Vec<AddressAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferToken {
    pub token_txhash: Bytes,
    pub addrs_to: Vec<Bytes>,
    pub amounts: Vec<Amount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Slave {
    pub slave_pks: Vec<Bytes>,
    pub access_types: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticePk {
    pub pk1: Bytes,
    pub pk2: Bytes,
    pub pk3: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub message_hash: Bytes,
    pub addr_to: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiSigCreate {
    pub signatories: Vec<Bytes>,
    pub weights: Vec<u32>,
    pub threshold: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiSigSpend {
    pub multi_sig_address: Bytes,
    pub addrs_to: Vec<Bytes>,
    pub amounts: Vec<Amount>,
    #[serde(deserialize_with = "de_u64")]
    pub expiry_block_number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiSigVote {
    pub shared_key: Bytes,
    pub unvote: bool,
    pub prev_tx_hash: Bytes,
}

/// A transaction body. Exactly one payload field is expected to be present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub master_addr: Bytes,
    #[serde(default)]
    pub fee: Amount,
    #[serde(default)]
    pub public_key: Bytes,
    #[serde(default)]
    pub signature: Bytes,
    #[serde(default, deserialize_with = "de_u64")]
    pub nonce: u64,
    #[serde(default)]
    pub transaction_hash: Bytes,
    #[serde(rename = "transactionType", default)]
    pub transaction_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<Coinbase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<Transfer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_token: Option<TransferToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slave: Option<Slave>,
    #[serde(rename = "latticePK", default, skip_serializing_if = "Option::is_none")]
    pub lattice_pk: Option<LatticePk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_sig_create: Option<MultiSigCreate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_sig_vote: Option<MultiSigVote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_sig_spend: Option<MultiSigSpend>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// The declared kind, or the kind of the only payload present when the tag
    /// is empty. `None` for unrecognised tags.
    pub fn kind(&self) -> Option<TxKind> {
        if !self.transaction_type.is_empty() {
            return TxKind::from_tag(&self.transaction_type);
        }
        let mut present = TxKind::ALL.into_iter().filter(|k| self.has_payload(*k));
        match (present.next(), present.next()) {
            (Some(kind), None) => Some(kind),
            _ => None,
        }
    }

    /// Whether the payload field for `kind` is present.
    pub fn has_payload(&self, kind: TxKind) -> bool {
        match kind {
            TxKind::Coinbase => self.coinbase.is_some(),
            TxKind::Transfer => self.transfer.is_some(),
            TxKind::TransferToken => self.transfer_token.is_some(),
            TxKind::Token => self.token.is_some(),
            TxKind::Slave => self.slave.is_some(),
            TxKind::LatticePk => self.lattice_pk.is_some(),
            TxKind::Message => self.message.is_some(),
            TxKind::MultiSigCreate => self.multi_sig_create.is_some(),
            TxKind::MultiSigVote => self.multi_sig_vote.is_some(),
            TxKind::MultiSigSpend => self.multi_sig_spend.is_some(),
        }
    }
}

/// A transaction with its sender and, once mined, the header of its block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionExtended {
    #[serde(default)]
    pub header: Option<BlockHeader>,
    pub tx: Transaction,
    #[serde(default)]
    pub addr_from: Bytes,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionExtended {
    /// A transaction is confirmed once it is attached to a block header.
    pub fn is_confirmed(&self) -> bool {
        self.header.is_some()
    }
}

/// The node's answer to a transaction lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<bool>,
    pub transaction: TransactionExtended,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_roundtrip() {
        for kind in TxKind::ALL {
            assert_eq!(TxKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_tag_aliases() {
        assert_eq!(TxKind::from_tag("token_create"), Some(TxKind::Token));
        assert_eq!(TxKind::from_tag("lattice_pk"), Some(TxKind::LatticePk));
        assert_eq!(TxKind::from_tag("stake"), None);
    }

    #[test]
    fn test_only_coinbase_is_confirmed_only() {
        let confirmed_only: Vec<_> = TxKind::ALL
            .into_iter()
            .filter(|k| k.is_confirmed_only())
            .collect();
        assert_eq!(confirmed_only, vec![TxKind::Coinbase]);
    }

    #[test]
    fn test_deserialize_transfer() {
        let tx: Transaction = serde_json::from_value(json!({
            "master_addr": [],
            "fee": "100000000",
            "public_key": [1, 2],
            "signature": {"type": "Buffer", "data": [3]},
            "nonce": "7",
            "transaction_hash": [9, 9],
            "transactionType": "transfer",
            "transfer": {
                "addrs_to": [[1, 2, 3]],
                "amounts": [5, "6"],
                "message_data": []
            }
        }))
        .unwrap();

        assert_eq!(tx.kind(), Some(TxKind::Transfer));
        assert_eq!(tx.fee, Amount(100_000_000));
        assert_eq!(tx.nonce, 7);
        assert_eq!(tx.signature.as_slice(), &[3]);
        let transfer = tx.transfer.unwrap();
        assert_eq!(transfer.amounts, vec![Amount(5), Amount(6)]);
        assert!(tx.extra.is_empty());
    }

    #[test]
    fn test_kind_inferred_from_payload() {
        let tx: Transaction = serde_json::from_value(json!({
            "slave": {"slave_pks": [[1]], "access_types": [0]}
        }))
        .unwrap();
        assert_eq!(tx.kind(), Some(TxKind::Slave));
    }

    #[test]
    fn test_kind_unknown_tag() {
        let tx: Transaction = serde_json::from_value(json!({
            "transactionType": "proposal_create",
            "proposal_create": {"options": ["a", "b"]}
        }))
        .unwrap();
        assert_eq!(tx.kind(), None);
        assert!(tx.extra.contains_key("proposal_create"));
    }

    #[test]
    fn test_kind_ambiguous_without_tag() {
        let tx: Transaction = serde_json::from_value(json!({
            "slave": {},
            "message": {}
        }))
        .unwrap();
        assert_eq!(tx.kind(), None);
    }

    #[test]
    fn test_extended_confirmation() {
        let unconfirmed: TransactionExtended = serde_json::from_value(json!({
            "header": null,
            "tx": {"transactionType": "message", "message": {}},
            "addr_from": []
        }))
        .unwrap();
        assert!(!unconfirmed.is_confirmed());

        let confirmed: TransactionExtended = serde_json::from_value(json!({
            "header": {"hash_header": [1], "hash_header_prev": [2], "merkle_root": [3]},
            "tx": {"transactionType": "message", "message": {}},
            "addr_from": [],
            "size": 120
        }))
        .unwrap();
        assert!(confirmed.is_confirmed());
        assert_eq!(confirmed.extra["size"], json!(120));
    }

    #[test]
    fn test_response_roundtrip_keeps_unknown_fields() {
        let input = json!({
            "found": true,
            "confirmations": "4",
            "transaction": {
                "header": null,
                "tx": {
                    "master_addr": [],
                    "fee": 1,
                    "public_key": [],
                    "signature": [],
                    "nonce": 2,
                    "transaction_hash": [4],
                    "transactionType": "future_kind",
                    "future_kind": {"x": 1}
                },
                "addr_from": [5]
            }
        });
        let response: TransactionResponse = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap(), input);
    }
}
