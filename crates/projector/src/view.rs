//! Display records produced by the projectors.
//!
//! These types only serialize. Field names follow the JSON consumed by the
//! explorer front end, which is why several of them are camel case.

use qrl_explorer_core::{BlockHeader, MessageDetail, TransactionExtended, TransactionResponse};
use serde::Serialize;
use serde_json::{Map, Value};

/// Result of running a projector over one record.
///
/// Records of an unrecognised kind are handed back unprojected, so consumers can
/// tell them apart by the missing `explorer` field. `Unprojected` holds the
/// decoded record: it serializes with every known field filled in and bytes as
/// arrays. The [`json`](crate::json) entry points return the input JSON for
/// such records instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Projection<P, R> {
    Projected(P),
    Unprojected(R),
}

impl<P, R> Projection<P, R> {
    pub fn is_projected(&self) -> bool {
        matches!(self, Self::Projected(_))
    }

    pub fn projected(&self) -> Option<&P> {
        match self {
            Self::Projected(p) => Some(p),
            Self::Unprojected(_) => None,
        }
    }
}

/// Projection of a transaction lookup response.
pub type ResponseProjection = Projection<ProjectedTransaction, TransactionResponse>;

/// Projection of a single extended transaction, e.g. inside a block.
pub type ExtendedProjection = Projection<TransactionView, TransactionExtended>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub hash_header: String,
    pub hash_header_prev: String,
    pub merkle_root: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&BlockHeader> for HeaderView {
    fn from(header: &BlockHeader) -> Self {
        Self {
            hash_header: header.hash_header.to_hex(),
            hash_header_prev: header.hash_header_prev.to_hex(),
            merkle_root: header.merkle_root.to_hex(),
            extra: header.extra.clone(),
        }
    }
}

/// One destination of a transfer, with both address forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputView {
    pub address_hex: String,
    pub address_b32: String,
    pub amount: String,
}

/// An address and amount inside a transaction body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressAmountView {
    pub address: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinbaseView {
    pub addr_to: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferView {
    pub addrs_to: Vec<String>,
    pub amounts: Vec<String>,
    pub message_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenView {
    pub symbol: String,
    pub name: String,
    pub owner: String,
    pub decimals: u64,
    pub initial_balances: Vec<AddressAmountView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferTokenView {
    pub token_txhash: String,
    pub addrs_to: Vec<String>,
    pub amounts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlaveView {
    pub slave_pks: Vec<String>,
    pub access_types: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatticePkView {
    pub pk1: String,
    pub pk2: String,
    pub pk3: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub message_hash: String,
    pub addr_to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiSigCreateView {
    pub signatories: Vec<String>,
    pub weights: Vec<u32>,
    pub threshold: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiSigVoteView {
    pub shared_key: String,
    pub unvote: bool,
    pub prev_tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiSigSpendView {
    pub multi_sig_address: String,
    pub addrs_to: Vec<String>,
    pub amounts: Vec<String>,
    pub expiry_block_number: u64,
}

/// The kind-specific part of a transaction body, keyed by the kind's tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadView {
    Coinbase(CoinbaseView),
    Transfer(TransferView),
    TransferToken(TransferTokenView),
    Token(TokenView),
    Slave(SlaveView),
    #[serde(rename = "latticePK")]
    LatticePk(LatticePkView),
    Message(MessageView),
    MultiSigCreate(MultiSigCreateView),
    MultiSigVote(MultiSigVoteView),
    MultiSigSpend(MultiSigSpendView),
}

/// A transaction body with binary fields in hex and amounts in decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxView {
    pub master_addr: String,
    pub fee: String,
    pub public_key: String,
    pub signature: String,
    pub nonce: u64,
    pub transaction_hash: String,
    #[serde(rename = "transactionType")]
    pub transaction_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(rename = "totalTransferred", skip_serializing_if = "Option::is_none")]
    pub total_transferred: Option<String>,
    #[serde(flatten)]
    pub payload: PayloadView,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A decoded message payload as shown in the explorer summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageExplorer {
    #[serde(flatten)]
    pub detail: MessageDetail,
    pub raw: String,
}

/// Kind-specific explorer fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExplorerDetail {
    Transfer {
        outputs: Vec<OutputView>,
        #[serde(rename = "totalTransferred")]
        total_transferred: String,
    },
    TransferToken {
        outputs: Vec<OutputView>,
        token_txhash: String,
        #[serde(rename = "totalTransferred")]
        total_transferred: String,
        symbol: String,
        name: String,
        decimals: u64,
    },
    Token {
        symbol: String,
        name: String,
        decimals: u64,
        owner_hex: String,
        owner_b32: String,
        #[serde(rename = "initialBalances")]
        initial_balances: Vec<OutputView>,
    },
    Coinbase {
        amount: String,
    },
    Message(MessageExplorer),
    MultiSigCreate {
        #[serde(rename = "multisigAddress")]
        multisig_address: String,
        #[serde(rename = "multisigAddress_b32")]
        multisig_address_b32: String,
    },
    MultiSigSpend {
        multi_sig_address_hex: String,
        multi_sig_address_b32: String,
        outputs: Vec<OutputView>,
        #[serde(rename = "totalTransferred")]
        total_transferred: String,
    },
}

/// The explorer summary of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_b32: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_b32: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(rename = "publicKey", skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(rename = "type")]
    pub label: &'static str,
    pub confirmed: bool,
    #[serde(flatten)]
    pub detail: Option<ExplorerDetail>,
}

/// An extended transaction with its explorer summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    pub header: Option<HeaderView>,
    pub tx: TxView,
    pub addr_from: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub explorer: ExplorerView,
}

/// A projected transaction lookup response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<bool>,
    pub transaction: TransactionView,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockView {
    pub header: HeaderView,
    pub extended_transactions: Vec<ExtendedProjection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A projected block lookup response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedBlock {
    pub block_extended: BlockView,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountView {
    pub address: String,
    pub address_b32: String,
    pub foundation_multi_sig_spend_txn_hash: String,
    pub foundation_multi_sig_vote_txn_hash: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A projected address lookup response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedAccount {
    pub state: AccountView,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
