//! The projector and the pieces shared by every record kind.
//!
//! A [`Projector`] is a small value holding its configuration. Each record
//! family gets its own `impl Projector` block in the sibling modules.

use crate::view::OutputView;
use qrl_explorer_core::amount::Amount;
use qrl_explorer_core::{AddressError, Bytes, RawAddress};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while projecting a record.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    #[error("coinbase transaction {0} is not part of a block")]
    UnconfirmedCoinbase(String),

    #[error("{kind} transaction has no {kind} payload")]
    MissingPayload { kind: &'static str },

    #[error("no token metadata for token {token_txhash}")]
    MissingTokenMetadata { token_txhash: String },

    #[error("token record {found} does not match token_txhash {expected}")]
    TokenMismatch { expected: String, found: String },

    #[error("expected a {expected} transaction, found {found:?}")]
    UnexpectedKind {
        expected: &'static str,
        found: String,
    },

    #[error("{kind}: {addresses} destination addresses but {amounts} amounts")]
    LengthMismatch {
        kind: &'static str,
        addresses: usize,
        amounts: usize,
    },

    #[error("token declares {0} decimals, at most 19 are allowed")]
    TooManyDecimals(u64),

    #[error("invalid record: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ProjectionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Projector configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Reject addresses whose stored checksum does not match.
    ///
    /// Off by default: the node is trusted and addresses are transcoded as-is.
    pub strict_checksums: bool,
}

/// Turns node records into explorer display records.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Projector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Validate raw address bytes.
    pub(crate) fn address(&self, raw: &[u8]) -> Result<RawAddress> {
        let address = RawAddress::from_bytes(raw)?;
        if self.config.strict_checksums {
            address.verify_checksum()?;
        }
        Ok(address)
    }

    /// Hex form of an address field that may be left empty.
    pub(crate) fn optional_hex(&self, raw: &[u8]) -> Result<String> {
        if raw.is_empty() {
            return Ok(String::new());
        }
        Ok(self.address(raw)?.to_hex())
    }

    pub(crate) fn hex_list(&self, addresses: &[Bytes]) -> Result<Vec<String>> {
        addresses
            .iter()
            .map(|a| Ok(self.address(a)?.to_hex()))
            .collect()
    }

    /// Pair destinations with amounts, rendering amounts with `decimals` places.
    pub(crate) fn outputs(
        &self,
        kind: &'static str,
        addresses: &[Bytes],
        amounts: &[Amount],
        decimals: u32,
    ) -> Result<Vec<OutputView>> {
        if addresses.len() != amounts.len() {
            return Err(ProjectionError::LengthMismatch {
                kind,
                addresses: addresses.len(),
                amounts: amounts.len(),
            });
        }
        addresses
            .iter()
            .zip(amounts)
            .map(|(raw, amount)| {
                let address = self.address(raw)?;
                Ok(OutputView {
                    address_hex: address.to_hex(),
                    address_b32: address.to_text(),
                    amount: amount.format(decimals),
                })
            })
            .collect()
    }
}
