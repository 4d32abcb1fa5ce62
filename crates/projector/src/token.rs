//! Token metadata used to render token transfers.

use crate::projector::{ProjectionError, Result};
use qrl_explorer_core::amount::MAX_TOKEN_DECIMALS;
use qrl_explorer_core::{Transaction, TransactionResponse, TxKind};
use std::collections::HashMap;
use std::hash::BuildHasher;

/// What a token transfer needs to know about its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Hash of the token creation transaction.
    pub txhash: Vec<u8>,
    pub symbol: String,
    pub name: String,
    pub decimals: u64,
}

impl TokenMetadata {
    /// Read the metadata out of a token creation transaction.
    pub fn from_transaction(tx: &Transaction) -> Result<Self> {
        let kind = tx.kind();
        if kind != Some(TxKind::Token) {
            return Err(ProjectionError::UnexpectedKind {
                expected: TxKind::Token.tag(),
                found: tx.transaction_type.clone(),
            });
        }
        let token = tx.token.as_ref().ok_or(ProjectionError::MissingPayload {
            kind: TxKind::Token.tag(),
        })?;
        if token.decimals > MAX_TOKEN_DECIMALS {
            return Err(ProjectionError::TooManyDecimals(token.decimals));
        }
        Ok(Self {
            txhash: tx.transaction_hash.to_vec(),
            symbol: token.symbol.to_text(),
            name: token.name.to_text(),
            decimals: token.decimals,
        })
    }

    /// Index token creation lookups by transaction hash.
    pub fn index<'a>(
        records: impl IntoIterator<Item = &'a TransactionResponse>,
    ) -> Result<HashMap<Vec<u8>, TokenMetadata>> {
        records
            .into_iter()
            .map(|r| -> Result<(Vec<u8>, TokenMetadata)> {
                let token = Self::from_transaction(&r.transaction.tx)?;
                Ok((token.txhash.clone(), token))
            })
            .collect()
    }

    pub fn txhash_hex(&self) -> String {
        hex::encode(&self.txhash)
    }
}

/// Source of token metadata, keyed by the token creation hash.
pub trait TokenLookup {
    fn token(&self, token_txhash: &[u8]) -> Option<&TokenMetadata>;
}

impl<S: BuildHasher> TokenLookup for HashMap<Vec<u8>, TokenMetadata, S> {
    fn token(&self, token_txhash: &[u8]) -> Option<&TokenMetadata> {
        self.get(token_txhash)
    }
}

impl TokenLookup for TokenMetadata {
    fn token(&self, token_txhash: &[u8]) -> Option<&TokenMetadata> {
        (self.txhash == token_txhash).then_some(self)
    }
}

/// A lookup that knows no tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTokens;

impl TokenLookup for NoTokens {
    fn token(&self, _token_txhash: &[u8]) -> Option<&TokenMetadata> {
        None
    }
}

/// Consult `first`, then fall back to `second`.
pub(crate) struct Layered<'a> {
    pub first: &'a dyn TokenLookup,
    pub second: &'a dyn TokenLookup,
}

impl TokenLookup for Layered<'_> {
    fn token(&self, token_txhash: &[u8]) -> Option<&TokenMetadata> {
        self.first
            .token(token_txhash)
            .or_else(|| self.second.token(token_txhash))
    }
}
