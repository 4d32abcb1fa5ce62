//! Transaction projection.
//!
//! Every recognised kind goes through the same steps: render the body with hex
//! and decimal fields, then attach an explorer summary with both address forms.

use crate::projector::{ProjectionError, Projector, Result};
use crate::token::{NoTokens, TokenLookup, TokenMetadata};
use crate::view::*;
use qrl_explorer_core::amount::{format_units, total, MAX_TOKEN_DECIMALS, QUANTA_DECIMALS};
use qrl_explorer_core::{message, RawAddress, Transaction, TransactionExtended};
use qrl_explorer_core::{TransactionResponse, TxKind};
use tracing::{debug, warn};

/// The kind-specific parts of a projected transaction.
struct KindParts {
    payload: PayloadView,
    detail: Option<ExplorerDetail>,
    label: &'static str,
    amount: Option<String>,
    total_transferred: Option<String>,
    to: Option<RawAddress>,
}

impl KindParts {
    fn new(payload: PayloadView, label: &'static str) -> Self {
        Self {
            payload,
            detail: None,
            label,
            amount: None,
            total_transferred: None,
            to: None,
        }
    }
}

fn missing(kind: TxKind) -> ProjectionError {
    ProjectionError::MissingPayload { kind: kind.tag() }
}

impl Projector {
    /// Project a transaction lookup response.
    ///
    /// Token transfers need their token's metadata and fail here; use
    /// [`Projector::transfer_token`] or [`Projector::transaction_with_tokens`].
    pub fn transaction(&self, response: &TransactionResponse) -> Result<ResponseProjection> {
        self.transaction_with_tokens(response, &NoTokens)
    }

    /// Project a transaction lookup response, resolving token transfers
    /// through `tokens`.
    pub fn transaction_with_tokens(
        &self,
        response: &TransactionResponse,
        tokens: &dyn TokenLookup,
    ) -> Result<ResponseProjection> {
        let ext = &response.transaction;
        let projection = self.extended(ext, ext.is_confirmed(), tokens)?;
        Ok(self.wrap_response(response, projection))
    }

    /// Project a token transfer together with the creation record of its token.
    pub fn transfer_token(
        &self,
        token: &TransactionResponse,
        transfer: &TransactionResponse,
    ) -> Result<ResponseProjection> {
        let metadata = TokenMetadata::from_transaction(&token.transaction.tx)?;
        let ext = &transfer.transaction;
        if ext.tx.kind() != Some(TxKind::TransferToken) {
            return Err(ProjectionError::UnexpectedKind {
                expected: TxKind::TransferToken.tag(),
                found: ext.tx.transaction_type.clone(),
            });
        }
        let projection = self.project(ext, ext.is_confirmed(), Some(&metadata))?;
        Ok(self.wrap_response(transfer, projection))
    }

    /// Project one extended transaction.
    ///
    /// `confirmed` is decided by the caller: a lookup response is confirmed
    /// when it carries a header, while every transaction in a block is.
    pub fn extended(
        &self,
        ext: &TransactionExtended,
        confirmed: bool,
        tokens: &dyn TokenLookup,
    ) -> Result<ExtendedProjection> {
        let token = ext
            .tx
            .transfer_token
            .as_ref()
            .and_then(|t| tokens.token(&t.token_txhash));
        self.project(ext, confirmed, token)
    }

    fn wrap_response(
        &self,
        response: &TransactionResponse,
        projection: ExtendedProjection,
    ) -> ResponseProjection {
        match projection {
            Projection::Projected(transaction) => Projection::Projected(ProjectedTransaction {
                found: response.found,
                transaction,
                extra: response.extra.clone(),
            }),
            Projection::Unprojected(_) => Projection::Unprojected(response.clone()),
        }
    }

    fn project(
        &self,
        ext: &TransactionExtended,
        confirmed: bool,
        token: Option<&TokenMetadata>,
    ) -> Result<ExtendedProjection> {
        let tx = &ext.tx;
        let Some(kind) = tx.kind() else {
            warn!(
                transaction_type = %tx.transaction_type,
                "unrecognised transaction kind, passing record through"
            );
            return Ok(Projection::Unprojected(ext.clone()));
        };
        if kind.is_confirmed_only() && !confirmed {
            return Err(ProjectionError::UnconfirmedCoinbase(
                tx.transaction_hash.to_hex(),
            ));
        }
        debug!(kind = kind.tag(), confirmed, "projecting transaction");

        let parts = match kind {
            TxKind::Coinbase => self.coinbase(tx)?,
            TxKind::Transfer => self.transfer(tx)?,
            TxKind::TransferToken => self.transfer_token_parts(tx, token)?,
            TxKind::Token => self.token_create(tx)?,
            TxKind::Slave => slave(tx)?,
            TxKind::LatticePk => lattice_pk(tx)?,
            TxKind::Message => self.message(tx)?,
            TxKind::MultiSigCreate => self.multi_sig_create(tx)?,
            TxKind::MultiSigVote => multi_sig_vote(tx)?,
            TxKind::MultiSigSpend => self.multi_sig_spend(tx)?,
        };

        // Coinbase records have no signer: the sender is the coinbase
        // placeholder, which is transcoded without validation.
        let sender = match kind {
            TxKind::Coinbase => None,
            _ => Some(self.address(&ext.addr_from)?),
        };
        let addr_from = match &sender {
            Some(address) => address.to_hex(),
            None if ext.addr_from.is_empty() => String::new(),
            None => format!("Q{}", ext.addr_from.to_hex()),
        };

        let explorer = ExplorerView {
            from_hex: sender.as_ref().map(RawAddress::to_hex),
            from_b32: sender.as_ref().map(RawAddress::to_text),
            to_hex: parts.to.as_ref().map(RawAddress::to_hex),
            to_b32: parts.to.as_ref().map(RawAddress::to_text),
            signature: sender.as_ref().map(|_| tx.signature.to_hex()),
            public_key: sender.as_ref().map(|_| tx.public_key.to_hex()),
            label: parts.label,
            confirmed,
            detail: parts.detail,
        };

        Ok(Projection::Projected(TransactionView {
            header: ext.header.as_ref().map(HeaderView::from),
            tx: TxView {
                master_addr: self.optional_hex(&tx.master_addr)?,
                fee: tx.fee.to_quanta(),
                public_key: tx.public_key.to_hex(),
                signature: tx.signature.to_hex(),
                nonce: tx.nonce,
                transaction_hash: tx.transaction_hash.to_hex(),
                transaction_type: if tx.transaction_type.is_empty() {
                    kind.tag().to_string()
                } else {
                    tx.transaction_type.clone()
                },
                amount: parts.amount,
                total_transferred: parts.total_transferred,
                payload: parts.payload,
                extra: tx.extra.clone(),
            },
            addr_from,
            extra: ext.extra.clone(),
            explorer,
        }))
    }

    fn coinbase(&self, tx: &Transaction) -> Result<KindParts> {
        let p = tx.coinbase.as_ref().ok_or_else(|| missing(TxKind::Coinbase))?;
        let to = self.address(&p.addr_to)?;
        let amount = p.amount.to_quanta();
        let payload = PayloadView::Coinbase(CoinbaseView {
            addr_to: to.to_hex(),
            amount: amount.clone(),
        });
        Ok(KindParts {
            detail: Some(ExplorerDetail::Coinbase {
                amount: amount.clone(),
            }),
            amount: Some(amount),
            to: Some(to),
            ..KindParts::new(payload, TxKind::Coinbase.label())
        })
    }

    fn transfer(&self, tx: &Transaction) -> Result<KindParts> {
        let p = tx.transfer.as_ref().ok_or_else(|| missing(TxKind::Transfer))?;
        let outputs = self.outputs(
            TxKind::Transfer.tag(),
            &p.addrs_to,
            &p.amounts,
            QUANTA_DECIMALS,
        )?;
        let total_transferred = format_units(total(&p.amounts), QUANTA_DECIMALS);
        let payload = PayloadView::Transfer(TransferView {
            addrs_to: outputs.iter().map(|o| o.address_hex.clone()).collect(),
            amounts: outputs.iter().map(|o| o.amount.clone()).collect(),
            message_data: p.message_data.to_text(),
        });
        Ok(KindParts {
            amount: Some(total_transferred.clone()),
            detail: Some(ExplorerDetail::Transfer {
                outputs,
                total_transferred,
            }),
            ..KindParts::new(payload, TxKind::Transfer.label())
        })
    }

    fn transfer_token_parts(
        &self,
        tx: &Transaction,
        token: Option<&TokenMetadata>,
    ) -> Result<KindParts> {
        let p = tx
            .transfer_token
            .as_ref()
            .ok_or_else(|| missing(TxKind::TransferToken))?;
        let token = token.ok_or_else(|| ProjectionError::MissingTokenMetadata {
            token_txhash: p.token_txhash.to_hex(),
        })?;
        if token.txhash.is_empty() || token.txhash != p.token_txhash.as_slice() {
            return Err(ProjectionError::TokenMismatch {
                expected: p.token_txhash.to_hex(),
                found: token.txhash_hex(),
            });
        }
        if token.decimals > MAX_TOKEN_DECIMALS {
            return Err(ProjectionError::TooManyDecimals(token.decimals));
        }
        let decimals = token.decimals as u32;

        let outputs = self.outputs(
            TxKind::TransferToken.tag(),
            &p.addrs_to,
            &p.amounts,
            decimals,
        )?;
        let total_transferred = format_units(total(&p.amounts), decimals);
        let payload = PayloadView::TransferToken(TransferTokenView {
            token_txhash: p.token_txhash.to_hex(),
            addrs_to: outputs.iter().map(|o| o.address_hex.clone()).collect(),
            amounts: outputs.iter().map(|o| o.amount.clone()).collect(),
        });
        Ok(KindParts {
            total_transferred: Some(total_transferred.clone()),
            detail: Some(ExplorerDetail::TransferToken {
                outputs,
                token_txhash: p.token_txhash.to_hex(),
                total_transferred,
                symbol: token.symbol.clone(),
                name: token.name.clone(),
                decimals: token.decimals,
            }),
            ..KindParts::new(payload, TxKind::TransferToken.label())
        })
    }

    fn token_create(&self, tx: &Transaction) -> Result<KindParts> {
        // Validates the kind and the decimal count.
        let metadata = TokenMetadata::from_transaction(tx)?;
        let p = tx.token.as_ref().ok_or_else(|| missing(TxKind::Token))?;
        let decimals = metadata.decimals as u32;

        let owner = self.address(&p.owner)?;
        let addresses: Vec<_> = p.initial_balances.iter().map(|b| b.address.clone()).collect();
        let amounts: Vec<_> = p.initial_balances.iter().map(|b| b.amount).collect();
        let initial_balances = self.outputs(TxKind::Token.tag(), &addresses, &amounts, decimals)?;

        let payload = PayloadView::Token(TokenView {
            symbol: metadata.symbol.clone(),
            name: metadata.name.clone(),
            owner: owner.to_hex(),
            decimals: metadata.decimals,
            initial_balances: initial_balances
                .iter()
                .map(|o| AddressAmountView {
                    address: o.address_hex.clone(),
                    amount: o.amount.clone(),
                })
                .collect(),
        });
        Ok(KindParts {
            detail: Some(ExplorerDetail::Token {
                symbol: metadata.symbol,
                name: metadata.name,
                decimals: metadata.decimals,
                owner_hex: owner.to_hex(),
                owner_b32: owner.to_text(),
                initial_balances,
            }),
            ..KindParts::new(payload, TxKind::Token.label())
        })
    }

    fn message(&self, tx: &Transaction) -> Result<KindParts> {
        let p = tx.message.as_ref().ok_or_else(|| missing(TxKind::Message))?;
        let decoded = message::decode(&p.message_hash);
        if decoded.detail.is_partial() {
            warn!(raw = %decoded.raw, "message uses an unknown notarisation hash function");
        }
        let to = if p.addr_to.is_empty() {
            None
        } else {
            Some(self.address(&p.addr_to)?)
        };
        let payload = PayloadView::Message(MessageView {
            message_hash: p.message_hash.to_hex(),
            addr_to: to.as_ref().map(RawAddress::to_hex).unwrap_or_default(),
        });
        Ok(KindParts {
            to,
            detail: Some(ExplorerDetail::Message(MessageExplorer {
                detail: decoded.detail,
                raw: decoded.raw,
            })),
            ..KindParts::new(payload, decoded.label)
        })
    }

    fn multi_sig_create(&self, tx: &Transaction) -> Result<KindParts> {
        let p = tx
            .multi_sig_create
            .as_ref()
            .ok_or_else(|| missing(TxKind::MultiSigCreate))?;
        let multisig = RawAddress::multisig(&tx.transaction_hash);
        let payload = PayloadView::MultiSigCreate(MultiSigCreateView {
            signatories: self.hex_list(&p.signatories)?,
            weights: p.weights.clone(),
            threshold: p.threshold,
        });
        Ok(KindParts {
            detail: Some(ExplorerDetail::MultiSigCreate {
                multisig_address: multisig.to_hex(),
                multisig_address_b32: multisig.to_text(),
            }),
            ..KindParts::new(payload, TxKind::MultiSigCreate.label())
        })
    }

    fn multi_sig_spend(&self, tx: &Transaction) -> Result<KindParts> {
        let p = tx
            .multi_sig_spend
            .as_ref()
            .ok_or_else(|| missing(TxKind::MultiSigSpend))?;
        let multisig = self.address(&p.multi_sig_address)?;
        let outputs = self.outputs(
            TxKind::MultiSigSpend.tag(),
            &p.addrs_to,
            &p.amounts,
            QUANTA_DECIMALS,
        )?;
        let total_transferred = format_units(total(&p.amounts), QUANTA_DECIMALS);
        let payload = PayloadView::MultiSigSpend(MultiSigSpendView {
            multi_sig_address: multisig.to_hex(),
            addrs_to: outputs.iter().map(|o| o.address_hex.clone()).collect(),
            amounts: outputs.iter().map(|o| o.amount.clone()).collect(),
            expiry_block_number: p.expiry_block_number,
        });
        Ok(KindParts {
            total_transferred: Some(total_transferred.clone()),
            detail: Some(ExplorerDetail::MultiSigSpend {
                multi_sig_address_hex: multisig.to_hex(),
                multi_sig_address_b32: multisig.to_text(),
                outputs,
                total_transferred,
            }),
            ..KindParts::new(payload, TxKind::MultiSigSpend.label())
        })
    }
}

fn slave(tx: &Transaction) -> Result<KindParts> {
    let p = tx.slave.as_ref().ok_or_else(|| missing(TxKind::Slave))?;
    let payload = PayloadView::Slave(SlaveView {
        slave_pks: p.slave_pks.iter().map(|pk| pk.to_hex()).collect(),
        access_types: p.access_types.clone(),
    });
    Ok(KindParts::new(payload, TxKind::Slave.label()))
}

fn lattice_pk(tx: &Transaction) -> Result<KindParts> {
    let p = tx.lattice_pk.as_ref().ok_or_else(|| missing(TxKind::LatticePk))?;
    let payload = PayloadView::LatticePk(LatticePkView {
        pk1: p.pk1.to_hex(),
        pk2: p.pk2.to_hex(),
        pk3: p.pk3.to_hex(),
    });
    Ok(KindParts::new(payload, TxKind::LatticePk.label()))
}

fn multi_sig_vote(tx: &Transaction) -> Result<KindParts> {
    let p = tx
        .multi_sig_vote
        .as_ref()
        .ok_or_else(|| missing(TxKind::MultiSigVote))?;
    let payload = PayloadView::MultiSigVote(MultiSigVoteView {
        shared_key: p.shared_key.to_hex(),
        unvote: p.unvote,
        prev_tx_hash: p.prev_tx_hash.to_hex(),
    });
    Ok(KindParts::new(payload, TxKind::MultiSigVote.label()))
}
