//! Projection over untyped JSON values.
//!
//! Records of an unrecognised kind come back exactly as they went in.

use crate::projector::{Projector, Result};
use crate::token::TokenLookup;
use crate::view::Projection;
use qrl_explorer_core::{AccountResponse, BlockResponse, TransactionResponse};
use serde::Serialize;
use serde_json::Value;

const EXTENDED_TRANSACTIONS: &str = "/block_extended/extended_transactions";

fn finish<P: Serialize, R>(input: &Value, projection: Projection<P, R>) -> Result<Value> {
    match projection {
        Projection::Projected(p) => Ok(serde_json::to_value(p)?),
        Projection::Unprojected(_) => Ok(input.clone()),
    }
}

/// Project a transaction lookup response.
pub fn transaction(projector: &Projector, input: &Value) -> Result<Value> {
    let response: TransactionResponse = serde_json::from_value(input.clone())?;
    finish(input, projector.transaction(&response)?)
}

/// Project a transaction lookup response, resolving token transfers through
/// `tokens`.
pub fn transaction_with_tokens(
    projector: &Projector,
    input: &Value,
    tokens: &dyn TokenLookup,
) -> Result<Value> {
    let response: TransactionResponse = serde_json::from_value(input.clone())?;
    finish(input, projector.transaction_with_tokens(&response, tokens)?)
}

/// Project a token transfer with its token creation record.
pub fn transfer_token(projector: &Projector, token: &Value, transfer: &Value) -> Result<Value> {
    let token: TransactionResponse = serde_json::from_value(token.clone())?;
    let response: TransactionResponse = serde_json::from_value(transfer.clone())?;
    finish(transfer, projector.transfer_token(&token, &response)?)
}

/// Project a block lookup response.
///
/// Transactions of an unrecognised kind keep their original JSON in place.
pub fn block(projector: &Projector, input: &Value, tokens: &dyn TokenLookup) -> Result<Value> {
    let response: BlockResponse = serde_json::from_value(input.clone())?;
    let projected = projector.block(&response, tokens)?;
    let unprojected: Vec<bool> = projected
        .block_extended
        .extended_transactions
        .iter()
        .map(|p| !p.is_projected())
        .collect();

    let mut output = serde_json::to_value(projected)?;
    let originals = input.pointer(EXTENDED_TRANSACTIONS).and_then(Value::as_array);
    let slots = output
        .pointer_mut(EXTENDED_TRANSACTIONS)
        .and_then(Value::as_array_mut);
    if let (Some(originals), Some(slots)) = (originals, slots) {
        for ((slot, original), keep) in slots.iter_mut().zip(originals).zip(unprojected) {
            if keep {
                *slot = original.clone();
            }
        }
    }
    Ok(output)
}

/// Project an address lookup response.
pub fn account(projector: &Projector, input: &Value) -> Result<Value> {
    let response: AccountResponse = serde_json::from_value(input.clone())?;
    Ok(serde_json::to_value(projector.account(&response)?)?)
}
