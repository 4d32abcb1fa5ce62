//! Message decoding command.

use super::{print_json, Session};
use anyhow::{Context, Result};
use clap::Args;
use qrl_explorer_core::message;

#[derive(Args)]
pub struct MessageArgs {
    /// Message payload in hex, with or without a 0x prefix
    payload: String,
}

pub fn run(args: MessageArgs, ctx: &Session) -> Result<()> {
    let digits = args.payload.trim();
    let digits = digits.strip_prefix("0x").unwrap_or(digits);
    let bytes = hex::decode(digits).with_context(|| format!("Invalid hex payload: {}", digits))?;
    print_json(&message::decode(&bytes), ctx.pretty)
}
