//! Block projection command.

use super::{print_json, read_json, Session};
use anyhow::{Context, Result};
use clap::Args;
use qrl_explorer_core::TransactionResponse;
use qrl_explorer_projector::{json, TokenMetadata};
use std::path::PathBuf;

#[derive(Args)]
pub struct BlockArgs {
    /// Block lookup response as JSON, or `-` for stdin
    file: PathBuf,

    /// Token creation lookup responses for token transfers in the block
    #[arg(short, long)]
    token: Vec<PathBuf>,
}

pub fn run(args: BlockArgs, ctx: &Session) -> Result<()> {
    let input = read_json(&args.file)?;

    let mut records = Vec::with_capacity(args.token.len());
    for path in &args.token {
        let record: TransactionResponse = serde_json::from_value(read_json(path)?)
            .with_context(|| format!("Invalid token record {}", path.display()))?;
        records.push(record);
    }
    let tokens = TokenMetadata::index(&records).context("Failed to read token records")?;

    let output = json::block(&ctx.projector, &input, &tokens)
        .with_context(|| format!("Failed to project {}", args.file.display()))?;
    print_json(&output, ctx.pretty)
}
