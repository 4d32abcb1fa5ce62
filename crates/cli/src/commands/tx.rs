//! Transaction projection command.

use super::{print_json, read_json, Session};
use anyhow::{Context, Result};
use clap::Args;
use qrl_explorer_projector::json;
use std::path::PathBuf;

#[derive(Args)]
pub struct TxArgs {
    /// Transaction lookup response as JSON, or `-` for stdin
    file: PathBuf,

    /// Token creation lookup response, required for token transfers
    #[arg(short, long)]
    token: Option<PathBuf>,
}

pub fn run(args: TxArgs, ctx: &Session) -> Result<()> {
    let input = read_json(&args.file)?;
    let output = match &args.token {
        Some(token_file) => {
            let token = read_json(token_file)?;
            json::transfer_token(&ctx.projector, &token, &input)
        }
        None => json::transaction(&ctx.projector, &input),
    }
    .with_context(|| format!("Failed to project {}", args.file.display()))?;

    print_json(&output, ctx.pretty)
}
