//! Account projection command.

use super::{print_json, read_json, Session};
use anyhow::{Context, Result};
use clap::Args;
use qrl_explorer_projector::json;
use std::path::PathBuf;

#[derive(Args)]
pub struct AccountArgs {
    /// Address lookup response as JSON, or `-` for stdin
    file: PathBuf,
}

pub fn run(args: AccountArgs, ctx: &Session) -> Result<()> {
    let input = read_json(&args.file)?;
    let output = json::account(&ctx.projector, &input)
        .with_context(|| format!("Failed to project {}", args.file.display()))?;
    print_json(&output, ctx.pretty)
}
