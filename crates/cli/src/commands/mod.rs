//! CLI commands module.

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Subcommand;
use qrl_explorer_projector::Projector;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

mod account;
mod address;
mod block;
mod message;
mod tx;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert and inspect addresses
    Address(address::AddressArgs),
    /// Project a transaction lookup response
    Tx(tx::TxArgs),
    /// Project a block lookup response
    Block(block::BlockArgs),
    /// Project an address lookup response
    Account(account::AccountArgs),
    /// Decode a message payload
    Message(message::MessageArgs),
}

/// What every command gets from the configuration.
pub struct Session {
    pub projector: Projector,
    pub pretty: bool,
}

impl From<&CliConfig> for Session {
    fn from(config: &CliConfig) -> Self {
        Self {
            projector: Projector::new(config.projector.clone()),
            pretty: config.pretty,
        }
    }
}

pub fn run(cmd: Commands, config: &CliConfig) -> Result<()> {
    let ctx = Session::from(config);
    match cmd {
        Commands::Address(args) => address::run(args),
        Commands::Tx(args) => tx::run(args, &ctx),
        Commands::Block(args) => block::run(args, &ctx),
        Commands::Account(args) => account::run(args, &ctx),
        Commands::Message(args) => message::run(args, &ctx),
    }
}

/// Read a JSON document from a file, or from stdin when the path is `-`.
pub(crate) fn read_json(path: &Path) -> Result<Value> {
    debug!(path = %path.display(), "reading record");
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub(crate) fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

pub(crate) fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    println!("{}", render_json(value, pretty)?);
    Ok(())
}
