//! Address conversion command.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use qrl_explorer_core::address::{self, AddressForms, RawAddress};

#[derive(Args)]
pub struct AddressArgs {
    #[command(subcommand)]
    command: AddressCommand,
}

#[derive(Subcommand)]
enum AddressCommand {
    /// Show every form of an address
    Show {
        /// Address as `Q…` hex or `q1…` bech32
        address: String,
    },
    /// Check that a bech32 and a hex address name the same account
    Compare {
        /// Bech32 address
        b32: String,

        /// `Q`-prefixed hex address
        hex: String,
    },
}

pub fn run(args: AddressArgs) -> Result<()> {
    match args.command {
        AddressCommand::Show { address } => show(&address),
        AddressCommand::Compare { b32, hex } => compare(&b32, &hex),
    }
}

fn show(input: &str) -> Result<()> {
    let address: RawAddress = input
        .trim()
        .parse()
        .with_context(|| format!("Invalid address: {}", input))?;
    let forms = AddressForms::from(&address);

    println!();
    println!("  Hex:        {}", forms.hex.bright_yellow());
    println!("  Bech32:     {}", forms.b32.bright_yellow());
    println!(
        "  Descriptor: {}",
        hex::encode(address.descriptor()).bright_black()
    );
    println!(
        "  Checksum:   {}",
        address
            .checksum()
            .map(hex::encode)
            .unwrap_or_else(|| "none".to_string())
            .bright_black()
    );
    println!(
        "  Raw bytes:  {}",
        address.as_bytes().len().to_string().bright_cyan()
    );
    if address.is_coinbase() {
        println!("  {}", "Coinbase address".cyan().bold());
    }
    println!();

    Ok(())
}

fn compare(b32: &str, hex_address: &str) -> Result<()> {
    let same =
        address::compare(b32.trim(), hex_address.trim()).context("Failed to decode addresses")?;

    if same {
        println!("{}  Addresses match", "✓".green().bold());
    } else {
        println!("{}  Addresses differ", "✗".red().bold());
    }

    Ok(())
}
