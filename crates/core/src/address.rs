//! Address codec: raw bytes, `Q`-prefixed hex and bech32 text.
//!
//! A raw address is `descriptor || hash || checksum`. The first 35 bytes
//! (descriptor and hash) identify the account; the trailing 4 bytes are the
//! last 4 bytes of SHA-256 over those 35 bytes. The bech32 form encodes only the
//! 35 identifying bytes, so the checksum is re-derived when decoding it.
//!
//! The coinbase address (all-zero descriptor and hash) is exempt from the
//! checksum rule: it is 35 bytes long, or 39 bytes with a zero-filled checksum.

use crate::hash::{sha256, sha256_concat};
use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of the descriptor prefix.
pub const DESCRIPTOR_LEN: usize = 3;
/// Length of descriptor plus hash.
pub const DESCRIPTOR_AND_HASH_LEN: usize = 35;
/// Length of the trailing checksum.
pub const CHECKSUM_LEN: usize = 4;
/// Length of a checksummed raw address.
pub const RAW_ADDRESS_LEN: usize = DESCRIPTOR_AND_HASH_LEN + CHECKSUM_LEN;
/// Prefix of the hex form.
pub const HEX_PREFIX: char = 'Q';
/// Human-readable part of the bech32 form.
pub const BECH32_HRP: &str = "q";
/// Descriptor of addresses derived for multisig accounts.
pub const MULTISIG_DESCRIPTOR: [u8; DESCRIPTOR_LEN] = [0x11, 0x00, 0x00];

/// Malformed address input.
#[derive(Debug, Error, PartialEq)]
pub enum AddressError {
    #[error("hex address must start with 'Q'")]
    MissingHexPrefix,
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("invalid bech32: {0}")]
    InvalidBech32(#[from] bech32::Error),
    #[error("bech32 address must use the bech32 checksum, not bech32m")]
    InvalidVariant,
    #[error("not a QRL address: expected prefix '{expected}', found '{found}'")]
    WrongPrefix {
        expected: &'static str,
        found: String,
    },
    #[error("invalid address length: {0} bytes")]
    InvalidLength(usize),
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

pub type Result<T> = std::result::Result<T, AddressError>;

/// True iff every byte is zero.
pub fn is_coinbase(descriptor_and_hash: &[u8]) -> bool {
    descriptor_and_hash.iter().all(|b| *b == 0)
}

/// The ledger checksum of `descriptor || hash`.
pub fn checksum(descriptor_and_hash: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256(descriptor_and_hash);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(digest.tail(CHECKSUM_LEN));
    out
}

/// A raw ledger address with a validated layout.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RawAddress(Vec<u8>);

impl RawAddress {
    /// Wrap raw bytes, checking the layout but not the checksum.
    ///
    /// Accepted: 39 bytes, or 35 bytes when they form the coinbase address.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            RAW_ADDRESS_LEN => Ok(Self(bytes.to_vec())),
            DESCRIPTOR_AND_HASH_LEN if is_coinbase(bytes) => Ok(Self(bytes.to_vec())),
            len => Err(AddressError::InvalidLength(len)),
        }
    }

    /// Wrap raw bytes and verify the checksum.
    pub fn from_bytes_checked(bytes: &[u8]) -> Result<Self> {
        let address = Self::from_bytes(bytes)?;
        address.verify_checksum()?;
        Ok(address)
    }

    /// Build the canonical raw address for a descriptor and hash, appending the
    /// checksum unless it is the coinbase address.
    pub fn from_descriptor_and_hash(descriptor_and_hash: &[u8]) -> Result<Self> {
        if descriptor_and_hash.len() != DESCRIPTOR_AND_HASH_LEN {
            return Err(AddressError::InvalidLength(descriptor_and_hash.len()));
        }
        if is_coinbase(descriptor_and_hash) {
            return Ok(Self(descriptor_and_hash.to_vec()));
        }
        let mut bytes = Vec::with_capacity(RAW_ADDRESS_LEN);
        bytes.extend_from_slice(descriptor_and_hash);
        bytes.extend_from_slice(&checksum(descriptor_and_hash));
        Ok(Self(bytes))
    }

    /// The coinbase address in its 35-byte canonical form.
    pub fn coinbase() -> Self {
        Self(vec![0u8; DESCRIPTOR_AND_HASH_LEN])
    }

    /// Address of the multisig account created by the transaction with the given
    /// hash.
    pub fn multisig(tx_hash: &[u8]) -> Self {
        let first = sha256_concat(&[&MULTISIG_DESCRIPTOR[..], tx_hash]);
        let mut descriptor_and_hash = Vec::with_capacity(RAW_ADDRESS_LEN);
        descriptor_and_hash.extend_from_slice(&MULTISIG_DESCRIPTOR);
        descriptor_and_hash.extend_from_slice(first.as_bytes());
        let check = checksum(&descriptor_and_hash);
        descriptor_and_hash.extend_from_slice(&check);
        Self(descriptor_and_hash)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn descriptor(&self) -> &[u8] {
        &self.0[..DESCRIPTOR_LEN]
    }

    pub fn descriptor_and_hash(&self) -> &[u8] {
        &self.0[..DESCRIPTOR_AND_HASH_LEN]
    }

    /// The stored checksum, if the address carries one.
    pub fn checksum(&self) -> Option<&[u8]> {
        self.0
            .get(DESCRIPTOR_AND_HASH_LEN..)
            .filter(|c| !c.is_empty())
    }

    pub fn is_coinbase(&self) -> bool {
        is_coinbase(self.descriptor_and_hash())
    }

    /// Check the stored checksum against the descriptor and hash.
    ///
    /// The coinbase address passes when its checksum region is absent or zero.
    pub fn verify_checksum(&self) -> Result<()> {
        let stored = self.checksum();
        if self.is_coinbase() {
            return match stored {
                None => Ok(()),
                Some(c) if is_coinbase(c) => Ok(()),
                Some(_) => Err(AddressError::ChecksumMismatch),
            };
        }
        match stored {
            Some(c) if c == checksum(self.descriptor_and_hash()) => Ok(()),
            _ => Err(AddressError::ChecksumMismatch),
        }
    }

    /// `Q` followed by the lower-case hex of every byte.
    pub fn to_hex(&self) -> String {
        format!("{}{}", HEX_PREFIX, hex::encode(&self.0))
    }

    /// Parse the `Q`-prefixed hex form, verifying the checksum.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix(HEX_PREFIX)
            .ok_or(AddressError::MissingHexPrefix)?;
        let bytes = hex::decode(digits)?;
        Self::from_bytes_checked(&bytes)
    }

    /// The bech32 form of the descriptor and hash.
    pub fn to_text(&self) -> String {
        // The payload is always 35 bytes and the prefix is a valid HRP.
        bech32::encode(
            BECH32_HRP,
            self.descriptor_and_hash().to_base32(),
            Variant::Bech32,
        )
        .unwrap_or_default()
    }

    /// Parse the bech32 form, re-deriving the checksum.
    pub fn from_text(s: &str) -> Result<Self> {
        let (hrp, data, variant) = bech32::decode(s)?;
        if hrp != BECH32_HRP {
            return Err(AddressError::WrongPrefix {
                expected: BECH32_HRP,
                found: hrp,
            });
        }
        if variant != Variant::Bech32 {
            return Err(AddressError::InvalidVariant);
        }
        let descriptor_and_hash = Vec::<u8>::from_base32(&data)?;
        Self::from_descriptor_and_hash(&descriptor_and_hash)
    }
}

impl fmt::Debug for RawAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawAddress({})", self.to_hex())
    }
}

impl fmt::Display for RawAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for RawAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Accepts either the `Q` hex form or the bech32 form.
impl FromStr for RawAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with(HEX_PREFIX) {
            Self::from_hex(s)
        } else {
            Self::from_text(s)
        }
    }
}

/// Both display forms of one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressForms {
    pub hex: String,
    pub b32: String,
}

impl From<&RawAddress> for AddressForms {
    fn from(address: &RawAddress) -> Self {
        Self {
            hex: address.to_hex(),
            b32: address.to_text(),
        }
    }
}

/// `Q`-prefixed hex of raw address bytes.
pub fn raw_to_hex(raw: &[u8]) -> Result<String> {
    Ok(RawAddress::from_bytes(raw)?.to_hex())
}

/// Raw bytes of a `Q`-prefixed hex address.
pub fn hex_to_raw(hex_address: &str) -> Result<Vec<u8>> {
    Ok(RawAddress::from_hex(hex_address)?.into_bytes())
}

/// Bech32 text of raw address bytes. Any checksum is dropped.
pub fn raw_to_text(raw: &[u8]) -> Result<String> {
    Ok(RawAddress::from_bytes(raw)?.to_text())
}

/// Raw bytes of a bech32 address, checksum appended unless coinbase.
pub fn text_to_raw(text: &str) -> Result<Vec<u8>> {
    Ok(RawAddress::from_text(text)?.into_bytes())
}

/// Bech32 text of a `Q`-prefixed hex address.
pub fn hex_to_text(hex_address: &str) -> Result<String> {
    Ok(RawAddress::from_hex(hex_address)?.to_text())
}

/// `Q`-prefixed hex of a bech32 address.
pub fn text_to_hex(text: &str) -> Result<String> {
    Ok(RawAddress::from_text(text)?.to_hex())
}

/// Whether a bech32 address and a hex address denote the same raw bytes.
pub fn compare(text: &str, hex_address: &str) -> Result<bool> {
    let from_text = RawAddress::from_text(text)?;
    let from_hex = RawAddress::from_hex(hex_address)?;
    Ok(from_text.as_bytes() == from_hex.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_HEX: &str =
        "Q010500bc576efa69fd6cbc854f2224f149f0b0a4d18fcb30c1feab64781245f4f27a61874227f3";

    fn sample_descriptor_and_hash(seed: u8) -> Vec<u8> {
        (0..DESCRIPTOR_AND_HASH_LEN as u8)
            .map(|i| i.wrapping_mul(7).wrapping_add(seed))
            .collect()
    }

    #[test]
    fn test_known_address_checksum_verifies() {
        let address = RawAddress::from_hex(ALICE_HEX).unwrap();
        assert_eq!(address.as_bytes().len(), RAW_ADDRESS_LEN);
        assert_eq!(address.descriptor(), &[0x01, 0x05, 0x00]);
        assert!(!address.is_coinbase());
        assert!(address.verify_checksum().is_ok());
    }

    #[test]
    fn test_checksum_is_sha256_tail() {
        let dh = sample_descriptor_and_hash(3);
        let address = RawAddress::from_descriptor_and_hash(&dh).unwrap();
        let digest = sha256(&dh);
        assert_eq!(address.checksum().unwrap(), &digest.as_bytes()[28..32]);
    }

    #[test]
    fn test_coinbase_hex_roundtrip() {
        let coinbase = vec![0u8; DESCRIPTOR_AND_HASH_LEN];
        assert!(is_coinbase(&coinbase));
        let hex_address = raw_to_hex(&coinbase).unwrap();
        assert_eq!(hex_address, format!("Q{}", "00".repeat(35)));
        assert_eq!(hex_to_raw(&hex_address).unwrap(), coinbase);
    }

    #[test]
    fn test_coinbase_text_roundtrip_has_no_checksum() {
        let coinbase = RawAddress::coinbase();
        let text = coinbase.to_text();
        assert!(text.starts_with("q1"));
        assert_eq!(text_to_raw(&text).unwrap(), vec![0u8; 35]);
    }

    #[test]
    fn test_zero_filled_coinbase_is_accepted() {
        let address = RawAddress::from_bytes_checked(&[0u8; RAW_ADDRESS_LEN]).unwrap();
        assert!(address.is_coinbase());
    }

    #[test]
    fn test_hex_roundtrip() {
        let address = RawAddress::from_descriptor_and_hash(&sample_descriptor_and_hash(9)).unwrap();
        let hex_address = raw_to_hex(address.as_bytes()).unwrap();
        assert_eq!(hex_to_raw(&hex_address).unwrap(), address.as_bytes());
    }

    #[test]
    fn test_text_roundtrip() {
        for seed in [1u8, 50, 200] {
            let address =
                RawAddress::from_descriptor_and_hash(&sample_descriptor_and_hash(seed)).unwrap();
            let text = raw_to_text(address.as_bytes()).unwrap();
            assert_eq!(text_to_raw(&text).unwrap(), address.as_bytes());
        }
    }

    #[test]
    fn test_hex_is_case_insensitive() {
        let upper = format!("Q{}", ALICE_HEX[1..].to_uppercase());
        assert_eq!(hex_to_raw(&upper).unwrap(), hex_to_raw(ALICE_HEX).unwrap());
    }

    #[test]
    fn test_hex_errors() {
        assert_eq!(
            hex_to_raw(&ALICE_HEX[1..]),
            Err(AddressError::MissingHexPrefix)
        );
        assert!(matches!(
            hex_to_raw("Q0105z0"),
            Err(AddressError::InvalidHex(_))
        ));
        assert!(matches!(
            hex_to_raw("Q010"),
            Err(AddressError::InvalidHex(_))
        ));
        assert_eq!(hex_to_raw("Q0105"), Err(AddressError::InvalidLength(2)));
    }

    #[test]
    fn test_hex_rejects_bad_checksum() {
        let mut tampered = ALICE_HEX.to_string();
        tampered.pop();
        tampered.push('4');
        assert_eq!(hex_to_raw(&tampered), Err(AddressError::ChecksumMismatch));
    }

    #[test]
    fn test_short_non_coinbase_rejected() {
        let dh = sample_descriptor_and_hash(4);
        assert_eq!(
            RawAddress::from_bytes(&dh),
            Err(AddressError::InvalidLength(35))
        );
    }

    #[test]
    fn test_text_wrong_prefix() {
        let data = sample_descriptor_and_hash(1).to_base32();
        let other = bech32::encode("z", data, Variant::Bech32).unwrap();
        assert!(matches!(
            text_to_raw(&other),
            Err(AddressError::WrongPrefix { .. })
        ));
    }

    #[test]
    fn test_text_wrong_variant() {
        let data = sample_descriptor_and_hash(1).to_base32();
        let other = bech32::encode("q", data, Variant::Bech32m).unwrap();
        assert_eq!(text_to_raw(&other), Err(AddressError::InvalidVariant));
    }

    #[test]
    fn test_text_wrong_length() {
        let other = bech32::encode("q", vec![1u8; 20].to_base32(), Variant::Bech32).unwrap();
        assert_eq!(text_to_raw(&other), Err(AddressError::InvalidLength(20)));
    }

    #[test]
    fn test_text_corrupted_checksum() {
        let mut text = raw_to_text(&hex_to_raw(ALICE_HEX).unwrap()).unwrap();
        let last = text.pop().unwrap();
        text.push(if last == 'q' { 'p' } else { 'q' });
        assert!(matches!(
            text_to_raw(&text),
            Err(AddressError::InvalidBech32(_))
        ));
    }

    #[test]
    fn test_compare_uses_raw_bytes() {
        let text = hex_to_text(ALICE_HEX).unwrap();
        let upper = format!("Q{}", ALICE_HEX[1..].to_uppercase());
        assert!(compare(&text, &upper).unwrap());

        let other = RawAddress::from_descriptor_and_hash(&sample_descriptor_and_hash(2)).unwrap();
        assert!(!compare(&text, &other.to_hex()).unwrap());
    }

    #[test]
    fn test_known_text_forms() {
        assert_eq!(
            hex_to_text(ALICE_HEX).unwrap(),
            "q1qyzsp0zhdmaxnltvhjz57g3y79ylpv9y6x8ukvxpl64kg7qjgh60y7nptsne78"
        );
        assert_eq!(
            RawAddress::coinbase().to_text(),
            "q1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq2rrt73"
        );
    }

    #[test]
    fn test_text_to_hex_matches_source() {
        let text = hex_to_text(ALICE_HEX).unwrap();
        assert_eq!(text_to_hex(&text).unwrap(), ALICE_HEX);
    }

    #[test]
    fn test_from_str_accepts_both_forms() {
        let from_hex: RawAddress = ALICE_HEX.parse().unwrap();
        let from_text: RawAddress = from_hex.to_text().parse().unwrap();
        assert_eq!(from_hex, from_text);
        assert_eq!(from_text.to_string(), ALICE_HEX);
    }

    #[test]
    fn test_multisig_address_is_deterministic() {
        let tx_hash = [0xabu8; 32];
        let a = RawAddress::multisig(&tx_hash);
        let b = RawAddress::multisig(&tx_hash);
        assert_eq!(a, b);
        assert_eq!(a.descriptor(), &MULTISIG_DESCRIPTOR);
        assert!(a.verify_checksum().is_ok());
        assert_ne!(a, RawAddress::multisig(&[0xcdu8; 32]));
    }

    #[test]
    fn test_multisig_address_layout() {
        let tx_hash = [0x01u8; 32];
        let first = sha256_concat(&[&MULTISIG_DESCRIPTOR[..], &tx_hash[..]]);
        let mut round_two = MULTISIG_DESCRIPTOR.to_vec();
        round_two.extend_from_slice(first.as_bytes());
        let second = sha256(&round_two);

        let address = RawAddress::multisig(&tx_hash);
        assert_eq!(&address.as_bytes()[3..35], first.as_bytes());
        assert_eq!(&address.as_bytes()[35..], &second.as_bytes()[28..]);
    }
}
