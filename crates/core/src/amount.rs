//! Ledger amounts and their fixed-point decimal rendering.
//!
//! Amounts are stored in the smallest unit (shor for the native asset). Display
//! values shift the decimal point by the asset's decimal count using string
//! arithmetic only, so no precision is lost and no exponent notation appears.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Decimal places of the native asset.
pub const QUANTA_DECIMALS: u32 = 9;

/// Smallest units per whole native coin.
pub const SHOR_PER_QUANTA: u64 = 1_000_000_000;

/// Largest decimal count the ledger accepts for a token.
pub const MAX_TOKEN_DECIMALS: u64 = 19;

/// Render `value / 10^decimals` as a plain decimal string.
///
/// Trailing fractional zeros are trimmed, and a whole result has no decimal point.
pub fn format_units(value: u128, decimals: u32) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// An integer amount in the smallest unit of some asset.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(pub u64);

impl Amount {
    /// Render in whole native coins.
    pub fn to_quanta(self) -> String {
        format_units(self.0 as u128, QUANTA_DECIMALS)
    }

    /// Render with an explicit decimal count.
    pub fn format(self, decimals: u32) -> String {
        format_units(self.0 as u128, decimals)
    }
}

/// Sum amounts without overflow.
pub fn total(amounts: &[Amount]) -> u128 {
    amounts.iter().map(|a| a.0 as u128).sum()
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerRepr {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        de_u64(deserializer).map(Amount)
    }
}

/// Deserialize an unsigned 64-bit integer given either as a JSON number or as a
/// decimal string. RPC bridges commonly stringify 64-bit fields.
pub fn de_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntegerRepr::deserialize(deserializer) {
        Ok(IntegerRepr::Number(n)) => Ok(n),
        Ok(IntegerRepr::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid integer {:?}: {}", s, e))),
        Err(_) => Err(serde::de::Error::custom(
            "expected an unsigned integer or a decimal string",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fee_tenth_of_quanta() {
        assert_eq!(Amount(100_000_000).to_quanta(), "0.1");
    }

    #[test]
    fn test_whole_amounts_have_no_point() {
        assert_eq!(Amount(5 * SHOR_PER_QUANTA).to_quanta(), "5");
        assert_eq!(Amount(0).to_quanta(), "0");
    }

    #[test]
    fn test_smallest_unit() {
        assert_eq!(Amount(1).to_quanta(), "0.000000001");
    }

    #[test]
    fn test_no_precision_loss_at_large_values() {
        assert_eq!(
            format_units(1_000_000_000_000_000_001, 9),
            "1000000000.000000001"
        );
        assert_eq!(Amount(u64::MAX).to_quanta(), "18446744073.709551615");
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(Amount(1234).format(0), "1234");
    }

    #[test]
    fn test_many_decimals() {
        assert_eq!(Amount(15).format(19), "0.0000000000000000015");
    }

    #[test]
    fn test_total_does_not_overflow() {
        let amounts = [Amount(u64::MAX), Amount(u64::MAX)];
        assert_eq!(total(&amounts), 2 * u64::MAX as u128);
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let a: Amount = serde_json::from_value(json!(42)).unwrap();
        let b: Amount = serde_json::from_value(json!("18446744073709551615")).unwrap();
        assert_eq!(a, Amount(42));
        assert_eq!(b, Amount(u64::MAX));
    }

    #[test]
    fn test_deserialize_rejects_negative_and_garbage() {
        assert!(serde_json::from_value::<Amount>(json!(-1)).is_err());
        assert!(serde_json::from_value::<Amount>(json!("12abc")).is_err());
    }
}
