//! Byte and hex conversion helpers, plus the `Bytes` wire type.
//!
//! Node records carry binary fields either as plain JSON arrays of byte values
//! or as Node-style buffer objects (`{"type": "Buffer", "data": [...]}`).
//! [`Bytes`] accepts both and always serializes back as a plain array.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// Lower-case hex encoding of a byte slice.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string (either case) into bytes.
pub fn from_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s)
}

/// Interpret bytes as text. Invalid UTF-8 sequences become U+FFFD.
pub fn bytes_to_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Decode a hex string and interpret the result as text.
pub fn hex_to_string(s: &str) -> Result<String, hex::FromHexError> {
    Ok(bytes_to_string(&from_hex(s)?))
}

/// An owned binary field of a ledger record.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Create from anything convertible into a byte vector.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Convert to a hex string (no prefix).
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }

    /// The bytes interpreted as text.
    pub fn to_text(&self) -> String {
        bytes_to_string(&self.0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes(0x{})", self.to_hex())
    }
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BytesRepr {
    Array(Vec<u8>),
    Buffer { data: Vec<u8> },
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match BytesRepr::deserialize(deserializer) {
            Ok(BytesRepr::Array(bytes)) | Ok(BytesRepr::Buffer { data: bytes }) => Ok(Self(bytes)),
            Err(_) => Err(serde::de::Error::custom(
                "expected an array of byte values or a buffer object",
            )),
        }
    }
}
