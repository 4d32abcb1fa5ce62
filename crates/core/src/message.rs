//! Decoding of message transaction payloads.
//!
//! Message payloads are opaque bytes, but two sub-protocols are recognised by a
//! magic prefix:
//!
//! ```text
//! document notarisation:  AF AF | A<h> | hash (N bytes) | text ...
//!                         h = 1 (SHA1, N = 20), 2 (SHA256, N = 32), 3 (MD5, N = 16)
//!
//! keybase signal:         0F 0F 00 02 | action | reserved | user | 20 | hex ...
//!                         action = AA (add), AF (remove)
//! ```
//!
//! Anything else is plain text. Decoding never fails; an unrecognised hash
//! selector yields a notarisation with every field set to `None`.

use crate::bytes::{bytes_to_string, to_hex};
use serde::Serialize;
use tracing::warn;

const NOTARISATION_MAGIC: [u8; 2] = [0xAF, 0xAF];
const NOTARISATION_KIND: u8 = 0xA;
const KEYBASE_MAGIC: [u8; 4] = [0x0F, 0x0F, 0x00, 0x02];
const KEYBASE_PAYLOAD_OFFSET: usize = 6;
const SPACE: u8 = 0x20;

/// Hash algorithm named by a notarisation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HashFunction {
    #[serde(rename = "SHA1")]
    Sha1,
    #[serde(rename = "SHA256")]
    Sha256,
    #[serde(rename = "MD5")]
    Md5,
}

impl HashFunction {
    fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            1 => Some(Self::Sha1),
            2 => Some(Self::Sha256),
            3 => Some(Self::Md5),
            _ => None,
        }
    }

    /// Digest length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Md5 => 16,
        }
    }
}

/// What a keybase signal asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeybaseAction {
    Add,
    Remove,
    Error,
}

impl KeybaseAction {
    fn from_byte(byte: Option<u8>) -> Self {
        match byte {
            Some(0xAA) => Self::Add,
            Some(0xAF) => Self::Remove,
            _ => Self::Error,
        }
    }
}

/// The structured content of a message payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageDetail {
    Notarisation {
        hash: Option<String>,
        hash_function: Option<HashFunction>,
        text: Option<String>,
    },
    Keybase {
        #[serde(rename = "keybaseUser")]
        user: String,
        #[serde(rename = "keybaseType")]
        action: KeybaseAction,
        #[serde(rename = "keybaseHex")]
        hex: String,
    },
    Plain {
        message: String,
    },
}

impl MessageDetail {
    /// Display label of the payload kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Notarisation { .. } => "DOCUMENT_NOTARISATION",
            Self::Keybase { .. } => "KEYBASE",
            Self::Plain { .. } => "MESSAGE",
        }
    }

    /// A recognised sub-protocol whose inner selector was not.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            Self::Notarisation {
                hash_function: None,
                ..
            }
        )
    }
}

/// A decoded message payload together with its hex form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedMessage {
    #[serde(flatten)]
    pub detail: MessageDetail,
    pub raw: String,
    #[serde(rename = "type")]
    pub label: &'static str,
}

/// Classify and decode a message payload.
pub fn decode(bytes: &[u8]) -> DecodedMessage {
    let detail = match bytes {
        [m0, m1, selector, rest @ ..]
            if [*m0, *m1] == NOTARISATION_MAGIC && *selector >> 4 == NOTARISATION_KIND =>
        {
            notarisation(*selector & 0x0F, rest)
        }
        [m0, m1, m2, m3, rest @ ..] if [*m0, *m1, *m2, *m3] == KEYBASE_MAGIC => {
            keybase(
                rest.first().copied(),
                bytes.get(KEYBASE_PAYLOAD_OFFSET..).unwrap_or(&[]),
            )
        }
        _ => MessageDetail::Plain {
            message: bytes_to_string(bytes),
        },
    };

    DecodedMessage {
        label: detail.label(),
        detail,
        raw: to_hex(bytes),
    }
}

fn notarisation(selector: u8, body: &[u8]) -> MessageDetail {
    let Some(function) = HashFunction::from_selector(selector) else {
        warn!(selector, "unknown notarisation hash selector");
        return MessageDetail::Notarisation {
            hash: None,
            hash_function: None,
            text: None,
        };
    };

    let split = function.digest_len().min(body.len());
    let (hash, text) = body.split_at(split);
    MessageDetail::Notarisation {
        hash: Some(to_hex(hash)),
        hash_function: Some(function),
        text: Some(bytes_to_string(text)),
    }
}

fn keybase(action: Option<u8>, payload: &[u8]) -> MessageDetail {
    let (user, hex) = match payload.iter().position(|b| *b == SPACE) {
        Some(space) => (&payload[..space], &payload[space + 1..]),
        None => (&[][..], payload),
    };
    MessageDetail::Keybase {
        user: bytes_to_string(user),
        action: KeybaseAction::from_byte(action),
        hex: to_hex(hex),
    }
}
