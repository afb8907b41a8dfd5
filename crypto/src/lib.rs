//! This module contains structures and implementations related to the cryptographic parts of the Iroha.

mod hash;

use core::str::FromStr;

use derive_more::{DebugCustom, Display};
pub use hash::*;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Failed to parse a cryptographic primitive from its textual form.
#[derive(Debug, displaydoc::Display, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `{0}` is not a hex-encoded 32-byte hash
    Hash(String),
    /// `{0}` is not a hex-encoded public key
    PublicKey(String),
}

/// Public key of an account or a peer, kept in its raw byte form.
///
/// Signature verification happens before a query reaches the read path,
/// so only identity semantics (equality, ordering, display) are needed here.
#[derive(Clone, Display, DebugCustom, PartialEq, Eq, PartialOrd, Ord, Hash, Decode, Encode)]
#[display(fmt = "{}", "hex::encode(_0)")]
#[debug(fmt = "{{ PublicKey({}) }}", "hex::encode(_0)")]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for PublicKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::PublicKey(s.to_owned()));
        }
        hex::decode(s)
            .map(Self)
            .map_err(|_| ParseError::PublicKey(s.to_owned()))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(D::Error::custom)
    }
}

/// Signature attached to a transaction or a block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Decode, Encode, Serialize, Deserialize)]
pub struct Signature {
    /// Key the payload was signed with
    pub public_key: PublicKey,
    /// Raw signature bytes
    #[serde(with = "hex::serde")]
    pub payload: Vec<u8>,
}

impl Signature {
    /// Construct a signature from its parts.
    pub fn new(public_key: PublicKey, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            public_key,
            payload: payload.into(),
        }
    }
}
