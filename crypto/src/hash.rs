use core::{hash, marker::PhantomData, str::FromStr};

use blake2::{digest::consts::U32, Blake2b, Digest};
use derive_more::{DebugCustom, Deref, Display};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseError;

type Blake2b256 = Blake2b<U32>;

/// Hash of Iroha entities. Currently supports only blake2b-32.
#[derive(
    Clone, Copy, Display, DebugCustom, hash::Hash, Eq, PartialEq, Ord, PartialOrd, Decode, Encode,
)]
#[display(fmt = "{}", "hex::encode(_0)")]
#[debug(fmt = "{{ Hash({}) }}", "hex::encode(_0)")]
pub struct Hash([u8; Hash::LENGTH]);

impl Hash {
    /// Length of hash
    pub const LENGTH: usize = 32;

    /// Wrap the given bytes; they must be prehashed with `Blake2b`
    pub const fn prehashed(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    /// Hash the given bytes.
    #[must_use]
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        let digest = Blake2b256::digest(bytes.as_ref());
        let mut hash = [0; Self::LENGTH];
        hash.copy_from_slice(&digest);
        Self::prehashed(hash)
    }

    /// Adds type information to the hash. Be careful about using this function
    /// since it is not possible to validate the correctness of the conversion.
    /// Prefer creating new hashes with [`HashOf::new`] whenever possible
    #[must_use]
    pub const fn typed<T>(self) -> HashOf<T> {
        HashOf(self, PhantomData)
    }
}

impl From<Hash> for [u8; Hash::LENGTH] {
    #[inline]
    fn from(Hash(bytes): Hash) -> Self {
        bytes
    }
}

impl AsRef<[u8; Hash::LENGTH]> for Hash {
    #[inline]
    fn as_ref(&self) -> &[u8; Hash::LENGTH] {
        &self.0
    }
}

impl FromStr for Hash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut hash = [0; Self::LENGTH];
        hex::decode_to_slice(s, &mut hash).map_err(|_| ParseError::Hash(s.to_owned()))?;
        Ok(Self::prehashed(hash))
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(D::Error::custom)
    }
}

impl<T> From<HashOf<T>> for Hash {
    fn from(HashOf(hash, _): HashOf<T>) -> Self {
        hash
    }
}

/// Represents hash of Iroha entities like `Block` or `Transaction`. Currently supports only
/// blake2b-32.
// Lint triggers when expanding #[codec(skip)]
#[allow(clippy::default_trait_access)]
#[derive(DebugCustom, Deref, Display, Decode, Encode)]
#[display(fmt = "{}", _0)]
#[debug(fmt = "{{ {} {_0} }}", "core::any::type_name::<Self>()")]
pub struct HashOf<T>(#[deref] Hash, #[codec(skip)] PhantomData<T>);

impl<T> Clone for HashOf<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for HashOf<T> {}

impl<T> PartialEq for HashOf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}
impl<T> Eq for HashOf<T> {}

impl<T> PartialOrd for HashOf<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for HashOf<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> hash::Hash for HashOf<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<T> AsRef<[u8; Hash::LENGTH]> for HashOf<T> {
    fn as_ref(&self) -> &[u8; Hash::LENGTH] {
        self.0.as_ref()
    }
}

impl<T> FromStr for HashOf<T> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Hash::typed)
    }
}

impl<T> Serialize for HashOf<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for HashOf<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Hash::deserialize(deserializer).map(Hash::typed)
    }
}

impl<T> HashOf<T> {
    /// Transmutes hash to some specific type.
    /// Don't use this method if not required.
    #[inline]
    #[must_use]
    pub const fn transmute<F>(self) -> HashOf<F> {
        HashOf(self.0, PhantomData)
    }

    /// Adds type information to the hash, without checking that it
    /// was computed over a value of type `T`.
    #[inline]
    #[must_use]
    pub const fn from_untyped_unchecked(hash: Hash) -> Self {
        Self(hash, PhantomData)
    }
}

impl<T: Encode> HashOf<T> {
    /// Construct typed hash over the SCALE encoding of `value`
    #[must_use]
    pub fn new(value: &T) -> Self {
        Self(Hash::new(value.encode()), PhantomData)
    }
}
