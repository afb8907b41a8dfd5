//! This module contains [`SignedBlock`] and [`BlockHeader`] structures and
//! the individually encoded transactions they carry.
use derive_more::Display;
use getset::CopyGetters;
use parity_scale_codec::{Decode, DecodeAll, Encode};
use serde::{Deserialize, Serialize};

use crate::{transaction::SignedTransaction, Hash, HashOf, Signature, Timestamp};

/// Essential data of a block.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, CopyGetters, Decode, Encode, Deserialize, Serialize,
)]
#[display(fmt = "Block №{height}")]
#[getset(get_copy = "pub")]
pub struct BlockHeader {
    /// Number of blocks in the chain including this block.
    height: u64,
    /// Hash of the previous block in the chain.
    prev_block_hash: Option<HashOf<SignedBlock>>,
    /// Creation timestamp (unix time in milliseconds).
    created_time: Timestamp,
}

impl BlockHeader {
    /// Construct a header.
    pub const fn new(
        height: u64,
        prev_block_hash: Option<HashOf<SignedBlock>>,
        created_time: Timestamp,
    ) -> Self {
        Self {
            height,
            prev_block_hash,
            created_time,
        }
    }
}

/// A [`SignedTransaction`] kept in its SCALE encoding.
///
/// Every transaction of a block is stored separately so a single malformed
/// entry can be skipped without losing its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Decode, Encode, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EncodedTransaction(#[serde(with = "hex::serde")] Vec<u8>);

impl EncodedTransaction {
    /// Encode a transaction.
    pub fn new(transaction: &SignedTransaction) -> Self {
        Self(transaction.encode())
    }

    /// Wrap raw bytes as they were stored.
    pub const fn from_raw(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Raw stored bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decode the stored transaction.
    ///
    /// # Errors
    /// Fails if the bytes are not exactly one encoded [`SignedTransaction`].
    pub fn decode_transaction(&self) -> Result<SignedTransaction, parity_scale_codec::Error> {
        SignedTransaction::decode_all(&mut self.0.as_slice())
    }

    /// Hash of the stored bytes, equal to [`SignedTransaction::hash`] of a well-formed entry.
    pub fn hash(&self) -> HashOf<SignedTransaction> {
        HashOf::from_untyped_unchecked(Hash::new(&self.0))
    }
}

/// Committed block as it is written to the block store.
#[derive(Debug, Display, Clone, PartialEq, Eq, Decode, Encode, Deserialize, Serialize)]
#[display(fmt = "{header}")]
pub struct SignedBlock {
    /// Block header.
    pub header: BlockHeader,
    /// Transactions which passed validation, in commit order.
    pub transactions: Vec<EncodedTransaction>,
    /// Hashes of transactions which were part of the proposal but got rejected.
    pub rejected_transactions_hashes: Vec<HashOf<SignedTransaction>>,
    /// Signatures of the block producers.
    pub signatures: Vec<Signature>,
}

impl SignedBlock {
    /// Hash of the SCALE encoding of the block.
    #[inline]
    pub fn hash(&self) -> HashOf<Self> {
        HashOf::new(self)
    }

    /// Height of the block.
    #[inline]
    pub fn height(&self) -> u64 {
        self.header.height
    }
}

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::{BlockHeader, EncodedTransaction, SignedBlock};
}
