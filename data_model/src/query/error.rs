//! Error responses of queries.
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::HashOf;

use super::Query;

/// Category of a failed query.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Decode,
    Encode,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
pub enum ErrorQueryType {
    /// The query is malformed.
    StatelessFailed,
    /// The query could not be evaluated against the ledger state.
    StatefulFailed,
    /// The account does not exist.
    NoAccount,
    /// The account has no assets or does not exist.
    NoAccountAssets,
    /// The account has no details or does not exist.
    NoAccountDetail,
    /// The account has no signatories or does not exist.
    NoSignatories,
    /// The query is recognized but not served.
    NotSupported,
    /// The asset does not exist.
    NoAsset,
    /// No role matches the query.
    NoRoles,
}

/// Numeric codes distinguishing errors of the same [`ErrorQueryType`].
pub mod error_code {
    /// Requested entity was not found.
    pub const NOT_FOUND: u32 = 0;
    /// Storage or decoding fault while evaluating the query.
    pub const INTERNAL: u32 = 1;
    /// Query author lacks every acceptable permission.
    pub const NO_PERMISSIONS: u32 = 2;
    /// Requested block height is zero or above the chain tip.
    pub const INVALID_HEIGHT: u32 = 3;
    /// Pagination cursor or requested transaction is unknown.
    pub const INVALID_PAGINATION: u32 = 4;
    /// Account named by the query does not exist.
    pub const INVALID_ACCOUNT_ID: u32 = 5;
    /// Asset named by the query does not exist.
    pub const INVALID_ASSET_ID: u32 = 6;
}

#[derive(
    Debug,
    displaydoc::Display,
    thiserror::Error,
    Clone,
    PartialEq,
    Eq,
    Decode,
    Encode,
    Deserialize,
    Serialize,
)]
/// {error_type} (code {error_code}): {message}
pub struct ErrorQueryResponse {
    /// Category of the error.
    pub error_type: ErrorQueryType,
    /// Code within the category.
    pub error_code: u32,
    /// Human readable description.
    pub message: String,
    /// Hash of the failed query.
    pub query_hash: HashOf<Query>,
}
