//! Queries served by the read path, their pagination parameters, responses and errors.

use derive_more::{Constructor, Display};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{
    account::{AccountDetailRecordId, AccountId},
    asset::AssetId,
    role::RoleId,
    transaction::SignedTransaction,
    HashOf, Timestamp,
};

pub mod error;
pub mod response;

/// Outcome of a query: exactly one of a success payload or an error record.
pub type QueryExecutorResult = Result<response::QueryResponse, error::ErrorQueryResponse>;

/// Direction in which transactions are listed, by commit position.
#[derive(
    Debug, Display, Default, Clone, Copy, PartialEq, Eq, Hash, Decode, Encode, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TxOrdering {
    /// Oldest first: by block height, then by position inside the block.
    #[default]
    #[display(fmt = "ascending")]
    Ascending,
    /// Newest first.
    #[display(fmt = "descending")]
    Descending,
}

/// Pagination of committed transactions.
#[derive(Debug, Default, Clone, PartialEq, Eq, Decode, Encode, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TxPaginationMeta {
    /// Maximum number of transactions in one page.
    pub page_size: u32,
    /// Hash of the last transaction of the previous page.
    pub paging_hash: Option<HashOf<SignedTransaction>>,
    /// Listing direction.
    pub ordering: TxOrdering,
    /// Lowest block height to consider, inclusive.
    pub first_tx_height: Option<u64>,
    /// Highest block height to consider, inclusive.
    pub last_tx_height: Option<u64>,
    /// Earliest transaction creation time to consider, inclusive.
    pub first_tx_time: Option<Timestamp>,
    /// Latest transaction creation time to consider, inclusive.
    pub last_tx_time: Option<Timestamp>,
}

impl TxPaginationMeta {
    /// First page of `page_size` transactions in ascending order.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Resume after the transaction with `hash`.
    #[must_use]
    pub fn after(mut self, hash: HashOf<SignedTransaction>) -> Self {
        self.paging_hash = Some(hash);
        self
    }

    /// List transactions in the given direction.
    #[must_use]
    pub fn ordered(mut self, ordering: TxOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}

/// Pagination of pending transactions.
#[derive(
    Debug, Default, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct PendingTxPaginationMeta {
    /// Maximum number of transactions in one page.
    pub page_size: u32,
    /// Hash of the last transaction of the previous page.
    pub paging_hash: Option<HashOf<SignedTransaction>>,
}

/// Pagination of account assets. The cursor is the first asset of the requested page.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssetPaginationMeta {
    /// Maximum number of assets in one page.
    pub page_size: u32,
    /// First asset of the page, `None` for the first page.
    #[serde(default)]
    pub first_asset_id: Option<AssetId>,
}

/// Pagination of account details. The cursor is the first record of the requested page.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccountDetailPaginationMeta {
    /// Maximum number of records in one page.
    pub page_size: u32,
    /// First record of the page, `None` for the first page.
    #[serde(default)]
    pub first_record_id: Option<AccountDetailRecordId>,
}

/// Fetch an account together with its roles.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetAccount {
    /// Account to fetch.
    pub account_id: AccountId,
}

/// Fetch a committed block by its height.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetBlock {
    /// Height of the block, starting at 1.
    pub height: u64,
}

/// Fetch the public keys allowed to sign for an account.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetSignatories {
    /// Account whose signatories are requested.
    pub account_id: AccountId,
}

/// Page through transactions created by an account.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetAccountTransactions {
    /// Creator of the transactions.
    pub account_id: AccountId,
    /// Requested page.
    pub pagination: TxPaginationMeta,
}

/// Page through transactions which moved an asset in or out of an account.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetAccountAssetTransactions {
    /// Account on either side of the movement.
    pub account_id: AccountId,
    /// Asset which was moved.
    pub asset_id: AssetId,
    /// Requested page.
    pub pagination: TxPaginationMeta,
}

/// Fetch committed transactions by their hashes.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetTransactions {
    /// Hashes of the requested transactions, answered in this order.
    pub tx_hashes: Vec<HashOf<SignedTransaction>>,
}

/// Page through the balances of an account.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetAccountAssets {
    /// Holder of the balances.
    pub account_id: AccountId,
    /// Requested page, `None` for every balance.
    #[serde(default)]
    pub pagination: Option<AssetPaginationMeta>,
}

/// Page through the key-value details of an account.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetAccountDetail {
    /// Account the details are attached to.
    pub account_id: AccountId,
    /// Only details written by this account.
    #[serde(default)]
    pub writer: Option<AccountId>,
    /// Only details with this key.
    #[serde(default)]
    pub key: Option<String>,
    /// Requested page, `None` for every matching record.
    #[serde(default)]
    pub pagination: Option<AccountDetailPaginationMeta>,
}

/// Fetch the permissions of a role.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetRolePermissions {
    /// Role to inspect.
    pub role_id: RoleId,
}

/// Fetch an asset definition.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetAssetInfo {
    /// Asset to fetch.
    pub asset_id: AssetId,
}

/// Fetch not yet committed transactions created by the query author.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct GetPendingTransactions {
    /// Requested page, `None` for every pending transaction.
    #[serde(default)]
    pub pagination: Option<PendingTxPaginationMeta>,
}

/// Every query the read path understands.
#[derive(
    Debug, Clone, PartialEq, Eq, Decode, Encode, Deserialize, Serialize, strum::IntoStaticStr,
)]
pub enum Query {
    /// Account and its roles.
    GetAccount(GetAccount),
    /// Committed block.
    GetBlock(GetBlock),
    /// Signatories of an account.
    GetSignatories(GetSignatories),
    /// Page of transactions created by an account.
    GetAccountTransactions(GetAccountTransactions),
    /// Page of transactions moving an asset of an account.
    GetAccountAssetTransactions(GetAccountAssetTransactions),
    /// Transactions by hash.
    GetTransactions(GetTransactions),
    /// Page of account balances.
    GetAccountAssets(GetAccountAssets),
    /// Page of account details.
    GetAccountDetail(GetAccountDetail),
    /// Every role.
    GetRoles,
    /// Permissions of a role.
    GetRolePermissions(GetRolePermissions),
    /// Asset definition.
    GetAssetInfo(GetAssetInfo),
    /// Pending transactions of the query author.
    GetPendingTransactions(GetPendingTransactions),
    /// Every peer.
    GetPeers,
}

impl Query {
    /// Name of the query shape, used in logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Hash identifying this query instance.
    pub fn hash(&self) -> HashOf<Self> {
        HashOf::new(self)
    }
}

impl core::fmt::Display for Query {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! impl_from_query {
    ($($ty:ident),+ $(,)?) => { $(
        impl From<$ty> for Query {
            fn from(query: $ty) -> Self {
                Self::$ty(query)
            }
        }
    )+ };
}

impl_from_query!(
    GetAccount,
    GetBlock,
    GetSignatories,
    GetAccountTransactions,
    GetAccountAssetTransactions,
    GetTransactions,
    GetAccountAssets,
    GetAccountDetail,
    GetRolePermissions,
    GetAssetInfo,
    GetPendingTransactions,
);

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::{
        error::{error_code, ErrorQueryResponse, ErrorQueryType},
        response::*,
        AccountDetailPaginationMeta, AssetPaginationMeta, GetAccount, GetAccountAssetTransactions,
        GetAccountAssets, GetAccountDetail, GetAccountTransactions, GetAssetInfo, GetBlock,
        GetPendingTransactions, GetRolePermissions, GetSignatories, GetTransactions,
        PendingTxPaginationMeta, Query, QueryExecutorResult, TxOrdering, TxPaginationMeta,
    };
}
