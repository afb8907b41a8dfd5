//! Success payloads of queries.
use derive_more::Constructor;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{
    account::{Account, AccountDetailRecordId},
    asset::{AccountAsset, Asset, AssetId},
    block::SignedBlock,
    peer::Peer,
    permission::RolePermissionSet,
    role::RoleId,
    transaction::SignedTransaction,
    HashOf, PublicKey,
};

/// Account together with the roles assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct AccountResponse {
    /// The account.
    pub account: Account,
    /// Its roles.
    pub roles: Vec<RoleId>,
}

/// One page of transactions.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct TransactionsPageResponse {
    /// Transactions of the page, in listing order.
    pub transactions: Vec<SignedTransaction>,
    /// Cursor of the next page, `None` at the end of the listing.
    pub next_tx_hash: Option<HashOf<SignedTransaction>>,
    /// Number of transactions matching the query across all pages.
    pub all_transactions_size: u64,
}

/// One page of account balances.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct AccountAssetsResponse {
    /// Balances of the page, ordered by asset id.
    pub assets: Vec<AccountAsset>,
    /// Number of balances of the account.
    pub total_number: u64,
    /// First asset of the next page, `None` at the end of the listing.
    pub next_asset_id: Option<AssetId>,
}

/// One page of account details.
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Decode, Encode, Deserialize, Serialize)]
pub struct AccountDetailResponse {
    /// JSON object `{ writer: { key: value } }` with the records of the page.
    pub detail: String,
    /// Number of records matching the writer and key filters.
    pub total_number: u64,
    /// First record of the next page, `None` at the end of the listing.
    pub next_record_id: Option<AccountDetailRecordId>,
}

/// Success payload of a query.
#[derive(Debug, Clone, PartialEq, Eq, Decode, Encode, Deserialize, Serialize)]
pub enum QueryResponse {
    /// Answer to `GetAccount`.
    Account(AccountResponse),
    /// Answer to `GetBlock`.
    Block(SignedBlock),
    /// Answer to `GetSignatories`.
    Signatories(Vec<PublicKey>),
    /// Answer to `GetTransactions` and unpaged `GetPendingTransactions`.
    Transactions(Vec<SignedTransaction>),
    /// Answer to `GetAccountTransactions` and `GetAccountAssetTransactions`.
    TransactionsPage(TransactionsPageResponse),
    /// Answer to paged `GetPendingTransactions`.
    PendingTransactionsPage(TransactionsPageResponse),
    /// Answer to `GetAccountAssets`.
    AccountAssets(AccountAssetsResponse),
    /// Answer to `GetAccountDetail`.
    AccountDetail(AccountDetailResponse),
    /// Answer to `GetRoles`.
    Roles(Vec<RoleId>),
    /// Answer to `GetRolePermissions`.
    RolePermissions(RolePermissionSet),
    /// Answer to `GetAssetInfo`.
    AssetInfo(Asset),
    /// Answer to `GetPeers`.
    Peers(Vec<Peer>),
}
