//! Query execution: role checks, reads of the ledger state index and of
//! the block store, pagination and response construction.
//!
//! Every query shape goes through [`QueryExecutor::execute_query`], which
//! checks permissions before any read, falls back to an existence check when
//! a read comes back empty and turns storage faults into error responses.

mod account;
mod asset;
mod block;
pub mod pagination;
mod peer;
mod pending;
mod response;
mod role;
mod transactions;

#[cfg(test)]
mod tests;

use iroha_data_model::{
    account::AccountId,
    query::{
        error::{error_code, ErrorQueryType},
        response::QueryResponse,
        Query, QueryExecutorResult,
    },
    HashOf,
};
use iroha_logger::prelude::*;
use rusqlite::Connection;

pub use self::response::log_and_return_error_response;
use crate::{
    block::{BlockDecoder, ScaleBlockDecoder},
    index, kura,
    kura::BlockSource,
    pending::PendingTransactionStorage,
    permissions::PermissionCheck,
};

/// Fault of the storage backing the read path.
///
/// Surfaced to the client as `StatefulFailed` with code 1.
#[derive(Debug, displaydoc::Display, thiserror::Error)]
pub enum Error {
    /// Failed to read the ledger state index
    Index(#[from] index::Error),
    /// Failed to read the block store
    BlockStore(#[from] kura::Error),
    /// Block {0} is indexed but missing from the block store
    MissingBlock(u64),
    /// Failed to decode block {height}
    Decode {
        /// Height of the block
        height: u64,
        /// Decoder error
        source: parity_scale_codec::Error,
    },
}

/// Error response a query produces instead of its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    /// Category of the failure
    pub error_type: ErrorQueryType,
    /// Code refining the category
    pub code: u32,
    /// Human readable description
    pub message: String,
}

impl QueryFailure {
    /// Construct a failure.
    pub fn new(error_type: ErrorQueryType, code: u32, message: impl Into<String>) -> Self {
        Self {
            error_type,
            code,
            message: message.into(),
        }
    }

    /// `StatefulFailed` with the given code.
    pub fn stateful(code: u32, message: impl Into<String>) -> Self {
        Self::new(ErrorQueryType::StatefulFailed, code, message)
    }

    /// Paging cursor which matches nothing.
    pub fn invalid_pagination(message: impl Into<String>) -> Self {
        Self::stateful(error_code::INVALID_PAGINATION, message)
    }
}

/// Reason a query step stopped.
#[derive(Debug)]
pub enum Failure {
    /// Storage fault.
    Storage(Error),
    /// Answer to the client.
    Query(QueryFailure),
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Self::Storage(error)
    }
}

impl From<index::Error> for Failure {
    fn from(error: index::Error) -> Self {
        Self::Storage(error.into())
    }
}

impl From<kura::Error> for Failure {
    fn from(error: kura::Error) -> Self {
        Self::Storage(error.into())
    }
}

impl From<rusqlite::Error> for Failure {
    fn from(error: rusqlite::Error) -> Self {
        Self::Storage(index::Error::from(error).into())
    }
}

impl From<QueryFailure> for Failure {
    fn from(failure: QueryFailure) -> Self {
        Self::Query(failure)
    }
}

/// Verdict of the check run when a query read nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFallbackCheckResult {
    /// Nothing to read is a valid answer.
    Empty,
    /// Nothing to read means the query targets something which does not exist.
    Error(QueryFailure),
}

/// Rows returned by the read step of a query.
pub trait QueryRows {
    /// Whether the read found nothing.
    fn is_empty(&self) -> bool;
}

impl<T> QueryRows for Vec<T> {
    fn is_empty(&self) -> bool {
        <[T]>::is_empty(self)
    }
}

impl<T> QueryRows for Option<T> {
    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

/// Who runs a query and which query instance it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    /// Account on whose behalf the query runs.
    pub authority: AccountId,
    /// Hash of the query, attached to every log record and error response.
    pub query_hash: HashOf<Query>,
}

impl QueryContext {
    /// Context of `query` run by `authority`.
    pub fn new(authority: AccountId, query: &Query) -> Self {
        Self {
            authority,
            query_hash: query.hash(),
        }
    }
}

/// Executes queries over one read session.
///
/// Borrows its storage for the lifetime of the session and holds no state of
/// its own, so one executor may serve any number of queries.
pub struct QueryExecutor<'session> {
    sql: &'session Connection,
    block_store: &'session dyn BlockSource,
    pending_txs_storage: &'session dyn PendingTransactionStorage,
    decoder: &'session dyn BlockDecoder,
}

impl core::fmt::Debug for QueryExecutor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QueryExecutor").finish_non_exhaustive()
    }
}

impl<'session> QueryExecutor<'session> {
    /// Executor reading SCALE-encoded blocks.
    pub fn new(
        sql: &'session Connection,
        block_store: &'session dyn BlockSource,
        pending_txs_storage: &'session dyn PendingTransactionStorage,
    ) -> Self {
        Self::with_decoder(sql, block_store, pending_txs_storage, &ScaleBlockDecoder)
    }

    /// Executor decoding blocks with `decoder`.
    pub fn with_decoder(
        sql: &'session Connection,
        block_store: &'session dyn BlockSource,
        pending_txs_storage: &'session dyn PendingTransactionStorage,
        decoder: &'session dyn BlockDecoder,
    ) -> Self {
        Self {
            sql,
            block_store,
            pending_txs_storage,
            decoder,
        }
    }

    /// Execute `query` on behalf of `context.authority`.
    ///
    /// # Errors
    /// An [`ErrorQueryResponse`](iroha_data_model::query::error::ErrorQueryResponse)
    /// when the author lacks permissions, the target does not exist, the
    /// pagination is invalid or storage fails.
    #[log(skip_all, fields(query = %query, query_hash = %context.query_hash))]
    pub fn execute(&self, context: &QueryContext, query: &Query) -> QueryExecutorResult {
        debug!(authority = %context.authority, "Executing query");
        match query {
            Query::GetAccount(query) => self.get_account(context, query),
            Query::GetBlock(query) => self.get_block(context, query),
            Query::GetSignatories(query) => self.get_signatories(context, query),
            Query::GetAccountTransactions(query) => self.get_account_transactions(context, query),
            Query::GetAccountAssetTransactions(query) => {
                self.get_account_asset_transactions(context, query)
            }
            Query::GetTransactions(query) => self.get_transactions(context, query),
            Query::GetAccountAssets(query) => self.get_account_assets(context, query),
            Query::GetAccountDetail(query) => self.get_account_detail(context, query),
            Query::GetRoles => self.get_roles(context),
            Query::GetRolePermissions(query) => self.get_role_permissions(context, query),
            Query::GetAssetInfo(query) => self.get_asset_info(context, query),
            Query::GetPendingTransactions(query) => self.get_pending_transactions(context, query),
            Query::GetPeers => self.get_peers(context),
        }
    }

    /// Run one query shape.
    ///
    /// 1. `permissions` are checked; without any of them nothing else runs.
    /// 2. `query_executor` reads the rows.
    /// 3. Empty rows are handed to `fallback_checker`, which may turn them
    ///    into a not-found error.
    /// 4. `response_creator` builds the answer from the rows.
    ///
    /// Storage faults of any step answer `StatefulFailed` with code 1.
    pub(crate) fn execute_query<T, R, F, C>(
        &self,
        context: &QueryContext,
        permissions: &PermissionCheck,
        query_executor: R,
        fallback_checker: F,
        response_creator: C,
    ) -> QueryExecutorResult
    where
        T: QueryRows,
        R: FnOnce() -> Result<T, Failure>,
        F: FnOnce() -> Result<QueryFallbackCheckResult, Failure>,
        C: FnOnce(T) -> Result<QueryResponse, Failure>,
    {
        let outcome = self.try_execute_query(
            context,
            permissions,
            query_executor,
            fallback_checker,
            response_creator,
        );
        match outcome {
            Ok(response) => Ok(response),
            Err(Failure::Query(failure)) => log_and_return_error_response(
                context,
                failure.error_type,
                failure.message,
                failure.code,
            ),
            Err(Failure::Storage(error)) => log_and_return_error_response(
                context,
                ErrorQueryType::StatefulFailed,
                response::error_chain(&error),
                error_code::INTERNAL,
            ),
        }
    }

    fn try_execute_query<T, R, F, C>(
        &self,
        context: &QueryContext,
        permissions: &PermissionCheck,
        query_executor: R,
        fallback_checker: F,
        response_creator: C,
    ) -> Result<QueryResponse, Failure>
    where
        T: QueryRows,
        R: FnOnce() -> Result<T, Failure>,
        F: FnOnce() -> Result<QueryFallbackCheckResult, Failure>,
        C: FnOnce(T) -> Result<QueryResponse, Failure>,
    {
        if !permissions.evaluate(self.sql, &context.authority)? {
            return Err(QueryFailure::stateful(
                error_code::NO_PERMISSIONS,
                permissions.denial_message(),
            )
            .into());
        }

        let rows = query_executor()?;
        if rows.is_empty() {
            if let QueryFallbackCheckResult::Error(failure) = fallback_checker()? {
                return Err(failure.into());
            }
        }
        response_creator(rows)
    }
}
