//! Committed transactions: paged listings and lookups by hash.

use iroha_data_model::{
    account::AccountId,
    asset::AssetId,
    permission::RolePermission,
    query::{
        error::{error_code, ErrorQueryType},
        response::{QueryResponse, TransactionsPageResponse},
        GetAccountAssetTransactions, GetAccountTransactions, GetTransactions, QueryExecutorResult,
        TxOrdering, TxPaginationMeta,
    },
    transaction::SignedTransaction,
    HashOf,
};
use itertools::Itertools;
use rusqlite::{params, OptionalExtension, ToSql};

use super::{
    pagination::page_after, Failure, QueryContext, QueryExecutor, QueryFailure,
    QueryFallbackCheckResult, QueryRows,
};
use crate::{
    index::{exists_in_db, parse_column, schema},
    permissions::{has_account_role_permission, PermissionCheck},
};

const ACCOUNT_TRANSACTIONS: &str = r#"
    SELECT hash, height, "index" AS idx, ts
    FROM tx_positions
    WHERE creator_id = :account_id
"#;

const ACCOUNT_ASSET_TRANSACTIONS: &str = r#"
    SELECT DISTINCT tx.hash, tx.height, tx."index" AS idx, tx.ts
    FROM position_by_account_asset AS pos
    JOIN tx_positions AS tx ON tx.height = pos.height AND tx."index" = pos."index"
    WHERE pos.account_id = :account_id AND pos.asset_id = :asset_id
"#;

/// Transactions a listing query is about.
///
/// The selector yields `hash`, `height`, `idx` and `ts` columns of every
/// related transaction; bounds and ordering are applied on top of it.
#[derive(Debug, Clone)]
pub(super) struct RelatedTransactions {
    selector: &'static str,
    params: Vec<(&'static str, String)>,
}

impl RelatedTransactions {
    fn new(selector: &'static str) -> Self {
        Self {
            selector,
            params: Vec::new(),
        }
    }

    fn bind(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }
}

/// Location of a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TxPosition {
    hash: HashOf<SignedTransaction>,
    height: u64,
    index: usize,
}

/// One page of a transaction listing.
#[derive(Debug)]
pub(super) struct TransactionsPage {
    pub transactions: Vec<SignedTransaction>,
    pub next_tx_hash: Option<HashOf<SignedTransaction>>,
    pub all_transactions_size: u64,
    pub cursor_supplied: bool,
}

impl QueryRows for TransactionsPage {
    fn is_empty(&self) -> bool {
        self.all_transactions_size == 0 && !self.cursor_supplied
    }
}

impl From<TransactionsPage> for TransactionsPageResponse {
    fn from(page: TransactionsPage) -> Self {
        Self::new(page.transactions, page.next_tx_hash, page.all_transactions_size)
    }
}

impl QueryExecutor<'_> {
    pub(super) fn get_account_transactions(
        &self,
        context: &QueryContext,
        query: &GetAccountTransactions,
    ) -> QueryExecutorResult {
        let account_id = &query.account_id;
        let permissions = PermissionCheck::for_target(
            &context.authority,
            account_id,
            RolePermission::GetMyAccTxs,
            RolePermission::GetDomainAccTxs,
            RolePermission::GetAllAccTxs,
        );
        let related =
            RelatedTransactions::new(ACCOUNT_TRANSACTIONS).bind(":account_id", account_id);

        self.execute_transactions_query(
            context,
            &permissions,
            &related,
            &query.pagination,
            |transaction| transaction.creator() == account_id,
            || self.check_account_exists(account_id),
        )
    }

    pub(super) fn get_account_asset_transactions(
        &self,
        context: &QueryContext,
        query: &GetAccountAssetTransactions,
    ) -> QueryExecutorResult {
        let account_id = &query.account_id;
        let asset_id = &query.asset_id;
        let permissions = PermissionCheck::for_target(
            &context.authority,
            account_id,
            RolePermission::GetMyAccAstTxs,
            RolePermission::GetDomainAccAstTxs,
            RolePermission::GetAllAccAstTxs,
        );
        let related = RelatedTransactions::new(ACCOUNT_ASSET_TRANSACTIONS)
            .bind(":account_id", account_id)
            .bind(":asset_id", asset_id);

        self.execute_transactions_query(
            context,
            &permissions,
            &related,
            &query.pagination,
            |transaction| transaction.involves_asset(account_id, asset_id),
            || {
                let account = self.check_account_exists(account_id)?;
                if matches!(account, QueryFallbackCheckResult::Error(_)) {
                    return Ok(account);
                }
                self.check_asset_exists(asset_id)
            },
        )
    }

    pub(super) fn get_transactions(
        &self,
        context: &QueryContext,
        query: &GetTransactions,
    ) -> QueryExecutorResult {
        self.execute_query(
            context,
            &PermissionCheck::any_of([RolePermission::GetMyTxs, RolePermission::GetAllTxs]),
            || self.read_transactions_by_hash(&context.authority, &query.tx_hashes),
            || Ok(QueryFallbackCheckResult::Empty),
            |transactions| Ok(QueryResponse::Transactions(transactions)),
        )
    }

    /// Run a paged transaction listing.
    ///
    /// `predicate` is re-checked on every decoded transaction, and
    /// `fallback_checker` decides what an empty listing without a cursor means.
    ///
    /// A `page_size` of zero answers an empty page with the full count and
    /// the supplied paging hash as the next cursor. Without a paging hash the
    /// next cursor is `None`: a cursor names the last transaction already
    /// seen, so no hash could resume a traversal from the head.
    pub(super) fn execute_transactions_query<P, F>(
        &self,
        context: &QueryContext,
        permissions: &PermissionCheck,
        related: &RelatedTransactions,
        pagination: &TxPaginationMeta,
        predicate: P,
        fallback_checker: F,
    ) -> QueryExecutorResult
    where
        P: Fn(&SignedTransaction) -> bool,
        F: FnOnce() -> Result<QueryFallbackCheckResult, Failure>,
    {
        self.execute_query(
            context,
            permissions,
            || self.read_transactions_page(related, pagination, &predicate),
            fallback_checker,
            |page| Ok(QueryResponse::TransactionsPage(page.into())),
        )
    }

    fn read_transactions_page(
        &self,
        related: &RelatedTransactions,
        pagination: &TxPaginationMeta,
        predicate: &impl Fn(&SignedTransaction) -> bool,
    ) -> Result<TransactionsPage, Failure> {
        let positions = self.resolve_positions(related, pagination)?;
        let all_transactions_size = positions.len() as u64;
        let page_size = pagination.page_size as usize;
        let cursor = pagination.paging_hash.as_ref();

        let page = page_after(&positions, |position| &position.hash, cursor, page_size)
            .map_err(|_| QueryFailure::invalid_pagination("invalid pagination hash"))?;

        let mut transactions = Vec::with_capacity(page.items.len());
        for (height, group) in &page.items.iter().group_by(|position| position.height) {
            transactions.extend(self.get_transactions_from_block(
                height,
                group.map(|position| position.index),
                predicate,
            )?);
        }

        let next_tx_hash = if page_size == 0 {
            cursor.copied()
        } else {
            page.next.map(|position| position.hash)
        };

        Ok(TransactionsPage {
            transactions,
            next_tx_hash,
            all_transactions_size,
            cursor_supplied: cursor.is_some(),
        })
    }

    /// Every related transaction within the bounds of `pagination`, in its order.
    fn resolve_positions(
        &self,
        related: &RelatedTransactions,
        pagination: &TxPaginationMeta,
    ) -> Result<Vec<TxPosition>, Failure> {
        let direction = match pagination.ordering {
            TxOrdering::Ascending => "ASC",
            TxOrdering::Descending => "DESC",
        };
        let statement = format!(
            "WITH related AS ({selector}) \
             SELECT hash, height, idx FROM related \
             WHERE (:first_tx_height IS NULL OR height >= :first_tx_height) \
             AND (:last_tx_height IS NULL OR height <= :last_tx_height) \
             AND (:first_tx_time IS NULL OR ts >= :first_tx_time) \
             AND (:last_tx_time IS NULL OR ts <= :last_tx_time) \
             ORDER BY height {direction}, idx {direction}",
            selector = related.selector,
        );

        let mut params: Vec<(&str, &dyn ToSql)> = related
            .params
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect();
        params.extend([
            (":first_tx_height", &pagination.first_tx_height as &dyn ToSql),
            (":last_tx_height", &pagination.last_tx_height as &dyn ToSql),
            (":first_tx_time", &pagination.first_tx_time as &dyn ToSql),
            (":last_tx_time", &pagination.last_tx_time as &dyn ToSql),
        ]);

        let mut statement = self.sql.prepare_cached(&statement)?;
        let rows = statement.query_map(params.as_slice(), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?, row.get::<_, usize>(2)?))
        })?;

        let mut positions = Vec::new();
        for row in rows {
            let (hash, height, index) = row?;
            positions.push(TxPosition {
                hash: parse_column("tx_positions.hash", hash)?,
                height,
                index,
            });
        }
        Ok(positions)
    }

    /// Transactions with `hashes`, in that order.
    ///
    /// Without [`RolePermission::GetAllTxs`] only transactions created by
    /// `authority` are visible.
    fn read_transactions_by_hash(
        &self,
        authority: &AccountId,
        hashes: &[HashOf<SignedTransaction>],
    ) -> Result<Vec<SignedTransaction>, Failure> {
        let can_see_all = has_account_role_permission(self.sql, RolePermission::GetAllTxs, authority)?;
        let mut statement = self.sql.prepare_cached(
            r#"SELECT creator_id, height, "index" FROM tx_positions WHERE hash = ?1"#,
        )?;

        let mut positions = Vec::with_capacity(hashes.len());
        for hash in hashes {
            let row = statement
                .query_row(params![hash.to_string()], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?, row.get::<_, usize>(2)?))
                })
                .optional()?;
            let Some((creator, height, index)) = row else {
                return Err(QueryFailure::invalid_pagination(format!(
                    "no transaction with hash {hash} found"
                ))
                .into());
            };
            let creator: AccountId = parse_column("tx_positions.creator_id", creator)?;
            if !can_see_all && &creator != authority {
                return Err(QueryFailure::invalid_pagination(format!(
                    "transaction {hash} is not accessible to {authority}"
                ))
                .into());
            }
            positions.push((height, index));
        }

        let mut transactions = Vec::with_capacity(positions.len());
        for (height, group) in &positions.iter().group_by(|(height, _)| *height) {
            transactions.extend(self.get_transactions_from_block(
                height,
                group.map(|(_, index)| *index),
                |_| true,
            )?);
        }
        Ok(transactions)
    }

    pub(super) fn check_account_exists(
        &self,
        account_id: &AccountId,
    ) -> Result<QueryFallbackCheckResult, Failure> {
        if exists_in_db(
            self.sql,
            schema::ACCOUNT,
            "account_id",
            "quorum",
            &account_id.to_string(),
        )? {
            return Ok(QueryFallbackCheckResult::Empty);
        }
        Ok(QueryFallbackCheckResult::Error(QueryFailure::new(
            ErrorQueryType::NoAccount,
            error_code::INVALID_ACCOUNT_ID,
            format!("no account with such id found: {account_id}"),
        )))
    }

    fn check_asset_exists(&self, asset_id: &AssetId) -> Result<QueryFallbackCheckResult, Failure> {
        if exists_in_db(
            self.sql,
            schema::ASSET,
            "asset_id",
            "precision",
            &asset_id.to_string(),
        )? {
            return Ok(QueryFallbackCheckResult::Empty);
        }
        Ok(QueryFallbackCheckResult::Error(QueryFailure::new(
            ErrorQueryType::NoAsset,
            error_code::INVALID_ASSET_ID,
            format!("no asset with such id found: {asset_id}"),
        )))
    }
}
