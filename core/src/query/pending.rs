//! Transactions of the query author which are not committed yet.

use iroha_data_model::{
    query::{
        response::QueryResponse, GetPendingTransactions, PendingTxPaginationMeta,
        QueryExecutorResult,
    },
    transaction::SignedTransaction,
    HashOf,
};

use super::{
    pagination::page_after, transactions::TransactionsPage, Failure, QueryContext, QueryExecutor,
    QueryFailure, QueryFallbackCheckResult,
};
use crate::permissions::PermissionCheck;

impl QueryExecutor<'_> {
    pub(super) fn get_pending_transactions(
        &self,
        context: &QueryContext,
        query: &GetPendingTransactions,
    ) -> QueryExecutorResult {
        // Authors always see their own pending transactions.
        let permissions = PermissionCheck::none();
        let Some(pagination) = &query.pagination else {
            return self.execute_query(
                context,
                &permissions,
                || Ok(self.pending_txs_storage.pending_transactions(&context.authority)),
                || Ok(QueryFallbackCheckResult::Empty),
                |transactions| Ok(QueryResponse::Transactions(transactions)),
            );
        };

        self.execute_query(
            context,
            &permissions,
            || self.read_pending_page(context, pagination),
            || Ok(QueryFallbackCheckResult::Empty),
            |page| Ok(QueryResponse::PendingTransactionsPage(page.into())),
        )
    }

    fn read_pending_page(
        &self,
        context: &QueryContext,
        pagination: &PendingTxPaginationMeta,
    ) -> Result<TransactionsPage, Failure> {
        let pending: Vec<(HashOf<SignedTransaction>, SignedTransaction)> = self
            .pending_txs_storage
            .pending_transactions(&context.authority)
            .into_iter()
            .map(|transaction| (transaction.hash(), transaction))
            .collect();
        let page_size = pagination.page_size as usize;
        let cursor = pagination.paging_hash.as_ref();

        let page = page_after(&pending, |(hash, _)| hash, cursor, page_size)
            .map_err(|_| QueryFailure::invalid_pagination("invalid pagination hash"))?;

        Ok(TransactionsPage {
            transactions: page
                .items
                .iter()
                .map(|(_, transaction)| transaction.clone())
                .collect(),
            next_tx_hash: if page_size == 0 {
                cursor.copied()
            } else {
                page.next.map(|(hash, _)| *hash)
            },
            all_transactions_size: pending.len() as u64,
            cursor_supplied: cursor.is_some(),
        })
    }
}
