//! Reads of committed blocks.

use iroha_data_model::{
    block::SignedBlock,
    permission::RolePermission,
    query::{error::error_code, response::QueryResponse, GetBlock, QueryExecutorResult},
    transaction::SignedTransaction,
};
use iroha_logger::prelude::*;

use super::{Error, Failure, QueryContext, QueryExecutor, QueryFailure};
use crate::permissions::PermissionCheck;

impl QueryExecutor<'_> {
    pub(super) fn get_block(&self, context: &QueryContext, query: &GetBlock) -> QueryExecutorResult {
        let height = query.height;
        let invalid_height = |tip: u64| {
            QueryFailure::stateful(
                error_code::INVALID_HEIGHT,
                format!("requested height ({height}) is outside of the ledger's range [1, {tip}]"),
            )
        };

        self.execute_query(
            context,
            &PermissionCheck::any_of([RolePermission::GetBlocks]),
            || {
                let tip = self.block_store.height()?;
                if height == 0 || height > tip {
                    return Err(invalid_height(tip).into());
                }
                self.block_store
                    .read(height)?
                    .map(|bytes| self.decode_block(height, &bytes))
                    .transpose()
                    .map_err(Failure::from)
            },
            // Heights outside of the chain are rejected by the read itself.
            || Err(Error::MissingBlock(height).into()),
            |block: Option<SignedBlock>| {
                block
                    .map(QueryResponse::Block)
                    .ok_or_else(|| Error::MissingBlock(height).into())
            },
        )
    }

    fn decode_block(&self, height: u64, bytes: &[u8]) -> Result<SignedBlock, Error> {
        self.decoder
            .decode(bytes)
            .map_err(|source| Error::Decode { height, source })
    }

    /// Transactions at `positions` inside the block at `height` which satisfy
    /// `predicate`, in the order of `positions`.
    ///
    /// Positions outside of the block and transactions which fail to decode
    /// are skipped with a warning, so one bad transaction does not hide its
    /// siblings.
    ///
    /// # Errors
    /// If the block is missing from the store or does not decode.
    pub(super) fn get_transactions_from_block(
        &self,
        height: u64,
        positions: impl IntoIterator<Item = usize>,
        predicate: impl Fn(&SignedTransaction) -> bool,
    ) -> Result<Vec<SignedTransaction>, Error> {
        let bytes = self
            .block_store
            .read(height)?
            .ok_or(Error::MissingBlock(height))?;
        let block = self.decode_block(height, &bytes)?;

        Ok(positions
            .into_iter()
            .filter_map(|position| {
                let Some(encoded) = block.transactions.get(position) else {
                    warn!(height, position, "Indexed transaction is outside of its block");
                    return None;
                };
                match encoded.decode_transaction() {
                    Ok(transaction) => predicate(&transaction).then_some(transaction),
                    Err(error) => {
                        warn!(height, position, %error, "Skipping malformed transaction");
                        None
                    }
                }
            })
            .collect())
    }
}
