//! Transactions accepted by the peer but not committed yet.

use iroha_data_model::{account::AccountId, transaction::SignedTransaction, HashOf};
use parking_lot::RwLock;

/// Source of not yet committed transactions.
pub trait PendingTransactionStorage: Send + Sync {
    /// Pending transactions visible to `account_id`, in the order they were accepted.
    fn pending_transactions(&self, account_id: &AccountId) -> Vec<SignedTransaction>;
}

/// In-memory pool of pending transaction batches.
///
/// A batch is pending for every account which created one of its
/// transactions, so each of them sees the whole batch.
#[derive(Debug, Default)]
pub struct PendingTransactionsPool {
    batches: RwLock<Vec<Vec<SignedTransaction>>>,
}

impl PendingTransactionsPool {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch of transactions. Empty batches are ignored.
    pub fn insert_batch(&self, batch: Vec<SignedTransaction>) {
        if !batch.is_empty() {
            self.batches.write().push(batch);
        }
    }

    /// Drop every batch containing one of `committed`.
    pub fn remove_committed(&self, committed: &[HashOf<SignedTransaction>]) {
        self.batches.write().retain(|batch| {
            !batch
                .iter()
                .any(|transaction| committed.contains(&transaction.hash()))
        });
    }

    /// Number of pending batches.
    pub fn len(&self) -> usize {
        self.batches.read().len()
    }

    /// Whether no batch is pending.
    pub fn is_empty(&self) -> bool {
        self.batches.read().is_empty()
    }
}

impl PendingTransactionStorage for PendingTransactionsPool {
    fn pending_transactions(&self, account_id: &AccountId) -> Vec<SignedTransaction> {
        self.batches
            .read()
            .iter()
            .filter(|batch| {
                batch
                    .iter()
                    .any(|transaction| transaction.creator() == account_id)
            })
            .flatten()
            .cloned()
            .collect()
    }
}
