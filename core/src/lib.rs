//! Iroha read path: executes role-checked, paginated queries over the ledger
//! state index and the block store.

pub mod block;
pub mod index;
pub mod kura;
pub mod pending;
pub mod permissions;
pub mod query;

pub mod prelude {
    //! Re-exports important traits and types. Meant to be glob imported when using `iroha_query`.

    #[doc(inline)]
    pub use crate::{
        block::{BlockDecoder, ScaleBlockDecoder},
        index::Index,
        kura::{BlockSource, BlockStore},
        pending::{PendingTransactionStorage, PendingTransactionsPool},
        permissions::{has_account_role_permission, PermissionCheck},
        query::{QueryContext, QueryExecutor},
    };
}
