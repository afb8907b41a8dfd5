//! Iroha data model: identifiers, ledger entities, blocks, transactions
//! and the queries served by the read path together with their responses.

use derive_more::Display;

pub mod account;
pub mod asset;
pub mod block;
pub mod domain;
pub mod name;
pub mod peer;
pub mod permission;
pub mod query;
pub mod role;
pub mod transaction;

pub use iroha_crypto::{Hash, HashOf, PublicKey, Signature};
pub use name::Name;

/// Error which occurs when parsing string into a data model entity
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[display(fmt = "{reason}")]
pub struct ParseError {
    reason: &'static str,
}

impl ParseError {
    /// Reason the candidate string was rejected.
    pub const fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Milliseconds since the Unix epoch, as recorded by transaction creators and block producers.
pub type Timestamp = u64;

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::{
        account::prelude::*, asset::prelude::*, block::prelude::*, domain::prelude::*,
        name::prelude::*, peer::prelude::*, permission::prelude::*, query::prelude::*,
        role::prelude::*, transaction::prelude::*, Hash, HashOf, PublicKey, Signature,
        Timestamp,
    };
}
