//! Structures, traits and impls related to `Account`s.
use std::{collections::BTreeMap, str::FromStr};

use derive_more::{Constructor, Display};
use getset::Getters;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::{domain::DomainId, Name, ParseError};

/// Key-value details of an account, grouped by the account which wrote them.
pub type AccountDetail = BTreeMap<AccountId, BTreeMap<String, String>>;

/// Identification of an [`Account`]. Consists of Account name and Domain name.
///
/// # Examples
///
/// ```rust
/// use iroha_data_model::account::AccountId;
///
/// let id = "user@company".parse::<AccountId>().expect("Valid");
/// ```
#[derive(
    Debug,
    Display,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Constructor,
    Getters,
    Decode,
    Encode,
    DeserializeFromStr,
    SerializeDisplay,
)]
#[display(fmt = "{name}@{domain_id}")]
#[getset(get = "pub")]
pub struct AccountId {
    /// [`Account`]'s name.
    pub name: Name,
    /// [`Account`]'s domain id.
    pub domain_id: DomainId,
}

/// Account entity as it is kept in the ledger state index.
#[derive(Debug, Display, Clone, PartialEq, Eq, Getters, Decode, Encode, Deserialize, Serialize)]
#[display(fmt = "({id})")]
#[getset(get = "pub")]
pub struct Account {
    /// Identification of the [`Account`].
    id: AccountId,
    /// Number of signatures required for a transaction of this account.
    quorum: u16,
    /// Key-value details attached to the account by their writers.
    detail: AccountDetail,
}

impl Account {
    /// Construct an [`Account`] from its indexed parts.
    pub fn new(id: AccountId, quorum: u16, detail: AccountDetail) -> Self {
        Self { id, quorum, detail }
    }

    /// Domain the account belongs to.
    pub fn domain_id(&self) -> &DomainId {
        &self.id.domain_id
    }
}

/// Position of one account detail record: the writer plus the key it wrote.
#[derive(
    Debug,
    Display,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Constructor,
    Decode,
    Encode,
    Deserialize,
    Serialize,
)]
#[display(fmt = "{writer}/{key}")]
pub struct AccountDetailRecordId {
    /// Account which wrote the record.
    pub writer: AccountId,
    /// Key of the record.
    pub key: String,
}

impl FromStr for AccountId {
    type Err = ParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let split = string.rsplit_once('@');
        match split {
            Some(("", _)) => Err(ParseError {
                reason: "`AccountId` cannot be empty",
            }),
            Some((name, domain_id)) if !name.is_empty() && !domain_id.is_empty() => {
                Ok(AccountId {
                    name: name.parse()?,
                    domain_id: domain_id.parse()?,
                })
            }
            _ => Err(ParseError {
                reason: "`AccountId` should have format `name@domain_name`",
            }),
        }
    }
}

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::{Account, AccountDetail, AccountDetailRecordId, AccountId};
}
