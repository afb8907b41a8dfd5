//! This module contains [`Asset`] structure, it's implementation and related traits and
//! instructions implementations.
use std::str::FromStr;

use derive_more::{Constructor, Display};
use getset::Getters;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::{account::AccountId, domain::DomainId, Name, ParseError};

/// Identification of an asset, `name#domain`.
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
#[display(fmt = "{name}#{domain_id}")]
#[getset(get = "pub")]
pub struct AssetId {
    /// Asset name.
    pub name: Name,
    /// Domain the asset was created in.
    pub domain_id: DomainId,
}

/// Asset definition as registered in a domain.
#[derive(
    Debug, Display, Clone, PartialEq, Eq, Constructor, Getters, Decode, Encode, Deserialize, Serialize,
)]
#[display(fmt = "{id} (precision {precision})")]
#[getset(get = "pub")]
pub struct Asset {
    /// Identification of the asset.
    id: AssetId,
    /// Number of digits after the decimal point.
    #[getset(skip)]
    precision: u8,
}

impl Asset {
    /// Number of digits after the decimal point.
    pub const fn precision(&self) -> u8 {
        self.precision
    }
}

/// Balance of one asset held by one account.
#[derive(
    Debug, Display, Clone, PartialEq, Eq, Constructor, Getters, Decode, Encode, Deserialize, Serialize,
)]
#[display(fmt = "{account_id}: {balance} {asset_id}")]
#[getset(get = "pub")]
pub struct AccountAsset {
    /// Holder of the balance.
    account_id: AccountId,
    /// Asset the balance is denominated in.
    asset_id: AssetId,
    /// Decimal amount as kept in the index.
    balance: String,
}

impl FromStr for AssetId {
    type Err = ParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let mut split = string.split('#');
        match (split.next(), split.next(), split.next()) {
            (Some(""), _, _) => Err(ParseError {
                reason: "Asset ID cannot be empty",
            }),
            (Some(name), Some(domain_id), None) if !domain_id.is_empty() => Ok(Self {
                name: name.parse()?,
                domain_id: domain_id.parse()?,
            }),
            _ => Err(ParseError {
                reason: "Asset ID should have format `asset#domain`",
            }),
        }
    }
}

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::{AccountAsset, Asset, AssetId};
}
