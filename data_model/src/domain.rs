//! Structures related to `Domain`s.
use derive_more::{Constructor, Display, FromStr};
use getset::Getters;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::Name;

/// Identification of a domain, the namespace accounts and assets live in.
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
    FromStr,
    Getters,
    Decode,
    Encode,
    Deserialize,
    Serialize,
)]
#[getset(get = "pub")]
#[serde(transparent)]
#[repr(transparent)]
pub struct DomainId {
    /// [`Name`] unique to a domain.
    pub name: Name,
}

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::DomainId;
}
