//! Structures, traits and impls related to `Role`s.
use derive_more::{Constructor, Display, FromStr};
use getset::Getters;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::Name;

/// Identification of a role.
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
pub struct RoleId {
    /// Role name, should be unique .
    pub name: Name,
}

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::RoleId;
}
