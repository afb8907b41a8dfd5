//! This module contains [`Name`](`crate::name::Name`) structure
//! and related implementations and trait implementations.
use core::{borrow::Borrow, str::FromStr};

use derive_more::{DebugCustom, Display};
use parity_scale_codec::{Decode, Encode, Input};
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// `Name` struct represents the type of Iroha Entities names, such as
/// [`Domain`](`crate::domain::DomainId`) name or
/// [`Account`](`crate::account::AccountId`) name.
#[derive(
    DebugCustom, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Serialize,
)]
#[debug(fmt = "{_0:?}")]
#[serde(transparent)]
#[repr(transparent)]
pub struct Name(String);

impl Name {
    /// Check if `candidate` string would be valid [`Name`].
    ///
    /// # Errors
    /// Fails if not valid [`Name`].
    fn validate_str(candidate: &str) -> Result<(), ParseError> {
        const FORBIDDEN_CHARS: [char; 2] = ['@', '#'];

        if candidate.is_empty() {
            return Err(ParseError {
                reason: "Empty `Name`",
            });
        }
        if candidate.chars().any(char::is_whitespace) {
            return Err(ParseError {
                reason: "White space not allowed in `Name` constructs",
            });
        }
        if candidate.chars().any(|ch| FORBIDDEN_CHARS.contains(&ch)) {
            return Err(ParseError {
                reason: "The `@` character is reserved for `account@domain` constructs, \
                        and `#` for `asset#domain`.",
            });
        }
        Ok(())
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Name {
    type Err = ParseError;

    fn from_str(candidate: &str) -> Result<Self, Self::Err> {
        Self::validate_str(candidate)?;
        Ok(Self(candidate.to_owned()))
    }
}

impl TryFrom<String> for Name {
    type Error = ParseError;

    fn try_from(candidate: String) -> Result<Self, Self::Error> {
        Self::validate_str(&candidate)?;
        Ok(Self(candidate))
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let candidate = String::deserialize(deserializer)?;
        Self::try_from(candidate).map_err(D::Error::custom)
    }
}

impl Decode for Name {
    fn decode<I: Input>(input: &mut I) -> Result<Self, parity_scale_codec::Error> {
        let name = String::decode(input)?;
        Self::try_from(name).map_err(|error| parity_scale_codec::Error::from(error.reason))
    }
}

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::Name;
}
