//! Role permissions granted to accounts through their roles.
use std::{fmt, str::FromStr};

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{EnumCount, IntoEnumIterator};

use crate::ParseError;

/// Read capability held by a role. The discriminant is the position of the
/// permission inside a [`RolePermissionSet`] and must never be reassigned.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Decode,
    Encode,
    DeserializeFromStr,
    SerializeDisplay,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[repr(u8)]
pub enum RolePermission {
    #[strum(serialize = "can_get_my_account")]
    GetMyAccount = 0,
    #[strum(serialize = "can_get_all_accounts")]
    GetAllAccounts = 1,
    #[strum(serialize = "can_get_domain_accounts")]
    GetDomainAccounts = 2,
    #[strum(serialize = "can_get_my_signatories")]
    GetMySignatories = 3,
    #[strum(serialize = "can_get_all_signatories")]
    GetAllSignatories = 4,
    #[strum(serialize = "can_get_domain_signatories")]
    GetDomainSignatories = 5,
    #[strum(serialize = "can_get_my_acc_ast")]
    GetMyAccAst = 6,
    #[strum(serialize = "can_get_all_acc_ast")]
    GetAllAccAst = 7,
    #[strum(serialize = "can_get_domain_acc_ast")]
    GetDomainAccAst = 8,
    #[strum(serialize = "can_get_my_acc_detail")]
    GetMyAccDetail = 9,
    #[strum(serialize = "can_get_all_acc_detail")]
    GetAllAccDetail = 10,
    #[strum(serialize = "can_get_domain_acc_detail")]
    GetDomainAccDetail = 11,
    #[strum(serialize = "can_get_my_acc_txs")]
    GetMyAccTxs = 12,
    #[strum(serialize = "can_get_all_acc_txs")]
    GetAllAccTxs = 13,
    #[strum(serialize = "can_get_domain_acc_txs")]
    GetDomainAccTxs = 14,
    #[strum(serialize = "can_get_my_acc_ast_txs")]
    GetMyAccAstTxs = 15,
    #[strum(serialize = "can_get_all_acc_ast_txs")]
    GetAllAccAstTxs = 16,
    #[strum(serialize = "can_get_domain_acc_ast_txs")]
    GetDomainAccAstTxs = 17,
    #[strum(serialize = "can_get_my_txs")]
    GetMyTxs = 18,
    #[strum(serialize = "can_get_all_txs")]
    GetAllTxs = 19,
    #[strum(serialize = "can_get_blocks")]
    GetBlocks = 20,
    #[strum(serialize = "can_get_roles")]
    GetRoles = 21,
    #[strum(serialize = "can_read_assets")]
    ReadAssets = 22,
    #[strum(serialize = "can_get_peers")]
    GetPeers = 23,
    /// Implies every other permission.
    #[strum(serialize = "root")]
    Root = 24,
}

impl RolePermission {
    /// Position of the permission inside a [`RolePermissionSet`].
    pub const fn position(self) -> u32 {
        self as u32
    }
}

/// Set of [`RolePermission`]s.
///
/// Kept in the ledger state index as a bit string with one `'0'`/`'1'`
/// character per permission position, leftmost character is position 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Decode, Encode)]
pub struct RolePermissionSet(u64);

impl RolePermissionSet {
    /// Set without any permission.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Whether `permission` is in the set. [`RolePermission::Root`] is not implied here.
    pub const fn contains(self, permission: RolePermission) -> bool {
        self.0 & (1 << permission.position()) != 0
    }

    /// Whether the set grants `permission`, either directly or through [`RolePermission::Root`].
    pub const fn grants(self, permission: RolePermission) -> bool {
        self.contains(permission) || self.contains(RolePermission::Root)
    }

    /// Add `permission` to the set.
    pub fn insert(&mut self, permission: RolePermission) {
        self.0 |= 1 << permission.position();
    }

    /// Union of both sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Permissions in the set, ordered by position.
    pub fn iter(self) -> impl Iterator<Item = RolePermission> {
        RolePermission::iter().filter(move |permission| self.contains(*permission))
    }

    /// Whether no permission is in the set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<RolePermission> for RolePermissionSet {
    fn from_iter<T: IntoIterator<Item = RolePermission>>(iter: T) -> Self {
        let mut set = Self::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl fmt::Display for RolePermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for permission in RolePermission::iter() {
            f.write_str(if self.contains(permission) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for RolePermissionSet {
    type Err = ParseError;

    fn from_str(bits: &str) -> Result<Self, Self::Err> {
        if bits.len() > RolePermission::COUNT {
            return Err(ParseError {
                reason: "Permission bit string is longer than the number of known permissions",
            });
        }
        bits.chars()
            .zip(RolePermission::iter())
            .try_fold(Self::empty(), |mut set, (bit, permission)| {
                match bit {
                    '0' => {}
                    '1' => set.insert(permission),
                    _ => {
                        return Err(ParseError {
                            reason: "Permission bit string may only contain `0` and `1`",
                        })
                    }
                }
                Ok(set)
            })
    }
}

impl Serialize for RolePermissionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for RolePermissionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<RolePermission>::deserialize(deserializer)?
            .into_iter()
            .collect())
    }
}

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::{RolePermission, RolePermissionSet};
}
