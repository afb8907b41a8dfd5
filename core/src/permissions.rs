//! Role based access control of queries.

use iroha_data_model::{
    account::AccountId,
    permission::{RolePermission, RolePermissionSet},
};
use itertools::Itertools;
use rusqlite::{params, Connection};

use crate::index::{parse_column, schema, Error};

/// Union of the permissions of every role assigned to `account_id`.
///
/// An account without roles, or one that does not exist, has no permissions.
///
/// # Errors
/// If the index cannot be read or holds a malformed permission bit string.
pub fn account_permissions(sql: &Connection, account_id: &AccountId) -> Result<RolePermissionSet, Error> {
    let statement = format!(
        "SELECT rp.permission FROM {permissions} AS rp \
         JOIN {roles} AS ar ON ar.role_id = rp.role_id \
         WHERE ar.account_id = ?1",
        permissions = schema::ROLE_HAS_PERMISSIONS,
        roles = schema::ACCOUNT_HAS_ROLES,
    );
    let mut statement = sql.prepare_cached(&statement)?;
    let rows = statement.query_map(params![account_id.to_string()], |row| row.get::<_, String>(0))?;

    let mut granted = RolePermissionSet::empty();
    for bits in rows {
        granted = granted.union(parse_column("role_has_permissions.permission", bits?)?);
    }
    Ok(granted)
}

/// Whether `account_id` holds `permission` through any of its roles.
///
/// # Errors
/// See [`account_permissions`].
pub fn has_account_role_permission(
    sql: &Connection,
    permission: RolePermission,
    account_id: &AccountId,
) -> Result<bool, Error> {
    Ok(account_permissions(sql, account_id)?.grants(permission))
}

/// Permissions any one of which lets the query author run a query.
///
/// Alternatives are kept narrowest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    alternatives: Vec<RolePermission>,
}

impl PermissionCheck {
    /// Query open to every author.
    pub const fn none() -> Self {
        Self {
            alternatives: Vec::new(),
        }
    }

    /// Query allowed by any of `alternatives`.
    pub fn any_of(alternatives: impl IntoIterator<Item = RolePermission>) -> Self {
        Self {
            alternatives: alternatives.into_iter().collect(),
        }
    }

    /// Query about `target`: `my` applies to the author's own account, `domain`
    /// to accounts of the author's domain and `all` to any account.
    pub fn for_target(
        authority: &AccountId,
        target: &AccountId,
        my: RolePermission,
        domain: RolePermission,
        all: RolePermission,
    ) -> Self {
        let mut alternatives = Vec::with_capacity(3);
        if authority == target {
            alternatives.push(my);
        }
        if authority.domain_id == target.domain_id {
            alternatives.push(domain);
        }
        alternatives.push(all);
        Self { alternatives }
    }

    /// Acceptable permissions, narrowest first.
    pub fn alternatives(&self) -> &[RolePermission] {
        &self.alternatives
    }

    /// Whether `authority` holds at least one alternative.
    ///
    /// # Errors
    /// See [`account_permissions`].
    pub fn evaluate(&self, sql: &Connection, authority: &AccountId) -> Result<bool, Error> {
        if self.alternatives.is_empty() {
            return Ok(true);
        }
        let granted = account_permissions(sql, authority)?;
        Ok(self
            .alternatives
            .iter()
            .any(|permission| granted.grants(*permission)))
    }

    /// Message of the error returned when the check fails.
    pub fn denial_message(&self) -> String {
        format!(
            "user must have at least one of the permissions: {}",
            self.alternatives.iter().join(", ")
        )
    }
}
