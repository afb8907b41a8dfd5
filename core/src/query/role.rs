//! Roles and their permissions.

use iroha_data_model::{
    permission::{RolePermission, RolePermissionSet},
    query::{
        error::{error_code, ErrorQueryType},
        response::QueryResponse,
        GetRolePermissions, QueryExecutorResult,
    },
    role::RoleId,
};
use rusqlite::{params, OptionalExtension};

use super::{Failure, QueryContext, QueryExecutor, QueryFailure, QueryFallbackCheckResult};
use crate::{index::parse_column, permissions::PermissionCheck};

impl QueryExecutor<'_> {
    pub(super) fn get_roles(&self, context: &QueryContext) -> QueryExecutorResult {
        self.execute_query(
            context,
            &PermissionCheck::any_of([RolePermission::GetRoles]),
            || self.read_roles(),
            || {
                Ok(QueryFallbackCheckResult::Error(QueryFailure::new(
                    ErrorQueryType::NoRoles,
                    error_code::NOT_FOUND,
                    "no roles found",
                )))
            },
            |roles| Ok(QueryResponse::Roles(roles)),
        )
    }

    pub(super) fn get_role_permissions(
        &self,
        context: &QueryContext,
        query: &GetRolePermissions,
    ) -> QueryExecutorResult {
        let role_id = &query.role_id;
        let missing = || {
            QueryFailure::new(
                ErrorQueryType::NoRoles,
                error_code::NOT_FOUND,
                format!("no role with such id found: {role_id}"),
            )
        };

        self.execute_query(
            context,
            &PermissionCheck::any_of([RolePermission::GetRoles]),
            || self.read_role_permissions(role_id),
            || Ok(QueryFallbackCheckResult::Error(missing())),
            |permissions| {
                let permissions = permissions.ok_or_else(missing)?;
                Ok(QueryResponse::RolePermissions(permissions))
            },
        )
    }

    fn read_roles(&self) -> Result<Vec<RoleId>, Failure> {
        let mut statement = self.sql.prepare_cached("SELECT role_id FROM role ORDER BY role_id")?;
        let rows = statement.query_map([], |row| row.get::<_, String>(0))?;
        let mut roles = Vec::new();
        for role in rows {
            roles.push(parse_column("role.role_id", role?)?);
        }
        Ok(roles)
    }

    fn read_role_permissions(&self, role_id: &RoleId) -> Result<Option<RolePermissionSet>, Failure> {
        let permissions = self
            .sql
            .query_row(
                "SELECT permission FROM role_has_permissions WHERE role_id = ?1",
                params![role_id.to_string()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(permissions
            .map(|bits| parse_column("role_has_permissions.permission", bits))
            .transpose()?)
    }
}
