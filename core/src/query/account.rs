//! Accounts: the account record, its signatories, balances and details.

use std::collections::BTreeMap;

use iroha_data_model::{
    account::{Account, AccountDetail, AccountDetailRecordId, AccountId},
    asset::{AccountAsset, AssetId},
    permission::RolePermission,
    query::{
        error::{error_code, ErrorQueryType},
        response::{AccountAssetsResponse, AccountDetailResponse, AccountResponse, QueryResponse},
        GetAccount, GetAccountAssets, GetAccountDetail, GetSignatories, QueryExecutorResult,
    },
    role::RoleId,
    PublicKey,
};
use rusqlite::{params, OptionalExtension};

use super::{
    pagination::page_from, Failure, QueryContext, QueryExecutor, QueryFailure,
    QueryFallbackCheckResult, QueryRows,
};
use crate::{
    index::{self, exists_in_db, parse_column, schema},
    permissions::PermissionCheck,
};

impl QueryRows for AccountAssetsResponse {
    fn is_empty(&self) -> bool {
        self.total_number == 0
    }
}

impl QueryExecutor<'_> {
    pub(super) fn get_account(&self, context: &QueryContext, query: &GetAccount) -> QueryExecutorResult {
        let account_id = &query.account_id;
        let missing = || {
            QueryFailure::new(
                ErrorQueryType::NoAccount,
                error_code::NOT_FOUND,
                format!("no account with such id found: {account_id}"),
            )
        };

        self.execute_query(
            context,
            &PermissionCheck::for_target(
                &context.authority,
                account_id,
                RolePermission::GetMyAccount,
                RolePermission::GetDomainAccounts,
                RolePermission::GetAllAccounts,
            ),
            || self.read_account(account_id),
            || Ok(QueryFallbackCheckResult::Error(missing())),
            |account| {
                let account = account.ok_or_else(missing)?;
                Ok(QueryResponse::Account(account))
            },
        )
    }

    pub(super) fn get_signatories(
        &self,
        context: &QueryContext,
        query: &GetSignatories,
    ) -> QueryExecutorResult {
        let account_id = &query.account_id;

        self.execute_query(
            context,
            &PermissionCheck::for_target(
                &context.authority,
                account_id,
                RolePermission::GetMySignatories,
                RolePermission::GetDomainSignatories,
                RolePermission::GetAllSignatories,
            ),
            || self.read_signatories(account_id),
            || {
                let message = if self.account_exists(account_id)? {
                    format!("account {account_id} has no signatories")
                } else {
                    format!("no account with such id found: {account_id}")
                };
                Ok(QueryFallbackCheckResult::Error(QueryFailure::new(
                    ErrorQueryType::NoSignatories,
                    error_code::NOT_FOUND,
                    message,
                )))
            },
            |signatories| Ok(QueryResponse::Signatories(signatories)),
        )
    }

    /// List the balances of an account, optionally paged from `first_asset_id`.
    ///
    /// A missing account is `NoAccountAssets` even when a starting asset id is
    /// supplied; an unknown starting asset id is rejected only for an existing
    /// account.
    pub(super) fn get_account_assets(
        &self,
        context: &QueryContext,
        query: &GetAccountAssets,
    ) -> QueryExecutorResult {
        let account_id = &query.account_id;
        let missing = || {
            QueryFailure::new(
                ErrorQueryType::NoAccountAssets,
                error_code::NOT_FOUND,
                format!("no account with such id found: {account_id}"),
            )
        };

        self.execute_query(
            context,
            &PermissionCheck::for_target(
                &context.authority,
                account_id,
                RolePermission::GetMyAccAst,
                RolePermission::GetDomainAccAst,
                RolePermission::GetAllAccAst,
            ),
            || {
                let assets = self.read_account_assets(account_id)?;
                let total_number = assets.len() as u64;
                let Some(pagination) = &query.pagination else {
                    return Ok(AccountAssetsResponse::new(assets, total_number, None));
                };

                let page = match page_from(
                    &assets,
                    AccountAsset::asset_id,
                    pagination.first_asset_id.as_ref(),
                    pagination.page_size as usize,
                ) {
                    Ok(page) => page,
                    Err(_) if !self.account_exists(account_id)? => return Err(missing().into()),
                    Err(_) => {
                        return Err(QueryFailure::invalid_pagination(
                            "invalid pagination starting asset id",
                        )
                        .into())
                    }
                };
                Ok(AccountAssetsResponse::new(
                    page.items.to_vec(),
                    total_number,
                    page.next.map(|asset| asset.asset_id().clone()),
                ))
            },
            || {
                if self.account_exists(account_id)? {
                    return Ok(QueryFallbackCheckResult::Empty);
                }
                Ok(QueryFallbackCheckResult::Error(missing()))
            },
            |assets| Ok(QueryResponse::AccountAssets(assets)),
        )
    }

    pub(super) fn get_account_detail(
        &self,
        context: &QueryContext,
        query: &GetAccountDetail,
    ) -> QueryExecutorResult {
        let account_id = &query.account_id;
        let missing = || {
            QueryFailure::new(
                ErrorQueryType::NoAccountDetail,
                error_code::NOT_FOUND,
                format!("no account with such id found: {account_id}"),
            )
        };

        self.execute_query(
            context,
            &PermissionCheck::for_target(
                &context.authority,
                account_id,
                RolePermission::GetMyAccDetail,
                RolePermission::GetDomainAccDetail,
                RolePermission::GetAllAccDetail,
            ),
            || {
                self.read_account_row(account_id)?
                    .map(|(_, detail)| page_account_detail(&detail, query))
                    .transpose()
            },
            || Ok(QueryFallbackCheckResult::Error(missing())),
            |detail| {
                let detail = detail.ok_or_else(missing)?;
                Ok(QueryResponse::AccountDetail(detail))
            },
        )
    }

    fn read_account(&self, account_id: &AccountId) -> Result<Option<AccountResponse>, Failure> {
        let Some((quorum, detail)) = self.read_account_row(account_id)? else {
            return Ok(None);
        };

        let mut statement = self.sql.prepare_cached(
            "SELECT role_id FROM account_has_roles WHERE account_id = ?1 ORDER BY role_id",
        )?;
        let rows = statement.query_map(params![account_id.to_string()], |row| row.get::<_, String>(0))?;
        let mut roles = Vec::new();
        for role in rows {
            roles.push(parse_column::<RoleId>("account_has_roles.role_id", role?)?);
        }

        Ok(Some(AccountResponse::new(
            Account::new(account_id.clone(), quorum, detail),
            roles,
        )))
    }

    fn read_account_row(&self, account_id: &AccountId) -> Result<Option<(u16, AccountDetail)>, Failure> {
        let row = self
            .sql
            .query_row(
                "SELECT quorum, data FROM account WHERE account_id = ?1",
                params![account_id.to_string()],
                |row| Ok((row.get::<_, u16>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        row.map(|(quorum, data)| Ok::<_, Failure>((quorum, parse_detail(data)?)))
            .transpose()
    }

    fn read_signatories(&self, account_id: &AccountId) -> Result<Vec<PublicKey>, Failure> {
        let mut statement = self.sql.prepare_cached(
            "SELECT public_key FROM account_has_signatory WHERE account_id = ?1 ORDER BY public_key",
        )?;
        let rows = statement.query_map(params![account_id.to_string()], |row| row.get::<_, String>(0))?;
        let mut signatories = Vec::new();
        for public_key in rows {
            signatories.push(parse_column("account_has_signatory.public_key", public_key?)?);
        }
        Ok(signatories)
    }

    fn read_account_assets(&self, account_id: &AccountId) -> Result<Vec<AccountAsset>, Failure> {
        let mut statement = self.sql.prepare_cached(
            "SELECT asset_id, amount FROM account_has_asset WHERE account_id = ?1 ORDER BY asset_id",
        )?;
        let rows = statement.query_map(params![account_id.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut assets = Vec::new();
        for row in rows {
            let (asset_id, amount) = row?;
            let asset_id: AssetId = parse_column("account_has_asset.asset_id", asset_id)?;
            assets.push(AccountAsset::new(account_id.clone(), asset_id, amount));
        }
        Ok(assets)
    }

    pub(super) fn account_exists(&self, account_id: &AccountId) -> Result<bool, index::Error> {
        exists_in_db(
            self.sql,
            schema::ACCOUNT,
            "account_id",
            "quorum",
            &account_id.to_string(),
        )
    }
}

fn parse_detail(data: String) -> Result<AccountDetail, index::Error> {
    match serde_json::from_str(&data) {
        Ok(detail) => Ok(detail),
        Err(_) => Err(index::Error::malformed("account.data", data)),
    }
}

/// Records of `detail` selected by the writer and key filters of `query`,
/// paged by record and rendered as a `{writer: {key: value}}` JSON object.
fn page_account_detail(
    detail: &AccountDetail,
    query: &GetAccountDetail,
) -> Result<AccountDetailResponse, Failure> {
    let records: Vec<(AccountDetailRecordId, &String)> = detail
        .iter()
        .filter(|(writer, _)| query.writer.as_ref().map_or(true, |filter| filter == *writer))
        .flat_map(|(writer, values)| {
            values
                .iter()
                .filter(|(key, _)| query.key.as_ref().map_or(true, |filter| filter == *key))
                .map(|(key, value)| (AccountDetailRecordId::new(writer.clone(), key.clone()), value))
        })
        .collect();
    let total_number = records.len() as u64;

    let (page, next_record_id) = match &query.pagination {
        None => (records.as_slice(), None),
        Some(pagination) => {
            let page = page_from(
                &records,
                |(record_id, _)| record_id,
                pagination.first_record_id.as_ref(),
                pagination.page_size as usize,
            )
            .map_err(|_| QueryFailure::invalid_pagination("invalid pagination starting record id"))?;
            (page.items, page.next.map(|(record_id, _)| record_id.clone()))
        }
    };

    let mut rendered: BTreeMap<String, serde_json::Map<String, serde_json::Value>> = BTreeMap::new();
    for (record_id, value) in page {
        rendered
            .entry(record_id.writer.to_string())
            .or_default()
            .insert(record_id.key.clone(), serde_json::Value::String((*value).clone()));
    }
    let rendered: serde_json::Map<String, serde_json::Value> = rendered
        .into_iter()
        .map(|(writer, values)| (writer, serde_json::Value::Object(values)))
        .collect();

    Ok(AccountDetailResponse::new(
        serde_json::Value::Object(rendered).to_string(),
        total_number,
        next_record_id,
    ))
}
