//! Asset definitions.

use iroha_data_model::{
    asset::{Asset, AssetId},
    permission::RolePermission,
    query::{
        error::{error_code, ErrorQueryType},
        response::QueryResponse,
        GetAssetInfo, QueryExecutorResult,
    },
};
use rusqlite::{params, OptionalExtension};

use super::{Failure, QueryContext, QueryExecutor, QueryFailure, QueryFallbackCheckResult};
use crate::permissions::PermissionCheck;

impl QueryExecutor<'_> {
    pub(super) fn get_asset_info(
        &self,
        context: &QueryContext,
        query: &GetAssetInfo,
    ) -> QueryExecutorResult {
        let asset_id = &query.asset_id;
        let missing = || {
            QueryFailure::new(
                ErrorQueryType::NoAsset,
                error_code::NOT_FOUND,
                format!("no asset with such id found: {asset_id}"),
            )
        };

        self.execute_query(
            context,
            &PermissionCheck::any_of([RolePermission::ReadAssets]),
            || self.read_asset(asset_id),
            || Ok(QueryFallbackCheckResult::Error(missing())),
            |asset| {
                let asset = asset.ok_or_else(missing)?;
                Ok(QueryResponse::AssetInfo(asset))
            },
        )
    }

    fn read_asset(&self, asset_id: &AssetId) -> Result<Option<Asset>, Failure> {
        let precision = self
            .sql
            .query_row(
                "SELECT precision FROM asset WHERE asset_id = ?1",
                params![asset_id.to_string()],
                |row| row.get::<_, u8>(0),
            )
            .optional()?;

        Ok(precision.map(|precision| Asset::new(asset_id.clone(), precision)))
    }
}
