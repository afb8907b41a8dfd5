//! Peers of the network.

use iroha_data_model::{
    peer::Peer,
    permission::RolePermission,
    query::{response::QueryResponse, QueryExecutorResult},
};

use super::{Failure, QueryContext, QueryExecutor, QueryFallbackCheckResult};
use crate::{index::parse_column, permissions::PermissionCheck};

impl QueryExecutor<'_> {
    pub(super) fn get_peers(&self, context: &QueryContext) -> QueryExecutorResult {
        self.execute_query(
            context,
            &PermissionCheck::any_of([RolePermission::GetPeers]),
            || self.read_peers(),
            || Ok(QueryFallbackCheckResult::Empty),
            |peers| Ok(QueryResponse::Peers(peers)),
        )
    }

    fn read_peers(&self) -> Result<Vec<Peer>, Failure> {
        let mut statement = self
            .sql
            .prepare_cached("SELECT public_key, address, tls_certificate FROM peer ORDER BY public_key")?;
        let rows = statement.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        let mut peers = Vec::new();
        for row in rows {
            let (public_key, address, tls_certificate) = row?;
            let public_key = parse_column("peer.public_key", public_key)?;
            peers.push(Peer::new(address, public_key, tls_certificate));
        }
        Ok(peers)
    }
}
