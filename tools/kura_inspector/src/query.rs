//! Objects for the `query` subcommand.

use std::{io::Write, path::PathBuf};

use iroha_data_model::{account::AccountId, query::Query};
use iroha_query::{
    kura::BlockSource,
    pending::PendingTransactionsPool,
    query::{QueryContext, QueryExecutor},
};
use rusqlite::Connection;

use crate::{Error, Output};

/// Configuration for the `query` subcommand.
#[derive(Debug, Clone)]
pub struct Config {
    /// Account on whose behalf the query is executed.
    pub authority: AccountId,
    /// File holding the JSON representation of the query.
    pub query: PathBuf,
}

impl Config {
    /// Execute the query against the committed state and print the response to `output`.
    ///
    /// The node's pending transactions are not available offline, so
    /// `GetPendingTransactions` always answers with an empty list.
    ///
    /// A successful response goes to the valid data writer, an error
    /// response to the invalid data writer, both as pretty JSON.
    ///
    /// # Errors
    /// Fails if the query file cannot be read or parsed, or the output cannot be written.
    pub fn run<T, E>(
        &self,
        sql: &Connection,
        block_store: &dyn BlockSource,
        output: &mut Output<T, E>,
    ) -> Result<(), Error>
    where
        T: Write,
        E: Write,
    {
        let raw = std::fs::read_to_string(&self.query).map_err(Error::ReadQuery)?;
        let query: Query = serde_json::from_str(&raw).map_err(Error::ParseQuery)?;

        let pending = PendingTransactionsPool::new();
        let executor = QueryExecutor::new(sql, block_store, &pending);
        let context = QueryContext::new(self.authority.clone(), &query);

        match executor.execute(&context, &query) {
            Ok(response) => {
                let rendered =
                    serde_json::to_string_pretty(&response).map_err(Error::RenderResult)?;
                writeln!(output.ok, "{rendered}")?;
            }
            Err(error) => {
                let rendered = serde_json::to_string_pretty(&error).map_err(Error::RenderResult)?;
                writeln!(output.err, "{rendered}")?;
            }
        }
        Ok(())
    }
}
