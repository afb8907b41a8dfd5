//! Ledger state index: the relational read model of committed state, kept
//! in SQLite.

pub mod schema;

use std::{fs, path::Path, str::FromStr};

use iroha_config::parameters::index::Config;
use iroha_logger::prelude::*;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Error of the ledger state index.
#[derive(Debug, displaydoc::Display, thiserror::Error)]
pub enum Error {
    /// Failed to query the ledger state index
    Sqlite(#[from] rusqlite::Error),
    /// Failed to prepare the ledger state index location
    Io(#[from] std::io::Error),
    /// Malformed value `{value}` stored in `{column}`
    Malformed {
        /// Table and column of the value
        column: &'static str,
        /// Stored value
        value: String,
    },
}

impl Error {
    /// Value in `column` does not parse into the expected type.
    pub fn malformed(column: &'static str, value: impl Into<String>) -> Self {
        Self::Malformed {
            column,
            value: value.into(),
        }
    }
}

/// Parse a stored textual value, reporting the column on failure.
///
/// # Errors
/// If `value` does not parse into `T`.
pub fn parse_column<T: FromStr>(column: &'static str, value: String) -> Result<T, Error> {
    value.parse().map_err(|_| Error::malformed(column, value))
}

/// Connection to the ledger state index.
#[derive(Debug)]
pub struct Index {
    connection: Connection,
}

impl Index {
    /// Open the index database at `path`, creating it and its tables when missing.
    ///
    /// # Errors
    /// If the file cannot be created or opened.
    pub fn open(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "Opening ledger state index");
        Self::init(Connection::open(path)?)
    }

    /// Open the index database at the configured location.
    ///
    /// # Errors
    /// See [`Self::open`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::open(&config.path)
    }

    /// Open a private in-memory index.
    ///
    /// # Errors
    /// If SQLite fails to allocate the database.
    pub fn in_memory() -> Result<Self, Error> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(connection: Connection) -> Result<Self, Error> {
        connection.execute_batch(schema::CREATE_TABLES)?;
        Ok(Self { connection })
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Start a read session observing one consistent state for all of its statements.
    ///
    /// # Errors
    /// If SQLite refuses to begin the transaction.
    pub fn snapshot(&mut self) -> Result<Transaction<'_>, Error> {
        Ok(self
            .connection
            .transaction_with_behavior(TransactionBehavior::Deferred)?)
    }
}

/// Whether `table` has a row with `key_column` equal to `key_value`.
///
/// Selects `value_column` of at most one row; a fault of the read is an error,
/// not `false`.
///
/// # Errors
/// If the statement fails.
pub fn exists_in_db(
    sql: &Connection,
    table: &'static str,
    key_column: &'static str,
    value_column: &'static str,
    key_value: &str,
) -> Result<bool, Error> {
    let statement = format!("SELECT {value_column} FROM {table} WHERE {key_column} = ?1 LIMIT 1");
    let found = sql
        .query_row(&statement, params![key_value], |_row| Ok(()))
        .optional()?;
    Ok(found.is_some())
}
