//! Configuration of the ledger state index.

use std::path::PathBuf;

use merge::Merge;
use serde::{Deserialize, Serialize};

use super::defaults::index::DEFAULT_INDEX_PATH;
use crate::{Complete, CompleteError, CompleteResult, FromEnv, ParseEnvError, ReadEnv};

/// `Index` configuration.
#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq, Eq, Merge)]
#[serde(deny_unknown_fields, default)]
pub struct UserLayer {
    /// SQLite database file
    pub path: Option<PathBuf>,
}

/// Completed index configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database file
    pub path: PathBuf,
}

impl Complete for UserLayer {
    type Output = Config;

    fn complete(self) -> CompleteResult<Self::Output> {
        let path = self
            .path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH));
        if path.as_os_str().is_empty() {
            return Err(CompleteError::InvalidValue {
                field: "index.path",
                message: "path is empty".to_owned(),
            });
        }
        Ok(Config { path })
    }
}

impl FromEnv for UserLayer {
    fn from_env(env: &impl ReadEnv) -> Result<Self, ParseEnvError> {
        Ok(Self {
            path: env.parse_env("INDEX_PATH", "index.path")?,
        })
    }
}
