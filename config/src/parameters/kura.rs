//! Module for kura-related configuration and structs

use std::path::PathBuf;

use merge::Merge;
use serde::{Deserialize, Serialize};

use super::defaults::kura::DEFAULT_BLOCK_STORE_PATH;
use crate::{Complete, CompleteResult, FromEnv, ParseEnvError, ReadEnv};

/// `Kura` configuration.
#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq, Eq, Merge)]
#[serde(deny_unknown_fields, default)]
pub struct UserLayer {
    /// Directory with the block store files
    pub block_store_path: Option<PathBuf>,
}

/// Completed block store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory with the block store files
    pub block_store_path: PathBuf,
}

impl Complete for UserLayer {
    type Output = Config;

    fn complete(self) -> CompleteResult<Self::Output> {
        Ok(Config {
            block_store_path: self
                .block_store_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BLOCK_STORE_PATH)),
        })
    }
}

impl FromEnv for UserLayer {
    fn from_env(env: &impl ReadEnv) -> Result<Self, ParseEnvError> {
        Ok(Self {
            block_store_path: env.parse_env("KURA_BLOCK_STORE_PATH", "kura.block_store_path")?,
        })
    }
}
