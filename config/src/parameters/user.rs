//! User configuration view. Contains structures in a format that is
//! convenient from the user perspective. It is less strict and not necessarily valid upon
//! successful parsing of the user-provided content.

use std::{fs, path::Path};

use eyre::{eyre, WrapErr};
use merge::Merge;
use serde::{Deserialize, Serialize};

use super::{index, kura, logger};
use crate::{Complete, CompleteResult, FromEnv, ParseEnvError, ReadEnv};

/// Root of the user configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Merge)]
#[serde(deny_unknown_fields, default)]
pub struct Root {
    /// Logger section
    pub logger: logger::UserLayer,
    /// Block store section
    pub kura: kura::UserLayer,
    /// Ledger state index section
    pub index: index::UserLayer,
}

/// Completed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Logger configuration
    pub logger: logger::Config,
    /// Block store configuration
    pub kura: kura::Config,
    /// Ledger state index configuration
    pub index: index::Config,
}

impl Root {
    /// Read the layer from TOML file
    ///
    /// # Errors
    /// - If file is not found, or not a valid TOML
    /// - If failed to parse data into a layer
    pub fn from_toml(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| eyre!("cannot open file at location `{}`", path.display()))?;
        let mut layer: Self = toml::from_str(&contents).wrap_err("failed to parse toml")?;

        if let Some(base_path) = path.parent() {
            layer.normalise_paths(base_path);
        }

        Ok(layer)
    }

    /// Read the file layer (if any), then let the environment override it.
    ///
    /// # Errors
    /// If the file cannot be read or an environment variable cannot be parsed.
    pub fn load(path: Option<&Path>, env: &impl ReadEnv) -> eyre::Result<Self> {
        let mut layer = Self::from_env(env)?;
        if let Some(path) = path {
            layer.merge(Self::from_toml(path)?);
        }
        Ok(layer)
    }

    fn normalise_paths(&mut self, relative_to: &Path) {
        macro_rules! patch {
            ($value:expr) => {
                if let Some(x) = $value.as_mut() {
                    *x = relative_to.join(&x);
                }
            };
        }

        patch!(self.kura.block_store_path);
        patch!(self.index.path);
    }
}

impl FromEnv for Root {
    fn from_env(env: &impl ReadEnv) -> Result<Self, ParseEnvError> {
        Ok(Self {
            logger: logger::UserLayer::from_env(env)?,
            kura: kura::UserLayer::from_env(env)?,
            index: index::UserLayer::from_env(env)?,
        })
    }
}

impl Complete for Root {
    type Output = Config;

    fn complete(self) -> CompleteResult<Self::Output> {
        Ok(Config {
            logger: self.logger.complete()?,
            kura: self.kura.complete()?,
            index: self.index.complete()?,
        })
    }
}
