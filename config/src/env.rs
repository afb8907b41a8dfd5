//! Access to environment variables.
use std::{
    borrow::Cow,
    cell::RefCell,
    collections::{HashMap, HashSet},
    ops::Sub,
    str::FromStr,
};

/// Failed to parse `{key}` (`{field}`) from `{value}`: {message}
#[derive(Debug, displaydoc::Display, thiserror::Error, Clone, PartialEq, Eq)]
pub struct ParseEnvError {
    /// Name of the variable
    pub key: &'static str,
    /// Dotted path of the parameter it sets
    pub field: &'static str,
    /// Raw value
    pub value: String,
    /// Why it was rejected
    pub message: String,
}

/// Source of environment variables.
pub trait ReadEnv {
    /// Value of the variable `key`, if set.
    fn read_env(&self, key: &str) -> Option<Cow<'_, str>>;

    /// Read and parse the variable `key` which sets the parameter `field`.
    ///
    /// # Errors
    /// If the variable is set but does not parse into `T`.
    fn parse_env<T>(
        &self,
        key: &'static str,
        field: &'static str,
    ) -> Result<Option<T>, ParseEnvError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(value) = self.read_env(key) else {
            return Ok(None);
        };
        value
            .parse()
            .map(Some)
            .map_err(|error: T::Err| ParseEnvError {
                key,
                field,
                value: value.clone().into_owned(),
                message: error.to_string(),
            })
    }
}

impl<F> ReadEnv for F
where
    F: Fn(&str) -> Option<Cow<'static, str>>,
{
    fn read_env(&self, key: &str) -> Option<Cow<'static, str>> {
        self(key)
    }
}

/// Read variables of the current process.
pub fn std_env(key: &str) -> Option<Cow<'static, str>> {
    match std::env::var(key) {
        Ok(value) => Some(Cow::from(value)),
        Err(std::env::VarError::NotPresent) => None,
        Err(_) => {
            tracing::error!(key, "Found non-unicode characters in env var, ignoring");
            None
        }
    }
}

/// An implementation of [`ReadEnv`] for testing convenience.
#[derive(Default)]
pub struct TestEnv {
    map: HashMap<String, String>,
    visited: RefCell<HashSet<String>>,
}

impl TestEnv {
    /// Create new empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key-value pair
    #[must_use]
    pub fn set(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.map
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Get a set of keys not visited yet by [`ReadEnv::read_env`]
    pub fn unvisited(&self) -> HashSet<String> {
        let all_keys: HashSet<_> = self.map.keys().map(ToOwned::to_owned).collect();
        let visited: HashSet<_> = self.visited.borrow().clone();
        all_keys.sub(&visited)
    }
}

impl ReadEnv for TestEnv {
    fn read_env(&self, key: &str) -> Option<Cow<'_, str>> {
        self.visited.borrow_mut().insert(key.to_string());
        self.map.get(key).map(Cow::from)
    }
}
