//! Aggregate configuration of the query engine and its tooling.
//!
//! Every section has a user layer with optional fields, read from a TOML file
//! and from the environment, which is then completed into a typed config.

pub mod env;
pub mod parameters {
    //! Configuration sections.

    pub mod defaults;
    pub mod index;
    pub mod kura;
    pub mod logger;
    pub mod user;
}

pub use env::{std_env, ParseEnvError, ReadEnv, TestEnv};

/// Result of [`Complete::complete`].
pub type CompleteResult<T> = Result<T, CompleteError>;

/// Missing or contradicting parameters found while completing a user layer.
#[derive(Debug, displaydoc::Display, thiserror::Error)]
pub enum CompleteError {
    /// Missing parameter: `{0}`
    MissingField(&'static str),
    /// Invalid value of `{field}`: {message}
    InvalidValue {
        /// Dotted path of the parameter
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

/// Turn a user layer into the final configuration, filling in defaults.
pub trait Complete {
    /// Completed configuration.
    type Output;

    /// Produce the final configuration.
    ///
    /// # Errors
    /// If a parameter without a default is missing or a value is invalid.
    fn complete(self) -> CompleteResult<Self::Output>;
}

/// Read a user layer from environment variables.
pub trait FromEnv: Sized {
    /// Read every known variable of the layer.
    ///
    /// # Errors
    /// If a variable is set but cannot be parsed.
    fn from_env(env: &impl ReadEnv) -> Result<Self, ParseEnvError>;
}
