//! General objects independent from executables.

use std::io::{Stderr, Stdout, Write};

use iroha_query::{index, kura};

pub mod print;
pub mod query;
#[cfg(test)]
#[allow(clippy::restriction)]
mod test_support;

/// Where to write the results of the inspection.
pub struct Output<T, E>
where
    T: Write,
    E: Write,
{
    /// Writer for valid data
    pub ok: T,
    /// Writer for invalid data
    pub err: E,
}

/// [`Output`] for CLI use.
pub type DefaultOutput = Output<Stdout, Stderr>;

impl DefaultOutput {
    /// Construct [`DefaultOutput`].
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            ok: std::io::stdout(),
            err: std::io::stderr(),
        }
    }
}

/// Failure of an inspection.
#[derive(Debug, displaydoc::Display, thiserror::Error)]
pub enum Error {
    /// Failed to read the block store
    ReadBlockStore(#[from] kura::Error),
    /// Failed to open the ledger state index
    OpenIndex(#[from] index::Error),
    /// Failed to write the output
    Output(#[from] std::io::Error),
    /// The block store holds no blocks
    NoBlock,
    /// Failed to read the query file
    ReadQuery(#[source] std::io::Error),
    /// Failed to parse the query
    ParseQuery(#[source] serde_json::Error),
    /// Failed to render the query result
    RenderResult(#[source] serde_json::Error),
}
