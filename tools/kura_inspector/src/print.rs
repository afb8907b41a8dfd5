//! Objects for the `print` subcommand.

use std::io::Write;

use iroha_query::{block::BlockDecoder, kura::BlockSource};

use crate::{Error, Output};

/// Configuration for the `print` subcommand.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Height of the block from which start the printing.
    /// `None` means printing only the latest block.
    pub from: Option<u64>,
    /// Number of the blocks to print.
    /// The excess will be truncated.
    pub length: u64,
}

impl Config {
    /// Read `block_store` and print the results to `output`.
    ///
    /// Blocks which fail to read or decode are reported to the error writer
    /// and do not stop the printing.
    ///
    /// # Errors
    /// Fails if
    /// 1. Fails to read the height of `block_store`.
    /// 2. Fails to print to `output`.
    /// 3. Tries to print the latest block and there is none.
    pub fn run<T, E>(
        &self,
        block_store: &dyn BlockSource,
        decoder: &dyn BlockDecoder,
        output: &mut Output<T, E>,
    ) -> Result<(), Error>
    where
        T: Write,
        E: Write,
    {
        let tip = block_store.height()?;
        let heights = match self.from {
            Some(from) => {
                let from = from.max(1);
                from..=from.saturating_add(self.length).saturating_sub(1).min(tip)
            }
            None if tip == 0 => return Err(Error::NoBlock),
            None => tip..=tip,
        };

        for height in heights {
            match block_store.read(height) {
                Ok(Some(bytes)) => match decoder.decode(&bytes) {
                    Ok(block) => writeln!(output.ok, "{block:#?}")?,
                    Err(error) => writeln!(output.err, "block {height}: {error}")?,
                },
                Ok(None) => writeln!(output.err, "block {height}: missing")?,
                Err(error) => writeln!(output.err, "block {height}: {error}")?,
            }
        }
        Ok(())
    }
}
