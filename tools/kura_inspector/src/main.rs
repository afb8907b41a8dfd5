//! Kura inspector binary. Reads the block store and the ledger state index
//! of a stopped node.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use iroha_config::{parameters::user::Root, std_env, Complete};
use iroha_data_model::account::AccountId;
use iroha_query::{block::ScaleBlockDecoder, index::Index, kura::BlockStore};
use kura_inspector::{print, query, DefaultOutput};

/// Kura inspector
#[derive(Parser)]
#[clap(version, about, author)]
struct Args {
    /// Path to the configuration file.
    /// Environment variables override its values
    #[clap(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print contents of a certain length of the blocks
    Print {
        /// Height of the block from which start the printing.
        /// Defaults to the latest block
        #[clap(short, long, value_name = "BLOCK_HEIGHT")]
        from: Option<u64>,
        /// Number of the blocks to print.
        /// The excess will be truncated
        #[clap(short = 'n', long, default_value_t = 1)]
        length: u64,
    },
    /// Execute a query read from a JSON file against the committed state
    Query {
        /// Account on whose behalf the query is executed
        #[clap(short, long)]
        authority: AccountId,
        /// File with the JSON representation of the query
        #[clap(value_name = "PATH")]
        query: PathBuf,
    },
}

fn main() -> Result<()> {
    iroha_logger::install_panic_hook()?;
    let args = Args::parse();

    let config = Root::load(args.config.as_deref(), &std_env)
        .wrap_err("Failed to read the configuration")?
        .complete()
        .wrap_err("Invalid configuration")?;
    let block_store = BlockStore::from_config(&config.kura);
    let mut output = DefaultOutput::new();

    match args.command {
        Command::Print { from, length } => print::Config { from, length }
            .run(&block_store, &ScaleBlockDecoder, &mut output)
            .wrap_err("Kura inspection failed")?,
        Command::Query { authority, query } => {
            let mut index = Index::from_config(&config.index)?;
            let snapshot = index.snapshot()?;
            query::Config { authority, query }
                .run(&snapshot, &block_store, &mut output)
                .wrap_err("Query failed")?;
        }
    }
    Ok(())
}
