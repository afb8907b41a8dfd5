//! Read access to the append-only block store committed blocks are served from.
//!
//! A store is a directory with two files. `blocks.index` holds one entry per
//! block: its `start` offset and `length` in the data file, both little-endian
//! `u64`. `blocks.data` holds the serialized blocks back to back. The commit
//! path appends to both files; this module never writes.
use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use iroha_config::parameters::kura::Config;
use iroha_logger::prelude::*;

/// Name of the file with block locations.
pub const INDEX_FILE_NAME: &str = "blocks.index";
/// Name of the file with block contents.
pub const DATA_FILE_NAME: &str = "blocks.data";

const INDEX_ENTRY_SIZE: u64 = 2 * core::mem::size_of::<u64>() as u64;

/// Read access to committed blocks, addressed by height starting at 1.
pub trait BlockSource {
    /// Height of the chain tip, `0` for an empty chain.
    ///
    /// # Errors
    /// If the store cannot be read.
    fn height(&self) -> Result<u64>;

    /// Serialized block at `height`, `None` for `0` and for heights above the tip.
    ///
    /// # Errors
    /// If the store cannot be read.
    fn read(&self, height: u64) -> Result<Option<Vec<u8>>>;
}

/// Block store directory opened for reading.
///
/// Holds no file handles between calls, so every read observes the blocks
/// committed up to that moment.
#[derive(Debug, Clone)]
pub struct BlockStore {
    path: PathBuf,
}

impl BlockStore {
    /// Store in the directory `path`. A directory without store files is an empty chain.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Store at the configured location.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.block_store_path)
    }

    /// Directory of the store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self, name: &str) -> Result<Option<File>> {
        match File::open(self.path.join(name)) {
            Ok(file) => Ok(Some(file)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Number of blocks in the store.
    ///
    /// A trailing partial index entry belongs to a block being committed and
    /// is not counted.
    ///
    /// # Errors
    /// If the index file exists but cannot be read.
    #[allow(clippy::integer_division)]
    pub fn block_count(&self) -> Result<u64> {
        Ok(match self.open(INDEX_FILE_NAME)? {
            Some(index) => index.metadata()?.len() / INDEX_ENTRY_SIZE,
            None => 0,
        })
    }

    /// `(start, length)` of the block at 1-based `height`, which must not exceed the tip.
    fn block_location(&self, index: &mut File, height: u64) -> Result<(u64, u64)> {
        index.seek(SeekFrom::Start((height - 1) * INDEX_ENTRY_SIZE))?;
        let mut entry = [0_u8; INDEX_ENTRY_SIZE as usize];
        index.read_exact(&mut entry)?;
        let (start, length) = entry.split_at(core::mem::size_of::<u64>());
        Ok((u64_le(start), u64_le(length)))
    }

    /// Serialized block at 1-based `height`, `None` for `0` and above the tip.
    ///
    /// # Errors
    /// If a file cannot be read, the index entry points past the end of the
    /// data file, or the block buffer cannot be allocated.
    pub fn read_block(&self, height: u64) -> Result<Option<Vec<u8>>> {
        let Some(mut index) = self.open(INDEX_FILE_NAME)? else {
            return Ok(None);
        };
        if height == 0 || height > index.metadata()?.len() / INDEX_ENTRY_SIZE {
            return Ok(None);
        }
        let (start, length) = self.block_location(&mut index, height)?;

        let out_of_bounds = || Error::OutOfBounds {
            height,
            start,
            length,
        };
        let mut data = self.open(DATA_FILE_NAME)?.ok_or_else(out_of_bounds)?;
        let end = start.checked_add(length).ok_or_else(out_of_bounds)?;
        if end > data.metadata()?.len() {
            return Err(out_of_bounds());
        }
        let length = usize::try_from(length).map_err(|_| out_of_bounds())?;

        let mut block = Vec::new();
        block.try_reserve_exact(length)?;
        block.resize(length, 0_u8);
        data.seek(SeekFrom::Start(start))?;
        data.read_exact(&mut block)?;
        Ok(Some(block))
    }
}

impl BlockSource for BlockStore {
    fn height(&self) -> Result<u64> {
        self.block_count()
    }

    fn read(&self, height: u64) -> Result<Option<Vec<u8>>> {
        trace!(height, "Reading block");
        self.read_block(height)
    }
}

fn u64_le(bytes: &[u8]) -> u64 {
    let mut buffer = [0_u8; core::mem::size_of::<u64>()];
    buffer.copy_from_slice(bytes);
    u64::from_le_bytes(buffer)
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure to read the block store.
#[derive(Debug, displaydoc::Display, thiserror::Error)]
pub enum Error {
    /// Failed to read the block store files
    Io(#[from] std::io::Error),
    /// Failed to allocate a buffer for a block
    Alloc(#[from] std::collections::TryReserveError),
    /// Block {height} points past the end of the data file ({length} bytes at offset {start})
    OutOfBounds {
        /// Height of the block
        height: u64,
        /// Offset recorded in the index
        start: u64,
        /// Length recorded in the index
        length: u64,
    },
}

/// Append `block` to the store in `dir` the way the commit path does.
#[cfg(test)]
pub(crate) fn append_block(dir: &Path, block: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    std::fs::create_dir_all(dir)?;
    let mut data = File::options()
        .create(true)
        .append(true)
        .open(dir.join(DATA_FILE_NAME))?;
    let start = data.metadata()?.len();
    data.write_all(block)?;

    let mut index = File::options()
        .create(true)
        .append(true)
        .open(dir.join(INDEX_FILE_NAME))?;
    index.write_all(&start.to_le_bytes())?;
    index.write_all(&(block.len() as u64).to_le_bytes())
}
