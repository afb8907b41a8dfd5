//! Block stores built on disk for tests.

use std::{fs::File, io::Write, path::Path};

use iroha_query::kura::{DATA_FILE_NAME, INDEX_FILE_NAME};

/// Append `block` to the store in `dir` the way a peer commits it.
pub fn append_block(dir: &Path, block: &[u8]) -> std::io::Result<()> {
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

#[cfg(test)]
mod tests {
    use iroha_query::kura::{BlockSource, BlockStore};

    use super::*;

    #[test]
    fn appended_blocks_are_readable() {
        let dir = tempfile::tempdir().unwrap();
        append_block(dir.path(), b"one").unwrap();
        append_block(dir.path(), b"two!").unwrap();

        let store = BlockStore::new(dir.path());
        assert_eq!(store.height().unwrap(), 2);
        assert_eq!(store.read(2).unwrap().as_deref(), Some(&b"two!"[..]));
    }
}
