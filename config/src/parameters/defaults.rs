//! Parameters default values

pub mod kura {
    /// Directory holding the block store files.
    pub const DEFAULT_BLOCK_STORE_PATH: &str = "./storage";
}

pub mod index {
    /// SQLite database holding the ledger state index.
    pub const DEFAULT_INDEX_PATH: &str = "./storage/index.sqlite";
}
