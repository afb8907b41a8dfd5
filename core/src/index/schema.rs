//! Tables of the ledger state index.
//!
//! The commit path keeps these tables in sync with committed blocks; the read
//! path only queries them. Identifiers are stored in their display form,
//! hashes and public keys as lowercase hex.

/// Statements creating every table the read path queries.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS role (
    role_id TEXT PRIMARY KEY
);
CREATE TABLE IF NOT EXISTS domain (
    domain_id TEXT PRIMARY KEY,
    default_role TEXT NOT NULL REFERENCES role(role_id)
);
CREATE TABLE IF NOT EXISTS account (
    account_id TEXT PRIMARY KEY,
    domain_id TEXT NOT NULL REFERENCES domain(domain_id),
    quorum INTEGER NOT NULL,
    data TEXT NOT NULL DEFAULT '{}'
);
CREATE TABLE IF NOT EXISTS account_has_signatory (
    account_id TEXT NOT NULL REFERENCES account(account_id),
    public_key TEXT NOT NULL,
    PRIMARY KEY (account_id, public_key)
);
CREATE TABLE IF NOT EXISTS peer (
    public_key TEXT PRIMARY KEY,
    address TEXT NOT NULL UNIQUE,
    tls_certificate TEXT
);
CREATE TABLE IF NOT EXISTS asset (
    asset_id TEXT PRIMARY KEY,
    domain_id TEXT NOT NULL REFERENCES domain(domain_id),
    precision INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS account_has_asset (
    account_id TEXT NOT NULL REFERENCES account(account_id),
    asset_id TEXT NOT NULL REFERENCES asset(asset_id),
    amount TEXT NOT NULL,
    PRIMARY KEY (account_id, asset_id)
);
CREATE TABLE IF NOT EXISTS role_has_permissions (
    role_id TEXT PRIMARY KEY REFERENCES role(role_id),
    permission TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS account_has_roles (
    account_id TEXT NOT NULL REFERENCES account(account_id),
    role_id TEXT NOT NULL REFERENCES role(role_id),
    PRIMARY KEY (account_id, role_id)
);
CREATE TABLE IF NOT EXISTS tx_positions (
    hash TEXT PRIMARY KEY,
    creator_id TEXT NOT NULL,
    ts INTEGER NOT NULL,
    height INTEGER NOT NULL,
    "index" INTEGER NOT NULL,
    UNIQUE (height, "index")
);
CREATE INDEX IF NOT EXISTS tx_positions_creator_id_idx ON tx_positions (creator_id, height, "index");
CREATE TABLE IF NOT EXISTS position_by_account_asset (
    account_id TEXT NOT NULL,
    asset_id TEXT NOT NULL,
    height INTEGER NOT NULL,
    "index" INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS position_by_account_asset_idx
    ON position_by_account_asset (account_id, asset_id, height, "index");
"#;

/// `role` table.
pub const ROLE: &str = "role";
/// `domain` table.
pub const DOMAIN: &str = "domain";
/// `account` table.
pub const ACCOUNT: &str = "account";
/// `account_has_signatory` table.
pub const ACCOUNT_HAS_SIGNATORY: &str = "account_has_signatory";
/// `peer` table.
pub const PEER: &str = "peer";
/// `asset` table.
pub const ASSET: &str = "asset";
/// `account_has_asset` table.
pub const ACCOUNT_HAS_ASSET: &str = "account_has_asset";
/// `role_has_permissions` table.
pub const ROLE_HAS_PERMISSIONS: &str = "role_has_permissions";
/// `account_has_roles` table.
pub const ACCOUNT_HAS_ROLES: &str = "account_has_roles";
/// `tx_positions` table.
pub const TX_POSITIONS: &str = "tx_positions";
/// `position_by_account_asset` table.
pub const POSITION_BY_ACCOUNT_ASSET: &str = "position_by_account_asset";
