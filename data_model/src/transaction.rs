//! [`SignedTransaction`] structures and the commands they carry.
use derive_more::Display;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{
    account::AccountId, asset::AssetId, role::RoleId, HashOf, PublicKey, Signature, Timestamp,
};

/// Ledger command carried by a transaction.
///
/// Only the shape of each command matters to the read path: queries
/// inspect commands to decide which account and asset a transaction touches.
#[derive(Debug, Display, Clone, PartialEq, Eq, Decode, Encode, Deserialize, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Mint `amount` of `asset_id` to the transaction creator.
    #[display(fmt = "add {amount} {asset_id}")]
    AddAssetQuantity {
        /// Asset being minted.
        asset_id: AssetId,
        /// Decimal amount.
        amount: String,
    },
    /// Burn `amount` of `asset_id` from the transaction creator.
    #[display(fmt = "subtract {amount} {asset_id}")]
    SubtractAssetQuantity {
        /// Asset being burned.
        asset_id: AssetId,
        /// Decimal amount.
        amount: String,
    },
    /// Move `amount` of `asset_id` between two accounts.
    #[display(fmt = "transfer {amount} {asset_id} from {src_account_id} to {dest_account_id}")]
    TransferAsset {
        /// Account the asset leaves.
        src_account_id: AccountId,
        /// Account the asset arrives to.
        dest_account_id: AccountId,
        /// Asset being moved.
        asset_id: AssetId,
        /// Free-form note.
        description: String,
        /// Decimal amount.
        amount: String,
    },
    /// Register a new account.
    #[display(fmt = "create account {account_id}")]
    CreateAccount {
        /// Account being created.
        account_id: AccountId,
        /// Its first signatory.
        public_key: PublicKey,
    },
    /// Write a key-value detail to an account.
    #[display(fmt = "set detail {key} of {account_id}")]
    SetAccountDetail {
        /// Account receiving the detail.
        account_id: AccountId,
        /// Detail key.
        key: String,
        /// Detail value.
        value: String,
    },
    /// Assign a role to an account.
    #[display(fmt = "append role {role_id} to {account_id}")]
    AppendRole {
        /// Account receiving the role.
        account_id: AccountId,
        /// Role being assigned.
        role_id: RoleId,
    },
    /// Add a signatory to an account.
    #[display(fmt = "add signatory to {account_id}")]
    AddSignatory {
        /// Account receiving the signatory.
        account_id: AccountId,
        /// Key being added.
        public_key: PublicKey,
    },
    /// Register a new asset.
    #[display(fmt = "create asset {asset_id}")]
    CreateAsset {
        /// Asset being created.
        asset_id: AssetId,
        /// Number of digits after the decimal point.
        precision: u8,
    },
}

impl Command {
    /// Whether the command moves `asset` in or out of `account`, given the
    /// `creator` of the enclosing transaction.
    pub fn involves_asset(&self, creator: &AccountId, account: &AccountId, asset: &AssetId) -> bool {
        match self {
            Self::AddAssetQuantity { asset_id, .. } | Self::SubtractAssetQuantity { asset_id, .. } => {
                asset_id == asset && creator == account
            }
            Self::TransferAsset {
                src_account_id,
                dest_account_id,
                asset_id,
                ..
            } => asset_id == asset && (src_account_id == account || dest_account_id == account),
            Self::CreateAccount { .. }
            | Self::SetAccountDetail { .. }
            | Self::AppendRole { .. }
            | Self::AddSignatory { .. }
            | Self::CreateAsset { .. } => false,
        }
    }
}

/// Signed part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Decode, Encode, Deserialize, Serialize)]
pub struct TransactionPayload {
    /// Account ID of transaction creator.
    pub creator: AccountId,
    /// Time of creation (unix time, in milliseconds).
    pub created_time: Timestamp,
    /// Number of signatures the creator requires.
    pub quorum: u16,
    /// Commands applied in order when the transaction is committed.
    pub commands: Vec<Command>,
}

/// Transaction together with the signatures collected for it.
#[derive(Debug, Display, Clone, PartialEq, Eq, Decode, Encode, Deserialize, Serialize)]
#[display(fmt = "{}", "self.hash()")]
pub struct SignedTransaction {
    /// Signed payload.
    pub payload: TransactionPayload,
    /// Signatures of the payload.
    pub signatures: Vec<Signature>,
}

impl SignedTransaction {
    /// Hash of the SCALE encoding of the whole transaction.
    #[inline]
    pub fn hash(&self) -> HashOf<Self> {
        HashOf::new(self)
    }

    /// Account which created the transaction.
    #[inline]
    pub fn creator(&self) -> &AccountId {
        &self.payload.creator
    }

    /// Whether any command moves `asset` in or out of `account`.
    pub fn involves_asset(&self, account: &AccountId, asset: &AssetId) -> bool {
        self.payload
            .commands
            .iter()
            .any(|command| command.involves_asset(self.creator(), account, asset))
    }
}

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::{Command, SignedTransaction, TransactionPayload};
}
