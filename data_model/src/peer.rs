//! This module contains [`Peer`] structure and related implementations and traits implementations.
use derive_more::{Constructor, Display};
use getset::Getters;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::PublicKey;

/// Representation of other Iroha Peer instances running in separate processes.
#[derive(
    Debug,
    Display,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Constructor,
    Getters,
    Decode,
    Encode,
    Deserialize,
    Serialize,
)]
#[display(fmt = "{public_key}@@{address}")]
#[getset(get = "pub")]
pub struct Peer {
    /// Address of the [`Peer`]'s entrypoint.
    address: String,
    /// Public Key of the [`Peer`].
    public_key: PublicKey,
    /// PEM-encoded certificate, when the peer talks TLS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tls_certificate: Option<String>,
}

/// The prelude re-exports most commonly used traits, structs and macros from this crate.
pub mod prelude {
    pub use super::Peer;
}
