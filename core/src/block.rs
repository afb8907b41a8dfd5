//! Decoding of blocks read from the block store.

use iroha_data_model::block::SignedBlock;
use parity_scale_codec::DecodeAll;

/// Turns the bytes of a stored block into a [`SignedBlock`].
pub trait BlockDecoder {
    /// Decode one stored block.
    ///
    /// # Errors
    /// If `bytes` are not exactly one encoded block.
    fn decode(&self, bytes: &[u8]) -> Result<SignedBlock, parity_scale_codec::Error>;
}

/// Decoder of SCALE-encoded blocks, the format blocks are committed in.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScaleBlockDecoder;

impl BlockDecoder for ScaleBlockDecoder {
    fn decode(&self, mut bytes: &[u8]) -> Result<SignedBlock, parity_scale_codec::Error> {
        SignedBlock::decode_all(&mut bytes)
    }
}
