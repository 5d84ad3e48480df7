//! Seam to the argument value codec. Values are opaque to this crate; the
//! codec's encoding must be self-describing so that N values decode
//! back-to-back without any framing from the packet layer.

use thiserror::Error;

/// Error raised when a value cannot be decoded from packet bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to decode value at offset {offset}")]
pub struct ValueError {
    pub offset: usize,
}

/// The value codec collaborator.
pub trait ValueCodec {
    /// The argument/property value type shared with the tree collaborator.
    type Value;

    fn encode(&self, value: &Self::Value) -> Vec<u8>;

    /// Decodes one value from the front of `bytes`, returning it together
    /// with the number of bytes consumed.
    fn decode(&self, bytes: &[u8]) -> Result<(Self::Value, usize), ValueError>;
}
