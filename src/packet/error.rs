use thiserror::Error;

/// Errors that can occur while encoding or decoding wire packets
///
/// Decode-side variants are raised on untrusted network data; the session
/// logs them and drops the offending packet without disturbing the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Packet shorter than its declared minimal header
    #[error("Packet truncated: needed {needed} more byte(s) at offset {offset}")]
    Truncated {
        offset: usize,
        needed: usize,
    },

    /// String field ran past the end of the packet without a NUL terminator
    #[error("Missing NUL terminator for string starting at offset {offset}")]
    UnterminatedString {
        offset: usize,
    },

    /// String field was not valid UTF-8
    #[error("String at offset {offset} is not valid UTF-8")]
    BadString {
        offset: usize,
    },

    /// Unknown tag byte (possible malformed or malicious packet)
    #[error("Unknown packet tag {tag} (valid range: 0-3)")]
    UnknownTag {
        tag: u8,
    },

    /// Fallback-form path offset pointed outside the packet or backwards
    /// into already-consumed bytes
    #[error("Fallback path offset {offset} out of range for packet of {len} byte(s)")]
    BadPathOffset {
        offset: usize,
        len: usize,
    },

    /// Declared argument count inconsistent with the remaining payload
    #[error("Argument count {argc} inconsistent with {remaining} payload byte(s)")]
    BadArgCount {
        argc: u8,
        remaining: usize,
    },

    /// Encode-side: a path or member name contained an interior NUL byte,
    /// which the NUL-terminated wire strings cannot carry
    #[error("String field contains an interior NUL byte")]
    InteriorNul,
}
