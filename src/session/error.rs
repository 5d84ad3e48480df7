use thiserror::Error;

use crate::{packet::error::PacketError, transport::TransportError, tree::TreeError};

/// Errors reported synchronously to the caller of the send API. Each is
/// fatal only to the one call that raised it; the session continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// Transport is not in a connected state
    #[error("Cannot send: transport is not connected")]
    NotConnected,

    /// Calls carry at most 255 arguments on the wire
    #[error("Call carries {count} arguments, maximum is 255")]
    TooManyArguments {
        count: usize,
    },

    /// Recipient names a peer id that is not currently connected
    #[error("Recipient names unknown peer {peer}")]
    UnknownPeer {
        peer: u32,
    },

    /// The shared root cannot be an RPC source
    #[error("Empty source path: the root cannot be an RPC source")]
    EmptyPath,

    /// Source path no longer names a live object in the tree
    #[error("No object in the tree at path `{path}`")]
    UnknownObject {
        path: String,
    },

    /// Source object handle is no longer attached under the shared root
    #[error("Source object is not attached under the shared root")]
    DetachedObject,

    /// The source object declares no authority mode for this member
    #[error("Member `{member}` has no declared authority mode on the source object")]
    UnknownMember {
        member: String,
    },

    /// Packet encoding error
    #[error("Packet encoding error: {0}")]
    Packet(#[from] PacketError),

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Local execution of the member failed
    #[error("Local execution failed: {0}")]
    Tree(#[from] TreeError),
}
