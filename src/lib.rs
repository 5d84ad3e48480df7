//! # Tree RPC
//! Peer-to-peer remote calls between objects in a shared addressable tree.
//!
//! Objects invoke methods and assign properties on their counterparts on
//! other machines through an [`RpcSession`]. Bandwidth is kept low by
//! substituting a small numeric id for each source path once both ends have
//! run the assign/ack handshake, and a per-member authority mode decides
//! who executes a call locally and who forwards it over the network.
//!
//! The transport, the object tree, and the argument value codec are
//! collaborators supplied by the embedding application through the
//! [`Transport`], [`ObjectTree`] and [`ValueCodec`] traits; the session is
//! driven by one [`RpcSession::poll`] call per application tick.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod authority;
mod packet;
mod path;
mod session;
mod transport;
mod tree;
mod types;
mod value;

pub use authority::{AuthorityMode, SendDecision};
pub use packet::{
    bytes::{ByteReader, ByteWriter},
    error::PacketError,
    Packet, RpcTarget,
};
pub use path::{
    error::PathCacheError,
    object_path::{ObjectPath, PATH_DELIMITER},
    path_cache::{OutboundPathEntry, PathCache},
};
pub use session::{error::SendError, peer_registry::PeerRegistry, rpc_session::RpcSession};
pub use transport::{ConnectionStatus, Transport, TransportError, TransportEvent};
pub use tree::{ObjectTree, TreeError};
pub use types::{ObjectId, PathId, PeerId, Recipient};
pub use value::{ValueCodec, ValueError};
