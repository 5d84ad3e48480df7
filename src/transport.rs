//! Seam to the embedding application's transport layer. The session never
//! owns sockets; it consumes connection lifecycle events and raw packets
//! through this trait.

use thiserror::Error;

use crate::types::{PeerId, Recipient};

/// Connection lifecycle events surfaced by `Transport::poll`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportEvent {
    PeerConnected(PeerId),
    PeerDisconnected(PeerId),
    ConnectSucceeded,
    ConnectFailed,
    ServerDisconnected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// Errors that can occur during transport operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Send attempted while the underlying connection is not live
    #[error("Transport is not connected")]
    NotConnected,

    /// Receive called with no packet buffered
    #[error("No packet available to receive")]
    NoPacketAvailable,

    /// Underlying socket failure
    #[error("Transport I/O failure: {message}")]
    Io {
        message: String,
    },
}

/// The transport collaborator.
///
/// Reliability is a per-send parameter rather than a mutable mode on the
/// transport, so no hidden shared state survives between calls.
pub trait Transport {
    /// Pumps the transport once and returns the lifecycle events that
    /// occurred since the last poll, in order.
    fn poll(&mut self) -> Vec<TransportEvent>;

    /// Number of received packets currently buffered and ready.
    fn available_packet_count(&self) -> usize;

    /// Takes the next buffered packet and its sender.
    fn receive(&mut self) -> Result<(PeerId, Vec<u8>), TransportError>;

    /// Sends one packet to the peers matched by `recipient`, on the
    /// reliable channel if `reliable` is set.
    fn send(&mut self, recipient: Recipient, reliable: bool, bytes: Vec<u8>)
        -> Result<(), TransportError>;

    /// This endpoint's own peer id.
    fn local_id(&self) -> PeerId;

    fn is_server(&self) -> bool;

    fn connection_status(&self) -> ConnectionStatus;
}
