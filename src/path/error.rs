use thiserror::Error;

/// Errors that can occur during path cache operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathCacheError {
    /// Peer referenced a path id it was never assigned, or the mapping was
    /// lost to a prior disconnect
    #[error("Unknown path id {id} from peer {peer}. The peer was never assigned this id, or its state was lost to a prior disconnect")]
    UnknownPathId {
        peer: u32,
        id: u32,
    },
}
