use std::collections::BTreeSet;

use crate::types::{PeerId, Recipient};

/// The set of currently connected peers.
///
/// Entries are created and destroyed strictly by transport connect and
/// disconnect events; nothing else synthesizes them. A BTreeSet keeps
/// matched-peer iteration deterministic.
pub struct PeerRegistry {
    peers: BTreeSet<PeerId>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self {
            peers: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, peer: PeerId) {
        self.peers.insert(peer);
    }

    pub fn remove(&mut self, peer: PeerId) {
        self.peers.remove(&peer);
    }

    pub fn contains(&self, peer: PeerId) -> bool {
        self.peers.contains(&peer)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Concrete peers matched by `recipient`, in id order.
    pub fn matched(&self, recipient: Recipient) -> Vec<PeerId> {
        self.peers
            .iter()
            .copied()
            .filter(|peer| recipient.matches(*peer))
            .collect()
    }

    pub fn clear(&mut self) {
        self.peers.clear();
    }
}

impl Default for PeerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
