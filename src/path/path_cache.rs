use std::collections::HashMap;

use crate::{
    path::{error::PathCacheError, object_path::ObjectPath},
    types::{PathId, PeerId},
};

/// Outbound state for one local source path: the id assigned to it, and the
/// per-peer confirmation flags for the compact wire form.
#[derive(Debug)]
pub struct OutboundPathEntry {
    id: PathId,
    confirmed_peers: HashMap<PeerId, bool>,
}

impl OutboundPathEntry {
    fn new(id: PathId) -> Self {
        Self {
            id,
            confirmed_peers: HashMap::new(),
        }
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn is_confirmed(&self, peer: PeerId) -> bool {
        self.confirmed_peers.get(&peer).copied().unwrap_or(false)
    }

    pub fn has_peer_entry(&self, peer: PeerId) -> bool {
        self.confirmed_peers.contains_key(&peer)
    }
}

/// Two directional caches mapping between object paths and their compact
/// wire ids.
///
/// Outbound: local source path -> assigned id + per-peer confirmation.
/// Inbound: (remote peer, id the peer assigned) -> the peer's path.
///
/// State lives for the duration of a session; `clear` resets everything on
/// session teardown, and `forget_peer` prunes the slice of state scoped to
/// one peer on its disconnect.
pub struct PathCache {
    next_id: u32,
    outbound: HashMap<ObjectPath, OutboundPathEntry>,
    inbound: HashMap<(PeerId, PathId), ObjectPath>,
}

impl PathCache {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            outbound: HashMap::new(),
            inbound: HashMap::new(),
        }
    }

    /// Returns the id assigned to `path`, allocating the next counter value
    /// on first use. Ids are monotone from 1 and never reused, even after
    /// the originating path stops being used.
    pub fn register_outbound(&mut self, path: &ObjectPath) -> PathId {
        if let Some(entry) = self.outbound.get(path) {
            return entry.id();
        }
        let id = PathId::new(self.next_id);
        self.next_id += 1;
        self.outbound
            .insert(path.clone(), OutboundPathEntry::new(id));
        id
    }

    pub fn outbound_id(&self, path: &ObjectPath) -> Option<PathId> {
        self.outbound.get(path).map(|entry| entry.id())
    }

    pub fn is_confirmed(&self, path: &ObjectPath, peer: PeerId) -> bool {
        self.outbound
            .get(path)
            .map(|entry| entry.is_confirmed(peer))
            .unwrap_or(false)
    }

    /// Whether the peer has any entry (pending or confirmed) for this path,
    /// i.e. whether a `PathAssign` has already been sent its way.
    pub fn has_peer_entry(&self, path: &ObjectPath, peer: PeerId) -> bool {
        self.outbound
            .get(path)
            .map(|entry| entry.has_peer_entry(peer))
            .unwrap_or(false)
    }

    /// Records that a `PathAssign` for `path` is in flight to `peer`.
    /// Never downgrades an already-confirmed flag.
    pub fn mark_pending(&mut self, path: &ObjectPath, peer: PeerId) {
        if let Some(entry) = self.outbound.get_mut(path) {
            entry.confirmed_peers.entry(peer).or_insert(false);
        }
    }

    /// Flips the confirmation flag for `(path, peer)` on receipt of the
    /// peer's `PathAck`. Returns false if the path was never registered as
    /// an outbound source, so the caller can log the stray ack.
    pub fn mark_confirmed(&mut self, path: &ObjectPath, peer: PeerId) -> bool {
        let Some(entry) = self.outbound.get_mut(path) else {
            return false;
        };
        entry.confirmed_peers.insert(peer, true);
        true
    }

    pub fn register_inbound(&mut self, peer: PeerId, id: PathId, path: ObjectPath) {
        self.inbound.insert((peer, id), path);
    }

    pub fn resolve_inbound(&self, peer: PeerId, id: PathId) -> Result<&ObjectPath, PathCacheError> {
        self.inbound
            .get(&(peer, id))
            .ok_or(PathCacheError::UnknownPathId {
                peer: peer.value(),
                id: id.value(),
            })
    }

    /// Disconnect cleanup: drops every inbound entry keyed by `peer` and
    /// every confirmation flag held for `peer` across the outbound entries.
    /// Outbound ids themselves survive; only the peer's view of them is lost.
    pub fn forget_peer(&mut self, peer: PeerId) {
        self.inbound.retain(|(p, _), _| *p != peer);
        for entry in self.outbound.values_mut() {
            entry.confirmed_peers.remove(&peer);
        }
    }

    /// Full reset, including the id counter. Used when leaving the session.
    pub fn clear(&mut self) {
        self.next_id = 1;
        self.outbound.clear();
        self.inbound.clear();
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new()
    }
}
