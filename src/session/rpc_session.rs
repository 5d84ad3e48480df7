use log::warn;

use crate::{
    authority::AuthorityMode,
    packet::{Packet, RpcTarget},
    path::{object_path::ObjectPath, path_cache::PathCache},
    session::{error::SendError, peer_registry::PeerRegistry},
    transport::{ConnectionStatus, Transport, TransportEvent},
    tree::ObjectTree,
    types::{ObjectId, PeerId, Recipient},
    value::ValueCodec,
};

const MAX_ARGUMENTS: usize = 255;

// Outbound payload, before argument encoding.
enum RpcPayload<'a, V> {
    Call(&'a [V]),
    Set(&'a V),
}

/// The dispatcher: an explicit session object owned by the embedding
/// application, one per networked session.
///
/// Outbound, `rpc`/`rset` consult the authority table for local execution,
/// then run the send state machine: register the source path, and per
/// destination peer pick the 4-byte compact target (id confirmed), the
/// full-path fallback (handshake still in flight), preceded by a reliable
/// `PathAssign` on first contact.
///
/// Inbound, the application calls [`poll`](RpcSession::poll) once per tick;
/// the session drains every buffered packet in arrival order, answers
/// `PathAssign` with a reliable `PathAck`, resolves RPC targets through the
/// inbound cache, gates execution on the declared authority mode, and hands
/// the call to the tree collaborator. Malformed or unresolvable packets are
/// logged and dropped; inadmissible ones are dropped silently.
pub struct RpcSession<T, C, W>
where
    T: Transport,
    C: ValueCodec,
    W: ObjectTree<C::Value>,
{
    transport: T,
    tree: W,
    codec: C,
    peers: PeerRegistry,
    paths: PathCache,
    // Guards the packet-drain loop against re-entry; a nested poll() from
    // within packet handling is a no-op.
    draining: bool,
}

impl<T, C, W> RpcSession<T, C, W>
where
    T: Transport,
    C: ValueCodec,
    C::Value: Clone,
    W: ObjectTree<C::Value>,
{
    pub fn new(transport: T, tree: W, codec: C) -> Self {
        Self {
            transport,
            tree,
            codec,
            peers: PeerRegistry::new(),
            paths: PathCache::new(),
            draining: false,
        }
    }

    /// Invokes `member` on the object at `source` across the session,
    /// subject to its declared authority mode.
    ///
    /// When the mode calls for local execution, that happens before the
    /// network checks: if the send then fails (`NotConnected`,
    /// `UnknownPeer`, ...), the local invocation has already run and the
    /// error reports only the undelivered send. Modes that skip the network
    /// entirely therefore keep working while disconnected.
    pub fn rpc(
        &mut self,
        source: &ObjectPath,
        recipient: Recipient,
        reliable: bool,
        member: &str,
        args: &[C::Value],
    ) -> Result<(), SendError> {
        let (object, mode) = self.lookup_member(source, member)?;
        let decision = mode.decide(self.tree.is_authority(object));
        if decision.execute_locally {
            self.tree.invoke(object, member, args.to_vec())?;
        }
        if decision.skip_network_send {
            return Ok(());
        }
        self.send_rpc(source, recipient, reliable, member, RpcPayload::Call(args))
    }

    /// Assigns `member` on the object at `source` across the session,
    /// subject to its declared authority mode.
    ///
    /// Local assignment, when the mode calls for it, precedes the network
    /// checks; see [`rpc`](RpcSession::rpc) for the partial-effect behavior
    /// on send failure.
    pub fn rset(
        &mut self,
        source: &ObjectPath,
        recipient: Recipient,
        reliable: bool,
        member: &str,
        value: &C::Value,
    ) -> Result<(), SendError> {
        let (object, mode) = self.lookup_member(source, member)?;
        let decision = mode.decide(self.tree.is_authority(object));
        if decision.execute_locally {
            self.tree.assign(object, member, value.clone())?;
        }
        if decision.skip_network_send {
            return Ok(());
        }
        self.send_rpc(source, recipient, reliable, member, RpcPayload::Set(value))
    }

    /// `rpc` addressed by object handle rather than source path.
    pub fn rpc_object(
        &mut self,
        object: ObjectId,
        recipient: Recipient,
        reliable: bool,
        member: &str,
        args: &[C::Value],
    ) -> Result<(), SendError> {
        let source = self.tree.path_of(object).ok_or(SendError::DetachedObject)?;
        self.rpc(&source, recipient, reliable, member, args)
    }

    /// `rset` addressed by object handle rather than source path.
    pub fn rset_object(
        &mut self,
        object: ObjectId,
        recipient: Recipient,
        reliable: bool,
        member: &str,
        value: &C::Value,
    ) -> Result<(), SendError> {
        let source = self.tree.path_of(object).ok_or(SendError::DetachedObject)?;
        self.rset(&source, recipient, reliable, member, value)
    }

    /// `rpc` with the raw signed recipient convention
    /// (0 = all, positive = one peer, negative = all-except).
    pub fn rpc_id(
        &mut self,
        source: &ObjectPath,
        raw_recipient: i64,
        reliable: bool,
        member: &str,
        args: &[C::Value],
    ) -> Result<(), SendError> {
        self.rpc(source, Recipient::from_raw(raw_recipient), reliable, member, args)
    }

    /// `rset` with the raw signed recipient convention.
    pub fn rset_id(
        &mut self,
        source: &ObjectPath,
        raw_recipient: i64,
        reliable: bool,
        member: &str,
        value: &C::Value,
    ) -> Result<(), SendError> {
        self.rset(source, Recipient::from_raw(raw_recipient), reliable, member, value)
    }

    fn lookup_member(
        &self,
        source: &ObjectPath,
        member: &str,
    ) -> Result<(ObjectId, AuthorityMode), SendError> {
        let object = self
            .tree
            .resolve(source)
            .ok_or_else(|| SendError::UnknownObject {
                path: source.to_string(),
            })?;
        let mode =
            self.tree
                .declared_mode(object, member)
                .ok_or_else(|| SendError::UnknownMember {
                    member: member.to_string(),
                })?;
        Ok((object, mode))
    }

    // The send state machine. Failures here are synchronous and local;
    // nothing reaches the network until every check has passed.
    fn send_rpc(
        &mut self,
        source: &ObjectPath,
        recipient: Recipient,
        reliable: bool,
        member: &str,
        payload: RpcPayload<'_, C::Value>,
    ) -> Result<(), SendError> {
        if self.transport.connection_status() != ConnectionStatus::Connected {
            return Err(SendError::NotConnected);
        }
        if let RpcPayload::Call(args) = &payload {
            if args.len() > MAX_ARGUMENTS {
                return Err(SendError::TooManyArguments { count: args.len() });
            }
        }
        if let Some(named) = recipient.named_peer() {
            if !self.peers.contains(named) {
                return Err(SendError::UnknownPeer {
                    peer: named.value(),
                });
            }
        }
        if source.is_root() {
            return Err(SendError::EmptyPath);
        }

        let id = self.paths.register_outbound(source);
        let compact = self.build_packet(RpcTarget::Id(id), member, &payload);
        let compact_bytes = compact.ser()?;

        let matched = self.peers.matched(recipient);
        let all_confirmed = matched
            .iter()
            .all(|peer| self.paths.is_confirmed(source, *peer));

        if all_confirmed {
            // every destination holds the mapping: one compact send to the
            // whole recipient, at the requested reliability
            self.transport.send(recipient, reliable, compact_bytes)?;
            return Ok(());
        }

        // first contact for at least one peer: offer the mapping reliably,
        // exactly once per (path, peer) pair
        let assign_bytes = Packet::PathAssign {
            id,
            path: source.clone(),
        }
        .ser()?;
        for peer in &matched {
            if !self.paths.has_peer_entry(source, *peer) {
                self.transport
                    .send(Recipient::Single(*peer), true, assign_bytes.clone())?;
                self.paths.mark_pending(source, *peer);
            }
        }

        // the call itself is never lost while the handshake is in flight:
        // unconfirmed peers get the full-path fallback form
        let fallback_bytes = self
            .build_packet(RpcTarget::Path(source.clone()), member, &payload)
            .ser()?;
        for peer in &matched {
            let bytes = if self.paths.is_confirmed(source, *peer) {
                compact_bytes.clone()
            } else {
                fallback_bytes.clone()
            };
            self.transport
                .send(Recipient::Single(*peer), reliable, bytes)?;
        }
        Ok(())
    }

    fn build_packet(
        &self,
        target: RpcTarget,
        member: &str,
        payload: &RpcPayload<'_, C::Value>,
    ) -> Packet {
        match payload {
            RpcPayload::Call(args) => {
                let mut encoded = Vec::new();
                for arg in args.iter() {
                    encoded.extend_from_slice(&self.codec.encode(arg));
                }
                Packet::RpcCall {
                    target,
                    member: member.to_string(),
                    argc: args.len() as u8,
                    args: encoded,
                }
            }
            RpcPayload::Set(value) => Packet::RpcSet {
                target,
                member: member.to_string(),
                value: self.codec.encode(value),
            },
        }
    }

    /// Pumps the session once: applies transport lifecycle events, then
    /// drains and processes every buffered packet in arrival order.
    ///
    /// Liveness is re-checked after each packet, since handling one may
    /// itself cause a disconnect. Re-entrant calls (from within packet
    /// handling) are no-ops; the drain loop is not reentrant.
    pub fn poll(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;

        for event in self.transport.poll() {
            self.apply_event(event);
        }

        while self.transport.connection_status() == ConnectionStatus::Connected
            && self.transport.available_packet_count() > 0
        {
            match self.transport.receive() {
                Ok((peer, bytes)) => self.process_packet(peer, &bytes),
                Err(err) => {
                    warn!("transport receive failed: {err}");
                    break;
                }
            }
        }

        self.draining = false;
    }

    fn apply_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::PeerConnected(peer) => {
                self.peers.insert(peer);
            }
            TransportEvent::PeerDisconnected(peer) => {
                self.peers.remove(peer);
                self.paths.forget_peer(peer);
            }
            TransportEvent::ConnectSucceeded => {}
            TransportEvent::ConnectFailed | TransportEvent::ServerDisconnected => {
                self.peers.clear();
                self.paths.clear();
            }
        }
    }

    fn process_packet(&mut self, from: PeerId, bytes: &[u8]) {
        let packet = match Packet::de(bytes) {
            Ok(packet) => packet,
            Err(err) => {
                warn!("dropping malformed packet from peer {}: {err}", from.value());
                return;
            }
        };

        match packet {
            Packet::PathAssign { id, path } => {
                self.paths.register_inbound(from, id, path.clone());
                match (Packet::PathAck { path }).ser() {
                    Ok(ack) => {
                        if let Err(err) = self.transport.send(Recipient::Single(from), true, ack) {
                            warn!("failed to ack path assignment from peer {}: {err}", from.value());
                        }
                    }
                    Err(err) => {
                        warn!("failed to encode path ack for peer {}: {err}", from.value());
                    }
                }
            }
            Packet::PathAck { path } => {
                if !self.paths.mark_confirmed(&path, from) {
                    warn!(
                        "peer {} acked path `{path}` that was never an outbound source",
                        from.value()
                    );
                }
            }
            Packet::RpcCall {
                target,
                member,
                argc,
                args,
            } => {
                let Some(object) = self.resolve_target(from, target) else {
                    return;
                };
                if !self.inbound_admissible(object, &member) {
                    // dropped silently; no rejection is ever signaled back
                    return;
                }
                let Some(args) = self.decode_args(from, &member, argc, &args) else {
                    return;
                };
                if let Err(err) = self.tree.invoke(object, &member, args) {
                    warn!("invoke of `{member}` from peer {} failed: {err}", from.value());
                }
            }
            Packet::RpcSet {
                target,
                member,
                value,
            } => {
                let Some(object) = self.resolve_target(from, target) else {
                    return;
                };
                if !self.inbound_admissible(object, &member) {
                    return;
                }
                let value = match self.codec.decode(&value) {
                    Ok((value, _)) => value,
                    Err(err) => {
                        warn!(
                            "dropping set of `{member}` from peer {}: {err}",
                            from.value()
                        );
                        return;
                    }
                };
                if let Err(err) = self.tree.assign(object, &member, value) {
                    warn!("assign of `{member}` from peer {} failed: {err}", from.value());
                }
            }
        }
    }

    // Resolves an RPC target to a live object. The fallback form carries
    // the full path and never populates the inbound cache: it is one-shot
    // delivery, not caching.
    fn resolve_target(&self, from: PeerId, target: RpcTarget) -> Option<ObjectId> {
        let path = match target {
            RpcTarget::Path(path) => path,
            RpcTarget::Id(id) => match self.paths.resolve_inbound(from, id) {
                Ok(path) => path.clone(),
                Err(err) => {
                    warn!("dropping rpc from peer {}: {err}", from.value());
                    return None;
                }
            },
        };
        let Some(object) = self.tree.resolve(&path) else {
            warn!(
                "dropping rpc from peer {}: no object at path `{path}`",
                from.value()
            );
            return None;
        };
        Some(object)
    }

    // Authority gate for inbound execution. An undeclared member is as
    // inadmissible as a Disabled one, and equally silent: no reply, no log.
    fn inbound_admissible(&self, object: ObjectId, member: &str) -> bool {
        let Some(mode) = self.tree.declared_mode(object, member) else {
            return false;
        };
        mode.accepts_inbound(self.tree.is_authority(object))
    }

    fn decode_args(
        &self,
        from: PeerId,
        member: &str,
        argc: u8,
        payload: &[u8],
    ) -> Option<Vec<C::Value>> {
        let mut args = Vec::with_capacity(argc as usize);
        let mut offset = 0;
        for index in 0..argc {
            match self.codec.decode(&payload[offset..]) {
                Ok((value, used)) => {
                    if used > payload.len() - offset {
                        warn!(
                            "dropping call of `{member}` from peer {}: argument {index} overran the payload",
                            from.value()
                        );
                        return None;
                    }
                    args.push(value);
                    offset += used;
                }
                Err(err) => {
                    warn!(
                        "dropping call of `{member}` from peer {}: argument {index}: {err}",
                        from.value()
                    );
                    return None;
                }
            }
        }
        if offset != payload.len() {
            warn!(
                "dropping call of `{member}` from peer {}: {} trailing payload byte(s)",
                from.value(),
                payload.len() - offset
            );
            return None;
        }
        Some(args)
    }

    /// Resets all session-scoped state (path caches and the peer registry),
    /// as when leaving the networked session.
    pub fn reset(&mut self) {
        self.peers.clear();
        self.paths.clear();
    }

    pub fn local_id(&self) -> PeerId {
        self.transport.local_id()
    }

    pub fn is_server(&self) -> bool {
        self.transport.is_server()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.transport.connection_status()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn tree(&self) -> &W {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut W {
        &mut self.tree
    }

    pub fn peers(&self) -> &PeerRegistry {
        &self.peers
    }

    pub fn path_cache(&self) -> &PathCache {
        &self.paths
    }
}
