// Identifier newtypes shared across the crate

/// Identifies a connected endpoint for the lifetime of its connection.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct PeerId(u32);

impl PeerId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Sender-scoped substitute for a full object path, assigned once per
/// distinct source path and never reused within a session.
///
/// The high bit is reserved on the wire for the fallback-form marker, so a
/// valid id always has it clear.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct PathId(u32);

impl PathId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Opaque handle to an object in the tree collaborator.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Logical addressing of an outgoing packet.
///
/// Constructed once at the API boundary (see [`Recipient::from_raw`] for the
/// overloaded signed-integer convention some embedders use); internal logic
/// only ever matches on the three variants.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Recipient {
    /// Every connected peer.
    All,
    /// Exactly one peer.
    Single(PeerId),
    /// Every connected peer except one.
    AllExcept(PeerId),
}

impl Recipient {
    /// Decodes the `0 = all, positive = one peer, negative = all-except`
    /// convention.
    pub fn from_raw(raw: i64) -> Self {
        if raw == 0 {
            Recipient::All
        } else if raw > 0 {
            Recipient::Single(PeerId::new(raw as u32))
        } else {
            Recipient::AllExcept(PeerId::new((-raw) as u32))
        }
    }

    /// Whether this recipient addresses the given peer.
    pub fn matches(&self, peer: PeerId) -> bool {
        match self {
            Recipient::All => true,
            Recipient::Single(id) => *id == peer,
            Recipient::AllExcept(id) => *id != peer,
        }
    }

    /// The peer id this recipient names, if any.
    pub fn named_peer(&self) -> Option<PeerId> {
        match self {
            Recipient::All => None,
            Recipient::Single(id) | Recipient::AllExcept(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_from_raw() {
        assert_eq!(Recipient::from_raw(0), Recipient::All);
        assert_eq!(Recipient::from_raw(7), Recipient::Single(PeerId::new(7)));
        assert_eq!(Recipient::from_raw(-3), Recipient::AllExcept(PeerId::new(3)));
    }

    #[test]
    fn recipient_matches() {
        let peer = PeerId::new(2);
        assert!(Recipient::All.matches(peer));
        assert!(Recipient::Single(peer).matches(peer));
        assert!(!Recipient::Single(PeerId::new(3)).matches(peer));
        assert!(!Recipient::AllExcept(peer).matches(peer));
        assert!(Recipient::AllExcept(PeerId::new(3)).matches(peer));
    }
}
