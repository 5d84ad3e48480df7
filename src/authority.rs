//! Per-member authority policy.
//!
//! The tree collaborator declares a mode for every callable member; the
//! session queries it at both ends of the wire. `decide` drives the send
//! side, `accepts_inbound` reads the same table from the receive side.

/// Declared authority mode for one `(object, member)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthorityMode {
    /// Never networked and never accepted from the network; any local
    /// handling happens outside this dispatcher.
    Disabled,
    /// Executed only on remote peers, never locally.
    Remote,
    /// Executed locally and on every remote peer.
    Sync,
    /// Executed by the authority peer; non-authorities forward to it.
    Master,
    /// Executed by non-authority peers; the authority forwards to them.
    Slave,
}

/// Send-side outcome of the authority table for one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SendDecision {
    /// Invoke the member on the local object as part of this call.
    pub execute_locally: bool,
    /// Suppress the network send entirely (the call is satisfied locally).
    pub skip_network_send: bool,
}

impl AuthorityMode {
    /// Send-side decision: given whether the local peer is the authority
    /// for the source object, should the call run locally, and should the
    /// network send be skipped.
    pub fn decide(self, is_authority: bool) -> SendDecision {
        match self {
            AuthorityMode::Disabled => SendDecision {
                execute_locally: false,
                skip_network_send: false,
            },
            AuthorityMode::Remote => SendDecision {
                execute_locally: false,
                skip_network_send: false,
            },
            AuthorityMode::Sync => SendDecision {
                execute_locally: true,
                skip_network_send: false,
            },
            AuthorityMode::Master => SendDecision {
                execute_locally: is_authority,
                skip_network_send: is_authority,
            },
            AuthorityMode::Slave => SendDecision {
                execute_locally: !is_authority,
                skip_network_send: !is_authority,
            },
        }
    }

    /// Receive-side admissibility: may an inbound call on a member with
    /// this mode execute here, given whether the receiving peer is the
    /// authority for the target object. A `Master` member only runs on the
    /// authority (everyone else was forwarding to it); `Slave` is the
    /// mirror; `Disabled` never runs from the network.
    pub fn accepts_inbound(self, receiver_is_authority: bool) -> bool {
        match self {
            AuthorityMode::Disabled => false,
            AuthorityMode::Remote => true,
            AuthorityMode::Sync => true,
            AuthorityMode::Master => receiver_is_authority,
            AuthorityMode::Slave => !receiver_is_authority,
        }
    }

    /// For embedders that persist the mode as an integer.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(AuthorityMode::Disabled),
            1 => Some(AuthorityMode::Remote),
            2 => Some(AuthorityMode::Sync),
            3 => Some(AuthorityMode::Master),
            4 => Some(AuthorityMode::Slave),
            _ => None,
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            AuthorityMode::Disabled => 0,
            AuthorityMode::Remote => 1,
            AuthorityMode::Sync => 2,
            AuthorityMode::Master => 3,
            AuthorityMode::Slave => 4,
        }
    }
}
