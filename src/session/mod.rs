pub mod error;
pub mod peer_registry;
pub mod rpc_session;
