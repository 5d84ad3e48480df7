//! Seam to the shared addressable object tree. The session resolves paths,
//! queries declared authority modes, and executes members through this
//! trait; it never walks the tree itself.

use thiserror::Error;

use crate::{authority::AuthorityMode, path::object_path::ObjectPath, types::ObjectId};

/// Errors raised by the tree collaborator while executing a member
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The object has no such method or property
    #[error("Object has no member named `{member}`")]
    NoSuchMember {
        member: String,
    },

    /// The member exists but its execution failed
    #[error("Member `{member}` failed: {message}")]
    ExecutionFailed {
        member: String,
        message: String,
    },
}

/// The object tree collaborator, generic over the argument value type `V`
/// shared with the value codec.
pub trait ObjectTree<V> {
    /// Looks up the object at `path`, if it is still present in the tree.
    fn resolve(&self, path: &ObjectPath) -> Option<ObjectId>;

    /// The path of a live object, if it is still attached under the root.
    fn path_of(&self, object: ObjectId) -> Option<ObjectPath>;

    /// The authority mode declared for `(object, member)`. `None` means the
    /// member is not callable over the network at all.
    fn declared_mode(&self, object: ObjectId, member: &str) -> Option<AuthorityMode>;

    /// Whether the local peer is the authority for `object`.
    fn is_authority(&self, object: ObjectId) -> bool;

    /// Invokes a method member.
    fn invoke(&mut self, object: ObjectId, member: &str, args: Vec<V>) -> Result<(), TreeError>;

    /// Assigns a property member.
    fn assign(&mut self, object: ObjectId, member: &str, value: V) -> Result<(), TreeError>;
}
