use std::fmt;

pub const PATH_DELIMITER: char = '/';

/// Hierarchical address of an object relative to the shared root.
///
/// The empty path denotes the root itself, which is never a valid RPC
/// source; the send layer rejects it with `SendError::EmptyPath`.
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub struct ObjectPath(String);

impl ObjectPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this path addresses the shared root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_DELIMITER).filter(|s| !s.is_empty())
    }
}

impl From<&str> for ObjectPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_detection() {
        assert!(ObjectPath::new("").is_root());
        assert!(!ObjectPath::new("a").is_root());
        assert!(!ObjectPath::new("a/b").is_root());
    }

    #[test]
    fn segment_iteration() {
        let path = ObjectPath::new("game/players/p1");
        let segments: Vec<&str> = path.segments().collect();
        assert_eq!(segments, vec!["game", "players", "p1"]);
    }
}
