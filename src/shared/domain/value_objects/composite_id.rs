use serde::{Deserialize, Serialize};
use std::fmt;

/// Source id of the remote canonical catalog
pub const REMOTE_SOURCE: &str = "anilist";

/// `"<sourceId>:<localId>"` reference spanning packs and the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct CompositeId {
    source: String,
    local: String,
}

impl CompositeId {
    pub fn new(source: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            local: local.into(),
        }
    }

    /// Parse an id, treating a bare id as belonging to the remote catalog
    pub fn parse(raw: &str) -> Self {
        Self::parse_within(raw, REMOTE_SOURCE)
    }

    /// Parse an id, treating a bare id as belonging to `default_source`
    pub fn parse_within(raw: &str, default_source: &str) -> Self {
        match raw.split_once(':') {
            Some((source, local)) => Self::new(source, local),
            None => Self::new(default_source, raw),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    pub fn is_remote(&self) -> bool {
        self.source == REMOTE_SOURCE
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.local)
    }
}

impl From<CompositeId> for String {
    fn from(id: CompositeId) -> Self {
        id.to_string()
    }
}

impl From<String> for CompositeId {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for CompositeId {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_source_and_local() {
        let id = CompositeId::parse("pack-id:42");
        assert_eq!(id.source(), "pack-id");
        assert_eq!(id.local(), "42");
        assert_eq!(id.to_string(), "pack-id:42");
    }

    #[test]
    fn test_bare_id_defaults_to_remote() {
        let id = CompositeId::parse("42");
        assert!(id.is_remote());
        assert_eq!(id.to_string(), "anilist:42");
    }

    #[test]
    fn test_bare_id_within_pack() {
        let id = CompositeId::parse_within("2", "pack-id");
        assert_eq!(id, CompositeId::new("pack-id", "2"));
    }

    #[test]
    fn test_only_first_colon_splits() {
        let id = CompositeId::parse("pack:a:b");
        assert_eq!(id.source(), "pack");
        assert_eq!(id.local(), "a:b");
    }
}
