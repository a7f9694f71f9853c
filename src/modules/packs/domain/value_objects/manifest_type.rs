use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a pack comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ManifestType {
    /// Shipped with the bot
    Builtin,
    /// Added by server members
    #[default]
    Manual,
}

impl fmt::Display for ManifestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ManifestType::Builtin => "builtin",
            ManifestType::Manual => "manual",
        };
        write!(f, "{}", name)
    }
}
