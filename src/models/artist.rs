//! Artist model

use serde::{Deserialize, Serialize};

/// An artist in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// Database ID
    pub id: i64,
    /// Stable public identifier derived from the name
    pub artisthash: String,
    /// Display name
    pub name: String,
    /// Primary genre
    #[serde(default)]
    pub genre: Option<String>,
    /// Image URL or path
    #[serde(default)]
    pub image: Option<String>,
    /// Short biography
    #[serde(default)]
    pub bio: Option<String>,
}

impl Artist {
    /// Create a new artist with a hash derived from the name
    pub fn new(name: String) -> Self {
        let artisthash = Self::hash_name(&name);
        Self {
            id: 0,
            artisthash,
            name,
            genre: None,
            image: None,
            bio: None,
        }
    }

    /// Derive the stable public identifier for an artist name.
    ///
    /// Lowercased alphanumerics with runs of everything else collapsed to a
    /// single dash, so "Arctic Monkeys" and "arctic monkeys" map to the same
    /// catalog entry.
    pub fn hash_name(name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        let mut last_dash = true;

        for c in name.chars() {
            if c.is_alphanumeric() {
                out.extend(c.to_lowercase());
                last_dash = false;
            } else if !last_dash {
                out.push('-');
                last_dash = true;
            }
        }

        while out.ends_with('-') {
            out.pop();
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_name() {
        assert_eq!(Artist::hash_name("Arctic Monkeys"), "arctic-monkeys");
        assert_eq!(Artist::hash_name("arctic  MONKEYS "), "arctic-monkeys");
        assert_eq!(Artist::hash_name("AC/DC"), "ac-dc");
        assert_eq!(Artist::hash_name("Sigur Rós"), "sigur-rós");
    }
}
