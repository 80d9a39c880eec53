use std::{borrow::Borrow, fmt, str::FromStr};

use crate::{error, error::Result};

/// A canonical key token: the lower-cased name of a key, used as the
/// membership key for state tracking.
///
/// Two tokens are equal iff their lower-cased forms are equal, so "A" and
/// "a", or "Escape" and "escape", name the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyToken {
    /// Stored token string, always lower-case and non-empty.
    name: String,
}

impl KeyToken {
    /// Normalize a raw key name into a token. Names may arrive in any case
    /// ("A", "Shift", "Escape"); an empty name is an error.
    pub fn normalize(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(error::Error::InvalidKey(name.into()));
        }
        Ok(Self {
            name: name.to_lowercase(),
        })
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl FromStr for KeyToken {
    type Err = error::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::normalize(s)
    }
}

impl TryFrom<&str> for KeyToken {
    type Error = error::Error;
    fn try_from(name: &str) -> Result<Self> {
        Self::normalize(name)
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Borrow<str> for KeyToken {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl PartialEq<&str> for KeyToken {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl PartialEq<String> for KeyToken {
    fn eq(&self, other: &String) -> bool {
        self.name == *other
    }
}
