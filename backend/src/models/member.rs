//! Member identity
//!
//! Members are identified by an opaque string (a user ID in the hosting
//! application). The settlement engine only needs identities to be
//! comparable and stable, so nothing here interprets the contents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque member identifier
///
/// # Example
/// ```
/// use khata_core::MemberId;
///
/// let alice = MemberId::new("alice");
/// assert_eq!(alice.as_str(), "alice");
/// assert_eq!(alice, MemberId::from("alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
