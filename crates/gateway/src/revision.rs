//! Revision tokens.
//!
//! A token looks like `3-9f1c...`: the write generation followed by a random
//! suffix. Callers must treat it as opaque and only echo it back.

use std::fmt;

use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    /// Token for a freshly created document.
    pub(crate) fn initial() -> Self {
        Self::with_generation(1)
    }

    /// Token for the write that follows this one.
    pub(crate) fn next(&self) -> Self {
        Self::with_generation(self.generation().unwrap_or(0) + 1)
    }

    fn with_generation(generation: u64) -> Self {
        Self(format!("{generation}-{}", Uuid::new_v4().simple()))
    }

    /// Write generation encoded in the token, `None` for foreign tokens.
    pub fn generation(&self) -> Option<u64> {
        self.0.split_once('-')?.0.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Revision {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Revision {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Revision> for String {
    fn from(value: Revision) -> Self {
        value.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
