//! Wire format hints.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The wire format of encoded messages.
///
/// Uses MIME-type-like strings so formats show up readably in logs and
/// configuration files.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Format(pub Cow<'static, str>);

impl Format {
    /// Compact binary encoding (`application/x-febridge-binary`).
    pub const BINARY: Format = Format(Cow::Borrowed("application/x-febridge-binary"));

    /// JSON (`application/json`). Readable, larger, slower.
    pub const JSON: Format = Format(Cow::Borrowed("application/json"));

    pub const fn from_static(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }

    pub fn new(s: impl Into<String>) -> Self {
        Format(Cow::Owned(s.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_binary(&self) -> bool {
        self == &Self::BINARY
    }

    pub fn is_json(&self) -> bool {
        self == &Self::JSON
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::BINARY
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for Format {
    fn from(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }
}

impl From<String> for Format {
    fn from(s: String) -> Self {
        Format(Cow::Owned(s))
    }
}

impl AsRef<str> for Format {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
