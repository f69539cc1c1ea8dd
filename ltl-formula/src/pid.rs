use crate::error::FormulaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, non-empty proposition identifier.
///
/// Restricted to ASCII letters, digits, `_`, `-`, and `.`; no whitespace is
/// permitted. Identity is the exact byte sequence; ordering is the
/// underlying byte order, which is enough to make tableau-node sets
/// (`BTreeSet<Pid>` et al.) and reproducible alphabet enumeration possible.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pid(String);

impl Pid {
    pub fn new(value: impl Into<String>) -> Result<Self, FormulaError> {
        let value = value.into();
        if value.is_empty() {
            return Err(FormulaError::InvalidPid {
                value,
                reason: "identifier must be non-empty",
            });
        }
        if !value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
        {
            return Err(FormulaError::InvalidPid {
                value,
                reason: "identifier may only contain letters, digits, '_', '-', '.'",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Pid {
    type Error = FormulaError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Pid {
    type Error = FormulaError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
