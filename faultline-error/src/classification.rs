//! Classification of fault kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a kind of fault is expected to be handled.
///
/// The classification is a closed tag carried by every [`Kind`](crate::Kind).
/// Propagation helpers decide whether to pass a fault through unchanged or
/// wrap it by looking at this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Recoverable, and expected to be handled (or declared) by the caller
    Checked,

    /// Programming or precondition errors that propagate without declaration
    Unchecked,

    /// Unrecoverable conditions - never wrapped, always propagated as-is
    Fatal,
}

impl Classification {
    /// Returns the classification as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Checked => "checked",
            Classification::Unchecked => "unchecked",
            Classification::Fatal => "fatal",
        }
    }

    /// Whether callers must handle or declare faults of this classification
    pub fn is_checked(&self) -> bool {
        matches!(self, Classification::Checked)
    }

    /// Whether faults of this classification propagate without declaration.
    ///
    /// Fatal faults count as unchecked.
    pub fn is_unchecked(&self) -> bool {
        !self.is_checked()
    }

    /// Whether faults of this classification are unrecoverable
    pub fn is_fatal(&self) -> bool {
        matches!(self, Classification::Fatal)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_display() {
        assert_eq!(Classification::Checked.to_string(), "checked");
        assert_eq!(Classification::Fatal.to_string(), "fatal");
    }

    #[test]
    fn test_fatal_is_unchecked() {
        assert!(Classification::Fatal.is_unchecked());
        assert!(Classification::Unchecked.is_unchecked());
        assert!(!Classification::Checked.is_unchecked());
        assert!(!Classification::Unchecked.is_fatal());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Classification::Unchecked).unwrap();
        assert_eq!(json, "\"unchecked\"");
        let back: Classification = serde_json::from_str("\"fatal\"").unwrap();
        assert_eq!(back, Classification::Fatal);
    }
}
