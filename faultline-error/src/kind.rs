//! Fault kinds

use crate::Classification;
use std::fmt;

/// The kind of fault that occurred.
///
/// Kinds are plain `'static` descriptors, so applications declare their own
/// next to the built-in ones:
///
/// ```rust
/// use faultline_error::{Classification, Kind};
///
/// static CONFIG_MISSING: Kind = Kind::checked("ConfigMissing");
/// static PROFILE_MISSING: Kind = Kind::derive("ProfileMissing", &CONFIG_MISSING);
///
/// assert!(PROFILE_MISSING.is_a(&CONFIG_MISSING));
/// assert_eq!(PROFILE_MISSING.classification(), Classification::Checked);
/// ```
///
/// A derived kind inherits its parent's classification. Kinds compare by
/// value, so names should be unique within an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind {
    name: &'static str,
    classification: Classification,
    parent: Option<&'static Kind>,
}

impl Kind {
    // =========================================================================
    // Built-in kinds
    // =========================================================================

    /// Root of all checked kinds
    pub const CHECKED: Kind = Kind::checked("Checked");

    /// Root of all unchecked kinds, and the carrier used when wrapping
    pub const UNCHECKED: Kind = Kind::unchecked("Unchecked");

    /// Root of all fatal kinds
    pub const FATAL: Kind = Kind::fatal("Fatal");

    /// A required argument was missing or malformed
    pub const INVALID_ARGUMENT: Kind = Kind::derive("InvalidArgument", &Kind::UNCHECKED);

    /// An internal invariant was violated
    pub const ILLEGAL_STATE: Kind = Kind::derive("IllegalState", &Kind::UNCHECKED);

    /// A mutation was attempted on a read-only view
    pub const UNSUPPORTED_OPERATION: Kind =
        Kind::derive("UnsupportedOperation", &Kind::UNCHECKED);

    /// A fault was not of the kind the caller asked for
    pub const KIND_MISMATCH: Kind = Kind::derive("KindMismatch", &Kind::UNCHECKED);

    /// An error imported from outside faultline
    pub const EXTERNAL: Kind = Kind::derive("External", &Kind::CHECKED);

    /// An imported `std::io::Error`
    pub const IO: Kind = Kind::derive("Io", &Kind::EXTERNAL);

    // =========================================================================
    // Constructors
    // =========================================================================

    /// A root kind that must be handled or declared
    pub const fn checked(name: &'static str) -> Kind {
        Kind {
            name,
            classification: Classification::Checked,
            parent: None,
        }
    }

    /// A root kind that propagates without declaration
    pub const fn unchecked(name: &'static str) -> Kind {
        Kind {
            name,
            classification: Classification::Unchecked,
            parent: None,
        }
    }

    /// A root kind for unrecoverable conditions
    pub const fn fatal(name: &'static str) -> Kind {
        Kind {
            name,
            classification: Classification::Fatal,
            parent: None,
        }
    }

    /// A kind derived from `parent`, inheriting its classification
    pub const fn derive(name: &'static str, parent: &'static Kind) -> Kind {
        Kind {
            name,
            classification: parent.classification,
            parent: Some(parent),
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// The kind's name, used as the leading word of rendered traces
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The kind's classification
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// The kind this one derives from, if any
    pub fn parent(&self) -> Option<&'static Kind> {
        self.parent
    }

    /// This kind followed by its ancestors, nearest first
    pub fn lineage(&self) -> impl Iterator<Item = &Kind> + '_ {
        std::iter::successors(Some(self), |kind| kind.parent)
    }

    /// Whether this kind is `other` or derives from it
    pub fn is_a(&self, other: &Kind) -> bool {
        self.lineage().any(|kind| kind == other)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SOME_CHECKED: Kind = Kind::checked("SomeChecked");
    static SOME_SUBCLASS: Kind = Kind::derive("SomeSubclass", &SOME_CHECKED);
    static SOME_OTHER_CHECKED: Kind = Kind::checked("SomeOtherChecked");

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::INVALID_ARGUMENT.to_string(), "InvalidArgument");
        assert_eq!(SOME_CHECKED.to_string(), "SomeChecked");
    }

    #[test]
    fn test_derived_inherits_classification() {
        assert_eq!(SOME_SUBCLASS.classification(), Classification::Checked);
        assert_eq!(Kind::ILLEGAL_STATE.classification(), Classification::Unchecked);
        assert_eq!(Kind::IO.classification(), Classification::Checked);
    }

    #[test]
    fn test_is_a() {
        assert!(SOME_SUBCLASS.is_a(&SOME_CHECKED));
        assert!(SOME_CHECKED.is_a(&SOME_CHECKED));
        assert!(!SOME_CHECKED.is_a(&SOME_SUBCLASS));
        assert!(!SOME_OTHER_CHECKED.is_a(&SOME_CHECKED));
        assert!(Kind::IO.is_a(&Kind::CHECKED));
        assert!(Kind::UNSUPPORTED_OPERATION.is_a(&Kind::UNCHECKED));
    }

    #[test]
    fn test_lineage() {
        let names: Vec<_> = Kind::IO.lineage().map(Kind::name).collect();
        assert_eq!(names, vec!["Io", "External", "Checked"]);
    }
}
