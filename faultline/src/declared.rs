//! Declared fault sets

use crate::error::Kind;

/// The kinds a caller may propagate unchanged, in declaration order.
///
/// Holds at most two kinds, mirroring a signature that declares up to two
/// checked faults. A fault matches when its kind is a declared kind or
/// derives from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Declared<'a> {
    kinds: [Option<&'a Kind>; 2],
}

impl<'a> Declared<'a> {
    /// Nothing declared
    pub const NONE: Declared<'static> = Declared { kinds: [None, None] };

    /// One declared kind
    pub fn one(kind: &'a Kind) -> Self {
        Self {
            kinds: [Some(kind), None],
        }
    }

    /// Two declared kinds
    pub fn two(first: &'a Kind, second: &'a Kind) -> Self {
        Self {
            kinds: [Some(first), Some(second)],
        }
    }

    /// Declared kinds in order
    pub fn iter(&self) -> impl Iterator<Item = &'a Kind> + '_ {
        self.kinds.iter().flatten().copied()
    }

    /// Number of declared kinds
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds[0].is_none()
    }

    /// Whether `kind` is, or derives from, a declared kind
    pub fn matches(&self, kind: &Kind) -> bool {
        self.iter().any(|declared| kind.is_a(declared))
    }
}
