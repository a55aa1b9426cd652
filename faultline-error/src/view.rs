//! Read-only sequence views

use crate::{Fault, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// An immutable, cheaply clonable snapshot of a sequence.
///
/// Returned wherever faultline hands out a chain or a trace. Reads go through
/// `Deref<Target = [T]>`; there is no way to mutate the contents, and the
/// `try_*` mutators exist only to report that with an
/// [`UnsupportedOperation`](crate::Kind::UNSUPPORTED_OPERATION) fault.
pub struct ReadOnlyList<T> {
    items: Arc<[T]>,
}

impl<T> ReadOnlyList<T> {
    /// An empty list
    pub fn empty() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// The contents as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Whether two lists share the same backing storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    // =========================================================================
    // Rejected mutations
    // =========================================================================

    /// Always fails: the list is read-only
    pub fn try_push(&mut self, _item: T) -> Result<()> {
        Err(rejected("push"))
    }

    /// Always fails: the list is read-only
    pub fn try_set(&mut self, _index: usize, _item: T) -> Result<()> {
        Err(rejected("set"))
    }

    /// Always fails: the list is read-only
    pub fn try_remove(&mut self, _index: usize) -> Result<T> {
        Err(rejected("remove"))
    }

    /// Always fails: the list is read-only
    pub fn try_clear(&mut self) -> Result<()> {
        Err(rejected("clear"))
    }
}

fn rejected(operation: &'static str) -> Fault {
    Fault::unsupported_operation("read-only list cannot be modified")
        .with_operation("view::ReadOnlyList")
        .with_context("attempted", operation)
}

impl<T> Deref for ReadOnlyList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> Clone for ReadOnlyList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for ReadOnlyList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for ReadOnlyList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }
}

impl<T> FromIterator<T> for ReadOnlyList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ReadOnlyList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnlyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ReadOnlyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items[..] == other.items[..]
    }
}

impl<T: Eq> Eq for ReadOnlyList<T> {}

impl<T: PartialEq> PartialEq<[T]> for ReadOnlyList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items[..] == *other
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for ReadOnlyList<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.items[..] == other[..]
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for ReadOnlyList<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.items[..] == other[..]
    }
}

impl<T: Serialize> Serialize for ReadOnlyList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}
