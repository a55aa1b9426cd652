//! # Causal chains
//!
//! Walks `cause` links iteratively, remembering every fault seen by identity.
//! Chains built with [`Fault::init_cause`] can loop; every walk here stops.

use crate::error::{self, Fault, Result};
use faultline_error::ReadOnlyList;
use std::collections::HashSet;

/// Iterator over a fault and its causes, outermost first.
///
/// Ends at the first fault without a cause, or before the first fault that
/// was already yielded.
pub struct Causes {
    next: Option<Fault>,
    seen: HashSet<usize>,
    repeated: Option<Fault>,
}

impl Causes {
    /// The fault that stopped iteration by reappearing, if any
    pub fn repeated(&self) -> Option<&Fault> {
        self.repeated.as_ref()
    }
}

impl Iterator for Causes {
    type Item = Fault;

    fn next(&mut self) -> Option<Fault> {
        let current = self.next.take()?;
        if !self.seen.insert(current.id()) {
            self.repeated = Some(current);
            return None;
        }
        self.next = current.cause().cloned();
        Some(current)
    }
}

/// Iterate over `fault` and its causes
pub fn causes(fault: &Fault) -> Causes {
    Causes {
        next: Some(fault.clone()),
        seen: HashSet::new(),
        repeated: None,
    }
}

/// The innermost cause of `fault`, or `fault` itself if it has none.
///
/// Fails with InvalidArgument when `fault` is `None`, and with IllegalState
/// when the chain loops.
pub fn root_cause(fault: Option<&Fault>) -> Result<Fault> {
    let fault = fault.ok_or_else(|| error::null_fault("chain::root_cause"))?;

    let mut walk = causes(fault);
    let mut last = fault.clone();
    for link in walk.by_ref() {
        last = link;
    }

    match walk.repeated() {
        Some(repeated) => {
            tracing::warn!(fault = %fault, repeated = %repeated, "loop in causal chain");
            Err(error::cause_cycle("chain::root_cause", repeated).with_cause(fault.clone()))
        }
        None => Ok(last),
    }
}

/// `fault` followed by each successive cause.
///
/// Stops at the first fault without a cause or at the first repeated fault.
/// Fails with InvalidArgument when `fault` is `None`. The returned list is a
/// snapshot and cannot be modified.
pub fn causal_chain(fault: Option<&Fault>) -> Result<ReadOnlyList<Fault>> {
    let fault = fault.ok_or_else(|| error::null_fault("chain::causal_chain"))?;
    Ok(causes(fault).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    static FILE_NOT_FOUND: Kind = Kind::derive("FileNotFound", &Kind::IO);
    static SOME_CHECKED: Kind = Kind::checked("SomeChecked");
    static SOME_CHAINING: Kind = Kind::unchecked("SomeChaining");

    fn chaining(cause: &Fault) -> Fault {
        Fault::bare(SOME_CHAINING).with_cause(cause.clone())
    }

    #[test]
    fn test_root_cause_no_cause() {
        let fault = Fault::bare(SOME_CHECKED);
        assert!(root_cause(Some(&fault)).unwrap().is_same(&fault));
    }

    #[test]
    fn test_root_cause_single_wrapped() {
        let cause = Fault::bare(SOME_CHECKED);
        let fault = chaining(&cause);
        assert!(root_cause(Some(&fault)).unwrap().is_same(&cause));
    }

    #[test]
    fn test_root_cause_double_wrapped() {
        let cause = Fault::bare(SOME_CHECKED);
        let fault = chaining(&chaining(&cause));
        assert!(root_cause(Some(&fault)).unwrap().is_same(&cause));
    }

    #[test]
    fn test_root_cause_null() {
        let err = root_cause(None).unwrap_err();
        assert_eq!(err.kind(), Kind::INVALID_ARGUMENT);
    }

    #[test]
    fn test_root_cause_cycle() {
        let a = Fault::bare(SOME_CHECKED);
        let b = Fault::bare(SOME_CHECKED);
        a.init_cause(&b).unwrap();
        b.init_cause(&a).unwrap();

        let err = root_cause(Some(&a)).unwrap_err();
        assert_eq!(err.kind(), Kind::ILLEGAL_STATE);
        assert!(err.cause().unwrap().is_same(&a));
    }

    #[test]
    fn test_causal_chain() {
        let fnfe = Fault::bare(FILE_NOT_FOUND);
        let iae = Fault::bare(Kind::INVALID_ARGUMENT).with_cause(fnfe.clone());
        let re = Fault::bare(Kind::UNCHECKED).with_cause(iae.clone());
        let ex = Fault::bare(Kind::ILLEGAL_STATE).with_cause(re.clone());

        let chain = causal_chain(Some(&ex)).unwrap();
        assert_eq!(chain, vec![ex.clone(), re, iae, fnfe.clone()]);

        let only = causal_chain(Some(&fnfe)).unwrap();
        assert_eq!(only.len(), 1);
        assert!(only[0].is_same(&fnfe));
    }

    #[test]
    fn test_causal_chain_is_read_only() {
        let fault = chaining(&Fault::bare(SOME_CHECKED));
        let mut chain = causal_chain(Some(&fault)).unwrap();

        let err = chain.try_push(Fault::bare(Kind::UNCHECKED)).unwrap_err();
        assert_eq!(err.kind(), Kind::UNSUPPORTED_OPERATION);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_causal_chain_null() {
        let err = causal_chain(None).unwrap_err();
        assert_eq!(err.kind(), Kind::INVALID_ARGUMENT);
    }

    #[test]
    fn test_causal_chain_stops_at_cycle() {
        let a = Fault::bare(SOME_CHECKED);
        let b = Fault::bare(SOME_CHECKED);
        let c = Fault::bare(SOME_CHECKED);
        a.init_cause(&b).unwrap();
        b.init_cause(&c).unwrap();
        c.init_cause(&b).unwrap();

        let chain = causal_chain(Some(&a)).unwrap();
        assert_eq!(chain, vec![a, b.clone(), c]);

        let mut walk = causes(&chain[0]);
        assert_eq!(walk.by_ref().count(), 3);
        assert!(walk.repeated().unwrap().is_same(&b));
    }

    #[test]
    fn test_carrier_scenario() {
        let e = Fault::new(SOME_CHECKED, "boom");
        assert!(root_cause(Some(&e)).unwrap().is_same(&e));

        let wrap = Fault::unchecked_carrier(&e);
        assert!(root_cause(Some(&wrap)).unwrap().is_same(&e));
        assert_eq!(causal_chain(Some(&wrap)).unwrap(), vec![wrap.clone(), e]);
    }
}
