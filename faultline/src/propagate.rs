//! # Propagation policy
//!
//! Helpers for a caller holding a fault it caught and deciding what to do
//! with it. "Rethrowing" is returning `Err` with the same fault handle, so
//! identity is preserved end to end; `Ok(())` hands the decision back to the
//! caller. None of these helpers ever swallow a fault.
//!
//! ```rust
//! use faultline::{propagate, Declared, Fault, Kind};
//!
//! static CONFIG_MISSING: Kind = Kind::checked("ConfigMissing");
//!
//! fn load(caught: Fault) -> faultline::Result<()> {
//!     propagate::rethrow_if_any_declared_matches(Some(&caught), &Declared::one(&CONFIG_MISSING))?;
//!     Err(propagate::wrap_and_rethrow_unchecked(&caught))
//! }
//! ```

use crate::declared::Declared;
use crate::error::{self, Fault, Kind, Result};

/// Rethrow `fault` if it is unchecked or fatal.
///
/// Fails with InvalidArgument when `fault` is `None`. Returns `Ok(())` for
/// checked faults, leaving them to the caller.
pub fn rethrow_if_unchecked(fault: Option<&Fault>) -> Result<()> {
    let fault = fault.ok_or_else(|| error::null_fault("propagate::rethrow_if_unchecked"))?;
    if fault.classification().is_unchecked() {
        return Err(fault.clone());
    }
    Ok(())
}

/// Rethrow `fault` if it is unchecked, fatal, or of a declared kind.
///
/// `None` is a no-op. Anything else returns `Ok(())`: the caller is expected
/// to wrap it, typically with [`wrap_and_rethrow_unchecked`].
pub fn rethrow_if_any_declared_matches(fault: Option<&Fault>, declared: &Declared<'_>) -> Result<()> {
    let Some(fault) = fault else {
        return Ok(());
    };
    if fault.classification().is_unchecked() || declared.matches(&fault.kind()) {
        return Err(fault.clone());
    }
    Ok(())
}

/// Rethrow `fault` if its kind is `kind` or derives from it.
///
/// `None` is a no-op.
pub fn rethrow_if_kind_matches(fault: Option<&Fault>, kind: &Kind) -> Result<()> {
    match fault {
        Some(fault) if fault.kind().is_a(kind) => Err(fault.clone()),
        _ => Ok(()),
    }
}

/// Like [`rethrow_if_kind_matches`], but a missing fault is an
/// InvalidArgument fault.
pub fn throw_if_kind_matches(fault: Option<&Fault>, kind: &Kind) -> Result<()> {
    let fault = fault.ok_or_else(|| error::null_fault("propagate::throw_if_kind_matches"))?;
    rethrow_if_kind_matches(Some(fault), kind)
}

/// The fault to propagate in place of `fault`.
///
/// Unchecked and fatal faults come back unchanged; checked ones are wrapped
/// in an [`Unchecked`](Kind::UNCHECKED) carrier whose cause is `fault`. The
/// declared kinds of the call site are not preserved beyond the cause link.
#[must_use = "the returned fault should be propagated"]
pub fn wrap_and_rethrow_unchecked(fault: &Fault) -> Fault {
    if fault.classification().is_unchecked() {
        return fault.clone();
    }
    tracing::debug!(kind = %fault.kind(), "wrapping checked fault in unchecked carrier");
    Fault::unchecked_carrier(fault)
}

/// The direct cause of `fault`, required to be of `kind`.
///
/// Returns `Ok(None)` when there is no cause. A cause of another kind is a
/// KindMismatch fault whose cause is `fault`.
pub fn cause_as(fault: &Fault, kind: &Kind) -> Result<Option<Fault>> {
    match fault.cause() {
        None => Ok(None),
        Some(cause) if cause.kind().is_a(kind) => Ok(Some(cause.clone())),
        Some(cause) => Err(Fault::kind_mismatch(kind, &cause.kind())
            .with_operation("propagate::cause_as")
            .with_cause(fault.clone())),
    }
}
