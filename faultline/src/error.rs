//! Faultline error types
//!
//! Re-exports faultline-error and provides helper-specific conveniences.

pub use faultline_error::{Classification, Fault, Kind, Result};

// =============================================================================
// Helper-specific fault constructors
// =============================================================================

/// Create an InvalidArgument fault for a missing fault argument
pub fn null_fault(operation: &'static str) -> Fault {
    Fault::null_argument("fault").with_operation(operation)
}

/// Create an IllegalState fault for a looping cause chain
pub fn cause_cycle(operation: &'static str, repeated: &Fault) -> Fault {
    Fault::illegal_state("loop in causal chain detected")
        .with_operation(operation)
        .with_context("repeated", repeated.to_string())
}
