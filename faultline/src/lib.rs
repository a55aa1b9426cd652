//! # faultline
//!
//! Propagation policy and causal-chain tooling for captured faults.
//!
//! ## Core Concepts
//! - **Propagation**: rethrow a caught fault unchanged, or wrap it in an
//!   unchecked carrier, based on its classification and the caller's
//!   declared kinds
//! - **Chains**: walk `cause` links to the root, safely even when they loop
//! - **Traces**: render a fault and its causes as text, or read its origin
//!   frames lazily
//! - **Reports**: serializable snapshots of a whole chain

pub mod chain;
pub mod declared;
pub mod error;
pub mod format;
pub mod lazy;
pub mod propagate;
pub mod report;

pub use chain::{causal_chain, causes, root_cause, Causes};
pub use declared::Declared;
pub use error::{Classification, Fault, Kind, Result};
pub use faultline_error::{config, Frame, Frames, OriginTrace, ReadOnlyList, TraceCapture, TraceConfig};
pub use format::{format_with_trace, write_trace};
pub use lazy::{is_lazy_origin_trace_active, lazy_origin_trace};
pub use propagate::{
    cause_as, rethrow_if_any_declared_matches, rethrow_if_kind_matches, rethrow_if_unchecked,
    throw_if_kind_matches, wrap_and_rethrow_unchecked,
};
pub use report::{FaultReport, ReportEntry};
