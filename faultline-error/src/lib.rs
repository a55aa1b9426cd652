//! # faultline-error
//!
//! The captured error model for faultline.
//!
//! ## Design Philosophy
//!
//! - **Kind**: Know what fault occurred (e.g. InvalidArgument, or your own)
//! - **Classification**: Decide how it propagates (Checked, Unchecked, Fatal)
//! - **Cause**: Keep the fault that led here, set once and never replaced
//! - **Origin trace**: Record where it happened, resolve symbols only when read
//!
//! ## Usage
//!
//! ```rust
//! use faultline_error::{Fault, Kind};
//!
//! static PAGE_MISSING: Kind = Kind::checked("PageMissing");
//!
//! fn load(page: &str) -> faultline_error::Result<()> {
//!     Err(Fault::new(PAGE_MISSING, format!("page '{}' not loaded", page))
//!         .with_operation("pages::load")
//!         .with_context("page", page))
//! }
//!
//! assert!(load("context").is_err());
//! ```
//!
//! ## Principles
//!
//! - All fallible operations return `Result<T, faultline_error::Fault>`
//! - A `Fault` is a shared handle: passing it on keeps its identity
//! - Foreign errors are imported with `Fault::from_std`, not leaked raw

pub mod config;
mod classification;
mod fault;
mod frame;
mod kind;
mod trace;
mod view;

pub use classification::Classification;
pub use config::{TraceCapture, TraceConfig};
pub use fault::Fault;
pub use frame::Frame;
pub use kind::Kind;
pub use trace::OriginTrace;
pub use view::ReadOnlyList;

/// Result type alias using faultline Fault
pub type Result<T> = std::result::Result<T, Fault>;

/// A read-only list of call frames
pub type Frames = ReadOnlyList<Frame>;
