//! The Fault type

use crate::{config, Classification, Frame, Kind, OriginTrace, ReadOnlyList, Result};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A captured error.
///
/// A `Fault` is a cheap handle to an immutable error record:
/// - `kind`: What type of fault occurred, and how it is classified
/// - `message`: Human-readable description
/// - `cause`: The fault that led to this one, set at most once
/// - `origin`: The call frames recorded at creation
/// - `operation`/`context`: Where it happened, for debugging
///
/// Cloning a `Fault` copies the handle, not the record. Equality is identity:
/// two handles are equal only if they refer to the same record.
///
/// # Example
///
/// ```rust
/// use faultline_error::{Fault, Kind};
///
/// static CONFIG_MISSING: Kind = Kind::checked("ConfigMissing");
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
/// let err = Fault::new(CONFIG_MISSING, "settings.toml not found")
///     .with_operation("config::load")
///     .with_context("path", "settings.toml")
///     .with_cause(Fault::from(io));
///
/// assert_eq!(err.kind(), CONFIG_MISSING);
/// assert_eq!(err.cause().map(Fault::kind), Some(Kind::IO));
/// ```
#[derive(Clone)]
pub struct Fault {
    inner: Arc<Inner>,
}

struct Inner {
    kind: Kind,
    message: Option<String>,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    cause: OnceCell<Fault>,
    origin: Arc<OriginTrace>,
    replaced: RwLock<Option<ReadOnlyList<Frame>>>,
}

impl Clone for Inner {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            operation: self.operation,
            context: self.context.clone(),
            cause: self.cause.clone(),
            origin: Arc::clone(&self.origin),
            replaced: RwLock::new(self.replaced.read().clone()),
        }
    }
}

impl Fault {
    /// Create a new fault, capturing the origin trace per the configured mode
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self::build(kind, Some(message.into()))
    }

    /// Create a fault without a message
    pub fn bare(kind: Kind) -> Self {
        Self::build(kind, None)
    }

    fn build(kind: Kind, message: Option<String>) -> Self {
        let origin = OriginTrace::capture(config::current().capture);
        Self {
            inner: Arc::new(Inner {
                kind,
                message,
                operation: "",
                context: Vec::new(),
                cause: OnceCell::new(),
                origin: Arc::new(origin),
                replaced: RwLock::new(None),
            }),
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the fault kind
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the classification of the fault kind
    pub fn classification(&self) -> Classification {
        self.inner.kind.classification()
    }

    /// Get the message, if any
    pub fn message(&self) -> Option<&str> {
        self.inner.message.as_deref()
    }

    /// Get the operation that raised this fault
    pub fn operation(&self) -> &'static str {
        self.inner.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.inner.context
    }

    /// Get the cause, if one was set
    pub fn cause(&self) -> Option<&Fault> {
        self.inner.cause.get()
    }

    /// The call frames recorded when this fault was created.
    ///
    /// Unaffected by [`set_stack_trace`](Self::set_stack_trace).
    pub fn origin_trace(&self) -> &OriginTrace {
        &self.inner.origin
    }

    /// The current stack trace: the replacement if one was set, otherwise
    /// the origin frames
    pub fn stack_trace(&self) -> ReadOnlyList<Frame> {
        match &*self.inner.replaced.read() {
            Some(frames) => frames.clone(),
            None => self.inner.origin.frames(),
        }
    }

    /// Whether both handles refer to the same fault
    pub fn is_same(&self, other: &Fault) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Identity of the underlying record, stable while any handle is alive
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    fn inner_mut(&mut self) -> &mut Inner {
        Arc::make_mut(&mut self.inner)
    }

    /// Set the operation that raised this fault.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        let inner = self.inner_mut();
        if !inner.operation.is_empty() {
            inner.context.push(("called", inner.operation.to_string()));
        }
        inner.operation = operation;
        self
    }

    /// Add context to the fault
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.inner_mut().context.push((key, value.into()));
        self
    }

    /// Set the cause.
    ///
    /// A cause that is already set is never replaced.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if a cause was already set.
    pub fn with_cause(mut self, cause: Fault) -> Self {
        let replaced = self.inner_mut().cause.set(cause).is_err();
        debug_assert!(!replaced, "cause already set");
        self
    }

    /// Replace the origin trace with explicit frames
    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.inner_mut().origin = Arc::new(OriginTrace::from_frames(frames));
        self
    }

    // =========================================================================
    // Shared mutations
    // =========================================================================

    /// Set the cause of an already shared fault.
    ///
    /// Fails with InvalidArgument if `cause` is this fault, and with
    /// IllegalState if a cause is already set. Chains built this way may
    /// contain cycles; the records in a cycle are never freed.
    pub fn init_cause(&self, cause: &Fault) -> Result<()> {
        if self.is_same(cause) {
            return Err(Fault::invalid_argument("self-causation not permitted")
                .with_operation("fault::init_cause"));
        }
        self.inner.cause.set(cause.clone()).map_err(|_| {
            Fault::illegal_state(format!("can't overwrite cause of {}", self))
                .with_operation("fault::init_cause")
        })
    }

    /// Replace the current stack trace.
    ///
    /// The origin trace keeps the frames recorded at creation.
    pub fn set_stack_trace(&self, frames: Vec<Frame>) {
        *self.inner.replaced.write() = Some(ReadOnlyList::from(frames));
    }
}

// =============================================================================
// Display - `Kind: message`, the leading line of a rendered trace
// =============================================================================

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.message {
            Some(message) => write!(f, "{}: {}", self.inner.kind, message),
            None => write!(f, "{}", self.inner.kind),
        }
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.inner.kind, self.classification())?;
        if !self.inner.operation.is_empty() {
            write!(f, " at {}", self.inner.operation)?;
        }
        writeln!(f)?;

        if let Some(message) = &self.inner.message {
            writeln!(f)?;
            writeln!(f, "    Message: {}", message)?;
        }

        if !self.inner.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.inner.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        // Display only: causes may form a cycle
        if let Some(cause) = self.cause() {
            writeln!(f)?;
            writeln!(f, "    Cause: {}", cause)?;
        }

        Ok(())
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl Eq for Fault {}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause().map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

// =============================================================================
// Importing foreign errors
// =============================================================================

impl Fault {
    /// Import a foreign error and its source chain.
    ///
    /// Each link becomes an [`External`](Kind::EXTERNAL) fault carrying the
    /// link's display text. A `Fault` found in the chain is reused as-is,
    /// together with its own causes.
    pub fn from_std(err: &(dyn std::error::Error + 'static)) -> Fault {
        let mut messages = Vec::new();
        let mut seen = HashSet::new();
        let mut tail = None;
        let mut current = Some(err);

        while let Some(link) = current {
            if let Some(fault) = link.downcast_ref::<Fault>() {
                tail = Some(fault.clone());
                break;
            }
            if !seen.insert(link as *const dyn std::error::Error as *const () as usize) {
                break;
            }
            messages.push(link.to_string());
            current = link.source();
        }

        let mut imported = tail;
        for message in messages.into_iter().rev() {
            let fault = Fault::new(Kind::EXTERNAL, message);
            imported = Some(match imported {
                Some(cause) => fault.with_cause(cause),
                None => fault,
            });
        }
        imported.unwrap_or_else(|| Fault::new(Kind::EXTERNAL, err.to_string()))
    }
}

impl From<std::io::Error> for Fault {
    fn from(err: std::io::Error) -> Self {
        let kind = err.kind();
        Fault::new(Kind::IO, err.to_string())
            .with_operation("io")
            .with_context("io_kind", kind.to_string())
    }
}

impl From<anyhow::Error> for Fault {
    fn from(err: anyhow::Error) -> Self {
        let err: &(dyn std::error::Error + Send + Sync + 'static) = err.as_ref();
        Fault::from_std(err)
    }
}

// =============================================================================
// Convenience constructors
// =============================================================================

impl Fault {
    /// Create an InvalidArgument fault
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Kind::INVALID_ARGUMENT, message)
    }

    /// Create an InvalidArgument fault for a missing required argument
    pub fn null_argument(name: &'static str) -> Self {
        Self::new(Kind::INVALID_ARGUMENT, format!("'{}' must not be null", name))
            .with_context("argument", name)
    }

    /// Create an IllegalState fault
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::new(Kind::ILLEGAL_STATE, message)
    }

    /// Create an UnsupportedOperation fault
    pub fn unsupported_operation(message: impl Into<String>) -> Self {
        Self::new(Kind::UNSUPPORTED_OPERATION, message)
    }

    /// Create a KindMismatch fault
    pub fn kind_mismatch(expected: &Kind, actual: &Kind) -> Self {
        Self::new(
            Kind::KIND_MISMATCH,
            format!("expected {} but found {}", expected, actual),
        )
        .with_context("expected", expected.name())
        .with_context("actual", actual.name())
    }

    /// Wrap `cause` in an Unchecked carrier whose message is the cause's
    /// display text
    pub fn unchecked_carrier(cause: &Fault) -> Self {
        Self::new(Kind::UNCHECKED, cause.to_string()).with_cause(cause.clone())
    }
}
