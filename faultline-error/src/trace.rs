//! Origin traces
//!
//! Capturing raw instruction pointers is cheap; resolving them to symbols is
//! not. An [`OriginTrace`] records the pointers when a fault is created and
//! resolves them only when the frames are first read.

use crate::{Frame, ReadOnlyList, TraceCapture};
use once_cell::sync::OnceCell;
use std::ffi::c_void;
use std::fmt;

/// Frame prefixes belonging to the capture machinery itself
const INTERNAL_PREFIXES: &[&str] = &["backtrace::", "faultline_error::"];

/// The call frames recorded when a fault was created.
///
/// The recorded frames never change. Materialized frames are memoized, so
/// every read after the first returns the same shared list.
pub struct OriginTrace {
    pending: Vec<usize>,
    frames: OnceCell<ReadOnlyList<Frame>>,
}

impl OriginTrace {
    /// Capture the current call stack according to `mode`
    pub fn capture(mode: TraceCapture) -> Self {
        match mode {
            TraceCapture::Off => Self::from_frames(Vec::new()),
            TraceCapture::Lazy => Self {
                pending: capture_ips(),
                frames: OnceCell::new(),
            },
            TraceCapture::Eager => {
                let trace = Self {
                    pending: capture_ips(),
                    frames: OnceCell::new(),
                };
                trace.frames();
                trace
            }
        }
    }

    /// A trace with explicitly supplied frames
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self {
            pending: Vec::new(),
            frames: OnceCell::with_value(ReadOnlyList::from(frames)),
        }
    }

    /// The frames, resolving them on first call
    pub fn frames(&self) -> ReadOnlyList<Frame> {
        self.frames
            .get_or_init(|| ReadOnlyList::from(resolve_frames(&self.pending)))
            .clone()
    }

    /// Whether the frames have been resolved yet
    pub fn is_materialized(&self) -> bool {
        self.frames.get().is_some()
    }
}

impl fmt::Debug for OriginTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.frames.get() {
            Some(frames) => f.debug_list().entries(frames.iter()).finish(),
            None => write!(f, "<{} unresolved frames>", self.pending.len()),
        }
    }
}

fn capture_ips() -> Vec<usize> {
    let mut ips = Vec::with_capacity(32);
    backtrace::trace(|frame| {
        ips.push(frame.ip() as usize);
        true
    });
    ips
}

fn resolve_frames(ips: &[usize]) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(ips.len());
    for &ip in ips {
        let mut resolved = false;
        // One address can yield several symbols when calls were inlined
        backtrace::resolve(ip as *mut c_void, |symbol| {
            resolved = true;
            frames.push(Frame::from_symbol(symbol, ip));
        });
        if !resolved {
            frames.push(Frame::new(format!("{:#x}", ip)));
        }
    }

    let skip = frames
        .iter()
        .take_while(|frame| is_internal(frame.function()))
        .count();
    frames.split_off(skip)
}

fn is_internal(function: &str) -> bool {
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| function.starts_with(prefix) || function.starts_with(&format!("<{}", prefix)))
}
