//! Lazily materialized origin traces
//!
//! Resolving frames to symbols is the expensive part of a trace. When trace
//! capture runs in lazy mode, faults only record raw frames and this view
//! resolves them on first read, memoizing the result.

use crate::error::Fault;
use faultline_error::{config, Frames, TraceCapture};

/// Whether [`lazy_origin_trace`] reads deferred origin traces.
///
/// False when trace capture is configured `eager` or `off`.
pub fn is_lazy_origin_trace_active() -> bool {
    config::current().capture == TraceCapture::Lazy
}

/// The frames recorded when `fault` was created, as a read-only list.
///
/// In lazy mode the origin trace is resolved on first read, and the result is
/// unaffected by a later [`Fault::set_stack_trace`]. Otherwise this is the
/// fault's current, already materialized stack trace.
pub fn lazy_origin_trace(fault: &Fault) -> Frames {
    if is_lazy_origin_trace_active() {
        fault.origin_trace().frames()
    } else {
        fault.stack_trace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;
    use faultline_error::Frame;

    #[test]
    fn test_lazy_trace_matches_original() {
        let fault = Fault::bare(Kind::CHECKED);
        let original = fault.stack_trace();
        assert_eq!(lazy_origin_trace(&fault), original);
    }

    #[test]
    fn test_lazy_trace_explicit_frames() {
        let frames = vec![Frame::new("app::a"), Frame::new("app::b")];
        let fault = Fault::bare(Kind::CHECKED).with_frames(frames.clone());
        assert_eq!(lazy_origin_trace(&fault), frames);
    }

    #[test]
    fn test_lazy_trace_rejects_mutation() {
        let fault = Fault::bare(Kind::CHECKED).with_frames(vec![Frame::new("app::a")]);
        let mut trace = lazy_origin_trace(&fault);

        let err = trace.try_set(0, Frame::new("app::z")).unwrap_err();
        assert_eq!(err.kind(), Kind::UNSUPPORTED_OPERATION);
        assert_eq!(trace[0], Frame::new("app::a"));
    }

    #[test]
    fn test_lazy_trace_after_replacement() {
        let original = vec![Frame::new("app::a"), Frame::new("app::b")];
        let fault = Fault::bare(Kind::CHECKED).with_frames(original.clone());
        let before = lazy_origin_trace(&fault);

        fault.set_stack_trace(Vec::new());

        // A view taken earlier is a snapshot either way
        assert_eq!(before, original);
        if is_lazy_origin_trace_active() {
            assert_eq!(lazy_origin_trace(&fault), original);
        } else {
            assert!(lazy_origin_trace(&fault).is_empty());
        }
    }

    #[test]
    fn test_captured_lazy_trace_after_replacement() {
        let fault = Fault::new(Kind::CHECKED, "captured");
        let original = fault.stack_trace().to_vec();
        assert_eq!(lazy_origin_trace(&fault), original);

        fault.set_stack_trace(Vec::new());

        if is_lazy_origin_trace_active() {
            assert!(!original.is_empty());
            assert_eq!(lazy_origin_trace(&fault), original);
        } else {
            assert!(lazy_origin_trace(&fault).is_empty());
        }
    }

    #[test]
    fn test_lazy_trace_is_memoized() {
        let fault = Fault::bare(Kind::CHECKED);
        if is_lazy_origin_trace_active() {
            assert!(lazy_origin_trace(&fault).ptr_eq(&lazy_origin_trace(&fault)));
        }
    }
}
