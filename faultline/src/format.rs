//! Trace rendering

use crate::error::Fault;
use faultline_error::Frame;
use std::collections::HashSet;
use std::fmt::{self, Write};

/// Render `fault`, its stack trace, and its causes as text.
///
/// ```text
/// IllegalState: config reload failed
/// 	at app::reload(src/app.rs:40)
/// 	at app::main(src/main.rs:12)
/// Caused by: Io: permission denied
/// 	at app::read_config(src/app.rs:18)
/// 	... 2 more
/// ```
///
/// Frames a cause shares with the trace enclosing it are elided as
/// `... N more`. A looping chain ends with a `[CIRCULAR REFERENCE: ..]` line.
pub fn format_with_trace(fault: &Fault) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_trace(fault, &mut out);
    out
}

/// Stream the rendering of [`format_with_trace`] into `out`
pub fn write_trace<W: Write>(fault: &Fault, out: &mut W) -> fmt::Result {
    let mut seen = HashSet::new();
    seen.insert(fault.id());

    let mut enclosing = fault.stack_trace();
    writeln!(out, "{}", fault)?;
    for frame in &enclosing {
        writeln!(out, "\tat {}", frame)?;
    }

    let mut next = fault.cause().cloned();
    while let Some(cause) = next {
        if !seen.insert(cause.id()) {
            writeln!(out, "\t[CIRCULAR REFERENCE: {}]", cause)?;
            break;
        }

        let frames = cause.stack_trace();
        let shared = shared_suffix(&frames, &enclosing);
        writeln!(out, "Caused by: {}", cause)?;
        for frame in &frames[..frames.len() - shared] {
            writeln!(out, "\tat {}", frame)?;
        }
        if shared > 0 {
            writeln!(out, "\t... {} more", shared)?;
        }

        enclosing = frames;
        next = cause.cause().cloned();
    }
    Ok(())
}

/// Number of trailing frames two traces have in common
fn shared_suffix(frames: &[Frame], enclosing: &[Frame]) -> usize {
    frames
        .iter()
        .rev()
        .zip(enclosing.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}
