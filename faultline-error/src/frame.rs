//! Call-frame records

use serde::{Deserialize, Serialize};
use std::fmt;

/// One call-frame record of a trace.
///
/// Renders as `function(file:line)`, or `function(Unknown Source)` when no
/// location is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
}

impl Frame {
    /// Create a frame with no known location
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            file: None,
            line: None,
        }
    }

    /// Set the source location
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Build a frame from a resolved symbol
    pub(crate) fn from_symbol(symbol: &backtrace::Symbol, ip: usize) -> Self {
        let function = match symbol.name() {
            // `{:#}` drops the trailing `::h<hash>`
            Some(name) => format!("{:#}", name),
            None => format!("{:#x}", ip),
        };
        Self {
            function,
            file: symbol.filename().map(|path| path.display().to_string()),
            line: symbol.lineno(),
        }
    }

    /// The fully qualified function name
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The source file, if known
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// The source line, if known
    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}({}:{})", self.function, file, line),
            (Some(file), None) => write!(f, "{}({})", self.function, file),
            _ => write!(f, "{}(Unknown Source)", self.function),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let frame = Frame::new("app::config::load").with_location("src/config.rs", 42);
        assert_eq!(frame.to_string(), "app::config::load(src/config.rs:42)");
    }

    #[test]
    fn test_display_unknown_source() {
        let frame = Frame::new("app::main");
        assert_eq!(frame.to_string(), "app::main(Unknown Source)");
        assert_eq!(frame.file(), None);
    }

    #[test]
    fn test_serde_skips_missing_location() {
        let json = serde_json::to_string(&Frame::new("app::main")).unwrap();
        assert_eq!(json, r#"{"function":"app::main"}"#);
    }
}
