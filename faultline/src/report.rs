//! Structured chain reports
//!
//! A [`FaultReport`] is a serializable snapshot of a causal chain, for
//! shipping a fault to a log pipeline or across a process boundary where
//! the `Fault` handle itself cannot go.

use crate::chain;
use crate::error::{Classification, Fault, Result};
use faultline_error::Frame;
use serde::{Deserialize, Serialize};

/// One link of a reported chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub kind: String,
    pub classification: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation: String,
    /// Key-value pairs in insertion order; keys may repeat
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<(String, String)>,
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl ReportEntry {
    fn from_fault(fault: &Fault) -> Self {
        Self {
            kind: fault.kind().name().to_string(),
            classification: fault.classification(),
            message: fault.message().map(str::to_string),
            operation: fault.operation().to_string(),
            context: fault
                .context()
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            frames: fault.stack_trace().to_vec(),
        }
    }
}

/// A snapshot of a fault and its causes, outermost first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultReport {
    pub chain: Vec<ReportEntry>,
    /// Set when the chain loops back onto an earlier fault
    #[serde(default)]
    pub circular: bool,
}

impl FaultReport {
    /// Snapshot the chain starting at `fault`
    pub fn capture(fault: &Fault) -> Self {
        let mut walk = chain::causes(fault);
        let chain = walk.by_ref().map(|link| ReportEntry::from_fault(&link)).collect();
        Self {
            chain,
            circular: walk.repeated().is_some(),
        }
    }

    /// The outermost entry
    pub fn head(&self) -> Option<&ReportEntry> {
        self.chain.first()
    }

    /// The innermost entry
    pub fn root(&self) -> Option<&ReportEntry> {
        self.chain.last()
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(serialization_failed)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(serialization_failed)
    }

    /// Parse a report from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            Fault::invalid_argument(format!("malformed fault report: {}", err))
                .with_operation("report::from_json")
        })
    }
}

fn serialization_failed(err: serde_json::Error) -> Fault {
    Fault::illegal_state(format!("fault report serialization failed: {}", err))
        .with_operation("report::to_json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    static SOME_CHECKED: Kind = Kind::checked("SomeChecked");

    #[test]
    fn test_capture_chain() {
        let cause = Fault::new(SOME_CHECKED, "disk full")
            .with_frames(vec![Frame::new("app::write").with_location("src/io.rs", 7)]);
        let fault = Fault::unchecked_carrier(&cause)
            .with_operation("app::save")
            .with_context("path", "/tmp/out")
            .with_frames(Vec::new());

        let report = FaultReport::capture(&fault);
        assert_eq!(report.chain.len(), 2);
        assert!(!report.circular);

        let head = report.head().unwrap();
        assert_eq!(head.kind, "Unchecked");
        assert_eq!(head.classification, Classification::Unchecked);
        assert_eq!(head.operation, "app::save");
        assert_eq!(head.context, vec![("path".to_string(), "/tmp/out".to_string())]);

        let root = report.root().unwrap();
        assert_eq!(root.message.as_deref(), Some("disk full"));
        assert_eq!(root.frames[0].function(), "app::write");
    }

    #[test]
    fn test_capture_circular() {
        let a = Fault::bare(SOME_CHECKED).with_frames(Vec::new());
        let b = Fault::bare(SOME_CHECKED).with_frames(Vec::new());
        a.init_cause(&b).unwrap();
        b.init_cause(&a).unwrap();

        let report = FaultReport::capture(&a);
        assert_eq!(report.chain.len(), 2);
        assert!(report.circular);
    }

    #[test]
    fn test_json() {
        let fault = Fault::new(SOME_CHECKED, "boom").with_frames(Vec::new());
        let report = FaultReport::capture(&fault);

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["chain"][0]["kind"], "SomeChecked");
        assert_eq!(value["chain"][0]["classification"], "checked");
        assert_eq!(value["circular"], false);

        assert_eq!(FaultReport::from_json(&json).unwrap(), report);
    }

    #[test]
    fn test_repeated_context_keys_kept() {
        let fault = Fault::bare(SOME_CHECKED)
            .with_operation("storage::save")
            .with_operation("session::checkpoint")
            .with_operation("app::run")
            .with_frames(Vec::new());

        let report = FaultReport::capture(&fault);
        let head = report.head().unwrap();
        assert_eq!(head.operation, "app::run");
        assert_eq!(
            head.context,
            vec![
                ("called".to_string(), "storage::save".to_string()),
                ("called".to_string(), "session::checkpoint".to_string()),
            ]
        );

        let back = FaultReport::from_json(&report.to_json().unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = FaultReport::from_json("{\"chain\": 3}").unwrap_err();
        assert_eq!(err.kind(), Kind::INVALID_ARGUMENT);
    }
}
