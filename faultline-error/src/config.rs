//! Process-wide trace capture configuration
//!
//! The configuration is read once, either from an explicit [`install`] call
//! made early in `main`, or from the `FAULTLINE_TRACE` environment variable
//! the first time a fault is created.

use crate::{Fault, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable consulted by [`TraceConfig::from_env`]
pub const TRACE_ENV: &str = "FAULTLINE_TRACE";

static CONFIG: OnceCell<TraceConfig> = OnceCell::new();

/// How origin traces are captured when a fault is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceCapture {
    /// Record raw frames, resolve symbols on first read
    #[default]
    Lazy,

    /// Record and resolve frames immediately
    Eager,

    /// Do not capture frames
    Off,
}

impl TraceCapture {
    /// Returns the mode as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceCapture::Lazy => "lazy",
            TraceCapture::Eager => "eager",
            TraceCapture::Off => "off",
        }
    }

    /// Parse a mode name as accepted in `FAULTLINE_TRACE`.
    ///
    /// Case-insensitive. Besides the mode names, `1` means lazy, `full`
    /// means eager, and `0` or `none` mean off.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lazy" | "1" => Some(TraceCapture::Lazy),
            "eager" | "full" => Some(TraceCapture::Eager),
            "off" | "0" | "none" => Some(TraceCapture::Off),
            _ => None,
        }
    }
}

impl fmt::Display for TraceCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trace capture settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub capture: TraceCapture,
}

impl TraceConfig {
    pub fn lazy() -> Self {
        Self {
            capture: TraceCapture::Lazy,
        }
    }

    pub fn eager() -> Self {
        Self {
            capture: TraceCapture::Eager,
        }
    }

    pub fn off() -> Self {
        Self {
            capture: TraceCapture::Off,
        }
    }

    /// Read `FAULTLINE_TRACE`, falling back to lazy capture
    pub fn from_env() -> Self {
        match std::env::var(TRACE_ENV) {
            Ok(value) => Self::from_env_value(&value),
            Err(_) => Self::default(),
        }
    }

    fn from_env_value(value: &str) -> Self {
        match TraceCapture::parse(value) {
            Some(capture) => Self { capture },
            None => {
                tracing::warn!(
                    variable = TRACE_ENV,
                    value,
                    "unrecognized trace capture mode, using lazy"
                );
                Self::default()
            }
        }
    }
}

/// Install the process-wide configuration.
///
/// Fails with an IllegalState fault if a configuration is already in effect,
/// including one loaded implicitly from the environment.
pub fn install(config: TraceConfig) -> Result<()> {
    CONFIG.set(config).map_err(|_| {
        Fault::illegal_state("trace configuration already installed")
            .with_operation("config::install")
            .with_context("requested", config.capture.as_str())
    })?;
    tracing::debug!(capture = %config.capture, "installed trace configuration");
    Ok(())
}

/// The configuration in effect, loading it from the environment on first use
pub fn current() -> &'static TraceConfig {
    CONFIG.get_or_init(TraceConfig::from_env)
}
