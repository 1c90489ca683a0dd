//! Error types for the meteor shower.
//!
//! None of these ever reach the hosting page as a fault: mount failures
//! leave the engine unstarted and option problems fall back to defaults.

use std::fmt;

/// Errors that can occur while mounting or configuring the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// No drawable surface was available at start.
    NoSurface,
    /// No browser window/document to attach to.
    NoWindow,
    /// The engine was already started or stopped; engines are single-use.
    AlreadyStarted,
    /// Host options could not be parsed.
    InvalidOptions(String),
    /// A palette entry was not a recognised CSS color.
    InvalidColor(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoSurface => write!(f, "No drawable surface available, meteor shower not started"),
            EngineError::NoWindow => write!(f, "No browser window or document available"),
            EngineError::AlreadyStarted => write!(f, "Meteor shower already started; mount a new one instead"),
            EngineError::InvalidOptions(msg) => write!(f, "Invalid meteor shower options: {}", msg),
            EngineError::InvalidColor(css) => write!(f, "Unrecognised color: {:?}", css),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::InvalidOptions(e.to_string())
    }
}
