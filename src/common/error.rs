//! Error types for the UAT wizard
//!
//! Every error maps onto one of the categories a user sees as a notice:
//! validation problems they can fix, transport failures they can retry by
//! hand, and flow violations that indicate a misuse of the wizard.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the UAT wizard
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    #[error("Please enter a Change Number/ID")]
    MissingChangeNumber,

    #[error("Please select a Connection Type")]
    MissingConnectionType,

    #[error("Unknown connection type '{0}'. Expected one of: LAN, WLAN, VPN")]
    UnknownConnectionType(String),

    #[error("Unknown test status '{0}'. Expected one of: success, failure, skipped")]
    UnknownStatus(String),

    // === Wizard Flow Errors ===
    #[error("Cannot advance from the {from} step")]
    InvalidTransition { from: String },

    #[error("Cannot {action} during the {step} step")]
    InvalidState { action: String, step: String },

    #[error("Unrecognized input '{0}'. Type 'help' for the available commands")]
    UnknownInput(String),

    // === Catalog Errors ===
    #[error("No website check matches '{0}'")]
    UnknownWebsite(String),

    #[error("No application test matches '{0}'")]
    UnknownAppTest(String),

    // === Transport Errors ===
    #[error("Failed to get IP information: {0}")]
    Transport(String),

    #[error("Failed to parse IP information: {0}")]
    LookupParse(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Scenario Errors ===
    #[error("Scenario expectation failed: {0}")]
    ScenarioAssertion(String),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Broad category of an error, as surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or malformed user input; blocks the action until corrected
    Validation,
    /// An outbound lookup failed; the affected field stays unset
    Transport,
    /// An action was attempted from a step that does not permit it
    InvalidTransition,
    /// Everything else (IO, configuration, serialization)
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Transport => write!(f, "transport"),
            Self::InvalidTransition => write!(f, "invalid_transition"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

impl Error {
    /// Create an invalid state error for an action attempted at the wrong step
    pub fn invalid_state(action: &str, step: &str) -> Self {
        Self::InvalidState {
            action: action.to_string(),
            step: step.to_string(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(from: &str) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingChangeNumber
            | Error::MissingConnectionType
            | Error::UnknownConnectionType(_)
            | Error::UnknownStatus(_)
            | Error::UnknownInput(_)
            | Error::UnknownWebsite(_)
            | Error::UnknownAppTest(_) => ErrorKind::Validation,
            Error::Transport(_) | Error::LookupParse(_) => ErrorKind::Transport,
            Error::InvalidTransition { .. } | Error::InvalidState { .. } => {
                ErrorKind::InvalidTransition
            }
            _ => ErrorKind::Internal,
        }
    }
}
