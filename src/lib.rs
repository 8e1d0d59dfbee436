//! UAT Wizard - guided user acceptance testing for workstation changes
//!
//! This library provides the wizard state machine, simulated network
//! diagnostics, result aggregation and CSV report export behind the
//! `uat` command-line tool.

pub mod cli;
pub mod commands;
pub mod common;
pub mod lookup;
pub mod notice;
pub mod profile;
pub mod report;
pub mod scenario;
pub mod session;
pub mod simulate;
pub mod wizard;

// Re-export commonly used types for tests
pub use common::{Error, ErrorKind, Result};
pub use wizard::{Action, Wizard, WizardStep};
