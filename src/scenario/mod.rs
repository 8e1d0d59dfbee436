//! Scripted UAT sessions
//!
//! Reads YAML scenarios describing a sequence of wizard actions and the
//! outcome expected from each, then replays them against a [`Wizard`]
//! without a terminal. Assertions are made against structured outcomes
//! rather than rendered output.
//!
//! [`Wizard`]: crate::wizard::Wizard

mod config;
mod runner;

pub use config::*;
pub use runner::{execute, load_scenario, run_scenario, ScenarioOptions, ScenarioResult};
