//! Wizard state machine
//!
//! `Config → WebsiteTests → NetworkInfo → AppTests → Results`, strictly
//! forward, with `reset` returning to `Config` from anywhere.

mod action;
mod controller;
mod step;

pub use action::{Action, NullObserver, Outcome, Services, WizardObserver};
pub use controller::{Catalog, TransitionRecord, Wizard, WizardSettings};
pub use step::{Progress, StepStatus, WizardStep};
