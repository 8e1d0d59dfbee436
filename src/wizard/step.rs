//! Wizard steps and progress indicators

use serde::{Deserialize, Serialize};

/// The five steps of a UAT session, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Config,
    WebsiteTests,
    NetworkInfo,
    AppTests,
    Results,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::Config,
        Self::WebsiteTests,
        Self::NetworkInfo,
        Self::AppTests,
        Self::Results,
    ];

    pub const TOTAL: usize = Self::ALL.len();

    /// 1-based position of the step
    pub fn ordinal(&self) -> usize {
        match self {
            Self::Config => 1,
            Self::WebsiteTests => 2,
            Self::NetworkInfo => 3,
            Self::AppTests => 4,
            Self::Results => 5,
        }
    }

    /// The step `advance` moves to, if any
    ///
    /// `Config` is left through `start`, and `Results` only through `reset`.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            Self::WebsiteTests => Some(Self::NetworkInfo),
            Self::NetworkInfo => Some(Self::AppTests),
            Self::AppTests => Some(Self::Results),
            Self::Config | Self::Results => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Config => "Configuration",
            Self::WebsiteTests => "Website Tests",
            Self::NetworkInfo => "Network Information",
            Self::AppTests => "Application Tests",
            Self::Results => "Results",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Display state of one step indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

/// Progress through the wizard as shown by the step bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub step: WizardStep,
    pub indicators: [StepStatus; WizardStep::TOTAL],
    /// `(ordinal - 1) / (TOTAL - 1)`, from 0.0 to 1.0
    pub fraction: f64,
}

impl Progress {
    pub fn at(step: WizardStep) -> Self {
        let current = step.ordinal();
        let indicators = WizardStep::ALL.map(|s| match s.ordinal() {
            n if n < current => StepStatus::Completed,
            n if n == current => StepStatus::Active,
            _ => StepStatus::Pending,
        });

        Self {
            step,
            indicators,
            fraction: (current - 1) as f64 / (WizardStep::TOTAL - 1) as f64,
        }
    }

    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}
