//! Scenario file types
//!
//! Defines the data structures for deserializing YAML scenarios.

use serde::Deserialize;

use crate::common::ErrorKind;
use crate::session::PublicIpInfo;
use crate::wizard::{Action, WizardStep};

/// A scripted UAT session loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct Scenario {
    /// Name of the scenario
    pub name: String,
    /// Optional description of what the scenario covers
    pub description: Option<String>,
    /// Seed for the simulated outcomes (default: random)
    pub seed: Option<u64>,
    /// Username recorded in the session (default: "Unknown User")
    pub username: Option<String>,
    /// Website check success rate, overriding the configuration
    pub success_rate: Option<f64>,
    /// Canned public IP lookup response; without it the configured
    /// endpoint is queried
    pub public_ip: Option<PublicIpInfo>,
    /// Skip all simulated delays
    #[serde(default)]
    pub instant: bool,
    /// The sequence of actions to perform
    pub steps: Vec<ScenarioStep>,
}

/// One action plus what it should produce
#[derive(Deserialize, Debug)]
pub struct ScenarioStep {
    #[serde(flatten)]
    pub action: Action,
    pub expect: Option<Expectation>,
}

/// Assertions checked after a step runs
#[derive(Deserialize, Debug, Default)]
pub struct Expectation {
    /// Whether the action should succeed (default: true)
    pub success: Option<bool>,
    /// Step the wizard should be in afterwards
    pub step: Option<WizardStep>,
    /// Substring the rendered outcome must contain
    pub output_contains: Option<String>,
    /// Category of the expected error
    pub error: Option<ErrorKind>,
}

impl Expectation {
    /// Whether this expectation calls for the action to fail
    pub fn expects_failure(&self) -> bool {
        self.success == Some(false) || self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TestStatus;

    #[test]
    fn test_parse_scenario() {
        let scenario: Scenario = serde_yaml::from_str(
            r#"
name: VPN smoke test
seed: 42
instant: true
public_ip:
  ip: 203.0.113.7
  city: Zurich
steps:
  - action: start
    change_number: CHG0012345
    connection_type: VPN
    expect:
      step: website_tests
  - action: next
    expect:
      success: true
  - action: app_test
    test: "Outlook"
    status: failure
    notes: mailbox not loading
  - action: save_report
    expect:
      error: invalid_transition
"#,
        )
        .unwrap();

        assert_eq!(scenario.name, "VPN smoke test");
        assert_eq!(scenario.seed, Some(42));
        assert!(scenario.instant);
        assert_eq!(scenario.public_ip.as_ref().unwrap().ip, "203.0.113.7");
        assert_eq!(scenario.steps.len(), 4);

        let first = &scenario.steps[0];
        assert!(matches!(first.action, Action::Start { .. }));
        assert_eq!(
            first.expect.as_ref().unwrap().step,
            Some(WizardStep::WebsiteTests)
        );

        assert!(matches!(
            &scenario.steps[2].action,
            Action::AppTest {
                status: TestStatus::Failure,
                notes: Some(notes),
                ..
            } if notes == "mailbox not loading"
        ));

        let last = scenario.steps[3].expect.as_ref().unwrap();
        assert_eq!(last.error, Some(ErrorKind::InvalidTransition));
        assert!(last.expects_failure());
    }

    #[test]
    fn test_defaults() {
        let scenario: Scenario = serde_yaml::from_str(
            r#"
name: minimal
steps:
  - action: reset
"#,
        )
        .unwrap();

        assert!(!scenario.instant);
        assert!(scenario.seed.is_none());
        assert!(scenario.public_ip.is_none());
        assert!(scenario.steps[0].expect.is_none());
        assert!(!Expectation::default().expects_failure());
    }
}
