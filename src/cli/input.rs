//! Interactive input parsing
//!
//! Turns one line typed at the prompt into an [`Input`], interpreting it
//! in the context of the current wizard step.

use crate::common::{Error, Result};
use crate::session::{ConnectionType, TestStatus};
use crate::wizard::{Action, WizardStep};

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Action(Action),
    Help,
    Status,
    ShowResults,
    Quit,
    Noop,
}

fn optional_arg(rest: &str) -> Option<String> {
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Split off the first whitespace-delimited word
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

/// Parse a line typed during `step`
pub fn parse_input(step: WizardStep, line: &str) -> Result<Input> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Noop);
    }

    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" | "q" => return Ok(Input::Quit),
        "status" => return Ok(Input::Status),
        "next" | "n" if rest.is_empty() => return Ok(Input::Action(Action::Next)),
        "reset" | "new" if rest.is_empty() => return Ok(Input::Action(Action::Reset)),
        _ => {}
    }

    let action = match step {
        WizardStep::Config => parse_config(cmd, rest)?,
        WizardStep::WebsiteTests => parse_website(line, cmd, rest)?,
        WizardStep::NetworkInfo => parse_network(line, cmd, rest)?,
        WizardStep::AppTests => parse_app_test(line)?,
        WizardStep::Results => match cmd.to_ascii_lowercase().as_str() {
            "comment" => Action::Comment {
                text: rest.to_string(),
            },
            "save" => Action::SaveReport,
            "show" | "results" => return Ok(Input::ShowResults),
            _ => return Err(Error::UnknownInput(line.to_string())),
        },
    };

    Ok(Input::Action(action))
}

/// `[start] <change number> [LAN|WLAN|VPN]`
fn parse_config(cmd: &str, rest: &str) -> Result<Action> {
    let args: Vec<&str> = if cmd.eq_ignore_ascii_case("start") {
        rest.split_whitespace().collect()
    } else {
        std::iter::once(cmd).chain(rest.split_whitespace()).collect()
    };

    let change_number = args.first().copied().unwrap_or_default().to_string();
    let connection_type = args
        .get(1)
        .map(|t| t.parse::<ConnectionType>())
        .transpose()?;

    Ok(Action::Start {
        change_number,
        connection_type,
    })
}

fn parse_website(line: &str, cmd: &str, rest: &str) -> Result<Action> {
    match cmd.to_ascii_lowercase().as_str() {
        "test" if !rest.is_empty() => Ok(Action::TestWebsite {
            site: rest.to_string(),
        }),
        "ip" | "public-ip" | "publicip" => Ok(Action::PublicIp),
        _ if rest.is_empty() && cmd.parse::<usize>().is_ok() => Ok(Action::TestWebsite {
            site: cmd.to_string(),
        }),
        _ => Err(Error::UnknownInput(line.to_string())),
    }
}

fn parse_network(line: &str, cmd: &str, rest: &str) -> Result<Action> {
    match cmd.to_ascii_lowercase().as_str() {
        "ipconfig" => Ok(Action::IpConfig),
        "ping" => Ok(Action::Ping {
            target: optional_arg(rest),
        }),
        "tracert" | "traceroute" => Ok(Action::Tracert {
            target: optional_arg(rest),
        }),
        "wlan" => Ok(Action::WlanInfo),
        _ => Err(Error::UnknownInput(line.to_string())),
    }
}

/// `<test> <pass|fail|skip> [notes...]`
fn parse_app_test(line: &str) -> Result<Action> {
    let (test, rest) = next_word(line);
    let (status, notes) = next_word(rest);
    if status.is_empty() {
        return Err(Error::UnknownInput(line.to_string()));
    }
    let status = status.parse::<TestStatus>()?;
    let notes = optional_arg(notes);

    Ok(Action::AppTest {
        test: test.to_string(),
        status,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(step: WizardStep, line: &str) -> Action {
        match parse_input(step, line).unwrap() {
            Input::Action(action) => action,
            other => panic!("Expected action, got {:?}", other),
        }
    }

    #[test]
    fn test_global_commands() {
        for step in WizardStep::ALL {
            assert_eq!(parse_input(step, "help").unwrap(), Input::Help);
            assert_eq!(parse_input(step, "q").unwrap(), Input::Quit);
            assert_eq!(parse_input(step, "   ").unwrap(), Input::Noop);
            assert_eq!(action(step, "next"), Action::Next);
            assert_eq!(action(step, "NEW"), Action::Reset);
        }
    }

    #[test]
    fn test_config_line() {
        assert_eq!(
            action(WizardStep::Config, "start CHG0012345 vpn"),
            Action::Start {
                change_number: "CHG0012345".to_string(),
                connection_type: Some(ConnectionType::Vpn),
            }
        );
        assert_eq!(
            action(WizardStep::Config, "CHG1"),
            Action::Start {
                change_number: "CHG1".to_string(),
                connection_type: None,
            }
        );
        assert_eq!(
            action(WizardStep::Config, "start"),
            Action::Start {
                change_number: String::new(),
                connection_type: None,
            }
        );
        assert!(matches!(
            parse_input(WizardStep::Config, "CHG1 modem"),
            Err(Error::UnknownConnectionType(_))
        ));
    }

    #[test]
    fn test_website_lines() {
        assert_eq!(
            action(WizardStep::WebsiteTests, "2"),
            Action::TestWebsite {
                site: "2".to_string()
            }
        );
        assert_eq!(
            action(WizardStep::WebsiteTests, "test Microsoft 365"),
            Action::TestWebsite {
                site: "Microsoft 365".to_string()
            }
        );
        assert_eq!(action(WizardStep::WebsiteTests, "ip"), Action::PublicIp);
        assert!(parse_input(WizardStep::WebsiteTests, "ping").is_err());
    }

    #[test]
    fn test_network_lines() {
        assert_eq!(
            action(WizardStep::NetworkInfo, "ping"),
            Action::Ping { target: None }
        );
        assert_eq!(
            action(WizardStep::NetworkInfo, "tracert example.com"),
            Action::Tracert {
                target: Some("example.com".to_string())
            }
        );
        assert_eq!(action(WizardStep::NetworkInfo, "ipconfig"), Action::IpConfig);
        assert_eq!(action(WizardStep::NetworkInfo, "wlan"), Action::WlanInfo);
    }

    #[test]
    fn test_app_test_lines() {
        assert_eq!(
            action(WizardStep::AppTests, "3 fail drive not mapped"),
            Action::AppTest {
                test: "3".to_string(),
                status: TestStatus::Failure,
                notes: Some("drive not mapped".to_string()),
            }
        );
        assert_eq!(
            action(WizardStep::AppTests, "Outlook skip"),
            Action::AppTest {
                test: "Outlook".to_string(),
                status: TestStatus::Skipped,
                notes: None,
            }
        );
        assert_eq!(
            action(WizardStep::AppTests, "Outlook   skip    no  licence"),
            Action::AppTest {
                test: "Outlook".to_string(),
                status: TestStatus::Skipped,
                notes: Some("no  licence".to_string()),
            }
        );
        assert!(matches!(
            parse_input(WizardStep::AppTests, "Outlook"),
            Err(Error::UnknownInput(_))
        ));
        assert!(matches!(
            parse_input(WizardStep::AppTests, "Outlook maybe"),
            Err(Error::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_results_lines() {
        assert_eq!(
            action(WizardStep::Results, "comment VPN reconnect took 30s"),
            Action::Comment {
                text: "VPN reconnect took 30s".to_string()
            }
        );
        assert_eq!(action(WizardStep::Results, "save"), Action::SaveReport);
        assert_eq!(
            parse_input(WizardStep::Results, "show").unwrap(),
            Input::ShowResults
        );
    }
}
