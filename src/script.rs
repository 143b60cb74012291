//! Headless host: run a fixed list of actions and print every transition.

use std::io::{self, Write};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::counter::{CounterAction, CounterState};
use crate::driver::{DriverError, DriverEvent, DriverHandle};

/// Errors from parsing or running a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Invalid script token '{token}' at position {position}: expected +N, -N or reset")]
    InvalidToken { token: String, position: usize },

    #[error("Script contains no actions")]
    Empty,

    #[error("Counter driver error: {0}")]
    Driver(DriverError),

    #[error("Failed to write script output: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of a script run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptReport {
    pub final_state: CounterState,
    pub confirmed: usize,
    pub rolled_back: usize,
}

/// Parse a comma or whitespace separated action list.
///
/// `+N` / `-N` move by `N`; bare `+` / `-` use `default_step`;
/// `reset` (or `r`) resets.
pub fn parse_script(input: &str, default_step: u64) -> Result<Vec<CounterAction>, ScriptError> {
    let actions = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(idx, token)| {
            parse_token(token, default_step).ok_or_else(|| ScriptError::InvalidToken {
                token: token.to_string(),
                position: idx + 1,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if actions.is_empty() {
        return Err(ScriptError::Empty);
    }
    Ok(actions)
}

fn parse_token(token: &str, default_step: u64) -> Option<CounterAction> {
    if token.eq_ignore_ascii_case("reset") || token.eq_ignore_ascii_case("r") {
        return Some(CounterAction::Reset);
    }

    let mut chars = token.chars();
    let sign = chars.next()?;
    let digits = chars.as_str();
    let step = if digits.is_empty() {
        default_step
    } else if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse::<u64>().ok()?
    } else {
        return None;
    };

    match sign {
        '+' => Some(CounterAction::increment(step)),
        '-' => Some(CounterAction::decrement(step)),
        _ => None,
    }
}

/// Submit `actions` one by one, waiting for each to resolve, and write the
/// transcript to `out`.
///
/// Rollbacks are part of the transcript, not errors.
pub async fn run_script<W: Write>(
    handle: &DriverHandle,
    events: &mut UnboundedReceiver<DriverEvent>,
    actions: &[CounterAction],
    out: &mut W,
) -> Result<ScriptReport, ScriptError> {
    let mut confirmed = 0;
    let mut rolled_back = 0;

    writeln!(out, "start: {}", handle.view().confirmed.value)?;

    for (idx, action) in actions.iter().enumerate() {
        match handle.submit_and_wait(*action).await {
            Ok(_) => confirmed += 1,
            Err(DriverError::Confirmation(_)) => rolled_back += 1,
            Err(err) => return Err(ScriptError::Driver(err)),
        }

        while let Ok(event) = events.try_recv() {
            writeln!(out, "[{}] {}", idx + 1, event)?;
        }
    }

    let final_state = handle.view().confirmed;
    writeln!(
        out,
        "final: {} (updates: {}, confirmed: {}, rolled back: {})",
        final_state.value, final_state.update_count, confirmed, rolled_back
    )?;
    out.flush()?;

    Ok(ScriptReport {
        final_state,
        confirmed,
        rolled_back,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_steps_and_reset() {
        let actions = parse_script("+1, -5 reset,R", 1).unwrap();
        assert_eq!(
            actions,
            vec![
                CounterAction::increment(1),
                CounterAction::decrement(5),
                CounterAction::Reset,
                CounterAction::Reset,
            ]
        );
    }

    #[test]
    fn bare_sign_uses_default_step() {
        let actions = parse_script("+,-", 10).unwrap();
        assert_eq!(
            actions,
            vec![CounterAction::increment(10), CounterAction::decrement(10)]
        );
    }

    #[test]
    fn invalid_token_reports_position() {
        let err = parse_script("+1,x2", 1).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::InvalidToken { ref token, position: 2 } if token == "x2"
        ));
    }

    #[test]
    fn doubled_sign_is_invalid() {
        assert!(parse_script("+-3", 1).is_err());
        assert!(parse_script("++3", 1).is_err());
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(matches!(parse_script(" , ", 1), Err(ScriptError::Empty)));
    }
}
