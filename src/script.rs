//! Command scripts
//!
//! One step per line:
//! ```text
//! # comment
//! next-line
//! forward-word 3
//! wait 0.5
//! ```

use std::time::Duration;

use crate::error::{FlashError, Result};
use crate::trigger::duration_from_secs;

/// A single scripted step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Run a command with a repeat count
    Run { command: String, count: i32 },
    /// Advance the clock
    Wait(Duration),
}

/// Parse a script into steps
pub fn parse(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split_once('#').map_or(raw, |(code, _)| code).trim();
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        let (Some(head), arg, None) = (words.next(), words.next(), words.next()) else {
            return Err(bad_line(idx, "expected `command [count]` or `wait SECONDS`"));
        };

        let step = if head == "wait" {
            let secs = arg
                .and_then(|a| a.parse::<f64>().ok())
                .ok_or_else(|| bad_line(idx, "wait needs a number of seconds"))?;
            Step::Wait(duration_from_secs(secs)?)
        } else {
            let count = match arg {
                Some(a) => a
                    .parse::<i32>()
                    .map_err(|_| bad_line(idx, "count must be an integer"))?,
                None => 1,
            };
            Step::Run {
                command: head.to_string(),
                count,
            }
        };
        steps.push(step);
    }

    Ok(steps)
}

fn bad_line(idx: usize, what: &str) -> FlashError {
    FlashError::Message(format!("script line {}: {}", idx + 1, what))
}
