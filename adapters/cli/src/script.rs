//! Scripted player input, one action per line.
//!
//! ```text
//! # walk to the tree line and clear it
//! move right 3
//! chop omni
//! dig down
//! wait 10
//! ```
//!
//! An optional trailing count repeats the action. Once the script runs out the
//! player waits.

use std::{collections::VecDeque, fs, path::Path};

use anyhow::{Context, Result};
use skogshuggare_core::{Direction, Heading, PlayerAction, Reach};
use thiserror::Error;

/// A script line that could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("script line {line}: {reason}")]
pub(crate) struct ScriptError {
    line: usize,
    reason: String,
}

/// Queue of player actions consumed one per tick.
///
/// Repeated lines stay a single run with a countdown, so a huge repeat count
/// costs no memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Script {
    runs: VecDeque<Run>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Run {
    action: PlayerAction,
    left: usize,
}

impl Script {
    /// Reads and parses a script file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid script {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut runs = VecDeque::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let (action, repeat) =
                parse_line(line).map_err(|reason| ScriptError {
                    line: index + 1,
                    reason,
                })?;
            runs.push_back(Run {
                action,
                left: repeat,
            });
        }
        Ok(Self { runs })
    }

    /// Next scripted action, or [`PlayerAction::Wait`] once exhausted.
    pub(crate) fn next_action(&mut self) -> PlayerAction {
        let Some(run) = self.runs.front_mut() else {
            return PlayerAction::Wait;
        };
        let action = run.action;
        run.left -= 1;
        if run.left == 0 {
            let _ = self.runs.pop_front();
        }
        action
    }

    /// Actions not yet consumed, saturating at `usize::MAX`.
    pub(crate) fn remaining(&self) -> usize {
        self.runs
            .iter()
            .fold(0, |total: usize, run| total.saturating_add(run.left))
    }
}

fn parse_line(line: &str) -> Result<(PlayerAction, usize), String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let (verb, rest) = words
        .split_first()
        .ok_or_else(|| "empty action".to_owned())?;

    let (action, rest) = match *verb {
        "wait" => (PlayerAction::Wait, rest),
        "move" => {
            let (target, rest) = argument(verb, rest)?;
            let heading = match target {
                "random" => Heading::Random,
                other => Heading::Toward(direction(other)?),
            };
            (PlayerAction::Move(heading), rest)
        }
        "chop" => {
            let (target, rest) = argument(verb, rest)?;
            let reach = match target {
                "omni" => Reach::Omni,
                other => Reach::Toward(direction(other)?),
            };
            (PlayerAction::Chop(reach), rest)
        }
        "dig" => {
            let (target, rest) = argument(verb, rest)?;
            (PlayerAction::Dig(direction(target)?), rest)
        }
        other => return Err(format!("unknown action `{other}`")),
    };

    let repeat = match rest {
        [] => 1,
        [count] => count
            .parse::<usize>()
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| format!("`{count}` is not a positive repeat count"))?,
        _ => return Err(format!("too many arguments for `{verb}`")),
    };
    Ok((action, repeat))
}

fn argument<'a>(verb: &str, rest: &'a [&'a str]) -> Result<(&'a str, &'a [&'a str]), String> {
    rest.split_first()
        .map(|(first, rest)| (*first, rest))
        .ok_or_else(|| format!("`{verb}` needs a direction"))
}

fn direction(word: &str) -> Result<Direction, String> {
    match word {
        "up" => Ok(Direction::Up),
        "down" => Ok(Direction::Down),
        "left" => Ok(Direction::Left),
        "right" => Ok(Direction::Right),
        other => Err(format!("`{other}` is not a direction")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_comments_and_repeats() {
        let mut script = Script::parse(
            "# opening\nmove right 2\n\nchop omni  # clear around\ndig up\nmove random\nchop left\nwait\n",
        )
        .expect("valid script");

        assert_eq!(script.remaining(), 7);
        let actions: Vec<PlayerAction> = (0..8).map(|_| script.next_action()).collect();
        assert_eq!(
            actions,
            vec![
                PlayerAction::Move(Heading::Toward(Direction::Right)),
                PlayerAction::Move(Heading::Toward(Direction::Right)),
                PlayerAction::Chop(Reach::Omni),
                PlayerAction::Dig(Direction::Up),
                PlayerAction::Move(Heading::Random),
                PlayerAction::Chop(Reach::Toward(Direction::Left)),
                PlayerAction::Wait,
                PlayerAction::Wait,
            ]
        );
        assert_eq!(script.remaining(), 0);
    }

    #[test]
    fn huge_repeat_counts_are_consumed_lazily() {
        let text = format!("chop omni {}\nwait 3", usize::MAX);
        let mut script = Script::parse(&text).expect("valid script");

        assert_eq!(script.remaining(), usize::MAX);
        for _ in 0..5 {
            assert_eq!(script.next_action(), PlayerAction::Chop(Reach::Omni));
        }
        assert_eq!(script.remaining(), usize::MAX - 5 + 3);
    }

    #[test]
    fn errors_name_the_offending_line() {
        let cases = [
            ("wait\njump up", 2, "unknown action `jump`"),
            ("dig", 1, "`dig` needs a direction"),
            ("dig omni", 1, "`omni` is not a direction"),
            ("move up 0", 1, "`0` is not a positive repeat count"),
            ("\n\nchop up 2 3", 3, "too many arguments for `chop`"),
        ];

        for (text, line, reason) in cases {
            assert_eq!(
                Script::parse(text),
                Err(ScriptError {
                    line,
                    reason: reason.to_owned(),
                }),
                "{text:?}"
            );
        }
    }
}
