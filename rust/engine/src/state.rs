use serde::{Deserialize, Serialize};

use crate::checker::CheckResult;

/// What a participant put on the table this turn.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub word: Option<String>,
    pub word_index: Option<usize>,
    pub reading: Option<String>,
}

/// Diagnostics attached to a turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnInfo {
    /// Words still drawable by the submitting participant after this turn
    pub unused_words: Vec<String>,
    /// One entry per checker, in pipeline order
    pub checker_results: Vec<CheckResult>,
}

/// How a turn ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "messages")]
pub enum Verdict {
    /// Valid word, match continues
    #[default]
    Continue,
    /// Word submitted but rejected by at least one checker
    RuleViolation(Vec<String>),
    /// No legal word was left to draw
    Exhausted,
}

/// One turn of the relay as seen by the participant that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub observation: Observation,
    pub info: TurnInfo,
    pub reward: f64,
    pub done: bool,
    pub verdict: Verdict,
}

impl State {
    pub fn word(&self) -> Option<&str> {
        self.observation.word.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.verdict, Verdict::Exhausted)
    }

    /// Comments of the checkers that rejected this turn.
    pub fn violations(&self) -> &[String] {
        match &self.verdict {
            Verdict::RuleViolation(messages) => messages,
            _ => &[],
        }
    }
}
