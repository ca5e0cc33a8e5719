//! Turn validation.
//!
//! Each checker is a pure function of a [`CheckContext`] returning a [`CheckResult`]
//! that is `failed` when the submission is NOT valid. The [`CheckerPipeline`] runs
//! every checker on every turn, keeps the results in order and reduces them to a
//! single verdict.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::pool::WordPool;
use crate::rules::{relay_mismatches, PlayerId};
use crate::state::State;

/// Everything a checker may look at.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The turn being answered (the opponent's, or the opening)
    pub previous: &'a State,
    /// The submission under test
    pub current: &'a State,
    /// The submitter's pool
    pub pool: &'a WordPool,
    pub player: PlayerId,
}

/// Outcome of one checker on one turn.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub checker: String,
    pub failed: bool,
    pub comment: Option<String>,
}

impl CheckResult {
    fn pass(kind: CheckerKind) -> Self {
        Self {
            checker: kind.name().to_string(),
            failed: false,
            comment: None,
        }
    }

    fn fail(kind: CheckerKind, comment: String) -> Self {
        Self {
            checker: kind.name().to_string(),
            failed: true,
            comment: Some(comment),
        }
    }
}

/// The canonical checkers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CheckerKind {
    /// Word is not in the dictionary
    DefinedWord,
    /// Word was already consumed by either participant
    UnusedWord,
    /// Word breaks the positional relay rule against the previous word
    PositionalRelay,
    /// More indices consumed than the pool holds
    SequenceSize,
    /// The same index was consumed twice
    DuplicateIndex,
}

impl CheckerKind {
    pub fn name(self) -> &'static str {
        match self {
            CheckerKind::DefinedWord => "DefinedWordChecker",
            CheckerKind::UnusedWord => "UnusedWordChecker",
            CheckerKind::PositionalRelay => "PositionalRelayChecker",
            CheckerKind::SequenceSize => "SequenceSizeChecker",
            CheckerKind::DuplicateIndex => "DuplicateIndexChecker",
        }
    }

    pub fn check(self, ctx: &CheckContext<'_>) -> CheckResult {
        match self {
            CheckerKind::DefinedWord => check_defined(ctx),
            CheckerKind::UnusedWord => check_unused(ctx),
            CheckerKind::PositionalRelay => check_positional(ctx),
            CheckerKind::SequenceSize => check_sequence_size(ctx),
            CheckerKind::DuplicateIndex => check_duplicate_index(ctx),
        }
    }
}

fn check_defined(ctx: &CheckContext<'_>) -> CheckResult {
    let kind = CheckerKind::DefinedWord;
    match ctx.current.word() {
        Some(word) if !ctx.pool.contains(word) => {
            CheckResult::fail(kind, format!("{} is not in our dictionary", word))
        }
        _ => CheckResult::pass(kind),
    }
}

fn check_unused(ctx: &CheckContext<'_>) -> CheckResult {
    let kind = CheckerKind::UnusedWord;
    match ctx.current.word() {
        Some(word) if ctx.pool.is_consumed_word(word) => {
            CheckResult::fail(kind, format!("{} has already been used", word))
        }
        _ => CheckResult::pass(kind),
    }
}

fn check_positional(ctx: &CheckContext<'_>) -> CheckResult {
    let kind = CheckerKind::PositionalRelay;
    let (Some(previous), Some(current)) = (ctx.previous.word(), ctx.current.word()) else {
        // nothing to relay from (opening turn) or nothing submitted (exhaustion)
        return CheckResult::pass(kind);
    };
    let bad = relay_mismatches(previous, current, ctx.player);
    if bad.is_empty() {
        CheckResult::pass(kind)
    } else {
        CheckResult::fail(
            kind,
            format!(
                "{} does not follow {}: position {} must be kept and the rest changed (mismatch at {:?})",
                current,
                previous,
                ctx.player.index(),
                bad
            ),
        )
    }
}

fn check_sequence_size(ctx: &CheckContext<'_>) -> CheckResult {
    let kind = CheckerKind::SequenceSize;
    let used = ctx.pool.consumed_count();
    let size = ctx.pool.len();
    if used > size {
        CheckResult::fail(
            kind,
            format!(
                "consumed {} words but the dictionary only holds {}",
                used, size
            ),
        )
    } else {
        CheckResult::pass(kind)
    }
}

fn check_duplicate_index(ctx: &CheckContext<'_>) -> CheckResult {
    let kind = CheckerKind::DuplicateIndex;
    let history = ctx.pool.history();
    let mut seen = std::collections::HashSet::with_capacity(history.len());
    match history.iter().find(|i| !seen.insert(**i)) {
        Some(dup) => {
            let tail = &history[history.len().saturating_sub(10)..];
            CheckResult::fail(
                kind,
                format!("index {} consumed more than once; recent: {:?}", dup, tail),
            )
        }
        None => CheckResult::pass(kind),
    }
}

/// What a failing checker does besides recording its result.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssertMode {
    /// Record the comment and mark the turn invalid
    Comment,
    /// Abort the turn with [`GameError::InvariantViolation`]
    Error,
}

/// How individual failures combine into the turn verdict.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidMethod {
    /// Any failure invalidates the turn
    #[default]
    Union,
    /// Only a turn failing every checker is invalid
    Intersection,
}

/// Results of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub results: Vec<CheckResult>,
    pub invalid: bool,
}

impl PipelineReport {
    /// Comments of failed checkers, in pipeline order.
    pub fn comments(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.failed)
            .filter_map(|r| r.comment.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckerPipeline {
    checkers: Vec<(CheckerKind, AssertMode)>,
    method: ValidMethod,
}

impl Default for CheckerPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl CheckerPipeline {
    pub fn new(method: ValidMethod) -> Self {
        Self {
            checkers: Vec::new(),
            method,
        }
    }

    /// Player-facing rules report as comments; pool invariants abort.
    pub fn standard() -> Self {
        Self::new(ValidMethod::Union)
            .with(CheckerKind::DefinedWord, AssertMode::Comment)
            .with(CheckerKind::UnusedWord, AssertMode::Comment)
            .with(CheckerKind::PositionalRelay, AssertMode::Comment)
            .with(CheckerKind::SequenceSize, AssertMode::Error)
            .with(CheckerKind::DuplicateIndex, AssertMode::Error)
    }

    #[must_use]
    pub fn with(mut self, kind: CheckerKind, mode: AssertMode) -> Self {
        self.checkers.push((kind, mode));
        self
    }

    /// Run every checker, then raise the first error-mode failure if any.
    pub fn run(&self, ctx: &CheckContext<'_>) -> Result<PipelineReport, GameError> {
        let results: Vec<CheckResult> = self.checkers.iter().map(|(k, _)| k.check(ctx)).collect();

        if let Some(((kind, _), result)) = self
            .checkers
            .iter()
            .zip(&results)
            .find(|((_, mode), r)| r.failed && *mode == AssertMode::Error)
        {
            return Err(GameError::InvariantViolation {
                checker: kind.name().to_string(),
                message: result.comment.clone().unwrap_or_default(),
            });
        }

        let invalid = match self.method {
            ValidMethod::Union => results.iter().any(|r| r.failed),
            ValidMethod::Intersection => !results.is_empty() && results.iter().all(|r| r.failed),
        };
        Ok(PipelineReport { results, invalid })
    }
}
