//! Text formatting for turns, outcomes and checker results.
//!
//! Pure functions from engine types to display strings, shared by the `play`,
//! `sim` and `check` commands.
//!
//! ## Example
//!
//! ```rust
//! use jukugo_cli::formatters::format_word;
//!
//! assert_eq!(format_word("花火", Some("はなび")), "花火 (はなび)");
//! assert_eq!(format_word("花火", None), "花火");
//! ```

use jukugo_engine::checker::CheckResult;
use jukugo_engine::game::{MatchOutcome, Winner};
use jukugo_engine::state::{State, Verdict};

/// A word with its reading in parentheses when one is known.
pub fn format_word(word: &str, reading: Option<&str>) -> String {
    match reading {
        Some(r) if !r.is_empty() => format!("{} ({})", word, r),
        _ => word.to_string(),
    }
}

/// One line describing what a participant put down.
pub fn format_turn(name: &str, state: &State) -> String {
    let word = match state.word() {
        Some(w) => format_word(w, state.observation.reading.as_deref()),
        None => "(no word left)".to_string(),
    };
    match &state.verdict {
        Verdict::RuleViolation(_) => format!("{}: {} [rejected]", name, word),
        _ => format!("{}: {}", name, word),
    }
}

/// Winner and loser lines for a finished match.
pub fn format_outcome(outcome: &MatchOutcome) -> String {
    let winner = match outcome.winner {
        Winner::GameMaster => format!("{} (nobody found a word)", outcome.winner_name),
        Winner::Seat(_) => outcome.winner_name.clone(),
    };
    format!("Winner: {}\nLoser: {}", winner, outcome.loser_name)
}

/// `name: ok` or `name: FAILED (comment)`.
pub fn format_check_result(result: &CheckResult) -> String {
    if result.failed {
        match &result.comment {
            Some(c) => format!("{}: FAILED ({})", result.checker, c),
            None => format!("{}: FAILED", result.checker),
        }
    } else {
        format!("{}: ok", result.checker)
    }
}
