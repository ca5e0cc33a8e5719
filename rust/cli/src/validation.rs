//! Input parsing for the interactive `play` command.
//!
//! Only the shape of the input is checked here. Whether the word is in the
//! dictionary, unused and follows the relay is decided by the engine.

use jukugo_engine::dictionary::WORD_LENGTH;

use crate::cli::FirstMover;

/// Result of parsing one line typed by the player.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// A candidate word with the right length
    Word(String),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a line of user input into a relay word or a quit request.
///
/// # Example
///
/// ```rust
/// # use jukugo_cli::validation::{parse_word_input, ParseResult};
/// assert_eq!(parse_word_input(" 花見 "), ParseResult::Word("花見".into()));
/// assert_eq!(parse_word_input("Q"), ParseResult::Quit);
///
/// match parse_word_input("花") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("2 characters")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_word_input(input: &str) -> ParseResult {
    let input = input.trim();
    if input.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return ParseResult::Quit;
    }
    let len = input.chars().count();
    if len != WORD_LENGTH {
        return ParseResult::Invalid(format!(
            "'{}' has {} characters; words must be exactly {} characters",
            input, len, WORD_LENGTH
        ));
    }
    ParseResult::Word(input.to_string())
}

/// Parse the `first` configuration value.
pub fn parse_first_mover(value: &str) -> Result<FirstMover, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(FirstMover::Human),
        "computer" => Ok(FirstMover::Computer),
        other => Err(format!(
            "Invalid first mover '{}'. Valid values: human, computer",
            other
        )),
    }
}
