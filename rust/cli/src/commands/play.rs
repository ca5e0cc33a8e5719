//! # Play Command
//!
//! Interactive relay against a computer opponent over stdin/stdout.
//!
//! The game master draws (or takes) the opening word, then the human and the
//! computer alternate. The human types a two-character word at each prompt;
//! words that are unknown or already spent are refused and the prompt repeats.
//! A word that breaks the relay rule is accepted as a move and loses the match.
//!
//! `q`/`quit` abandons the match; closing the input interrupts it.

use crate::cli::FirstMover;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_outcome, format_turn};
use crate::io_utils::{read_stdin_line, resolve_dictionary};
use crate::ui;
use crate::validation::{ParseResult, parse_first_mover, parse_word_input};
use jukugo_ai::computer::scope_size;
use jukugo_ai::{Difficulty, Randomness, computer_name, create_game};
use jukugo_engine::errors::GameError;
use jukugo_engine::game::MatchSession;
use jukugo_engine::player::{GameMaster, OpeningMode};
use std::io::{BufRead, Write};

/// Flags of the `play` command; unset values fall back to configuration.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    pub difficulty: Option<String>,
    pub first: Option<FirstMover>,
    pub seed: Option<u64>,
    pub dict: Option<String>,
    pub opening: Option<String>,
    pub name: String,
}

enum Ending {
    Finished,
    Quit,
    InputClosed,
}

/// Handle the play command: one interactive match.
///
/// # Returns
///
/// * `Ok(())` when the match finishes or the player quits
/// * `Err(CliError::Interrupted)` when input ends mid-match
/// * `Err(CliError)` for bad options, dictionaries or I/O failures
pub fn handle_play_command(
    opts: PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;

    let difficulty: Difficulty = opts
        .difficulty
        .as_deref()
        .unwrap_or(&cfg.difficulty)
        .parse()?;
    let first = match opts.first {
        Some(f) => f,
        None => parse_first_mover(&cfg.first).map_err(CliError::Config)?,
    };
    let seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let dict = resolve_dictionary(opts.dict.as_deref().or(cfg.dictionary.as_deref()))?;
    let name = if opts.name.trim().is_empty() {
        "You".to_string()
    } else {
        opts.name.trim().to_string()
    };

    if scope_size(dict.len(), difficulty.rate()) == 0 {
        ui::display_warning(
            err,
            &format!(
                "{} has no words with a {}-word dictionary",
                computer_name(difficulty),
                dict.len()
            ),
        )?;
    }

    let mut session = create_game(
        &dict,
        &name,
        difficulty,
        first == FirstMover::Human,
        Randomness::Seeded(seed),
    )?;

    writeln!(
        out,
        "play: difficulty={} first={} seed={} words={}",
        difficulty,
        first.as_str(),
        seed,
        dict.len()
    )?;

    let mode = match opts.opening {
        Some(word) => OpeningMode::Word(word),
        None => OpeningMode::Auto,
    };
    let opening = session.start(mode)?;
    writeln!(out, "{}", format_turn(GameMaster::NAME, &opening))?;

    let ending = play_match(&mut session, out, err, stdin)?;
    let turns = session.record().turns.len();
    match ending {
        Ending::Finished => {
            if let Some(outcome) = session.outcome() {
                writeln!(out, "{}", format_outcome(outcome))?;
            }
            writeln!(out, "Turns played: {}", turns)?;
            Ok(())
        }
        Ending::Quit => {
            writeln!(out, "Game abandoned.")?;
            writeln!(out, "Turns played: {}", turns)?;
            Ok(())
        }
        Ending::InputClosed => {
            writeln!(out, "Game abandoned.")?;
            Err(CliError::Interrupted("input closed mid-match".into()))
        }
    }
}

fn play_match(
    session: &mut MatchSession<'_>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Ending, CliError> {
    while !session.is_finished() {
        if session.awaiting_input() {
            let previous = session
                .last_state()
                .and_then(|s| s.word())
                .unwrap_or("-")
                .to_string();
            ui::prompt(out, &format!("{} > ", previous))?;
            let Some(line) = read_stdin_line(stdin) else {
                writeln!(out)?;
                return Ok(Ending::InputClosed);
            };
            match parse_word_input(&line) {
                ParseResult::Quit => return Ok(Ending::Quit),
                ParseResult::Invalid(msg) => {
                    ui::write_error(err, &msg)?;
                    continue;
                }
                ParseResult::Word(word) => match session.offer(&word) {
                    Ok(()) => {}
                    Err(GameError::WordUnavailable(w)) => {
                        ui::write_error(
                            err,
                            &format!("{} is unknown or already used, try another word", w),
                        )?;
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                },
            }
        }

        let turn = session.play_turn()?;
        writeln!(out, "{}", format_turn(&turn.name, &turn.state))?;
        for violation in turn.state.violations() {
            writeln!(out, "  {}", violation)?;
        }
    }
    Ok(Ending::Finished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn opts(first: FirstMover) -> PlayOptions {
        PlayOptions {
            difficulty: Some("master".into()),
            first: Some(first),
            seed: Some(42),
            dict: None,
            opening: Some("花火".into()),
            name: "tester".into(),
        }
    }

    #[test]
    fn quit_at_first_prompt() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new("q\n".as_bytes());

        handle_play_command(opts(FirstMover::Human), &mut out, &mut err, &mut stdin)
            .expect("quit is not an error");

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("play: difficulty=master first=human seed=42"));
        assert!(output.contains("GameMaster: 花火"));
        assert!(output.contains("Game abandoned."));
        assert!(output.contains("Turns played: 0"));
    }

    #[test]
    fn closed_input_interrupts() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new("".as_bytes());

        let result = handle_play_command(opts(FirstMover::Human), &mut out, &mut err, &mut stdin);
        assert!(matches!(result, Err(CliError::Interrupted(_))));
    }

    #[test]
    fn bad_input_reprompts() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        // wrong length, then the opening itself (already spent), then quit
        let mut stdin = Cursor::new("花\n花火\nquit\n".as_bytes());

        handle_play_command(opts(FirstMover::Human), &mut out, &mut err, &mut stdin)
            .expect("play");

        let errors = String::from_utf8(err).unwrap();
        assert!(errors.contains("exactly 2 characters"));
        assert!(errors.contains("花火 is unknown or already used"));
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("花火 > ").count(), 3);
    }

    #[test]
    fn unknown_difficulty_is_invalid_input() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new("q\n".as_bytes());
        let mut o = opts(FirstMover::Human);
        o.difficulty = Some("legendary".into());

        let result = handle_play_command(o, &mut out, &mut err, &mut stdin);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
