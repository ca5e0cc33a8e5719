//! Check command: run the checker pipeline once, outside of a match.
//!
//! Useful for debugging dictionaries and the relay rule. `--used` lists words
//! already spent; they are consumed in the checking pool before the run.

use crate::config;
use crate::error::CliError;
use crate::formatters::format_check_result;
use crate::io_utils::resolve_dictionary;
use jukugo_engine::checker::{CheckContext, CheckerPipeline};
use jukugo_engine::pool::WordPool;
use jukugo_engine::rules::PlayerId;
use jukugo_engine::state::{Observation, State};
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub previous: String,
    pub word: String,
    pub player: u8,
    pub dict: Option<String>,
    pub used: Vec<String>,
}

fn submitted(pool: &WordPool, word: &str) -> State {
    let word_index = pool.index_of(word);
    State {
        observation: Observation {
            word: Some(word.to_string()),
            word_index,
            reading: word_index
                .and_then(|i| pool.entry(i))
                .and_then(|e| e.reading.clone()),
        },
        ..State::default()
    }
}

/// Handle the check command.
///
/// Prints one line per checker and a verdict. A rejected word is reported as
/// `CliError::InvalidInput` so the process exits with code 2.
pub fn handle_check_command(opts: CheckOptions, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let dict = resolve_dictionary(opts.dict.as_deref().or(cfg.dictionary.as_deref()))?;
    let player = PlayerId::new(usize::from(opts.player))?;

    let mut pool = WordPool::new(&dict);
    for word in &opts.used {
        pool.sync_word(word.trim());
    }

    let previous = submitted(&pool, opts.previous.trim());
    let current = submitted(&pool, opts.word.trim());
    let pipeline = CheckerPipeline::standard();
    let report = pipeline.run(&CheckContext {
        previous: &previous,
        current: &current,
        pool: &pool,
        player,
    })?;

    writeln!(
        out,
        "check: {} -> {} (player {})",
        opts.previous.trim(),
        opts.word.trim(),
        player
    )?;
    for result in &report.results {
        writeln!(out, "  {}", format_check_result(result))?;
    }

    if report.invalid {
        writeln!(out, "Verdict: invalid")?;
        return Err(CliError::InvalidInput(report.comments().join("; ")));
    }
    writeln!(out, "Verdict: valid")?;
    Ok(())
}
