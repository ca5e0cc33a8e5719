//! Simulation command: computer-versus-computer matches.
//!
//! Every match gets its own seed (`base + index`), so a single match from a run
//! can be replayed with `--games 1 --seed <base + index>`. With `--output` each
//! finished match is appended to a JSONL file as a match record.
//!
//! `--ladder` plays one prepared computer per difficulty against the `--b`
//! opponent; the prepared computer keeps its vocabulary across all of its games.

use crate::config;
use crate::error::CliError;
use crate::io_utils::resolve_dictionary;
use crate::ui;
use jukugo_ai::{Difficulty, create_all_computers, create_computer_match, create_session_for};
use jukugo_engine::dictionary::Dictionary;
use jukugo_engine::game::{MatchSession, Winner};
use jukugo_engine::logger::MatchRecordWriter;
use jukugo_engine::player::OpeningMode;
use jukugo_engine::rules::PlayerId;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub games: u32,
    pub a: String,
    pub b: String,
    pub seed: Option<u64>,
    pub dict: Option<String>,
    pub output: Option<String>,
    pub ladder: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            games: 1,
            a: "master".into(),
            b: "master".into(),
            seed: None,
            dict: None,
            output: None,
            ladder: false,
        }
    }
}

/// Wins per seat plus matches nobody could open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    first: u32,
    second: u32,
    master: u32,
    turns: usize,
    games: u32,
}

impl Tally {
    fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.turns as f64 / self.games as f64
        }
    }
}

/// Handle the sim command.
///
/// # Errors
///
/// `CliError::InvalidInput` for zero games, unknown difficulties or an unusable
/// dictionary; `CliError::Io` when the record file cannot be written.
pub fn handle_sim_command(
    opts: SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if opts.games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let a: Difficulty = opts.a.parse()?;
    let b: Difficulty = opts.b.parse()?;
    let base_seed = opts.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let dict = resolve_dictionary(opts.dict.as_deref().or(cfg.dictionary.as_deref()))?;

    let mut writer = match &opts.output {
        Some(path) => MatchRecordWriter::create(path)?,
        None => MatchRecordWriter::discard(),
    };

    if opts.ladder {
        writeln!(
            out,
            "sim: ladder games={} b={} seed={} words={}",
            opts.games,
            b,
            base_seed,
            dict.len()
        )?;
        run_ladder(&dict, b, opts.games, base_seed, &mut writer, out)?;
    } else {
        writeln!(
            out,
            "sim: games={} a={} b={} seed={} words={}",
            opts.games,
            a,
            b,
            base_seed,
            dict.len()
        )?;
        let mut tally = Tally::default();
        for i in 0..opts.games {
            let seed = base_seed.wrapping_add(u64::from(i));
            let mut session = create_computer_match(&dict, a, b, seed)?;
            play_one(&mut session, &mut tally, &mut writer)?;
        }
        writeln!(out, "A {} wins: {}", a, tally.first)?;
        writeln!(out, "B {} wins: {}", b, tally.second)?;
        writeln!(out, "GameMaster wins: {}", tally.master)?;
        writeln!(out, "Average turns: {:.1}", tally.average_turns())?;
    }

    if let Some(path) = &opts.output {
        writeln!(out, "Records written: {} to {}", writer.written(), path)?;
    }
    Ok(())
}

fn run_ladder(
    dict: &Dictionary,
    opponent: Difficulty,
    games: u32,
    seed: u64,
    writer: &mut MatchRecordWriter,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let computers = create_all_computers(dict, PlayerId::SECOND, seed)?;
    for computer in computers {
        let difficulty = computer.difficulty();
        let vocabulary = computer.vocabulary();
        let mut session = create_session_for(dict, computer, opponent, seed)?;
        let mut tally = Tally::default();
        for _ in 0..games {
            play_one(&mut session, &mut tally, writer)?;
        }
        // the prepared computer sits in seat 1
        writeln!(
            out,
            "{} ({} words) vs {}: wins {} losses {} master {} avg turns {:.1}",
            difficulty,
            vocabulary,
            opponent,
            tally.second,
            tally.first,
            tally.master,
            tally.average_turns()
        )?;
    }
    Ok(())
}

fn play_one(
    session: &mut MatchSession<'_>,
    tally: &mut Tally,
    writer: &mut MatchRecordWriter,
) -> Result<(), CliError> {
    session.start(OpeningMode::Auto)?;
    let outcome = session.run()?;
    match outcome.winner {
        Winner::Seat(0) => tally.first += 1,
        Winner::Seat(_) => tally.second += 1,
        Winner::GameMaster => tally.master += 1,
    }
    let record = session.record();
    tally.turns += record.turns.len();
    tally.games += 1;
    writer.write(&record)?;
    Ok(())
}
