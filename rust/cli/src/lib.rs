//! # jukugo CLI Library
//!
//! Command-line transport for the compound-word relay. The engine and the
//! computer opponents live in `jukugo-engine` and `jukugo-ai`; this crate only
//! parses arguments, reads input and prints results.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["jukugo", "check", "--previous", "花火", "--word", "花見"];
//! let code = jukugo_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play a match against the computer
//! - `sim`: Run computer-versus-computer matches and optionally record them
//! - `check`: Validate a single relay step
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
#[macro_use]
mod macros;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, JukugoCli};
use commands::{
    CheckOptions, PlayOptions, SimOptions, handle_check_command, handle_cfg_command,
    handle_play_command, handle_sim_command,
};

pub use error::CliError;

/// Test hook: when set, `play` reads its input from this string instead of stdin.
pub const TEST_INPUT_ENV: &str = "JUKUGO_TEST_INPUT";

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Available Commands
///
/// - `play [--difficulty D] [--first human|computer] [--seed N] [--dict PATH] [--opening W]`
/// - `sim --games N [--a D] [--b D] [--seed N] [--dict PATH] [--output FILE] [--ladder]`
/// - `check --previous W --word W [--player 0|1] [--dict PATH] [--used W,W]`
/// - `cfg`
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "sim", "check", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = JukugoCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "jukugo: compound word relay");
                    write_or_exit!(err, "Usage: jukugo <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: jukugo --help");
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Cfg => handle_cfg_command(out),
                Commands::Play {
                    difficulty,
                    first,
                    seed,
                    dict,
                    opening,
                    name,
                } => {
                    let opts = PlayOptions {
                        difficulty,
                        first,
                        seed,
                        dict,
                        opening,
                        name,
                    };
                    match std::env::var(TEST_INPUT_ENV) {
                        Ok(input) => {
                            let mut reader = std::io::Cursor::new(input.into_bytes());
                            handle_play_command(opts, out, err, &mut reader)
                        }
                        Err(_) => {
                            let stdin = std::io::stdin();
                            let mut stdin_lock = stdin.lock();
                            handle_play_command(opts, out, err, &mut stdin_lock)
                        }
                    }
                }
                Commands::Sim {
                    games,
                    a,
                    b,
                    seed,
                    dict,
                    output,
                    ladder,
                } => handle_sim_command(
                    SimOptions {
                        games,
                        a,
                        b,
                        seed,
                        dict,
                        output,
                        ladder,
                    },
                    out,
                    err,
                ),
                Commands::Check {
                    previous,
                    word,
                    player,
                    dict,
                    used,
                } => handle_check_command(
                    CheckOptions {
                        previous,
                        word,
                        player,
                        dict,
                        used,
                    },
                    out,
                ),
            };
            finish(result, err)
        }
    }
}

fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            tracing::warn!(reason = %msg, "interrupted");
            exit_code::INTERRUPTED
        }
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
