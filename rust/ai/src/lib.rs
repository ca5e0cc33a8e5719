//! # jukugo-ai: Computer Opponents and Match Factories
//!
//! Builds ready-to-play [`MatchSession`]s. Each session owns its game master and both
//! seats, so a transport creates one per match (or per client) instead of sharing
//! players between callers.
//!
//! ## Core Components
//!
//! - [`Difficulty`] - Named vocabulary rates for computer opponents
//! - [`computer`] - The difficulty-limited computer player
//! - [`create_game`] - Human versus computer
//! - [`create_computer_match`] - Computer versus computer
//! - [`create_all_computers`] - One computer per difficulty
//!
//! ## Quick Start
//!
//! ```rust
//! use jukugo_ai::{create_computer_match, Difficulty, Randomness};
//! use jukugo_engine::dictionary::Dictionary;
//! use jukugo_engine::player::OpeningMode;
//!
//! let dict = Dictionary::builtin();
//! let mut session =
//!     create_computer_match(&dict, Difficulty::Hard, Difficulty::Easy, Randomness::Seeded(42))
//!         .expect("session");
//! session.start(OpeningMode::Auto).expect("opening");
//! let outcome = session.run().expect("match");
//! println!("{} beat {}", outcome.winner_name, outcome.loser_name);
//! ```

use std::fmt;
use std::str::FromStr;

use jukugo_engine::dictionary::Dictionary;
use jukugo_engine::env::RelayEnvironment;
use jukugo_engine::errors::GameError;
use jukugo_engine::game::MatchSession;
use jukugo_engine::player::{DummyPlayer, GameMaster, Player};
use jukugo_engine::pool::WordPool;
use jukugo_engine::rng::{FirstCandidate, SeededSelector, WordSelector};
use jukugo_engine::rules::PlayerId;
use thiserror::Error;

pub mod computer;

pub use computer::LevelChangeableComputer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown difficulty: {0} (expected master, hard, normal or easy)")]
    UnknownDifficulty(String),
    #[error(transparent)]
    Engine(#[from] GameError),
}

/// Share of the dictionary a computer opponent may draw from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Difficulty {
    Master,
    Hard,
    Normal,
    Easy,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Master,
        Difficulty::Hard,
        Difficulty::Normal,
        Difficulty::Easy,
    ];

    pub fn rate(self) -> f64 {
        match self {
            Difficulty::Master => 1.0,
            Difficulty::Hard => 0.8,
            Difficulty::Normal => 0.5,
            Difficulty::Easy => 0.2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Master => "master",
            Difficulty::Hard => "hard",
            Difficulty::Normal => "normal",
            Difficulty::Easy => "easy",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| AiError::UnknownDifficulty(s.to_string()))
    }
}

/// Where the participants of a match get their random choices from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Randomness {
    /// Independent ChaCha streams derived from one seed
    Seeded(u64),
    /// Always the first candidate; fully predictable
    FirstCandidate,
}

impl Randomness {
    /// Seeded from `seed`, or from a fresh random seed when none is given.
    pub fn from_seed(seed: Option<u64>) -> Self {
        Randomness::Seeded(seed.unwrap_or_else(rand::random))
    }

    pub fn seed(self) -> Option<u64> {
        match self {
            Randomness::Seeded(seed) => Some(seed),
            Randomness::FirstCandidate => None,
        }
    }

    /// Selector for one participant; `stream` keeps participants independent.
    pub fn selector(self, stream: u64) -> Box<dyn WordSelector> {
        match self {
            Randomness::Seeded(seed) => Box::new(SeededSelector::new_with_seed(seed).derive(stream)),
            Randomness::FirstCandidate => Box::new(FirstCandidate),
        }
    }
}

impl From<u64> for Randomness {
    fn from(seed: u64) -> Self {
        Randomness::Seeded(seed)
    }
}

impl From<Option<u64>> for Randomness {
    fn from(seed: Option<u64>) -> Self {
        Randomness::from_seed(seed)
    }
}

const MASTER_STREAM: u64 = 0;
const FIRST_STREAM: u64 = 1;
const SECOND_STREAM: u64 = 2;

/// Game master with an unrestricted view of `dictionary`.
pub fn create_game_master(dictionary: &Dictionary, randomness: Randomness) -> GameMaster {
    GameMaster::new(RelayEnvironment::new(
        GameMaster::NAME,
        WordPool::named(dictionary, GameMaster::NAME),
        PlayerId::FIRST,
        randomness.selector(MASTER_STREAM),
    ))
}

/// Name shown for a computer seat.
pub fn computer_name(difficulty: Difficulty) -> String {
    format!("CPU ({})", difficulty)
}

fn finish<'a>(
    master: GameMaster,
    first: Box<dyn Player + 'a>,
    second: Box<dyn Player + 'a>,
    randomness: Randomness,
) -> Result<MatchSession<'a>, AiError> {
    let session = MatchSession::new(master, first, second)?;
    Ok(match randomness.seed() {
        Some(seed) => session.with_seed(seed),
        None => session,
    })
}

/// Human versus computer.
///
/// The computer always holds player id 0 and the human id 1; `human_first` only
/// decides who moves first. The human seat accepts words through
/// [`MatchSession::offer`].
///
/// # Example
///
/// ```rust
/// use jukugo_ai::{create_game, Difficulty, Randomness};
/// use jukugo_engine::dictionary::Dictionary;
///
/// let dict = Dictionary::builtin();
/// let session = create_game(&dict, "you", Difficulty::Normal, true, Randomness::Seeded(7)).unwrap();
/// assert_eq!(session.seat(0).unwrap().name(), "you");
/// ```
pub fn create_game<'a>(
    dictionary: &Dictionary,
    human_name: &str,
    difficulty: Difficulty,
    human_first: bool,
    randomness: impl Into<Randomness>,
) -> Result<MatchSession<'a>, AiError> {
    let randomness = randomness.into();
    let human = DummyPlayer::new(RelayEnvironment::new(
        human_name,
        WordPool::named(dictionary, human_name),
        PlayerId::SECOND,
        randomness.selector(SECOND_STREAM),
    ));
    let computer = LevelChangeableComputer::new(
        computer_name(difficulty),
        dictionary,
        PlayerId::FIRST,
        difficulty,
        randomness.selector(FIRST_STREAM),
    )?;
    let master = create_game_master(dictionary, randomness);
    let (first, second): (Box<dyn Player + 'a>, Box<dyn Player + 'a>) = if human_first {
        (Box::new(human), Box::new(computer))
    } else {
        (Box::new(computer), Box::new(human))
    };
    finish(master, first, second, randomness)
}

/// Computer versus computer; `a` moves first with player id 0.
pub fn create_computer_match<'a>(
    dictionary: &Dictionary,
    a: Difficulty,
    b: Difficulty,
    randomness: impl Into<Randomness>,
) -> Result<MatchSession<'a>, AiError> {
    let randomness = randomness.into();
    let first = LevelChangeableComputer::new(
        format!("A {}", computer_name(a)),
        dictionary,
        PlayerId::FIRST,
        a,
        randomness.selector(FIRST_STREAM),
    )?;
    let second = LevelChangeableComputer::new(
        format!("B {}", computer_name(b)),
        dictionary,
        PlayerId::SECOND,
        b,
        randomness.selector(SECOND_STREAM),
    )?;
    let master = create_game_master(dictionary, randomness);
    finish(master, Box::new(first), Box::new(second), randomness)
}

/// One computer per difficulty, all holding `player`, in [`Difficulty::ALL`] order.
pub fn create_all_computers(
    dictionary: &Dictionary,
    player: PlayerId,
    randomness: impl Into<Randomness>,
) -> Result<Vec<LevelChangeableComputer>, AiError> {
    let randomness = randomness.into();
    Difficulty::ALL
        .into_iter()
        .zip(10u64..)
        .map(|(difficulty, stream)| {
            LevelChangeableComputer::new(
                computer_name(difficulty),
                dictionary,
                player,
                difficulty,
                randomness.selector(stream),
            )
        })
        .collect()
}

/// Pit a prepared computer against a fresh one at `opponent` difficulty.
pub fn create_session_for<'a>(
    dictionary: &Dictionary,
    computer: LevelChangeableComputer,
    opponent: Difficulty,
    randomness: impl Into<Randomness>,
) -> Result<MatchSession<'a>, AiError> {
    let randomness = randomness.into();
    let other = LevelChangeableComputer::new(
        computer_name(opponent),
        dictionary,
        computer.player_id().opponent(),
        opponent,
        randomness.selector(SECOND_STREAM),
    )?;
    let master = create_game_master(dictionary, randomness);
    finish(master, Box::new(other), Box::new(computer), randomness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parsing() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(AiError::UnknownDifficulty("expert".into()))
        );
    }

    #[test]
    fn rates_decrease_with_difficulty() {
        let rates: Vec<f64> = Difficulty::ALL.iter().map(|d| d.rate()).collect();
        assert_eq!(rates, vec![1.0, 0.8, 0.5, 0.2]);
    }

    #[test]
    fn randomness_from_seed() {
        assert_eq!(Randomness::from(Some(3)), Randomness::Seeded(3));
        assert!(Randomness::from(None).seed().is_some());
        assert_eq!(Randomness::FirstCandidate.seed(), None);
    }
}
