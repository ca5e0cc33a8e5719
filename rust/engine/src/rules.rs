use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Relay seat parity: the character position a participant must hold fixed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PlayerId(usize);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(0);
    pub const SECOND: PlayerId = PlayerId(1);

    pub fn new(id: usize) -> Result<Self, GameError> {
        match id {
            0 | 1 => Ok(Self(id)),
            other => Err(GameError::InvalidPlayerId(other)),
        }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checks the relay rule for a submission by `player`.
///
/// At the position equal to the player's id the character must be unchanged from
/// `previous`; at every other position it must differ. Words are compared
/// character by character up to the shorter length.
///
/// # Examples
///
/// ```
/// use jukugo_engine::rules::{relay_matches, PlayerId};
///
/// assert!(relay_matches("花火", "山火", PlayerId::SECOND));
/// assert!(!relay_matches("花火", "花見", PlayerId::SECOND));
/// assert!(relay_matches("花火", "花見", PlayerId::FIRST));
/// ```
pub fn relay_matches(previous: &str, current: &str, player: PlayerId) -> bool {
    previous
        .chars()
        .zip(current.chars())
        .enumerate()
        .all(|(pos, (p, c))| (p == c) == (pos == player.index()))
}

/// Positions where `current` breaks the relay rule against `previous`.
pub fn relay_mismatches(previous: &str, current: &str, player: PlayerId) -> Vec<usize> {
    previous
        .chars()
        .zip(current.chars())
        .enumerate()
        .filter(|(pos, (p, c))| (p == c) != (*pos == player.index()))
        .map(|(pos, _)| pos)
        .collect()
}
