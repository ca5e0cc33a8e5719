//! Computer opponent with a difficulty-limited vocabulary.
//!
//! The computer plays exactly like an [`EnvStepPlayer`], but at construction it keeps
//! only a random `floor(len × rate)` subset of the dictionary as drawable. The subset
//! is fixed for the lifetime of the player, rematches included.

use jukugo_engine::dictionary::Dictionary;
use jukugo_engine::env::RelayEnvironment;
use jukugo_engine::errors::GameError;
use jukugo_engine::player::{EnvStepPlayer, Player};
use jukugo_engine::pool::WordPool;
use jukugo_engine::rng::WordSelector;
use jukugo_engine::rules::PlayerId;
use jukugo_engine::state::State;

use crate::{AiError, Difficulty};

/// Number of words a computer at `rate` may draw from a pool of `len`.
pub fn scope_size(len: usize, rate: f64) -> usize {
    ((len as f64) * rate).floor() as usize
}

#[derive(Debug)]
pub struct LevelChangeableComputer {
    inner: EnvStepPlayer,
    difficulty: Difficulty,
}

impl LevelChangeableComputer {
    pub fn new(
        name: impl Into<String>,
        dictionary: &Dictionary,
        player: PlayerId,
        difficulty: Difficulty,
        mut selector: Box<dyn WordSelector>,
    ) -> Result<Self, AiError> {
        let name = name.into();
        let mut pool = WordPool::named(dictionary, name.clone());
        let amount = scope_size(pool.len(), difficulty.rate());
        let allowed = selector.sample(pool.len(), amount);
        pool.restrict_to(allowed)?;
        tracing::debug!(
            computer = %name,
            difficulty = %difficulty,
            scope = amount,
            of = pool.len(),
            "vocabulary restricted"
        );
        let env = RelayEnvironment::new(name, pool, player, selector);
        Ok(Self {
            inner: EnvStepPlayer::new(env),
            difficulty,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Words this computer may ever draw.
    pub fn vocabulary(&self) -> usize {
        self.pool().scope().map_or(self.pool().len(), |s| s.len())
    }
}

impl Player for LevelChangeableComputer {
    fn env(&self) -> &RelayEnvironment {
        self.inner.env()
    }

    fn env_mut(&mut self) -> &mut RelayEnvironment {
        self.inner.env_mut()
    }

    fn respond(&mut self, opponent: &State) -> Result<State, GameError> {
        self.inner.respond(opponent)
    }
}
