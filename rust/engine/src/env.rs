use crate::checker::{CheckContext, CheckerPipeline};
use crate::errors::GameError;
use crate::pool::WordPool;
use crate::rng::WordSelector;
use crate::rules::{relay_matches, PlayerId};
use crate::state::{Observation, State, TurnInfo, Verdict};

/// Lifecycle of a [`RelayEnvironment`] within one match.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EnvPhase {
    Uninitialized,
    AwaitingFirstWord,
    InProgress,
    Terminal,
}

/// One participant's view of the relay: its pool, its checker pipeline and the last
/// two turns.
///
/// # Examples
///
/// ```
/// use jukugo_engine::dictionary::Dictionary;
/// use jukugo_engine::env::RelayEnvironment;
/// use jukugo_engine::pool::WordPool;
/// use jukugo_engine::rng::FirstCandidate;
/// use jukugo_engine::rules::PlayerId;
///
/// let dict = Dictionary::from_words(["花火", "山火", "花見", "山見"]).unwrap();
/// let mut env = RelayEnvironment::new(
///     "cpu",
///     WordPool::new(&dict),
///     PlayerId::FIRST,
///     Box::new(FirstCandidate),
/// );
/// let opening = env.reset(None).unwrap();
/// assert_eq!(opening.word(), Some("花火"));
/// ```
#[derive(Debug)]
pub struct RelayEnvironment {
    name: String,
    player: PlayerId,
    pool: WordPool,
    pipeline: CheckerPipeline,
    selector: Box<dyn WordSelector>,
    phase: EnvPhase,
    state: State,
    previous: State,
}

impl RelayEnvironment {
    pub fn new(
        name: impl Into<String>,
        pool: WordPool,
        player: PlayerId,
        selector: Box<dyn WordSelector>,
    ) -> Self {
        Self {
            name: name.into(),
            player,
            pool,
            pipeline: CheckerPipeline::standard(),
            selector,
            phase: EnvPhase::Uninitialized,
            state: State::default(),
            previous: State::default(),
        }
    }

    #[must_use]
    pub fn with_pipeline(mut self, pipeline: CheckerPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player_id(&self) -> PlayerId {
        self.player
    }

    pub fn phase(&self) -> EnvPhase {
        self.phase
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut WordPool {
        &mut self.pool
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn previous_state(&self) -> &State {
        &self.previous
    }

    /// Forget the current match without drawing anything.
    pub fn clear(&mut self) -> Result<(), GameError> {
        self.pool.reset(&[])?;
        self.state = State::default();
        self.previous = State::default();
        self.phase = EnvPhase::AwaitingFirstWord;
        Ok(())
    }

    /// Start a match. A forced `opening` word is checked and spent immediately;
    /// otherwise an opening word is drawn and left for the caller to commit.
    pub fn reset(&mut self, opening: Option<&str>) -> Result<State, GameError> {
        self.clear()?;
        match opening {
            Some(word) => {
                if !self.pool.is_still_available(word) {
                    return Err(GameError::WordUnavailable(word.to_string()));
                }
                self.state = self.observe_word(word);
                self.finalize()?;
                Ok(self.commit()?.clone())
            }
            None => {
                let drawn = self.draw_next(None);
                self.state = self.observe_index(drawn);
                self.finalize()
            }
        }
    }

    /// Indices that could legally answer `previous`, in pool order.
    pub fn candidates(&self, previous: Option<&str>) -> Vec<usize> {
        self.pool
            .unused_indices()
            .into_iter()
            .filter(|&i| match (previous, self.pool.word(i)) {
                (Some(prev), Some(word)) => relay_matches(prev, word, self.player),
                _ => true,
            })
            .collect()
    }

    /// Pick uniformly among [`candidates`](Self::candidates); `None` when none remain.
    pub fn draw_next(&mut self, previous: Option<&str>) -> Option<usize> {
        let candidates = self.candidates(previous);
        if candidates.is_empty() {
            return None;
        }
        let picked = self.selector.pick(candidates.len());
        candidates.get(picked).copied()
    }

    /// Take in the opponent's turn: spend its word here and remember it.
    pub fn receive(&mut self, opponent: &State) {
        if let Some(word) = opponent.word() {
            self.pool.sync_word(word);
        }
        self.previous = opponent.clone();
        if self.phase == EnvPhase::AwaitingFirstWord {
            self.phase = EnvPhase::InProgress;
        }
    }

    /// Answer the opponent with a drawn word.
    pub fn step(&mut self, opponent: &State) -> Result<State, GameError> {
        self.ensure_playable()?;
        self.receive(opponent);
        let drawn = self.draw_next(opponent.word());
        self.state = self.observe_index(drawn);
        self.finalize()
    }

    /// Answer the opponent with a word supplied from outside (a human).
    pub fn respond_with(&mut self, opponent: &State, word: &str) -> Result<State, GameError> {
        self.ensure_playable()?;
        self.receive(opponent);
        self.set_external_state(word)
    }

    /// Replace the current turn with an externally supplied word and re-check it
    /// against the stored previous turn.
    pub fn set_external_state(&mut self, word: &str) -> Result<State, GameError> {
        self.state = self.observe_word(word);
        self.finalize()
    }

    /// Spend the current word and refresh the unused-word snapshot.
    pub fn commit(&mut self) -> Result<&State, GameError> {
        if let Some(index) = self.state.observation.word_index {
            if !self.pool.is_consumed(index) {
                self.pool.mark_consumed(index)?;
            }
        }
        self.state.info.unused_words = self.unused_snapshot();
        Ok(&self.state)
    }

    fn ensure_playable(&self) -> Result<(), GameError> {
        match self.phase {
            EnvPhase::Uninitialized => Err(GameError::NotStarted),
            EnvPhase::Terminal => Err(GameError::MatchFinished),
            EnvPhase::AwaitingFirstWord | EnvPhase::InProgress => Ok(()),
        }
    }

    fn observe_index(&self, index: Option<usize>) -> State {
        let observation = match index.and_then(|i| self.pool.entry(i).map(|e| (i, e))) {
            Some((i, entry)) => Observation {
                word: Some(entry.word.clone()),
                word_index: Some(i),
                reading: entry.reading.clone(),
            },
            None => Observation::default(),
        };
        State {
            observation,
            ..State::default()
        }
    }

    fn observe_word(&self, word: &str) -> State {
        // prefer an unspent copy when the dictionary repeats a word
        let index = (0..self.pool.len())
            .find(|&i| self.pool.word(i) == Some(word) && !self.pool.is_consumed(i))
            .or_else(|| self.pool.index_of(word));
        let mut state = self.observe_index(index);
        state.observation.word = Some(word.to_string());
        state
    }

    fn unused_snapshot(&self) -> Vec<String> {
        self.pool
            .unused_words()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn finalize(&mut self) -> Result<State, GameError> {
        let report = {
            let ctx = CheckContext {
                previous: &self.previous,
                current: &self.state,
                pool: &self.pool,
                player: self.player,
            };
            self.pipeline.run(&ctx)?
        };
        let exhausted = self.state.observation.word.is_none();

        self.state.done = report.invalid || exhausted;
        self.state.verdict = if exhausted {
            Verdict::Exhausted
        } else if report.invalid {
            Verdict::RuleViolation(report.comments())
        } else {
            Verdict::Continue
        };
        self.state.info = TurnInfo {
            unused_words: self.unused_snapshot(),
            checker_results: report.results,
        };

        let mut reward = 0.0;
        if self.previous.done {
            reward += 1.0;
        }
        if self.state.done {
            reward -= 1.0;
        }
        self.state.reward = reward;

        self.phase = if self.state.done {
            EnvPhase::Terminal
        } else {
            EnvPhase::InProgress
        };

        tracing::trace!(
            env = %self.name,
            player = %self.player,
            word = ?self.state.observation.word,
            done = self.state.done,
            "turn checked"
        );
        Ok(self.state.clone())
    }
}
