use std::collections::VecDeque;
use std::fmt::Debug;

use crate::env::RelayEnvironment;
use crate::errors::GameError;
use crate::logger::{GameEvent, GameLogger};
use crate::pool::WordPool;
use crate::rules::PlayerId;
use crate::state::State;

/// A participant in the relay.
///
/// Implementors only decide how a turn is produced ([`respond`](Player::respond));
/// [`submit`](Player::submit) then spends the word in the participant's own pool and
/// reports a `continue` event.
pub trait Player: Debug {
    fn env(&self) -> &RelayEnvironment;
    fn env_mut(&mut self) -> &mut RelayEnvironment;

    /// Produce an answer to `opponent` without committing it.
    fn respond(&mut self, opponent: &State) -> Result<State, GameError>;

    fn name(&self) -> &str {
        self.env().name()
    }

    fn player_id(&self) -> PlayerId {
        self.env().player_id()
    }

    fn pool(&self) -> &WordPool {
        self.env().pool()
    }

    /// Queue a word for the next turn. Only interactive participants accept words.
    fn offer(&mut self, _word: &str) -> Result<(), GameError> {
        Err(GameError::NotInteractive(self.name().to_string()))
    }

    fn is_interactive(&self) -> bool {
        false
    }

    /// Whether an offered word is waiting to be played.
    fn has_pending(&self) -> bool {
        false
    }

    /// Prepare for a new match; the pool keeps its scope.
    fn reset(&mut self) -> Result<(), GameError> {
        self.env_mut().clear()
    }

    /// Mirror a word spent by another participant.
    fn sync_word(&mut self, word: &str) {
        self.env_mut().pool_mut().sync_word(word);
    }

    fn submit(&mut self, opponent: &State, log: &mut GameLogger) -> Result<State, GameError> {
        self.respond(opponent)?;
        let state = self.env_mut().commit()?.clone();
        log.log(GameEvent::Continue {
            name: self.name().to_string(),
            word: state.word().map(str::to_string),
            done: state.done,
        });
        Ok(state)
    }
}

/// Where interactive participants get their words from.
pub trait WordSource: Debug {
    /// Next candidate word; `None` once the input is closed.
    fn next_word(&mut self) -> Option<String>;

    /// Called for each candidate that was refused.
    fn rejected(&mut self, _word: &str) {}
}

/// A fixed list of words, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct ScriptedWords {
    words: VecDeque<String>,
    rejected: Vec<String>,
}

impl ScriptedWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            rejected: Vec::new(),
        }
    }

    pub fn rejected_words(&self) -> &[String] {
        &self.rejected
    }
}

impl WordSource for ScriptedWords {
    fn next_word(&mut self) -> Option<String> {
        self.words.pop_front()
    }

    fn rejected(&mut self, word: &str) {
        self.rejected.push(word.to_string());
    }
}

/// Pull words from `source` until `accept` takes one.
fn read_accepted(
    name: &str,
    source: &mut dyn WordSource,
    accept: impl Fn(&str) -> bool,
) -> Result<String, GameError> {
    loop {
        let word = source.next_word().ok_or(GameError::InputClosed)?;
        if accept(&word) {
            return Ok(word);
        }
        tracing::debug!(env = name, word = %word, "word refused");
        source.rejected(&word);
    }
}

/// Fully automatic participant: every turn is a draw.
#[derive(Debug)]
pub struct EnvStepPlayer {
    env: RelayEnvironment,
}

impl EnvStepPlayer {
    pub fn new(env: RelayEnvironment) -> Self {
        Self { env }
    }
}

impl Player for EnvStepPlayer {
    fn env(&self) -> &RelayEnvironment {
        &self.env
    }

    fn env_mut(&mut self) -> &mut RelayEnvironment {
        &mut self.env
    }

    fn respond(&mut self, opponent: &State) -> Result<State, GameError> {
        self.env.step(opponent)
    }
}

/// Passthrough participant driven by a transport: words arrive through
/// [`Player::offer`] and are played on the next turn.
#[derive(Debug)]
pub struct DummyPlayer {
    env: RelayEnvironment,
    pending: Option<String>,
}

impl DummyPlayer {
    pub fn new(env: RelayEnvironment) -> Self {
        Self { env, pending: None }
    }
}

impl Player for DummyPlayer {
    fn env(&self) -> &RelayEnvironment {
        &self.env
    }

    fn env_mut(&mut self) -> &mut RelayEnvironment {
        &mut self.env
    }

    fn respond(&mut self, opponent: &State) -> Result<State, GameError> {
        let word = self
            .pending
            .take()
            .ok_or_else(|| GameError::NoPendingWord(self.env.name().to_string()))?;
        self.env.respond_with(opponent, &word)
    }

    /// Refuses words that are no longer available so the caller can ask again.
    fn offer(&mut self, word: &str) -> Result<(), GameError> {
        let word = word.trim();
        if !self.env.pool().is_still_available(word) {
            return Err(GameError::WordUnavailable(word.to_string()));
        }
        self.pending = Some(word.to_string());
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn reset(&mut self) -> Result<(), GameError> {
        self.pending = None;
        self.env.clear()
    }
}

/// Participant that reads its words from a [`WordSource`], re-prompting until a word
/// is still available.
#[derive(Debug)]
pub struct InputPlayer<S> {
    env: RelayEnvironment,
    source: S,
}

impl<S: WordSource> InputPlayer<S> {
    pub fn new(env: RelayEnvironment, source: S) -> Self {
        Self { env, source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: WordSource> Player for InputPlayer<S> {
    fn env(&self) -> &RelayEnvironment {
        &self.env
    }

    fn env_mut(&mut self) -> &mut RelayEnvironment {
        &mut self.env
    }

    fn respond(&mut self, opponent: &State) -> Result<State, GameError> {
        let pool = self.env.pool();
        let word = read_accepted(self.env.name(), &mut self.source, |w| {
            pool.is_still_available(w)
        })?;
        self.env.respond_with(opponent, &word)
    }
}

/// How the game master picks the opening word.
#[derive(Debug)]
pub enum OpeningMode<'a> {
    /// Draw from the dictionary
    Auto,
    /// Use this word; it must still be available
    Word(String),
    /// Ask until an available word is given
    Prompt(&'a mut dyn WordSource),
}

/// Opens each match and keeps a full view of the dictionary.
#[derive(Debug)]
pub struct GameMaster {
    env: RelayEnvironment,
}

impl GameMaster {
    pub const NAME: &'static str = "GameMaster";

    pub fn new(env: RelayEnvironment) -> Self {
        Self { env }
    }

    pub fn name(&self) -> &str {
        self.env.name()
    }

    pub fn env(&self) -> &RelayEnvironment {
        &self.env
    }

    pub fn pool(&self) -> &WordPool {
        self.env.pool()
    }

    pub fn sync_word(&mut self, word: &str) {
        self.env.pool_mut().sync_word(word);
    }

    /// Track what the seat behind `view` may still draw.
    pub fn install_view(
        &mut self,
        view: impl Into<String>,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<(), GameError> {
        self.env.pool_mut().install_view(view, indices)
    }

    /// Produce the opening word and spend it in the master's own pool. Seats are
    /// updated by the caller.
    ///
    /// The previous match is only forgotten once the opening word is known to be
    /// playable; a refused word leaves the master untouched.
    pub fn first(&mut self, mode: OpeningMode<'_>) -> Result<State, GameError> {
        match mode {
            OpeningMode::Auto => {
                self.env.reset(None)?;
                Ok(self.env.commit()?.clone())
            }
            OpeningMode::Word(word) => {
                let word = word.trim();
                if !self.env.pool().is_in_scope(word) {
                    return Err(GameError::WordUnavailable(word.to_string()));
                }
                self.env.reset(Some(word))
            }
            OpeningMode::Prompt(source) => {
                let pool = self.env.pool();
                let word = read_accepted(self.env.name(), source, |w| pool.is_in_scope(w))?;
                self.env.reset(Some(&word))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::rng::FirstCandidate;

    fn env(name: &str, id: PlayerId) -> RelayEnvironment {
        let dict = Dictionary::from_words(["花火", "山火", "花見", "山見"]).unwrap();
        RelayEnvironment::new(name, WordPool::new(&dict), id, Box::new(FirstCandidate))
    }

    #[test]
    fn game_master_auto_opening_is_spent() {
        let mut gm = GameMaster::new(env(GameMaster::NAME, PlayerId::FIRST));
        let opening = gm.first(OpeningMode::Auto).unwrap();
        assert_eq!(opening.word(), Some("花火"));
        assert!(!opening.done);
        assert!(!gm.pool().is_still_available("花火"));
    }

    #[test]
    fn game_master_prompt_skips_unknown_words() {
        let mut gm = GameMaster::new(env(GameMaster::NAME, PlayerId::FIRST));
        let mut source = ScriptedWords::new(["雪見", "山見"]);
        let opening = gm.first(OpeningMode::Prompt(&mut source)).unwrap();
        assert_eq!(opening.word(), Some("山見"));
        assert_eq!(source.rejected_words(), &["雪見".to_string()]);

        let mut empty = ScriptedWords::default();
        assert_eq!(
            gm.first(OpeningMode::Prompt(&mut empty)),
            Err(GameError::InputClosed)
        );
    }

    #[test]
    fn dummy_player_requires_an_offer() {
        let mut p = DummyPlayer::new(env("human", PlayerId::SECOND));
        p.reset().unwrap();
        let mut log = GameLogger::default();
        assert_eq!(
            p.submit(&State::default(), &mut log),
            Err(GameError::NoPendingWord("human".into()))
        );
        assert_eq!(
            p.offer("雪見"),
            Err(GameError::WordUnavailable("雪見".into()))
        );
        p.offer("山火").unwrap();
        assert!(p.has_pending());
    }

    #[test]
    fn env_step_player_does_not_accept_words() {
        let mut p = EnvStepPlayer::new(env("cpu", PlayerId::FIRST));
        assert_eq!(p.offer("花火"), Err(GameError::NotInteractive("cpu".into())));
        assert!(!p.is_interactive());
    }

    #[test]
    fn refused_opening_keeps_previous_match() {
        let mut gm = GameMaster::new(env(GameMaster::NAME, PlayerId::FIRST));
        gm.first(OpeningMode::Auto).unwrap();
        gm.sync_word("山火");
        assert_eq!(
            gm.first(OpeningMode::Word("雪見".into())),
            Err(GameError::WordUnavailable("雪見".into()))
        );
        assert_eq!(gm.pool().consumed_count(), 2);

        // a word spent in the last match may open the next one
        let opening = gm.first(OpeningMode::Word("山火".into())).unwrap();
        assert_eq!(opening.word(), Some("山火"));
        assert_eq!(gm.pool().consumed_count(), 1);
    }
}
