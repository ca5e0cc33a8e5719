use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::GameError;
use crate::logger::{GameEvent, GameLogger, MatchRecord, TurnRecord};
use crate::player::{GameMaster, OpeningMode, Player};
use crate::state::State;

fn seat_view(seat: usize) -> String {
    format!("seat {}", seat)
}

/// Who took the match.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// Seat index (0 moves first)
    Seat(usize),
    /// Nobody managed a word: the very first submission already failed
    GameMaster,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: Winner,
    pub winner_name: String,
    pub loser_name: String,
    /// Rounds started, counting the one that ended the match
    pub epochs: u32,
    /// The terminal turn
    pub final_state: State,
}

/// What [`MatchSession::play_turn`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub seat: usize,
    pub name: String,
    pub state: State,
    pub outcome: Option<MatchOutcome>,
}

/// All state of one human/computer pairing: the game master, two seats and the
/// event log. Seat 0 always moves first; rematches go through [`MatchSession::start`].
#[derive(Debug)]
pub struct MatchSession<'a> {
    id: String,
    seed: Option<u64>,
    games: u32,
    master: GameMaster,
    seats: [Box<dyn Player + 'a>; 2],
    logger: GameLogger,
    next_seat: usize,
    epoch: u32,
    submissions: usize,
    opening: Option<String>,
    last: Option<State>,
    turns: Vec<TurnRecord>,
    outcome: Option<MatchOutcome>,
}

impl<'a> MatchSession<'a> {
    pub fn new(
        mut master: GameMaster,
        first: Box<dyn Player + 'a>,
        second: Box<dyn Player + 'a>,
    ) -> Result<Self, GameError> {
        if first.player_id() == second.player_id() {
            return Err(GameError::DuplicatePlayerId(first.player_id().index()));
        }
        for (seat, player) in [&first, &second].into_iter().enumerate() {
            if let Some(scope) = player.pool().scope() {
                master.install_view(seat_view(seat), scope.iter().copied())?;
            }
        }
        let id = Uuid::new_v4().to_string();
        Ok(Self {
            logger: GameLogger::new(id.clone()),
            id,
            seed: None,
            games: 0,
            master,
            seats: [first, second],
            next_seat: 0,
            epoch: 0,
            submissions: 0,
            opening: None,
            last: None,
            turns: Vec::new(),
            outcome: None,
        })
    }

    /// Remember the seed the participants were built from, for the match record.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn master(&self) -> &GameMaster {
        &self.master
    }

    pub fn seat(&self, index: usize) -> Option<&dyn Player> {
        self.seats.get(index).map(|s| s.as_ref())
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn current_seat(&self) -> usize {
        self.next_seat
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn last_state(&self) -> Option<&State> {
        self.last.as_ref()
    }

    pub fn opening(&self) -> Option<&str> {
        self.opening.as_deref()
    }

    /// Words the seat could still draw, as tracked by the game master.
    pub fn words_left(&self, seat: usize) -> Vec<&str> {
        self.master.pool().unused_words_for(&seat_view(seat))
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// True when the seat to move needs a word from the transport.
    pub fn awaiting_input(&self) -> bool {
        let seat = &self.seats[self.next_seat];
        self.last.is_some() && !self.is_finished() && seat.is_interactive() && !seat.has_pending()
    }

    /// Begin a (new) match: every seat is cleared and the opening word is spent
    /// everywhere. When no opening can be produced the session is left as it was.
    pub fn start(&mut self, mode: OpeningMode<'_>) -> Result<State, GameError> {
        let opening = self.master.first(mode)?;
        for seat in self.seats.iter_mut() {
            seat.reset()?;
            if let Some(word) = opening.word() {
                seat.sync_word(word);
            }
        }

        if self.games > 0 {
            self.id = Uuid::new_v4().to_string();
            self.logger.set_match_id(self.id.clone());
        }
        self.games += 1;
        self.logger.log(GameEvent::Game { number: self.games });
        self.logger.log(GameEvent::Continue {
            name: self.master.name().to_string(),
            word: opening.observation.word.clone(),
            done: opening.done,
        });

        self.next_seat = 0;
        self.epoch = 0;
        self.submissions = 0;
        self.turns.clear();
        self.outcome = None;
        self.opening = opening.observation.word.clone();
        self.last = Some(opening.clone());
        tracing::info!(match_id = %self.id, opening = ?self.opening, "match started");
        Ok(opening)
    }

    /// Hand a word to the seat to move. Refused words leave the turn open.
    pub fn offer(&mut self, word: &str) -> Result<(), GameError> {
        if self.last.is_none() {
            return Err(GameError::NotStarted);
        }
        if self.is_finished() {
            return Err(GameError::MatchFinished);
        }
        self.seats[self.next_seat].offer(word)
    }

    pub fn play_turn(&mut self) -> Result<TurnReport, GameError> {
        if self.is_finished() {
            return Err(GameError::MatchFinished);
        }
        let previous = self.last.clone().ok_or(GameError::NotStarted)?;
        let seat = self.next_seat;
        // a failed attempt leaves the epoch open, so only count it once
        if self.turns.len() == self.epoch as usize * 2 {
            self.epoch += 1;
            self.logger.log(GameEvent::Epoch { number: self.epoch });
        }

        let state = self.seats[seat].submit(&previous, &mut self.logger)?;
        self.submissions += 1;

        if !state.done {
            if let Some(word) = state.word() {
                self.master.sync_word(word);
                self.seats[1 - seat].sync_word(word);
            }
        }

        let name = self.seats[seat].name().to_string();
        self.turns.push(TurnRecord {
            epoch: self.epoch,
            name: name.clone(),
            word: state.observation.word.clone(),
            done: state.done,
            verdict: state.verdict.clone(),
        });
        self.last = Some(state.clone());
        self.next_seat = 1 - seat;

        if state.done {
            self.finish(seat, &state);
        }
        Ok(TurnReport {
            seat,
            name,
            state,
            outcome: self.outcome.clone(),
        })
    }

    /// Play until the match ends. Interactive seats must have a word queued for
    /// each of their turns.
    pub fn run(&mut self) -> Result<MatchOutcome, GameError> {
        loop {
            if let Some(outcome) = &self.outcome {
                return Ok(outcome.clone());
            }
            self.play_turn()?;
        }
    }

    pub fn record(&self) -> MatchRecord {
        MatchRecord {
            match_id: self.id.clone(),
            seed: self.seed,
            opening: self.opening.clone(),
            turns: self.turns.clone(),
            winner: self.outcome.as_ref().map(|o| o.winner_name.clone()),
            loser: self.outcome.as_ref().map(|o| o.loser_name.clone()),
            ts: None,
            meta: None,
        }
    }

    fn finish(&mut self, loser_seat: usize, state: &State) {
        self.logger.log(GameEvent::GameEnd);
        let (winner, winner_name, loser_name) = if self.submissions == 1 {
            let both = format!("{} & {}", self.seats[0].name(), self.seats[1].name());
            (Winner::GameMaster, self.master.name().to_string(), both)
        } else {
            let winner_seat = 1 - loser_seat;
            (
                Winner::Seat(winner_seat),
                self.seats[winner_seat].name().to_string(),
                self.seats[loser_seat].name().to_string(),
            )
        };
        self.logger.log(GameEvent::Win {
            name: winner_name.clone(),
        });
        self.logger.log(GameEvent::Lose {
            name: loser_name.clone(),
        });
        tracing::info!(
            match_id = %self.id,
            winner = %winner_name,
            loser = %loser_name,
            epochs = self.epoch,
            "match finished"
        );
        self.outcome = Some(MatchOutcome {
            winner,
            winner_name,
            loser_name,
            epochs: self.epoch,
            final_state: state.clone(),
        });
    }
}
