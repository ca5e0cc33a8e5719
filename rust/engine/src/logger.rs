use serde::{Deserialize, Serialize};

use crate::state::Verdict;

const BANNER: usize = 25;

/// Events a match reports while it runs.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new match started (1-based count per session)
    Game { number: u32 },
    /// Both seats are about to play another round
    Epoch { number: u32 },
    /// A participant produced a word
    Continue {
        name: String,
        word: Option<String>,
        done: bool,
    },
    GameEnd,
    Win { name: String },
    Lose { name: String },
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Game { .. } => "game",
            GameEvent::Epoch { .. } => "epoch",
            GameEvent::Continue { .. } => "continue",
            GameEvent::GameEnd => "game_end",
            GameEvent::Win { .. } => "win",
            GameEvent::Lose { .. } => "lose",
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::Game { number } => write!(f, "Game: {} {}", number, "*".repeat(BANNER)),
            GameEvent::Epoch { number } => {
                write!(f, "Epoch: {} {}", number, "=".repeat(BANNER))
            }
            GameEvent::Continue { name, word, done } => write!(
                f,
                "{}: word: {}, done: {}",
                name,
                word.as_deref().unwrap_or("-"),
                done
            ),
            GameEvent::GameEnd => f.write_str(&"*".repeat(BANNER)),
            GameEvent::Win { name } => write!(f, "Win: {}", name),
            GameEvent::Lose { name } => write!(f, "Lose: {}", name),
        }
    }
}

/// Collects match events and forwards them to `tracing` at debug level.
#[derive(Debug, Clone, Default)]
pub struct GameLogger {
    match_id: Option<String>,
    events: Vec<GameEvent>,
}

impl GameLogger {
    pub fn new(match_id: impl Into<String>) -> Self {
        Self {
            match_id: Some(match_id.into()),
            events: Vec::new(),
        }
    }

    pub fn set_match_id(&mut self, match_id: impl Into<String>) {
        self.match_id = Some(match_id.into());
    }

    pub fn log(&mut self, event: GameEvent) {
        tracing::debug!(
            kind = event.kind(),
            match_id = self.match_id.as_deref().unwrap_or("-"),
            "{}",
            event
        );
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand the collected events to the caller and start over.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// One submission as stored in a [`MatchRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub epoch: u32,
    pub name: String,
    pub word: Option<String>,
    pub done: bool,
    #[serde(default)]
    pub verdict: Verdict,
}

/// Summary of a finished (or abandoned) match, serialised to JSONL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// UUID v4 identifying the match
    pub match_id: String,
    /// Selector seed when the match was created from one
    pub seed: Option<u64>,
    pub opening: Option<String>,
    pub turns: Vec<TurnRecord>,
    pub winner: Option<String>,
    pub loser: Option<String>,
    /// RFC3339, filled in on write when missing
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct MatchRecordWriter {
    writer: Option<BufWriter<File>>,
    written: usize,
}

impl MatchRecordWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            written: 0,
        })
    }

    /// A writer that counts records but stores nothing.
    pub fn discard() -> Self {
        Self {
            writer: None,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write(&mut self, record: &MatchRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        self.written += 1;
        Ok(())
    }
}
