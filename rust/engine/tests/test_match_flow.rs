use jukugo_engine::dictionary::Dictionary;
use jukugo_engine::env::RelayEnvironment;
use jukugo_engine::errors::GameError;
use jukugo_engine::game::{MatchSession, Winner};
use jukugo_engine::logger::GameEvent;
use jukugo_engine::player::{
    DummyPlayer, EnvStepPlayer, GameMaster, InputPlayer, OpeningMode, Player, ScriptedWords,
};
use jukugo_engine::pool::WordPool;
use jukugo_engine::rng::FirstCandidate;
use jukugo_engine::rules::PlayerId;
use jukugo_engine::state::Verdict;

fn dict() -> Dictionary {
    Dictionary::from_words(["花火", "山火", "花見", "山見"]).expect("dictionary")
}

fn env(name: &str, id: PlayerId) -> RelayEnvironment {
    RelayEnvironment::new(name, WordPool::named(&dict(), name), id, Box::new(FirstCandidate))
}

fn master() -> GameMaster {
    GameMaster::new(env(GameMaster::NAME, PlayerId::FIRST))
}

/// Human (id 1) moves first against a full-vocabulary computer (id 0).
fn human_first() -> MatchSession<'static> {
    let human = DummyPlayer::new(env("human", PlayerId::SECOND));
    let cpu = EnvStepPlayer::new(env("cpu", PlayerId::FIRST));
    MatchSession::new(master(), Box::new(human), Box::new(cpu)).expect("session")
}

#[test]
fn scripted_match_ends_with_computer_exhausted() {
    let mut session = human_first();
    let opening = session.start(OpeningMode::Auto).expect("start");
    assert_eq!(opening.word(), Some("花火"));
    assert!(session.awaiting_input());

    session.offer("山火").expect("offer");
    let turn = session.play_turn().expect("human turn");
    assert_eq!(turn.state.word(), Some("山火"));
    assert!(!turn.state.done);

    let turn = session.play_turn().expect("cpu turn");
    assert_eq!(turn.name, "cpu");
    assert_eq!(turn.state.word(), Some("山見"));

    session.offer("花見").expect("offer");
    session.play_turn().expect("human turn");

    let last = session.play_turn().expect("cpu turn");
    assert!(last.state.done);
    assert_eq!(last.state.verdict, Verdict::Exhausted);
    assert_eq!(last.state.word(), None);
    assert_eq!(last.state.reward, -1.0);

    let outcome = last.outcome.expect("finished");
    assert_eq!(outcome.winner, Winner::Seat(0));
    assert_eq!(outcome.winner_name, "human");
    assert_eq!(outcome.loser_name, "cpu");
    assert_eq!(outcome.epochs, 2);
}

#[test]
fn events_follow_the_match() {
    let mut session = human_first();
    let opening = session.start(OpeningMode::Auto).expect("start");
    assert_eq!(
        session.logger().events()[1],
        GameEvent::Continue {
            name: GameMaster::NAME.to_string(),
            word: opening.observation.word.clone(),
            done: opening.done,
        }
    );
    for word in ["山火", "花見"] {
        session.offer(word).expect("offer");
        session.play_turn().expect("human");
        session.play_turn().expect("cpu");
    }
    let kinds: Vec<&str> = session.logger().events().iter().map(GameEvent::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "game", "continue", "epoch", "continue", "continue", "epoch", "continue", "continue",
            "game_end", "win", "lose"
        ]
    );
    assert_eq!(
        session.logger().events().last(),
        Some(&GameEvent::Lose {
            name: "cpu".to_string()
        })
    );
}

#[test]
fn first_seat_failing_at_once_hands_the_win_to_the_game_master() {
    let mut session = human_first();
    session.start(OpeningMode::Word("花火".into())).expect("start");
    // available, but keeps the wrong character
    session.offer("花見").expect("offer");
    let turn = session.play_turn().expect("turn");
    assert!(turn.state.done);
    assert!(matches!(turn.state.verdict, Verdict::RuleViolation(_)));
    assert_eq!(turn.state.violations().len(), 1);

    let outcome = session.outcome().expect("finished");
    assert_eq!(outcome.winner, Winner::GameMaster);
    assert_eq!(outcome.winner_name, GameMaster::NAME);
    assert_eq!(outcome.loser_name, "human & cpu");
}

#[test]
fn offers_are_checked_against_availability() {
    let mut session = human_first();
    assert_eq!(session.offer("山火"), Err(GameError::NotStarted));
    session.start(OpeningMode::Auto).expect("start");
    assert_eq!(
        session.offer("花火"),
        Err(GameError::WordUnavailable("花火".into()))
    );
    assert_eq!(
        session.play_turn(),
        Err(GameError::NoPendingWord("human".into()))
    );
    // the refused attempt must not open a second epoch
    session.offer("山火").expect("offer");
    session.play_turn().expect("turn");
    assert_eq!(session.epoch(), 1);
}

#[test]
fn finished_match_refuses_more_turns_until_restarted() {
    let mut session = human_first();
    session.start(OpeningMode::Auto).expect("start");
    session.offer("花見").expect("offer");
    session.play_turn().expect("turn");
    assert!(session.is_finished());
    assert_eq!(session.play_turn().map(|_| ()), Err(GameError::MatchFinished));
    assert_eq!(session.offer("山火"), Err(GameError::MatchFinished));

    let first_id = session.id().to_string();
    session.start(OpeningMode::Auto).expect("rematch");
    assert!(!session.is_finished());
    assert_ne!(session.id(), first_id);
    assert!(session
        .seat(0)
        .expect("seat")
        .pool()
        .is_still_available("山火"));
    assert!(session
        .logger()
        .events()
        .contains(&GameEvent::Game { number: 2 }));
}

#[test]
fn seats_must_use_distinct_ids() {
    let a = EnvStepPlayer::new(env("a", PlayerId::FIRST));
    let b = EnvStepPlayer::new(env("b", PlayerId::FIRST));
    let err = MatchSession::new(master(), Box::new(a), Box::new(b)).expect_err("same ids");
    assert_eq!(err, GameError::DuplicatePlayerId(0));
}

#[test]
fn input_player_reprompts_until_available() {
    let human = InputPlayer::new(
        env("reader", PlayerId::SECOND),
        ScriptedWords::new(["花火", "雪見", "山火"]),
    );
    let cpu = EnvStepPlayer::new(env("cpu", PlayerId::FIRST));
    let mut session = MatchSession::new(master(), Box::new(human), Box::new(cpu)).expect("session");
    session.start(OpeningMode::Auto).expect("start");
    assert!(!session.awaiting_input());

    let turn = session.play_turn().expect("turn");
    assert_eq!(turn.state.word(), Some("山火"));
    assert!(!turn.state.done);
}

#[test]
fn input_player_with_closed_input_errors() {
    let human = InputPlayer::new(env("reader", PlayerId::SECOND), ScriptedWords::default());
    let cpu = EnvStepPlayer::new(env("cpu", PlayerId::FIRST));
    let mut session = MatchSession::new(master(), Box::new(human), Box::new(cpu)).expect("session");
    session.start(OpeningMode::Auto).expect("start");
    assert_eq!(session.play_turn().map(|_| ()), Err(GameError::InputClosed));
    assert!(!session.is_finished());
}

#[test]
fn opening_is_spent_in_every_pool() {
    let mut session = human_first();
    session.start(OpeningMode::Word("山見".into())).expect("start");
    assert_eq!(session.opening(), Some("山見"));
    assert!(!session.master().pool().is_still_available("山見"));
    for i in 0..2 {
        let seat = session.seat(i).expect("seat");
        assert!(!seat.pool().is_still_available("山見"));
    }
}

#[test]
fn refused_restart_leaves_the_match_in_place() {
    let mut session = human_first();
    session.start(OpeningMode::Auto).expect("start");
    session.offer("山火").expect("offer");
    session.play_turn().expect("human");
    session.play_turn().expect("cpu");

    let id = session.id().to_string();
    let events = session.logger().events().len();
    assert_eq!(
        session.start(OpeningMode::Word("雪見".into())),
        Err(GameError::WordUnavailable("雪見".into()))
    );
    assert_eq!(session.id(), id);
    assert_eq!(session.logger().events().len(), events);
    assert_eq!(session.epoch(), 1);
    assert_eq!(session.opening(), Some("花火"));
    assert_eq!(session.last_state().and_then(|s| s.word()), Some("山見"));
    assert_eq!(session.master().pool().consumed_count(), 3);

    // words spent before the refused restart stay spent
    assert_eq!(
        session.offer("花火"),
        Err(GameError::WordUnavailable("花火".into()))
    );
    session.offer("花見").expect("offer");
    session.play_turn().expect("human");
    let last = session.play_turn().expect("cpu");
    assert_eq!(last.state.verdict, Verdict::Exhausted);

    let record = session.record();
    let mut words: Vec<&str> = record.opening.iter().map(String::as_str).collect();
    words.extend(record.turns.iter().filter_map(|t| t.word.as_deref()));
    let distinct: std::collections::HashSet<&str> = words.iter().copied().collect();
    assert_eq!(distinct.len(), words.len());
    assert_eq!(record.winner.as_deref(), Some("human"));
}

#[test]
fn game_master_tracks_each_seat_vocabulary() {
    let human = DummyPlayer::new(env("human", PlayerId::SECOND));
    let mut pool = WordPool::named(&dict(), "cpu");
    pool.restrict_to([1, 3]).expect("scope");
    let cpu = EnvStepPlayer::new(RelayEnvironment::new(
        "cpu",
        pool,
        PlayerId::FIRST,
        Box::new(FirstCandidate),
    ));
    let mut session = MatchSession::new(master(), Box::new(human), Box::new(cpu)).expect("session");

    session.start(OpeningMode::Auto).expect("start");
    assert_eq!(session.words_left(0), vec!["山火", "花見", "山見"]);
    assert_eq!(session.words_left(1), vec!["山火", "山見"]);

    session.offer("山火").expect("offer");
    session.play_turn().expect("human");
    let turn = session.play_turn().expect("cpu");
    assert_eq!(turn.state.word(), Some("山見"));
    assert_eq!(session.words_left(0), vec!["花見"]);
    assert!(session.words_left(1).is_empty());
}
