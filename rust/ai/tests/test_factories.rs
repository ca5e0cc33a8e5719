use jukugo_ai::computer::scope_size;
use jukugo_ai::{
    create_all_computers, create_computer_match, create_game, create_session_for, AiError,
    Difficulty, Randomness,
};
use jukugo_engine::dictionary::Dictionary;
use jukugo_engine::errors::GameError;
use jukugo_engine::game::Winner;
use jukugo_engine::player::{OpeningMode, Player};
use jukugo_engine::rules::PlayerId;
use jukugo_engine::state::Verdict;

fn small() -> Dictionary {
    Dictionary::from_words(["花火", "山火", "花見", "山見"]).expect("dictionary")
}

#[test]
fn human_beats_an_exhausted_master_computer() {
    let dict = small();
    let mut session = create_game(&dict, "human", Difficulty::Master, true, Randomness::FirstCandidate)
        .expect("session");
    let opening = session.start(OpeningMode::Auto).expect("start");
    assert_eq!(opening.word(), Some("花火"));

    session.offer("山火").expect("offer");
    session.play_turn().expect("human");
    let cpu = session.play_turn().expect("cpu");
    assert_eq!(cpu.state.word(), Some("山見"));

    session.offer("花見").expect("offer");
    session.play_turn().expect("human");
    let last = session.play_turn().expect("cpu");
    assert_eq!(last.state.verdict, Verdict::Exhausted);

    let outcome = session.outcome().expect("finished");
    assert_eq!(outcome.winner, Winner::Seat(0));
    assert_eq!(outcome.winner_name, "human");
    assert_eq!(outcome.loser_name, "CPU (master)");
}

#[test]
fn computer_can_move_first() {
    let dict = small();
    let mut session = create_game(&dict, "human", Difficulty::Master, false, Randomness::FirstCandidate)
        .expect("session");
    session.start(OpeningMode::Auto).expect("start");
    assert!(!session.awaiting_input());
    let turn = session.play_turn().expect("cpu");
    // computer holds id 0: keeps 花, changes 火
    assert_eq!(turn.state.word(), Some("花見"));
    assert!(session.awaiting_input());
    assert_eq!(session.seat(1).expect("seat").player_id(), PlayerId::SECOND);
}

#[test]
fn easy_computer_on_a_tiny_dictionary_has_no_words() {
    let dict = small();
    let mut session = create_game(&dict, "human", Difficulty::Easy, false, Randomness::FirstCandidate)
        .expect("session");
    session.start(OpeningMode::Auto).expect("start");
    let turn = session.play_turn().expect("cpu");
    assert!(turn.state.is_exhausted());
    let outcome = turn.outcome.expect("finished");
    // the very first submission failed
    assert_eq!(outcome.winner, Winner::GameMaster);
    assert_eq!(outcome.loser_name, "CPU (easy) & human");
}

#[test]
fn seeded_computer_matches_always_finish() {
    let dict = Dictionary::builtin();
    for seed in 0..10u64 {
        for (a, b) in [(Difficulty::Master, Difficulty::Easy), (Difficulty::Normal, Difficulty::Hard)] {
            let mut session = create_computer_match(&dict, a, b, seed).expect("session");
            session.start(OpeningMode::Auto).expect("start");
            let outcome = session.run().expect("run");
            assert!(outcome.final_state.done);
            assert_eq!(session.record().seed, Some(seed));
        }
    }
}

#[test]
fn seeded_factories_are_reproducible() {
    let dict = Dictionary::builtin();
    let play = || {
        let mut s = create_computer_match(&dict, Difficulty::Hard, Difficulty::Hard, 99u64)
            .expect("session");
        s.start(OpeningMode::Auto).expect("start");
        s.run().expect("run");
        s.record().turns
    };
    assert_eq!(play(), play());
}

#[test]
fn all_computers_cover_every_difficulty() {
    let dict = Dictionary::builtin();
    let computers = create_all_computers(&dict, PlayerId::SECOND, 5u64).expect("computers");
    assert_eq!(computers.len(), Difficulty::ALL.len());
    for (cpu, difficulty) in computers.iter().zip(Difficulty::ALL) {
        assert_eq!(cpu.difficulty(), difficulty);
        assert_eq!(cpu.player_id(), PlayerId::SECOND);
        assert_eq!(cpu.vocabulary(), scope_size(dict.len(), difficulty.rate()));
    }
}

#[test]
fn prepared_computer_keeps_its_scope_across_rematches() {
    let dict = Dictionary::builtin();
    let mut computers = create_all_computers(&dict, PlayerId::SECOND, 8u64).expect("computers");
    let normal = computers.remove(2);
    let scope = normal.pool().scope().cloned();

    let mut session = create_session_for(&dict, normal, Difficulty::Master, 8u64).expect("session");
    for _ in 0..2 {
        session.start(OpeningMode::Auto).expect("start");
        session.run().expect("run");
        assert_eq!(session.seat(1).expect("seat").pool().scope().cloned(), scope);
    }
}

#[test]
fn unknown_difficulty_is_reported() {
    let err = "impossible".parse::<Difficulty>().expect_err("unknown");
    assert_eq!(err, AiError::UnknownDifficulty("impossible".into()));
    assert!(err.to_string().contains("impossible"));
}

#[test]
fn engine_errors_pass_through() {
    let err: AiError = GameError::EmptyDictionary.into();
    assert_eq!(err.to_string(), GameError::EmptyDictionary.to_string());
}
