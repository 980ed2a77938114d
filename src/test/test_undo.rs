use Direction::*;
use crate::core::*;
use crate::test::test_util::GameTestState;

const MIXED_LEVEL: &str = r#"
#######
#. $  #
# +$* #
#  $. #
#*  $ #
#######
"#;

#[test]
fn undo_on_fresh_level_is_a_noop() {
    let mut game = GameTestState::new(MIXED_LEVEL);
    let before = game.game_state.clone();
    assert_eq!(game.undo(), UndoOutcome::Empty);
    assert_eq!(game.game_state, before);
}

#[test]
fn undo_reverts_plain_move() {
    let mut game = GameTestState::new(r#"
#@ #
"#);
    game.assert_move(Right);
    assert_eq!(
        game.undo(),
        UndoOutcome::Undone(MoveRecord { direction: Right, pushed: false })
    );
    game.assert_matches(r#"
#@ #
"#);
    game.assert_player_tile();
}

#[test]
fn undo_pulls_box_back_off_target() {
    let mut game = GameTestState::new(r#"
#@$.#
"#);
    game.assert_move(Right);
    game.assert_matches(r#"
# @*#
"#);
    game.undo();
    game.assert_matches(r#"
#@$.#
"#);
}

#[test]
fn undo_restores_box_onto_target_under_player() {
    let mut game = GameTestState::new(r#"
#@* #
"#);
    game.assert_move(Right);
    game.undo();
    game.assert_matches(r#"
#@* #
"#);
}

#[test]
fn three_moves_then_three_undos_restore_loaded_level() {
    let mut game = GameTestState::new(MIXED_LEVEL);
    let loaded = game.game_state.clone();
    game.assert_moves(&[Up, Right, Left]);
    assert_eq!(game.history.len(), 3);

    for _ in 0..3 {
        assert!(matches!(game.undo(), UndoOutcome::Undone(_)));
    }
    assert_eq!(game.game_state, loaded);
    assert_eq!(game.history.len(), 0);
    assert_eq!(game.undo(), UndoOutcome::Empty);
}

#[test]
fn every_legal_move_is_exactly_reversible() {
    let mut game = GameTestState::new(MIXED_LEVEL);
    // Wander deterministically so many tile combinations get visited.
    let walk = [Up, Right, Right, Down, Left, Down, Right, Up, Up, Left, Left, Down, Down, Right];

    for (n, &direction) in walk.iter().cycle().take(60).enumerate() {
        for probe in Direction::all() {
            let before = game.game_state.clone();
            let history_len = game.history.len();
            let outcome = game.try_move(probe);
            if outcome.is_blocked() {
                assert_eq!(game.game_state, before, "blocked move mutated grid at step {}", n);
                continue;
            }
            game.assert_player_tile();
            game.undo();
            assert_eq!(game.game_state, before, "undo of {:?} not exact at step {}", probe, n);
            assert_eq!(game.history.len(), history_len);
        }
        game.try_move(direction);
        game.assert_player_tile();
    }
}

#[test]
fn unwinding_whole_history_returns_to_start() {
    let mut game = GameTestState::new(MIXED_LEVEL);
    let loaded = game.game_state.clone();
    for &direction in [Right, Right, Down, Left, Left, Up, Up, Down, Right].iter() {
        game.try_move(direction);
    }
    while let UndoOutcome::Undone(_) = game.undo() {}
    assert_eq!(game.game_state, loaded);
}

#[test]
fn move_log_replays_to_same_board() {
    let mut game = GameTestState::new(MIXED_LEVEL);
    for &direction in [Right, Right, Down, Left, Up, Up].iter() {
        game.try_move(direction);
    }
    let log = game.history.to_log();
    let records = History::parse_log(&log).unwrap();
    assert_eq!(records, game.history.records());

    let mut replayed = GameTestState::new(MIXED_LEVEL);
    for record in records {
        let outcome = replayed.try_move(record.direction);
        assert_eq!(outcome.record(record.direction), Some(record));
    }
    assert_eq!(replayed.game_state, game.game_state);
}
