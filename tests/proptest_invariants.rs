//! Property tests for the rules that must hold for every input

use blockfall::core::{calculate_level, get_shape, Board, Session, SessionConfig, SpeedCurve};
use blockfall::engine::apply_place;
use blockfall::types::{GameAction, ShapeKind};
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = ShapeKind> {
    (0usize..7).prop_map(|i| ShapeKind::ALL[i])
}

fn arb_action() -> impl Strategy<Value = GameAction> {
    prop_oneof![
        Just(GameAction::MoveLeft),
        Just(GameAction::MoveRight),
        Just(GameAction::SoftDrop),
        Just(GameAction::Rotate),
        Just(GameAction::Pause),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_four_rotations_identity(kind in arb_kind(), turns in 0usize..4) {
        let mut shape = get_shape(kind);
        for _ in 0..turns {
            shape = shape.rotate_cw();
        }
        let start = shape;
        for _ in 0..4 {
            shape = shape.rotate_cw();
        }
        prop_assert_eq!(shape, start);
    }

    #[test]
    fn prop_out_of_range_collides(
        kind in arb_kind(),
        cells in proptest::collection::vec((0i32..10, 0i32..20), 0..60),
        y in -3i32..20,
    ) {
        let mut board = Board::default();
        for (x, cy) in cells {
            board.set(x, cy, Some(ShapeKind::T));
        }
        let shape = get_shape(kind);
        let width = shape.cols() as i32;
        prop_assert!(board.collides(&shape, -1, y));
        prop_assert!(board.collides(&shape, 10 - width + 1, y));
        prop_assert!(board.collides(&shape, 0, 20));
    }

    #[test]
    fn prop_queue_length_invariant(seed in any::<u32>(), queue_len in 1usize..=8, spawns in 0usize..50) {
        let config = SessionConfig::default().with_seed(seed).with_queue_len(queue_len);
        let mut session = Session::new(config).unwrap();
        for _ in 0..spawns {
            session.spawn();
            prop_assert_eq!(session.upcoming().len(), queue_len);
        }
    }

    #[test]
    fn prop_actions_keep_session_consistent(
        seed in any::<u32>(),
        actions in proptest::collection::vec(arb_action(), 0..200),
    ) {
        let mut session = Session::new(SessionConfig::default().with_seed(seed)).unwrap();
        let mut level = session.level();
        for action in actions {
            session.apply_action(action);
            if session.is_running() {
                session.tick();
            }
            prop_assert!(session.level() >= level);
            level = session.level();
            prop_assert_eq!(session.level(), calculate_level(session.lines_cleared()).max(1));
            if let Some(active) = session.active() {
                prop_assert!(!active.collides(session.board()));
            }
        }
    }

    #[test]
    fn prop_placements_never_decrease_level(
        seed in any::<u32>(),
        moves in proptest::collection::vec((0i32..10, 0u8..4), 1..80),
    ) {
        let mut session = Session::new(SessionConfig::default().with_seed(seed)).unwrap();
        let mut level = session.level();
        let mut interval = session.drop_interval_ms();
        for (x, rotations) in moves {
            if session.game_over() {
                break;
            }
            let _ = apply_place(&mut session, x, rotations);
            prop_assert!(session.level() >= level);
            prop_assert!(session.drop_interval_ms() <= interval);
            level = session.level();
            interval = session.drop_interval_ms();
        }
    }

    #[test]
    fn prop_speed_curve_bounded(stacked in any::<u32>()) {
        let curve = SpeedCurve::STANDARD;
        let ms = curve.interval_ms(stacked);
        prop_assert!(ms >= curve.floor_ms);
        prop_assert!(ms <= curve.base_ms);
    }
}
