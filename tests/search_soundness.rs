//! End-to-end soundness checks for the search: every generated move leaves
//! the mover's own king safe, search never returns a move outside the
//! legal list, and a handful of tactical positions resolve the way a
//! human would expect at shallow depth.

use quartergame::egtb::NoTablebase;
use quartergame::engine::{Engine, GoLimit};
use quartergame::eval::MaterialPst;
use quartergame::movegen::{self, GenMode};
use quartergame::options::EngineOptions;
use quartergame::position::Position;
use quartergame::search::{self, SearchContext};
use quartergame::sync::StopFlag;
use quartergame::tt::TranspositionTable;

fn assert_every_generated_move_leaves_the_mover_safe(fen: &str) {
    let pos = Position::from_fen(fen).unwrap();
    let mover = pos.side_to_move();
    let list = movegen::generate(&pos, GenMode::All);
    for i in 0..list.len() {
        let mv = list.get(i);
        let mut working = pos.clone();
        if working.make_move(mv).is_err() {
            continue;
        }
        assert!(
            !working.is_square_attacked(working.king_square(mover), mover.flip()),
            "move {} left {:?}'s king in check",
            mv.to_coordinate(),
            mover
        );
    }
}

#[test]
fn startpos_moves_never_self_check() {
    assert_every_generated_move_leaves_the_mover_safe("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
}

#[test]
fn pinned_piece_position_moves_never_self_check() {
    // White's knight on e2 is pinned to the king by the rook on e8.
    assert_every_generated_move_leaves_the_mover_safe("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
}

#[test]
fn engine_never_returns_a_move_outside_the_legal_list() {
    let mut engine = Engine::new(EngineOptions::new());
    let result = engine.go_single_threaded(GoLimit::Depth(3));
    let legal = movegen::generate_all(engine.position());
    let found = (0..legal.len()).map(|i| legal.get(i)).any(|m| m.is_same(result.best_move));
    assert!(found, "search returned a move not in the legal list");
}

#[test]
fn hanging_queen_is_captured_at_shallow_depth() {
    let pos = Position::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
    let tt = TranspositionTable::new(1);
    let stop = StopFlag::new();
    let evaluator = MaterialPst;
    let egtb = NoTablebase;
    let mut ctx = SearchContext::new(pos, &tt, &evaluator, &egtb, stop);
    let result = search::iterative_deepening(&mut ctx, 3);
    assert_eq!(result.best_move.from_sq().to_algebraic(), "e4");
    assert_eq!(result.best_move.to_sq().to_algebraic(), "d5");
}

#[test]
fn back_rank_mate_is_found_and_scored_as_mate() {
    let pos = Position::from_fen("7k/6pp/8/8/8/8/8/4R1K1 w - - 0 1").unwrap();
    let tt = TranspositionTable::new(1);
    let stop = StopFlag::new();
    let evaluator = MaterialPst;
    let egtb = NoTablebase;
    let mut ctx = SearchContext::new(pos, &tt, &evaluator, &egtb, stop);
    let result = search::iterative_deepening(&mut ctx, 4);
    assert!(result.score >= search::MATE_VALUE - search::MAX_PLY as i32);
}
