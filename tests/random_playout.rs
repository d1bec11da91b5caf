//! Random-playout fuzzing: drive the position through a long sequence of
//! randomly chosen legal moves, checking its own invariants after every
//! move, then unwind the whole sequence with `unmake_move` and confirm
//! every piece of state that isn't covered by a plain FEN round trip
//! elsewhere (signature, castling rights, en-passant square, halfmove
//! clock) comes back exactly where it started.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quartergame::chess_move::Move;
use quartergame::movegen::{self, GenMode};
use quartergame::position::Position;

fn random_playout(mut pos: Position, seed: u64, plies: usize) {
    let initial_fen = pos.to_fen();
    let initial_signature = pos.signature();
    let initial_castling = pos.castling();
    let initial_ep = pos.ep_square();
    let initial_halfmove = pos.halfmove_clock();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut history: Vec<(Move, quartergame::position::Unmake)> = Vec::new();

    for _ in 0..plies {
        let list = movegen::generate(&pos, GenMode::All);
        let legal: Vec<Move> = (0..list.len())
            .map(|i| list.get(i))
            .filter(|&mv| {
                let mut working = pos.clone();
                working.make_move(mv).is_ok()
            })
            .collect();
        if legal.is_empty() {
            break;
        }
        let mv = legal[rng.gen_range(0..legal.len())];
        let undo = pos.make_move(mv).expect("move was pre-filtered legal");
        pos.check_invariants();
        history.push((mv, undo));
    }

    while let Some((mv, undo)) = history.pop() {
        pos.unmake_move(mv, &undo);
    }

    assert_eq!(pos.to_fen(), initial_fen);
    assert_eq!(pos.signature(), initial_signature);
    assert_eq!(pos.castling(), initial_castling);
    assert_eq!(pos.ep_square(), initial_ep);
    assert_eq!(pos.halfmove_clock(), initial_halfmove);
}

#[test]
fn long_random_playout_from_startpos_round_trips() {
    random_playout(Position::startpos(), 0x5EED, 200);
}

#[test]
fn long_random_playout_from_kiwipete_round_trips() {
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    random_playout(pos, 0xC0FFEE, 200);
}

#[test]
fn several_independent_seeds_all_round_trip() {
    for seed in [1u64, 2, 3, 42, 1337] {
        random_playout(Position::startpos(), seed, 80);
    }
}
