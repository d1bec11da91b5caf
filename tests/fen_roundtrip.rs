//! A FEN parsed and re-serialized should read back identically, across a
//! corpus of positions exercising castling rights, en passant, and
//! half/fullmove counters.

use quartergame::position::Position;

const CORPUS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    "4k3/8/8/8/8/8/8/4K2R w K - 12 34",
    "r3k3/8/8/8/8/8/8/4K3 b q - 5 20",
    "8/1P3k2/8/8/8/8/5Kp1/8 w - - 0 1",
    "8/8/8/8/8/8/8/R3K2R w KQ - 0 1",
];

#[test]
fn every_corpus_fen_round_trips_exactly() {
    for &fen in CORPUS {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen, "round trip mismatch for {fen}");
    }
}

#[test]
fn rejects_malformed_fen_strings() {
    assert!(Position::from_fen("not a fen").is_err());
    assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
    assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPX/RNBQKBNR w KQkq - 0 1").is_err());
}
