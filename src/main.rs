//! Thin demo binary: sets up logging, runs a depth-limited search from the
//! starting position (or a FEN given as the first argument), and prints the
//! best move found. A host embedding the library as a UCI/Xboard engine
//! would replace this with its own protocol shim driving `Engine` through
//! `engine::EngineCommand` instead.

use std::process::ExitCode;

use quartergame::engine::{Engine, GoLimit};
use quartergame::options::EngineOptions;

fn main() -> ExitCode {
    env_logger::init();

    if quartergame::zobrist::checksum() == 0 {
        log::error!("zobrist seed table checksum collapsed to zero; refusing to start");
        return ExitCode::from(255);
    }

    let mut engine = Engine::new(EngineOptions::new());

    if let Some(fen) = std::env::args().nth(1) {
        if let Err(err) = engine.set_position_from_fen(&fen) {
            log::error!("failed to parse starting position: {err}");
            return ExitCode::from(255);
        }
    }

    let result = engine.go(GoLimit::Depth(6));
    println!(
        "bestmove {} score {} depth {} nodes {}",
        result.best_move.to_coordinate(),
        result.score,
        result.depth,
        result.nodes
    );
    ExitCode::SUCCESS
}
