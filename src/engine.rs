//! The engine driver: owns the root position, the shared transposition
//! table, and the configured options, and turns a `go` request into an
//! `iterative_deepening` call. A thin seam -- most of the actual work
//! happens in `search`, `position`, and `parallel` -- but it's the one
//! type an embedder needs to hold onto.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::chess_move::{Move, NO_MOVE};
use crate::egtb::{Egtb, NoTablebase};
use crate::eval::{Evaluator, MaterialPst};
use crate::movegen;
use crate::options::{self, EngineOptions, OptionAction};
use crate::parallel::{SplitPool, SplitSearchFn};
use crate::position::Position;
use crate::search::{self, SearchContext, SearchResult};
use crate::sync::StopFlag;
use crate::timer::DeadlineTimer;
use crate::tt::TranspositionTable;

/// How a `go` call is bounded: by depth, by a wall-clock budget, or by
/// whichever of the two a caller happens to have on hand.
pub enum GoLimit {
    Depth(i32),
    Time(Duration),
}

/// Driver commands a CLI/Xboard/UCI shim pushes onto the engine's input
/// channel, standing in for the source's dedicated input thread + queue.
/// `run_command_loop` polls these cooperatively rather than blocking the
/// caller's thread.
pub enum EngineCommand {
    StartThinking(GoLimit),
    StartPondering(Move),
    Stop,
    SetOption(String, Option<String>),
    Quit,
}

/// Owns everything a search needs across calls: the position being played,
/// the transposition table (sized per `EngineOptions::hash_mb`), the
/// evaluator/tablebase collaborators, and the stop flag a UI thread can
/// reach in from outside to abort an in-flight search.
pub struct Engine {
    pos: Position,
    tt: Arc<TranspositionTable>,
    evaluator: Box<dyn Evaluator>,
    egtb: Box<dyn Egtb>,
    options: EngineOptions,
    stop: StopFlag,
    history: Vec<Option<u64>>,
}

impl Engine {
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        let tt = Arc::new(TranspositionTable::new(options.hash_mb));
        Engine {
            pos: Position::startpos(),
            tt,
            evaluator: Box::new(MaterialPst),
            egtb: Box::new(NoTablebase),
            options,
            stop: StopFlag::new(),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn set_position_from_fen(&mut self, fen: &str) -> Result<(), crate::error::FenError> {
        self.pos = Position::from_fen(fen)?;
        self.history.clear();
        Ok(())
    }

    pub fn reset_to_startpos(&mut self) {
        self.pos = Position::startpos();
        self.history.clear();
    }

    /// Play `mv` on the root position, as a UCI `position ... moves ...`
    /// command would. The move must already be legal in the current
    /// position; callers generate it from `movegen` or parse it themselves.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), ()> {
        let signature_before = self.pos.signature();
        self.pos.make_move(mv).map_err(|_| ())?;
        if mv.is_capture_or_promotion() || mv.moved().piece_type() == Some(crate::types::PieceType::Pawn) {
            self.history.push(None);
        } else {
            self.history.push(Some(signature_before));
        }
        Ok(())
    }

    /// Validates `mv` against the current position's legal move list before
    /// applying it, so a move parsed from untrusted UCI/network input can
    /// never desync the board. Rejects anything not found by `movegen`.
    pub fn make_user_move(&mut self, mv: Move) -> Result<(), ()> {
        let legal = movegen::generate_all(&self.pos);
        let found = (0..legal.len()).map(|i| legal.get(i)).any(|m| m.is_same(mv));
        if !found {
            return Err(());
        }
        self.apply_move(mv)
    }

    /// Runs a single synchronous search to completion or time-out, skipping
    /// the command channel entirely. The batch-mode counterpart to
    /// `run_command_loop` for embedders that don't need pondering/stop from
    /// another thread.
    pub fn search_once(&mut self, limit: GoLimit) -> SearchResult {
        self.go(limit)
    }

    /// Cooperatively drains `commands` until `Quit`, running `go` for each
    /// `StartThinking` and reporting its result on `results`. `StartPondering`
    /// is accepted but not yet searched ahead of time: it is recorded so a
    /// future `ponderhit` can validate against it, but this driver does not
    /// speculatively search during opponent think time.
    pub fn run_command_loop(&mut self, commands: &Receiver<EngineCommand>, results: &Sender<SearchResult>) {
        while let Ok(cmd) = commands.recv() {
            match cmd {
                EngineCommand::StartThinking(limit) => {
                    let result = self.go(limit);
                    let _ = results.send(result);
                }
                EngineCommand::StartPondering(_expected) => {
                    // No-op: see doc comment above.
                }
                EngineCommand::Stop => self.stop(),
                EngineCommand::SetOption(name, value) => self.set_option(&name, value.as_deref()),
                EngineCommand::Quit => break,
            }
        }
    }

    pub fn set_option(&mut self, name: &str, value: Option<&str>) {
        if let Some(action) = options::apply_setoption(&mut self.options, name, value) {
            match action {
                OptionAction::ReinitHash(mb) => {
                    self.tt = Arc::new(TranspositionTable::new(mb));
                }
                OptionAction::SetThreads(_) => {
                    // Thread count takes effect on the next `go`, which
                    // reads `self.options.threads` when sizing the pool.
                }
            }
        }
    }

    /// Signal an in-flight `go` to stop as soon as it next polls the flag.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Run a search to `limit`, single-threaded. Always available
    /// regardless of `EngineOptions::threads`; `go` uses this when
    /// `threads == 1`.
    pub fn go_single_threaded(&mut self, limit: GoLimit) -> SearchResult {
        self.stop.reset();
        let max_depth = match limit {
            GoLimit::Depth(d) => d,
            GoLimit::Time(_) => search::MAX_PLY as i32,
        };
        let _timer = match limit {
            GoLimit::Time(budget) => DeadlineTimer::start(budget, self.stop.clone()),
            GoLimit::Depth(_) => None,
        };

        let mut ctx = SearchContext::new(
            self.pos.clone(),
            &self.tt,
            self.evaluator.as_ref(),
            self.egtb.as_ref(),
            self.stop.clone(),
        );
        ctx.history = self.history.clone();
        let result = search::iterative_deepening(&mut ctx, max_depth);
        log_progress(&result);
        result
    }

    /// Run a search to `limit`, splitting the root move list across
    /// `EngineOptions::threads - 1` helper workers (Young Brothers Wait
    /// model). Falls back to `go_single_threaded` when only one thread is
    /// configured.
    pub fn go(&mut self, limit: GoLimit) -> SearchResult {
        if self.options.threads <= 1 {
            return self.go_single_threaded(limit);
        }

        self.stop.reset();
        let max_depth = match limit {
            GoLimit::Depth(d) => d,
            GoLimit::Time(_) => search::MAX_PLY as i32,
        };
        let _timer = match limit {
            GoLimit::Time(budget) => DeadlineTimer::start(budget, self.stop.clone()),
            GoLimit::Depth(_) => None,
        };

        let root_fen = self.pos.to_fen();
        let root_history = self.history.clone();
        let evaluator: Arc<dyn Evaluator> = Arc::new(MaterialPst);
        let egtb: Arc<dyn Egtb> = Arc::new(NoTablebase);
        let tt = Arc::clone(&self.tt);
        let stop = self.stop.clone();

        // A helper's own `ctx.split_pool` is deliberately left `None`: only
        // the initiator's single call chain ever creates new splits. If a
        // helper could also invite the pool while servicing someone else's
        // split, two threads could each end up waiting inside `pool.join`
        // for a split the other was supposed to help with -- a helper
        // that never calls back into the pool can't take part in that
        // cycle, so every split still resolves.
        let search_fn: SplitSearchFn = {
            let root_fen = root_fen.clone();
            let root_history = root_history.clone();
            let evaluator = Arc::clone(&evaluator);
            let egtb = Arc::clone(&egtb);
            let tt = Arc::clone(&tt);
            let stop = stop.clone();
            Arc::new(move |split: &crate::parallel::SplitPoint, mv: Move| -> i32 {
                let Ok(mut pos) = Position::from_fen(&root_fen) else {
                    return 0;
                };
                for &path_mv in &split.path_from_root {
                    if pos.make_move(path_mv).is_err() {
                        return 0;
                    }
                }
                let mut ctx = SearchContext::new(pos, tt.as_ref(), evaluator.as_ref(), egtb.as_ref(), stop.clone());
                ctx.history = root_history.clone();
                let Ok(undo) = ctx.pos.make_move(mv) else {
                    return i32::MIN;
                };
                ctx.history.push(None);
                let score = -search::alpha_beta(
                    &mut ctx,
                    split.depth - 1,
                    split.ply + 1,
                    -split.beta,
                    -split.alpha(),
                    mv,
                );
                ctx.pos.unmake_move(mv, &undo);
                score
            })
        };

        let pool = Arc::new(SplitPool::new(self.options.threads - 1, search_fn));

        let mut ctx = SearchContext::new(self.pos.clone(), &self.tt, self.evaluator.as_ref(), self.egtb.as_ref(), self.stop.clone());
        ctx.history = self.history.clone();
        ctx.split_pool = Some(Arc::clone(&pool));

        let mut best = SearchResult {
            best_move: NO_MOVE,
            score: 0,
            depth: 0,
            nodes: 0,
        };
        let mut depth = 1;
        while depth <= max_depth && !ctx.stop.is_stopped() {
            let root_moves = search::order_root_moves(&mut ctx);
            if root_moves.is_empty() {
                break;
            }
            let moves: Vec<Move> = (0..root_moves.len()).map(|i| root_moves.get(i)).collect();
            let split = pool.split(moves, depth, 0, -search::MATE_VALUE, search::MATE_VALUE, Vec::new());

            while let Some((_, mv)) = split.get_next_move() {
                if split.is_terminated() || ctx.stop.is_stopped() {
                    break;
                }
                let Ok(undo) = ctx.pos.make_move(mv) else {
                    continue;
                };
                ctx.history.push(None);
                ctx.path_from_root.push(mv);
                let score = -search::alpha_beta(&mut ctx, depth - 1, 1, -search::MATE_VALUE, -split.alpha(), mv);
                ctx.path_from_root.pop();
                ctx.history.pop();
                ctx.pos.unmake_move(mv, &undo);
                split.update(mv, score);
            }
            pool.join(&split);

            if !ctx.stop.is_stopped() {
                let (score, mv) = split.best();
                if mv != NO_MOVE {
                    best = SearchResult {
                        best_move: mv,
                        score,
                        depth,
                        nodes: ctx.nodes,
                    };
                }
            }
            depth += 1;
        }

        log_progress(&best);
        best
    }
}

fn log_progress(result: &SearchResult) {
    #[cfg(feature = "logging")]
    log::info!(
        "depth {} score {} nodes {} bestmove {}",
        result.depth,
        result.score,
        result.nodes,
        result.best_move.to_coordinate()
    );
    #[cfg(not(feature = "logging"))]
    let _ = result;
}
