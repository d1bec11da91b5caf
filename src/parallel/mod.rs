//! Parallel search split points (Young Brothers Wait model). A small
//! fixed pool of split-point records is shared by a
//! single root driver and a handful of helper worker threads; each worker
//! sits idle on an `mpsc` receiver until it is invited to help at a split,
//! at which point it replays the moves from the root into its own working
//! position and starts pulling sibling moves off the split under its lock.
//!
//! This module owns the bookkeeping only. It knows nothing about chess: the
//! function that actually searches a move at a split point is supplied by
//! the caller (`engine.rs`) as a closure, so this module stays a generic
//! fork/join primitive rather than a second copy of the search.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::chess_move::{Move, NO_MOVE};
use crate::sync::StopFlag;

/// Number of split-point slots kept in the pool. Bounded rather than
/// unbounded: a worker that can't find a free split simply searches its
/// current move alone, which is always correct, just less parallel.
pub const MAX_SPLITS: usize = 8;

struct SplitState {
    alpha: i32,
    best_score: i32,
    best_move: Move,
    next_move_index: usize,
    terminate: bool,
}

/// The shared state for one parallel sub-search: the sibling moves at some
/// node, and the running best score/move/alpha as workers report back.
pub struct SplitPoint {
    pub moves: Vec<Move>,
    pub depth: i32,
    pub ply: usize,
    pub beta: i32,
    /// Moves played from the root position down to this split's parent,
    /// so a helper worker can reconstruct an equivalent working position
    /// without ever touching the initiator's `Position`.
    pub path_from_root: Vec<Move>,
    state: Mutex<SplitState>,
    refcount: AtomicUsize,
}

impl SplitPoint {
    fn new(moves: Vec<Move>, depth: i32, ply: usize, alpha: i32, beta: i32, path_from_root: Vec<Move>) -> Self {
        SplitPoint {
            moves,
            depth,
            ply,
            beta,
            path_from_root,
            state: Mutex::new(SplitState {
                alpha,
                best_score: i32::MIN,
                best_move: NO_MOVE,
                next_move_index: 0,
                terminate: false,
            }),
            refcount: AtomicUsize::new(1),
        }
    }

    /// Claim the next untried sibling move, or `None` if the split has been
    /// exhausted or cut off.
    #[must_use]
    pub fn get_next_move(&self) -> Option<(usize, Move)> {
        let mut st = self.state.lock();
        if st.terminate || st.next_move_index >= self.moves.len() {
            return None;
        }
        let idx = st.next_move_index;
        st.next_move_index += 1;
        Some((idx, self.moves[idx]))
    }

    /// Report the score a worker found for `mv`. Raises alpha and the split's
    /// best move under the lock; sets `terminate` on a beta cutoff. Returns
    /// `true` if the split just became terminated (the caller should stop
    /// pulling more moves and unwind).
    pub fn update(&self, mv: Move, score: i32) -> bool {
        let mut st = self.state.lock();
        if st.terminate {
            return true;
        }
        if score > st.best_score {
            st.best_score = score;
            st.best_move = mv;
            if score > st.alpha {
                st.alpha = score;
            }
        }
        if st.alpha >= self.beta {
            st.terminate = true;
        }
        st.terminate
    }

    #[must_use]
    pub fn alpha(&self) -> i32 {
        self.state.lock().alpha
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state.lock().terminate
    }

    pub fn terminate(&self) {
        self.state.lock().terminate = true;
    }

    #[must_use]
    pub fn best(&self) -> (i32, Move) {
        let st = self.state.lock();
        (st.best_score, st.best_move)
    }

    pub fn incref(&self) {
        self.refcount.fetch_add(1, Ordering::AcqRel);
    }

    pub fn decref(&self) {
        self.refcount.fetch_sub(1, Ordering::AcqRel);
    }

    #[must_use]
    pub fn refcount(&self) -> usize {
        self.refcount.load(Ordering::Acquire)
    }
}

/// The ancestor chain of splits a worker or the initiator is currently
/// inside. `should_stop_searching` consults it so a cutoff at an outer
/// split aborts an inner one promptly instead of waiting for its own beta
/// cutoff to happen naturally.
#[derive(Default, Clone)]
pub struct SplitStack(Vec<Arc<SplitPoint>>);

impl SplitStack {
    #[must_use]
    pub fn new() -> Self {
        SplitStack(Vec::new())
    }

    pub fn push(&mut self, split: Arc<SplitPoint>) {
        self.0.push(split);
    }

    pub fn pop(&mut self) -> Option<Arc<SplitPoint>> {
        self.0.pop()
    }

    #[must_use]
    pub fn any_ancestor_terminated(&self) -> bool {
        self.0.iter().any(|s| s.is_terminated())
    }
}

/// Returns true if the global stop flag is set, or any split this worker is
/// currently nested inside has been cut off by a sibling.
#[must_use]
pub fn should_stop_searching(stop: &StopFlag, splits: &SplitStack) -> bool {
    stop.is_stopped() || splits.any_ancestor_terminated()
}

enum WorkerMessage {
    Help(Arc<SplitPoint>),
    Shutdown,
}

/// A function that searches one sibling move at a split and reports its
/// score back via `SplitPoint::update`. Supplied by the search driver so
/// this module stays chess-agnostic.
pub type SplitSearchFn = Arc<dyn Fn(&SplitPoint, Move) -> i32 + Send + Sync>;

/// One helper thread, parked on its channel receiver until told which
/// split to go help at. The sender is mutex-guarded rather than bare
/// because a split created at an interior node (not just the root) can be
/// handed out by whichever thread happens to be searching that node, so
/// `help` must be callable from more than one thread concurrently --
/// `mpsc::Sender` alone is `Send` but not `Sync`.
pub struct Worker {
    sender: Mutex<Sender<WorkerMessage>>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn(search_fn: SplitSearchFn) -> Self {
        let (tx, rx): (Sender<WorkerMessage>, Receiver<WorkerMessage>) = channel();
        let handle = thread::spawn(move || worker_loop(rx, search_fn));
        Worker {
            sender: Mutex::new(tx),
            handle: Some(handle),
        }
    }

    /// Invite this worker to help at `split`. Non-blocking: the worker picks
    /// up the message on its own schedule.
    pub fn help(&self, split: Arc<SplitPoint>) {
        split.incref();
        let _ = self.sender.lock().send(WorkerMessage::Help(split));
    }

    fn shutdown(&mut self) {
        let _ = self.sender.lock().send(WorkerMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}

fn worker_loop(rx: Receiver<WorkerMessage>, search_fn: SplitSearchFn) {
    while let Ok(msg) = rx.recv() {
        match msg {
            WorkerMessage::Shutdown => break,
            WorkerMessage::Help(split) => {
                while let Some((_, mv)) = split.get_next_move() {
                    if split.is_terminated() {
                        break;
                    }
                    let score = search_fn(&split, mv);
                    if split.update(mv, score) {
                        break;
                    }
                }
                split.decref();
            }
        }
    }
}

/// Owns the helper threads and hands out split points. Created once per
/// engine instance with `threads - 1` workers; the main search thread is the
/// initiator and never waits in this pool's idle loop.
pub struct SplitPool {
    workers: Vec<Worker>,
}

impl SplitPool {
    /// `helper_count` workers are spawned immediately, each parked on its
    /// channel until given work.
    #[must_use]
    pub fn new(helper_count: usize, search_fn: SplitSearchFn) -> Self {
        let workers = (0..helper_count)
            .map(|_| Worker::spawn(Arc::clone(&search_fn)))
            .collect();
        SplitPool { workers }
    }

    #[must_use]
    pub fn helper_count(&self) -> usize {
        self.workers.len()
    }

    /// Create a split for `moves` at the given node and invite every idle
    /// helper to join it. Returns the split so the initiator can also pull
    /// moves from it via `get_next_move`/`update`.
    #[must_use]
    pub fn split(
        &self,
        moves: Vec<Move>,
        depth: i32,
        ply: usize,
        alpha: i32,
        beta: i32,
        path_from_root: Vec<Move>,
    ) -> Arc<SplitPoint> {
        let split = Arc::new(SplitPoint::new(moves, depth, ply, alpha, beta, path_from_root));
        for worker in &self.workers {
            worker.help(Arc::clone(&split));
        }
        split
    }

    /// Block until every helper currently attached to `split` has returned,
    /// i.e. the initiator is the sole remaining owner.
    pub fn join(&self, split: &Arc<SplitPoint>) {
        while split.refcount() > 1 {
            thread::yield_now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::flags;
    use crate::geometry::Square;
    use crate::types::{Color, Piece, PieceType};

    fn dummy_move(to_file: u8) -> Move {
        let from = Square::from_algebraic("e2").unwrap();
        let to = Square::from_file_rank(to_file, 3);
        Move::new(from, to, Piece::new(PieceType::Pawn, Color::White), Piece::NONE, Piece::NONE, flags::SPECIAL)
    }

    #[test]
    fn split_hands_out_each_move_exactly_once() {
        let moves = vec![dummy_move(0), dummy_move(1), dummy_move(2)];
        let split = SplitPoint::new(moves.clone(), 4, 0, -1000, 1000, Vec::new());
        let mut seen = Vec::new();
        while let Some((idx, mv)) = split.get_next_move() {
            seen.push((idx, mv));
        }
        assert_eq!(seen.len(), moves.len());
    }

    #[test]
    fn update_sets_terminate_on_beta_cutoff() {
        let moves = vec![dummy_move(0), dummy_move(1)];
        let split = SplitPoint::new(moves, 4, 0, 0, 50, Vec::new());
        assert!(!split.update(dummy_move(0), 10));
        assert!(split.update(dummy_move(1), 60));
        assert!(split.is_terminated());
    }

    #[test]
    fn terminated_split_stops_handing_out_moves() {
        let moves = vec![dummy_move(0), dummy_move(1), dummy_move(2)];
        let split = SplitPoint::new(moves, 4, 0, 0, 50, Vec::new());
        let _ = split.get_next_move();
        split.terminate();
        assert!(split.get_next_move().is_none());
    }

    #[test]
    fn split_stack_reports_ancestor_termination() {
        let split = Arc::new(SplitPoint::new(vec![dummy_move(0)], 4, 0, 0, 50, Vec::new()));
        let mut stack = SplitStack::new();
        stack.push(Arc::clone(&split));
        assert!(!stack.any_ancestor_terminated());
        split.terminate();
        assert!(stack.any_ancestor_terminated());
    }

    #[test]
    fn pool_with_no_helpers_still_resolves_a_split() {
        let pool = SplitPool::new(0, Arc::new(|_split: &SplitPoint, _mv: Move| 0));
        let split = pool.split(vec![dummy_move(0)], 4, 0, -50, 50, Vec::new());
        assert_eq!(pool.helper_count(), 0);
        while let Some((_, mv)) = split.get_next_move() {
            split.update(mv, 5);
        }
        pool.join(&split);
        assert_eq!(split.best().0, 5);
    }
}
