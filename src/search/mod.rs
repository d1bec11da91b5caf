//! Alpha-beta search: null-move pruning, mate-distance pruning, internal
//! iterative deepening, futility pruning, PVS with late move reductions,
//! and search extensions, all
//! sitting on top of the transposition table and move ordering built
//! elsewhere in this crate. `quiescence` (in `quiescence.rs`) is the leaf
//! driver; `extensions.rs`/`reductions.rs` hold the depth adjustments.

pub mod extensions;
pub mod quiescence;
pub mod reductions;

use std::sync::Arc;

use crate::caches::{DangerHash, EvalHash, PawnHash};
use crate::chess_move::{Move, MoveList, NO_MOVE};
use crate::egtb::Egtb;
use crate::eval::Evaluator;
use crate::movegen;
use crate::ordering::{self, MoveOrderer};
use crate::parallel::{SplitPool, SplitStack};
use crate::position::Position;
use crate::sync::StopFlag;
use crate::tt::{Bound, TranspositionTable};
use crate::types::Color;

/// Minimum depth for an interior split to be worth the synchronization
/// overhead -- a shallow node finishes sequentially before the round trip
/// through the pool would even pay for itself.
const MIN_SPLIT_DEPTH: i32 = 6;

pub const MATE_VALUE: i32 = 30_000;
pub const MAX_PLY: usize = ordering::MAX_PLY;

/// Starting checking-move budget handed to quiescence search at the
/// horizon; decremented each quiescence ply so the "captures and checks"
/// widening doesn't run away near a position flagged dangerous.
const Q_CHECK_BUDGET: i32 = 1;

/// Per-thread mutable search state: the board being searched (mutated
/// via make/unmake, never cloned per node), the shared transposition
/// table, the evaluator/tablebase collaborators, and this thread's own
/// move-ordering and leaf caches.
pub struct SearchContext<'a> {
    pub pos: Position,
    pub tt: &'a TranspositionTable,
    pub evaluator: &'a dyn Evaluator,
    pub egtb: &'a dyn Egtb,
    pub orderer: MoveOrderer,
    pub stop: StopFlag,
    pub nodes: u64,
    pub seldepth: usize,
    pub pawn_hash: PawnHash,
    pub eval_hash: EvalHash,
    pub danger_hash: DangerHash,
    /// `Some(signature)` for a position reachable by a reversible move,
    /// `None` marking an irreversible (capture/pawn-move) boundary that
    /// repetition scanning stops at.
    pub history: Vec<Option<u64>>,
    /// Score the current iterative-deepening iteration is searching
    /// towards, refreshed once per depth by `iterative_deepening`.
    /// Extensions gate on staying within a window of this value so a line
    /// that has drifted far from the root's expectation doesn't keep
    /// earning extra depth.
    pub root_score: i32,
    /// The split pool this search can hand interior-node work to, if any.
    /// `None` in single-threaded search and in positions where splitting
    /// was never configured.
    pub split_pool: Option<Arc<SplitPool>>,
    /// Splits this thread is currently nested inside, outermost first. A
    /// cutoff at an ancestor aborts this subtree promptly rather than
    /// waiting for its own beta cutoff.
    pub splits: SplitStack,
    /// Moves played from the true root down to the current node, so a
    /// split created here can hand a helper worker enough to replay an
    /// equivalent position without sharing `pos` across threads.
    pub path_from_root: Vec<Move>,
}

impl<'a> SearchContext<'a> {
    #[must_use]
    pub fn new(
        pos: Position,
        tt: &'a TranspositionTable,
        evaluator: &'a dyn Evaluator,
        egtb: &'a dyn Egtb,
        stop: StopFlag,
    ) -> SearchContext<'a> {
        SearchContext {
            pos,
            tt,
            evaluator,
            egtb,
            orderer: MoveOrderer::new(),
            stop,
            nodes: 0,
            seldepth: 0,
            pawn_hash: PawnHash::new(1 << 14),
            eval_hash: EvalHash::new(1 << 14),
            danger_hash: DangerHash::new(1 << 14),
            history: Vec::with_capacity(256),
            root_score: 0,
            split_pool: None,
            splits: SplitStack::new(),
            path_from_root: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth: i32,
    pub nodes: u64,
}

/// Iterative deepening from the root: searches depth 1, 2, 3, ... until
/// `max_depth` or `stop` fires, keeping the best move/score from the
/// last depth that finished completely. A depth that gets interrupted
/// mid-search contributes nothing -- its root move ordering is
/// incomplete and would be a regression to report.
pub fn iterative_deepening(ctx: &mut SearchContext, max_depth: i32) -> SearchResult {
    let mut best = SearchResult {
        best_move: NO_MOVE,
        score: 0,
        depth: 0,
        nodes: 0,
    };
    ctx.tt.new_search();

    for depth in 1..=max_depth {
        ctx.orderer.decay_history();
        let alpha = -MATE_VALUE;
        let beta = MATE_VALUE;
        let score = alpha_beta(ctx, depth, 0, alpha, beta, NO_MOVE);
        ctx.root_score = score;
        if ctx.stop.is_stopped() && depth > 1 {
            break;
        }
        if let Some(probe) = ctx.tt.probe(ctx.pos.signature()) {
            if !probe.best_move.is_none() {
                best = SearchResult {
                    best_move: probe.best_move,
                    score,
                    depth,
                    nodes: ctx.nodes,
                };
            }
        }
        if ctx.stop.is_stopped() {
            break;
        }
        if score.abs() >= MATE_VALUE - MAX_PLY as i32 {
            break;
        }
    }
    best.nodes = ctx.nodes;
    best
}

fn side_relative_eval(ctx: &SearchContext) -> i32 {
    let white_eval = ctx.evaluator.evaluate(&ctx.pos);
    if ctx.pos.side_to_move() == Color::White {
        white_eval
    } else {
        -white_eval
    }
}

fn to_tt_value(value: i32, ply: usize) -> i32 {
    if value >= MATE_VALUE - MAX_PLY as i32 {
        value + ply as i32
    } else if value <= -MATE_VALUE + MAX_PLY as i32 {
        value - ply as i32
    } else {
        value
    }
}

fn from_tt_value(value: i32, ply: usize) -> i32 {
    if value >= MATE_VALUE - MAX_PLY as i32 {
        value - ply as i32
    } else if value <= -MATE_VALUE + MAX_PLY as i32 {
        value + ply as i32
    } else {
        value
    }
}

/// Does `color` have any piece besides pawns and king? Used to veto null
/// move pruning in likely zugzwang positions (pure king-and-pawn
/// endgames), where "the side to move would be better off passing" is
/// exactly backwards.
fn has_non_pawn_material(pos: &Position, color: Color) -> bool {
    pos.non_pawn_squares(color).len() > 1
}

/// True if the table already answers the question a null-move search
/// would ask: an entry searched at least as deep as the reduced null
/// search would run, whose bound isn't a lower bound, already says the
/// score here is below `beta`. Trying the null move again would just
/// re-derive what the table already knows and burn a search for it.
fn reports_avoid_null(probe: &crate::tt::ProbeResult, depth_after_null: i32, beta: i32, ply: usize) -> bool {
    if (probe.depth as i32) < depth_after_null {
        return false;
    }
    if !matches!(probe.bound, Bound::Exact | Bound::Upper) {
        return false;
    }
    from_tt_value(probe.value, ply) < beta
}

fn is_draw(ctx: &SearchContext) -> bool {
    if ctx.pos.is_fifty_move_draw() || ctx.pos.is_repetition(&ctx.history) {
        return true;
    }
    matches!(
        crate::recognizers::recognize(&ctx.pos),
        Some(crate::recognizers::Recognized::Draw)
    )
}

pub fn alpha_beta(
    ctx: &mut SearchContext,
    depth: i32,
    ply: usize,
    mut alpha: i32,
    mut beta: i32,
    prev_move: Move,
) -> i32 {
    ctx.nodes += 1;
    ctx.seldepth = ctx.seldepth.max(ply);

    if ctx.nodes % 2048 == 0 && (ctx.stop.is_stopped() || ctx.splits.any_ancestor_terminated()) {
        return alpha;
    }

    if ply > 0 && is_draw(ctx) {
        return 0;
    }

    // Mate distance pruning: a mate found closer than `ply` can't be
    // improved on, and a mate further away than what alpha/beta already
    // bracket isn't worth searching for.
    alpha = alpha.max(-MATE_VALUE + ply as i32);
    beta = beta.min(MATE_VALUE - ply as i32 - 1);
    if alpha >= beta {
        return alpha;
    }

    if depth <= 0 {
        return quiescence::quiescence(ctx, alpha, beta, ply, Q_CHECK_BUDGET);
    }

    let signature = ctx.pos.signature();
    let orig_alpha = alpha;
    let mut hash_move = NO_MOVE;
    let mut tt_probe = None;

    if let Some(probe) = ctx.tt.probe(signature) {
        hash_move = probe.best_move;
        if probe.depth as i32 >= depth {
            let value = from_tt_value(probe.value, ply);
            match probe.bound {
                Bound::Exact => return value,
                Bound::Lower if value >= beta => return value,
                Bound::Upper if value <= alpha => return value,
                _ => {}
            }
        }
        tt_probe = Some(probe);
    }

    let in_check = ctx.pos.is_in_check();
    let us = ctx.pos.side_to_move();
    let static_eval = if in_check { 0 } else { side_relative_eval(ctx) };
    let root_score_here = if ply % 2 == 0 { ctx.root_score } else { -ctx.root_score };

    // Null move pruning: if passing still leaves the opponent unable to
    // beat beta, this position is almost certainly winning regardless of
    // what we actually play. Skipped in check (no legal null move), in
    // likely zugzwang (no non-pawn material), at PV nodes (a full window
    // means this node's score actually matters, not just whether it beats
    // beta), and whenever the table already reports that a null search
    // from here came back low last time.
    let is_pv = beta - alpha > 1;
    let r = 2 + depth / 6;
    let avoid_null = tt_probe
        .as_ref()
        .is_some_and(|probe| reports_avoid_null(probe, depth - 1 - r, beta, ply));
    if !in_check
        && !is_pv
        && !avoid_null
        && depth >= 3
        && has_non_pawn_material(&ctx.pos, us)
        && beta < MATE_VALUE - MAX_PLY as i32
        && static_eval >= beta
    {
        let prev_ep = ctx.pos.make_null_move();
        let score = -alpha_beta(ctx, depth - 1 - r, ply + 1, -beta, -beta + 1, NO_MOVE);
        ctx.pos.unmake_null_move(prev_ep);

        if score >= beta {
            if depth >= 8 {
                let verify = alpha_beta(ctx, depth - r, ply, beta - 1, beta, prev_move);
                if verify >= beta {
                    return beta;
                }
            } else {
                return beta;
            }
        } else {
            ctx.danger_hash.store(signature, true, false);
        }
    }

    // Internal iterative deepening: without a hash move to try first, a
    // shallow search populates one (via the TT store below) before the
    // real move loop pays the ordering cost of not having it.
    if hash_move.is_none() && depth >= 4 && !in_check {
        alpha_beta(ctx, depth - 2, ply, alpha, beta, prev_move);
        if let Some(probe) = ctx.tt.probe(signature) {
            hash_move = probe.best_move;
        }
    }

    let futility_prune = !in_check && depth <= 2 && static_eval + 120 * depth <= alpha;

    let mut list = if in_check {
        movegen::generate_evasions(&ctx.pos)
    } else {
        movegen::generate_all(&ctx.pos)
    };
    if list.is_empty() {
        return if in_check { -MATE_VALUE + ply as i32 } else { 0 };
    }

    let mut best_score = -MATE_VALUE;
    let mut best_move = NO_MOVE;
    let mut move_count = 0usize;
    let mut hash_move_already_tried = false;

    // Stage 1: the hash move is tried on its own before the rest of the
    // list is scored and sorted, so a cutoff here (the common case when
    // the table already knows the best move) skips ordering entirely.
    if !hash_move.is_none() {
        if let Some(idx) = (0..list.len()).find(|&idx| list.get(idx).is_same(hash_move)) {
            let mv = list.get(idx);
            let gives_check = movegen::would_give_check(&ctx.pos, mv, us.flip());
            let is_pawn_move = mv.moved().piece_type() == Some(crate::types::PieceType::Pawn);

            if let Ok(undo) = ctx.pos.make_move(mv) {
                hash_move_already_tried = true;
                move_count += 1;
                ctx.history
                    .push(if mv.is_capture() || is_pawn_move { None } else { Some(signature) });
                ctx.path_from_root.push(mv);

                let ext = extensions::extension(&ctx.pos, mv, gives_check, prev_move, static_eval, root_score_here, depth);
                let new_depth = depth - 1 + ext;
                let score = -alpha_beta(ctx, new_depth, ply + 1, -beta, -alpha, mv);

                ctx.path_from_root.pop();
                ctx.history.pop();
                ctx.pos.unmake_move(mv, &undo);

                if ctx.stop.is_stopped() {
                    return alpha;
                }

                best_score = score;
                best_move = mv;
                if score > alpha {
                    alpha = score;
                }
                if alpha >= beta {
                    ctx.orderer.record_cutoff(mv, prev_move, ply, depth);
                    ctx.tt.store(
                        signature,
                        best_move,
                        depth.clamp(0, i8::MAX as i32) as i8,
                        Bound::Lower,
                        to_tt_value(best_score, ply),
                    );
                    return best_score;
                }
            }
        }
    }

    ordering::score_moves(&ctx.pos, &mut list, hash_move, ply, prev_move, &ctx.orderer);

    let mut i = 0;

    while let Some(mv) = list.select_best(i) {
        i += 1;
        if hash_move_already_tried && mv.is_same(hash_move) {
            continue;
        }
        let gives_check = movegen::would_give_check(&ctx.pos, mv, us.flip());

        if futility_prune
            && move_count > 0
            && mv.is_quiet()
            && !gives_check
            && !mv.is_killer_mate()
        {
            continue;
        }

        let is_pawn_move = mv.moved().piece_type() == Some(crate::types::PieceType::Pawn);
        let Ok(undo) = ctx.pos.make_move(mv) else {
            continue;
        };
        move_count += 1;
        ctx.history
            .push(if mv.is_capture() || is_pawn_move { None } else { Some(signature) });
        ctx.path_from_root.push(mv);

        let ext = extensions::extension(&ctx.pos, mv, gives_check, prev_move, static_eval, root_score_here, depth);
        let new_depth = depth - 1 + ext;

        let history_score = list.score(i - 1);
        let reduction = if mv.is_quiet() && !gives_check && ext == 0 {
            reductions::reduction(depth, move_count - 1, history_score, in_check)
        } else {
            0
        };

        let score = if move_count == 1 {
            -alpha_beta(ctx, new_depth, ply + 1, -beta, -alpha, mv)
        } else {
            let reduced = new_depth - reduction;
            let mut s = -alpha_beta(ctx, reduced, ply + 1, -alpha - 1, -alpha, mv);
            if s > alpha && reduction > 0 {
                s = -alpha_beta(ctx, new_depth, ply + 1, -alpha - 1, -alpha, mv);
            }
            if s > alpha && s < beta {
                s = -alpha_beta(ctx, new_depth, ply + 1, -beta, -alpha, mv);
            }
            s
        };

        ctx.path_from_root.pop();
        ctx.history.pop();
        ctx.pos.unmake_move(mv, &undo);

        if ctx.stop.is_stopped() {
            return alpha;
        }

        if score > best_score {
            best_score = score;
            best_move = mv;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            ctx.orderer.record_cutoff(mv, prev_move, ply, depth);
            break;
        }

        // Interior split: once at least two moves have been searched here
        // without a fail-high, the rest of the list is handed to the pool
        // as a single split rather than searched one at a time. Only one
        // split per node -- `ctx.split_pool` is consulted again at a
        // genuinely fresh node, not re-entered after the first attempt.
        if move_count >= 2
            && !futility_prune
            && depth >= MIN_SPLIT_DEPTH
            && list.len().saturating_sub(i) > 3
        {
            if let Some(pool) = ctx.split_pool.clone() {
                if pool.helper_count() > 0 && !ctx.splits.any_ancestor_terminated() {
                    let remaining: Vec<Move> = (i..list.len()).map(|k| list.get(k)).collect();
                    let split = pool.split(remaining, depth, ply, alpha, beta, ctx.path_from_root.clone());
                    ctx.splits.push(Arc::clone(&split));

                    while let Some((_, smv)) = split.get_next_move() {
                        if split.is_terminated() || ctx.stop.is_stopped() {
                            break;
                        }
                        let s_gives_check = movegen::would_give_check(&ctx.pos, smv, us.flip());
                        let s_is_pawn_move = smv.moved().piece_type() == Some(crate::types::PieceType::Pawn);
                        let Ok(s_undo) = ctx.pos.make_move(smv) else {
                            continue;
                        };
                        move_count += 1;
                        ctx.history
                            .push(if smv.is_capture() || s_is_pawn_move { None } else { Some(signature) });
                        ctx.path_from_root.push(smv);

                        let s_ext = extensions::extension(&ctx.pos, smv, s_gives_check, prev_move, static_eval, root_score_here, depth);
                        let s_new_depth = depth - 1 + s_ext;
                        let s_score = -alpha_beta(ctx, s_new_depth, ply + 1, -split.beta, -split.alpha(), smv);

                        ctx.path_from_root.pop();
                        ctx.history.pop();
                        ctx.pos.unmake_move(smv, &s_undo);

                        if split.update(smv, s_score) {
                            break;
                        }
                    }
                    pool.join(&split);
                    ctx.splits.pop();

                    let (split_best_score, split_best_move) = split.best();
                    if split_best_score > best_score {
                        best_score = split_best_score;
                        best_move = split_best_move;
                    }
                    if split_best_score > alpha {
                        alpha = split_best_score;
                    }
                    if alpha >= beta {
                        ctx.orderer.record_cutoff(best_move, prev_move, ply, depth);
                    }
                    break;
                }
            }
        }
    }

    if move_count == 0 {
        return if in_check { -MATE_VALUE + ply as i32 } else { 0 };
    }

    let bound = if best_score <= orig_alpha {
        Bound::Upper
    } else if best_score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    ctx.tt.store(
        signature,
        best_move,
        depth.clamp(0, i8::MAX as i32) as i8,
        bound,
        to_tt_value(best_score, ply),
    );

    best_score
}

/// Scores every legal root move with a shallow search and returns them
/// sorted best-first; used by the engine driver to report a multi-PV-ish
/// move list and by tests that want root move ordering without running a
/// full iterative-deepening search.
pub fn order_root_moves(ctx: &mut SearchContext) -> MoveList {
    let mut list = movegen::generate_all(&ctx.pos);
    ordering::score_moves(&ctx.pos, &mut list, NO_MOVE, 0, NO_MOVE, &ctx.orderer);
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egtb::NoTablebase;
    use crate::eval::MaterialPst;

    fn fresh_ctx(pos: Position, tt: &TranspositionTable) -> SearchContext<'_> {
        SearchContext::new(pos, tt, &MaterialPst, &NoTablebase, StopFlag::new())
    }

    #[test]
    fn finds_mate_in_one() {
        // Re1-e8# is a textbook back-rank mate: the black king on h8 is
        // boxed in by its own pawns on g7/h7, and the rook covers g8 as
        // it delivers check.
        let pos = Position::from_fen("7k/6pp/8/8/8/8/8/4R1K1 w - - 0 1").unwrap();
        let tt = TranspositionTable::new(1);
        let mut ctx = fresh_ctx(pos, &tt);
        let result = iterative_deepening(&mut ctx, 4);
        assert!(result.score >= MATE_VALUE - MAX_PLY as i32);
        assert_eq!(result.best_move.to_sq(), crate::geometry::Square::from_algebraic("e8").unwrap());
    }

    #[test]
    fn prefers_capturing_a_hanging_queen() {
        let pos = Position::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let tt = TranspositionTable::new(1);
        let mut ctx = fresh_ctx(pos, &tt);
        let result = iterative_deepening(&mut ctx, 3);
        assert_eq!(result.best_move.to_sq(), crate::geometry::Square::from_algebraic("d5").unwrap());
    }

    #[test]
    fn stalemate_is_scored_as_a_draw() {
        let pos = Position::from_fen("7k/8/6QK/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(movegen::generate_all(&pos).is_empty());
        assert!(!pos.is_in_check());
        let tt = TranspositionTable::new(1);
        let mut ctx = fresh_ctx(pos, &tt);
        let score = alpha_beta(&mut ctx, 1, 0, -MATE_VALUE, MATE_VALUE, NO_MOVE);
        assert_eq!(score, 0);
    }

    fn probe(depth: i8, bound: Bound, value: i32) -> crate::tt::ProbeResult {
        crate::tt::ProbeResult {
            best_move: NO_MOVE,
            depth,
            bound,
            value,
        }
    }

    #[test]
    fn avoid_null_fires_when_a_deep_enough_entry_already_reports_a_low_score() {
        assert!(reports_avoid_null(&probe(10, Bound::Upper, -50), 8, 0, 0));
        assert!(reports_avoid_null(&probe(10, Bound::Exact, -50), 8, 0, 0));
    }

    #[test]
    fn avoid_null_does_not_fire_from_a_shallower_entry() {
        assert!(!reports_avoid_null(&probe(4, Bound::Upper, -50), 8, 0, 0));
    }

    #[test]
    fn avoid_null_does_not_fire_from_a_lower_bound_entry() {
        assert!(!reports_avoid_null(&probe(10, Bound::Lower, -50), 8, 0, 0));
    }

    #[test]
    fn avoid_null_does_not_fire_when_the_stored_score_is_not_below_beta() {
        assert!(!reports_avoid_null(&probe(10, Bound::Upper, 500), 8, 0, 0));
    }

    #[test]
    fn interior_split_resolves_without_deadlock_and_returns_a_sane_score() {
        // Mirrors the root-split closure `Engine::go` builds: a helper
        // replays `path_from_root` from a fixed FEN into its own position,
        // entirely independent of the initiator's `ctx.pos`. With a deep
        // enough node and more than three untried siblings remaining after
        // the first couple of moves, `alpha_beta` hands the rest to this
        // pool instead of exhausting the move list sequentially.
        const ROOT_FEN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let tt = Arc::new(TranspositionTable::new(1));

        let search_fn: crate::parallel::SplitSearchFn = {
            let tt = Arc::clone(&tt);
            Arc::new(move |split: &crate::parallel::SplitPoint, mv: Move| -> i32 {
                let Ok(mut pos) = Position::from_fen(ROOT_FEN) else {
                    return 0;
                };
                for &path_mv in &split.path_from_root {
                    if pos.make_move(path_mv).is_err() {
                        return 0;
                    }
                }
                let mut sub_ctx = SearchContext::new(pos, &tt, &MaterialPst, &NoTablebase, StopFlag::new());
                let Ok(undo) = sub_ctx.pos.make_move(mv) else {
                    return i32::MIN;
                };
                let score = -alpha_beta(&mut sub_ctx, split.depth - 1, split.ply + 1, -split.beta, -split.alpha(), mv);
                sub_ctx.pos.unmake_move(mv, &undo);
                score
            })
        };
        let pool = Arc::new(SplitPool::new(1, search_fn));

        let pos = Position::from_fen(ROOT_FEN).unwrap();
        let mut ctx = SearchContext::new(pos, &tt, &MaterialPst, &NoTablebase, StopFlag::new());
        ctx.split_pool = Some(pool);

        let score = alpha_beta(&mut ctx, 6, 0, -MATE_VALUE, MATE_VALUE, NO_MOVE);
        assert!(score.abs() < MATE_VALUE);
    }

    #[test]
    fn zero_window_is_required_for_null_move_pruning_to_fire() {
        // A position where the side to move is up a rook with the queens
        // off: at a full window (beta - alpha > 1), null-move pruning must
        // stay off, so the search still has to find the actual best move
        // rather than shortcut on a static-eval-beats-beta test.
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let tt = TranspositionTable::new(1);
        let mut ctx = fresh_ctx(pos, &tt);
        let full_window = alpha_beta(&mut ctx, 4, 0, -MATE_VALUE, MATE_VALUE, NO_MOVE);
        assert!(full_window > 0);
    }
}
