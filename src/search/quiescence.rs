//! Quiescence search: extends the main search
//! past the nominal horizon along capture/check sequences only, so the
//! static evaluator is never trusted on a position with a hanging piece
//! or an unresolved check still on the board.
//!
//! Three shapes, matched by the position's own state rather than by an
//! explicit parameter: a side in check searches every evasion, with no
//! stand pat, since the position must prove it isn't simply lost; a side
//! whose last null-move probe came back dangerous (`DangerHash`) widens
//! generation to checking moves as well as captures for one extra ply,
//! and *also* has no stand pat -- a position flagged dangerous can't
//! trust its own static eval, so it must search its way to a score
//! rather than assume the threat is already priced in; everything else
//! does the ordinary captures-and-promotions-only sweep with a stand-pat
//! baseline and delta pruning.

use super::SearchContext;
use crate::movegen::{self, GenMode};
use crate::ordering;
use crate::see;
use crate::types::Color;

/// Margin added to a losing-material stand pat before giving up on a
/// capture entirely (delta pruning): if even the best plausible capture
/// can't close the gap to alpha, it isn't worth searching.
const DELTA_MARGIN: i32 = 200;

pub fn quiescence(ctx: &mut SearchContext, mut alpha: i32, beta: i32, ply: usize, q_check_depth: i32) -> i32 {
    ctx.nodes += 1;

    if ctx.stop.is_stopped() {
        return alpha;
    }

    let in_check = ctx.pos.is_in_check();

    if in_check {
        // Every evasion must be tried, there is no stand pat: the side to
        // move must prove it isn't simply lost before its score is trusted.
        let list = movegen::generate_evasions(&ctx.pos);
        return search_every_move(ctx, alpha, beta, ply, q_check_depth, list, true);
    }

    if let Some(crate::recognizers::Recognized::Draw) = crate::recognizers::recognize(&ctx.pos) {
        return 0;
    }

    let danger = ctx
        .danger_hash
        .probe(ctx.pos.signature())
        .map(|(danger, _)| danger)
        .unwrap_or(false);

    if danger && q_check_depth > 0 {
        // In danger: a recent null-move probe came back unable to beat
        // beta, so checking moves are widened in too, and -- like the
        // in-check branch -- there is no stand pat. A position with a
        // piece en prise must actually search its way out, not assume the
        // static eval already accounts for the threat.
        let list = movegen::generate(&ctx.pos, GenMode::CapturesPromotionsAndChecks);
        return search_every_move(ctx, alpha, beta, ply, q_check_depth, list, false);
    }

    // Normal: the ordinary captures-and-promotions-only sweep, with a
    // stand-pat baseline and delta pruning against it.
    let stand_pat = side_relative_eval(ctx);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut list = movegen::generate(&ctx.pos, GenMode::CapturesAndPromotions);
    ordering::score_moves(
        &ctx.pos,
        &mut list,
        crate::chess_move::NO_MOVE,
        ply,
        crate::chess_move::NO_MOVE,
        &ctx.orderer,
    );

    let mut i = 0;
    while let Some(mv) = list.select_best(i) {
        i += 1;
        if mv.is_capture_or_promotion() {
            let gain = see::see(&ctx.pos, mv);
            if gain < 0 {
                continue;
            }
            if stand_pat + gain + DELTA_MARGIN < alpha {
                continue;
            }
        }
        let Ok(undo) = ctx.pos.make_move(mv) else {
            continue;
        };
        ctx.history.push(None);
        let score = -quiescence(ctx, -beta, -alpha, ply + 1, q_check_depth - 1);
        ctx.history.pop();
        ctx.pos.unmake_move(mv, &undo);

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}

/// Shared driver for the two no-stand-pat branches (in check, in danger):
/// every move in `list` is tried and the position is scored purely by what
/// search finds, never by a static eval baseline. `mate_if_no_legal_move`
/// distinguishes genuine check (no legal reply is checkmate) from the
/// danger branch (no further capture/check just means quiescence bottoms
/// out here, exactly as the normal branch would with an empty move list).
fn search_every_move(
    ctx: &mut SearchContext,
    mut alpha: i32,
    beta: i32,
    ply: usize,
    q_check_depth: i32,
    mut list: crate::chess_move::MoveList,
    mate_if_no_legal_move: bool,
) -> i32 {
    ordering::score_moves(
        &ctx.pos,
        &mut list,
        crate::chess_move::NO_MOVE,
        ply,
        crate::chess_move::NO_MOVE,
        &ctx.orderer,
    );
    let mut any_legal = false;
    let mut i = 0;
    while let Some(mv) = list.select_best(i) {
        i += 1;
        let Ok(undo) = ctx.pos.make_move(mv) else {
            continue;
        };
        any_legal = true;
        ctx.history.push(None);
        let score = -quiescence(ctx, -beta, -alpha, ply + 1, q_check_depth - 1);
        ctx.history.pop();
        ctx.pos.unmake_move(mv, &undo);

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    if !any_legal && mate_if_no_legal_move {
        return -super::MATE_VALUE + ply as i32;
    }
    alpha
}

fn side_relative_eval(ctx: &SearchContext) -> i32 {
    let white_eval = ctx.evaluator.evaluate(&ctx.pos);
    if ctx.pos.side_to_move() == Color::White {
        white_eval
    } else {
        -white_eval
    }
}
