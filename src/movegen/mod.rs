//! Pseudo-legal move generation.
//!
//! Moves are filtered for legality by `Position::make_move`'s own-king
//! check, not here; `generate_all`/`generate_evasions` only guarantee the
//! move is pseudo-legal (reaches a square the piece could reach, subject
//! to blockers, but not checked against self-exposure). Generation is
//! parameterized by `GenMode` so quiescence search can ask for captures
//! and promotions only, with or without checks.

use crate::chess_move::{flags, Move, MoveList};
use crate::geometry::{self, Square};
use crate::position::Position;
use crate::types::{Color, Piece, PieceType};

/// What subset of pseudo-legal moves to generate. Quiescence search uses
/// `CapturesAndPromotions` (or `..AndChecks` near the horizon); the main
/// search tree uses `All` and, when the side to move is in check,
/// `Evasions`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GenMode {
    All,
    Evasions,
    CapturesAndPromotions,
    CapturesPromotionsAndChecks,
}

pub fn generate(pos: &Position, mode: GenMode) -> MoveList {
    match mode {
        GenMode::All => generate_all(pos),
        GenMode::Evasions => generate_evasions(pos),
        GenMode::CapturesAndPromotions => generate_captures_and_promotions(pos, false),
        GenMode::CapturesPromotionsAndChecks => generate_captures_and_promotions(pos, true),
    }
}

/// All pseudo-legal moves for the side to move.
pub fn generate_all(pos: &Position) -> MoveList {
    let mut list = MoveList::new();
    let us = pos.side_to_move();
    generate_pawn_moves(pos, us, &mut list, false);
    generate_piece_moves(pos, us, &mut list, false);
    generate_castles(pos, us, &mut list);
    list
}

/// Moves for a side to move that is in check: king moves, captures of the
/// checker, and (for a single non-knight/pawn checker) blocks on the ray
/// between checker and king. Still only pseudo-legal; `make_move` is the
/// final arbiter.
pub fn generate_evasions(pos: &Position) -> MoveList {
    let mut list = MoveList::new();
    let us = pos.side_to_move();
    let them = us.flip();
    let king_sq = pos.king_square(us);

    generate_king_moves(pos, us, king_sq, &mut list);

    let checkers = find_checkers(pos, king_sq, them);
    if checkers.len() != 1 {
        // Double check: only king moves are legal evasions.
        return list;
    }
    let checker = checkers[0];
    let block_squares = blocking_squares(king_sq, checker, pos);

    generate_pawn_moves_restricted(pos, us, &mut list, &block_squares, checker);
    generate_non_king_piece_moves_restricted(pos, us, &mut list, &block_squares, checker);

    list
}

fn generate_captures_and_promotions(pos: &Position, include_checks: bool) -> MoveList {
    let mut list = MoveList::new();
    let us = pos.side_to_move();
    generate_pawn_moves(pos, us, &mut list, true);
    generate_piece_moves(pos, us, &mut list, true);
    if include_checks {
        let mut quiet_checks = MoveList::new();
        generate_pawn_moves(pos, us, &mut quiet_checks, false);
        generate_piece_moves(pos, us, &mut quiet_checks, false);
        let them = us.flip();
        for mv in quiet_checks.iter() {
            if mv.is_quiet() && would_give_check(pos, mv, them) {
                list.push(mv.with_flag(mv.flag_bits() | flags::CHECKING));
            }
        }
    }
    list
}

fn find_checkers(pos: &Position, king_sq: Square, by: Color) -> Vec<Square> {
    let mut checkers = Vec::with_capacity(2);
    for delta in geometry::pawn_capture_deltas(by) {
        let from = king_sq.offset(-delta);
        if from.is_on_board() && pos.piece_at(from) == Piece::new(PieceType::Pawn, by) {
            checkers.push(from);
        }
    }
    for delta in geometry::KNIGHT_DELTAS {
        let from = king_sq.offset(delta);
        if from.is_on_board() && pos.piece_at(from) == Piece::new(PieceType::Knight, by) {
            checkers.push(from);
        }
    }
    for &(step, diagonal) in &geometry::RAY_DIRECTIONS {
        let mut cur = king_sq.offset(step);
        while cur.is_on_board() {
            let occ = pos.piece_at(cur);
            if occ.is_some() {
                if occ.color() == Some(by) {
                    let pt = occ.piece_type().unwrap();
                    let slides = if diagonal {
                        matches!(pt, PieceType::Bishop | PieceType::Queen)
                    } else {
                        matches!(pt, PieceType::Rook | PieceType::Queen)
                    };
                    if slides {
                        checkers.push(cur);
                    }
                }
                break;
            }
            cur = cur.offset(step);
        }
    }
    checkers
}

/// Squares a non-king piece could move to that resolve a single check:
/// capturing the checker, or interposing on the ray between checker and
/// king (empty for a knight/pawn checker, which cannot be blocked).
fn blocking_squares(king_sq: Square, checker: Square, _pos: &Position) -> Vec<Square> {
    let mut squares = vec![checker];
    if let Some(info) = geometry::ray_between(king_sq, checker) {
        let mut cur = king_sq.offset(info.step);
        while cur != checker {
            squares.push(cur);
            cur = cur.offset(info.step);
        }
    }
    squares
}

fn generate_king_moves(pos: &Position, us: Color, king_sq: Square, list: &mut MoveList) {
    let moved = Piece::new(PieceType::King, us);
    for delta in geometry::KING_DELTAS {
        let to = king_sq.offset(delta);
        if !to.is_on_board() {
            continue;
        }
        let occ = pos.piece_at(to);
        if occ.is_some() && occ.color() == Some(us) {
            continue;
        }
        if pos.is_square_attacked(to, us.flip()) {
            continue;
        }
        list.push(Move::new(king_sq, to, moved, occ, Piece::NONE, 0));
    }
}

fn generate_castles(pos: &Position, us: Color, list: &mut MoveList) {
    if pos.is_in_check() {
        return;
    }
    let king_sq = pos.king_square(us);
    let rank = king_sq.rank();
    let them = us.flip();
    let moved = Piece::new(PieceType::King, us);

    if pos.castling().short(us) {
        let f = Square::from_file_rank(5, rank);
        let g = Square::from_file_rank(6, rank);
        if pos.piece_at(f).is_none()
            && pos.piece_at(g).is_none()
            && !pos.is_square_attacked(f, them)
            && !pos.is_square_attacked(g, them)
        {
            list.push(Move::new(king_sq, g, moved, Piece::NONE, Piece::NONE, flags::SPECIAL));
        }
    }
    if pos.castling().long(us) {
        let d = Square::from_file_rank(3, rank);
        let c = Square::from_file_rank(2, rank);
        let b = Square::from_file_rank(1, rank);
        if pos.piece_at(d).is_none()
            && pos.piece_at(c).is_none()
            && pos.piece_at(b).is_none()
            && !pos.is_square_attacked(d, them)
            && !pos.is_square_attacked(c, them)
        {
            list.push(Move::new(king_sq, c, moved, Piece::NONE, Piece::NONE, flags::SPECIAL));
        }
    }
}

const PROMOTION_PIECES: [PieceType; 4] =
    [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

fn generate_pawn_moves(pos: &Position, us: Color, list: &mut MoveList, captures_only: bool) {
    generate_pawn_moves_inner(pos, us, list, captures_only, None);
}

fn generate_pawn_moves_restricted(
    pos: &Position,
    us: Color,
    list: &mut MoveList,
    block_squares: &[Square],
    _checker: Square,
) {
    generate_pawn_moves_inner(pos, us, list, false, Some(block_squares));
}

fn generate_pawn_moves_inner(
    pos: &Position,
    us: Color,
    list: &mut MoveList,
    captures_only: bool,
    restrict_to: Option<&[Square]>,
) {
    let moved = Piece::new(PieceType::Pawn, us);
    let push = geometry::pawn_push_delta(us);
    let promo_rank = us.promotion_rank();

    for &from in pos.pawn_squares(us) {
        let one = from.offset(push);
        if !captures_only && one.is_on_board() && pos.piece_at(one).is_none() {
            if restrict_to.map_or(true, |sq| sq.contains(&one)) {
                push_pawn_move(list, from, one, moved, Piece::NONE, promo_rank);
            }
            let start_rank = if us == Color::White { 1 } else { 6 };
            if from.rank() == start_rank {
                let two = one.offset(push);
                if two.is_on_board()
                    && pos.piece_at(two).is_none()
                    && restrict_to.map_or(true, |sq| sq.contains(&two))
                {
                    list.push(Move::new(from, two, moved, Piece::NONE, Piece::NONE, flags::SPECIAL));
                }
            }
        }

        for delta in geometry::pawn_capture_deltas(us) {
            let to = from.offset(delta);
            if !to.is_on_board() {
                continue;
            }
            let target = pos.piece_at(to);
            if target.is_some() && target.color() == Some(us.flip()) {
                if restrict_to.map_or(true, |sq| sq.contains(&to)) {
                    push_pawn_move(list, from, to, moved, target, promo_rank);
                }
            } else if target.is_none() && pos.ep_square() == Some(to) {
                let captured_pawn_sq = to.offset(-push);
                let allowed = restrict_to.map_or(true, |sq| {
                    sq.contains(&to) || sq.contains(&captured_pawn_sq)
                });
                if allowed {
                    list.push(Move::new(
                        from,
                        to,
                        moved,
                        Piece::new(PieceType::Pawn, us.flip()),
                        Piece::NONE,
                        flags::SPECIAL,
                    ));
                }
            }
        }
    }
}

fn push_pawn_move(
    list: &mut MoveList,
    from: Square,
    to: Square,
    moved: Piece,
    captured: Piece,
    promo_rank: u8,
) {
    if to.rank() == promo_rank {
        for &pt in &PROMOTION_PIECES {
            let promoted = Piece::new(pt, moved.color().unwrap());
            list.push(Move::new(from, to, moved, captured, promoted, flags::SPECIAL));
        }
    } else {
        list.push(Move::new(from, to, moved, captured, Piece::NONE, 0));
    }
}

fn generate_piece_moves(pos: &Position, us: Color, list: &mut MoveList, captures_only: bool) {
    generate_piece_moves_inner(pos, us, list, captures_only, None);
}

fn generate_non_king_piece_moves_restricted(
    pos: &Position,
    us: Color,
    list: &mut MoveList,
    block_squares: &[Square],
    _checker: Square,
) {
    generate_piece_moves_inner(pos, us, list, false, Some(block_squares));
}

fn generate_piece_moves_inner(
    pos: &Position,
    us: Color,
    list: &mut MoveList,
    captures_only: bool,
    restrict_to: Option<&[Square]>,
) {
    for &from in pos.non_pawn_squares(us) {
        let piece = pos.piece_at(from);
        let pt = piece.piece_type().unwrap();
        if pt == PieceType::King {
            continue;
        }
        match pt {
            PieceType::Knight => {
                for delta in geometry::KNIGHT_DELTAS {
                    let to = from.offset(delta);
                    try_push(pos, list, from, to, piece, captures_only, restrict_to);
                }
            }
            PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
                let deltas: &[i16] = match pt {
                    PieceType::Bishop => &geometry::BISHOP_DELTAS,
                    PieceType::Rook => &geometry::ROOK_DELTAS,
                    _ => &geometry::QUEEN_DELTAS,
                };
                for &delta in deltas {
                    let mut to = from.offset(delta);
                    while to.is_on_board() {
                        let occ = pos.piece_at(to);
                        if occ.is_some() {
                            if occ.color() == Some(us.flip())
                                && restrict_to.map_or(true, |sq| sq.contains(&to))
                            {
                                list.push(Move::new(from, to, piece, occ, Piece::NONE, 0));
                            }
                            break;
                        }
                        if !captures_only && restrict_to.map_or(true, |sq| sq.contains(&to)) {
                            list.push(Move::new(from, to, piece, Piece::NONE, Piece::NONE, 0));
                        }
                        to = to.offset(delta);
                    }
                }
            }
            _ => unreachable!("pawns and kings are handled separately"),
        }
    }
}

fn try_push(
    pos: &Position,
    list: &mut MoveList,
    from: Square,
    to: Square,
    piece: Piece,
    captures_only: bool,
    restrict_to: Option<&[Square]>,
) {
    if !to.is_on_board() {
        return;
    }
    let occ = pos.piece_at(to);
    if occ.is_some() && occ.color() == Some(piece.color().unwrap()) {
        return;
    }
    if captures_only && occ.is_none() {
        return;
    }
    if let Some(sq) = restrict_to {
        if !sq.contains(&to) {
            return;
        }
    }
    list.push(Move::new(from, to, piece, occ, Piece::NONE, 0));
}

/// True if making `mv` would give check to `them`'s king, computed without
/// actually making the move on the board.
/// Covers direct checks (the moved/promoted piece itself attacks the
/// enemy king from its destination) and discovered checks (a ray piece
/// behind the mover is unmasked by the move).
pub fn would_give_check(pos: &Position, mv: Move, them: Color) -> bool {
    let king_sq = pos.king_square(them);
    let moved_type = if mv.is_promotion() {
        mv.promoted().piece_type().unwrap()
    } else {
        mv.moved().piece_type().unwrap()
    };
    let to = mv.to_sq();
    let from = mv.from_sq();
    let us = mv.moved().color().unwrap();

    let direct = match moved_type {
        PieceType::Pawn => geometry::pawn_capture_deltas(us)
            .iter()
            .any(|&d| to.offset(d) == king_sq),
        PieceType::Knight => geometry::is_knight_move(to, king_sq),
        PieceType::King => false,
        PieceType::Bishop | PieceType::Rook | PieceType::Queen => {
            ray_attacks(pos, to, king_sq, moved_type, Some(from))
        }
    };
    if direct {
        return true;
    }

    // Discovered check: a friendly slider behind `from`, aligned with the
    // king through `from`, that `from` no longer blocks once vacated (and
    // `to` doesn't re-block the same ray).
    if let Some(info) = geometry::ray_between(king_sq, from) {
        let mut cur = king_sq.offset(info.step);
        while cur != from {
            if pos.piece_at(cur).is_some() {
                return false;
            }
            cur = cur.offset(info.step);
        }
        let mut cur = from.offset(info.step);
        while cur.is_on_board() {
            if cur == to {
                return false;
            }
            let occ = pos.piece_at(cur);
            if occ.is_some() {
                if occ.color() == Some(us) {
                    let pt = occ.piece_type().unwrap();
                    let slides = if info.diagonal {
                        matches!(pt, PieceType::Bishop | PieceType::Queen)
                    } else {
                        matches!(pt, PieceType::Rook | PieceType::Queen)
                    };
                    return slides;
                }
                return false;
            }
            cur = cur.offset(info.step);
        }
    }
    false
}

fn ray_attacks(
    pos: &Position,
    from: Square,
    to: Square,
    pt: PieceType,
    ignore: Option<Square>,
) -> bool {
    let info = match geometry::ray_between(from, to) {
        Some(info) => info,
        None => return false,
    };
    let slides = if info.diagonal {
        matches!(pt, PieceType::Bishop | PieceType::Queen)
    } else {
        matches!(pt, PieceType::Rook | PieceType::Queen)
    };
    if !slides {
        return false;
    }
    let mut cur = from.offset(info.step);
    while cur != to {
        if Some(cur) != ignore && pos.piece_at(cur).is_some() {
            return false;
        }
        cur = cur.offset(info.step);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_twenty_moves() {
        let pos = Position::startpos();
        assert_eq!(generate_all(&pos).len(), 20);
    }

    #[test]
    fn evasions_from_single_check_are_limited() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert!(pos.is_in_check());
        let evasions = generate_evasions(&pos);
        assert!(!evasions.is_empty());
        for mv in evasions.iter() {
            let mut p = pos.clone();
            assert!(p.make_move(mv).is_ok());
        }
    }

    #[test]
    fn castle_move_is_generated_when_path_is_clear() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = generate_all(&pos);
        let kingside = Move::new(
            Square::from_algebraic("e1").unwrap(),
            Square::from_algebraic("g1").unwrap(),
            Piece::new(PieceType::King, Color::White),
            Piece::NONE,
            Piece::NONE,
            flags::SPECIAL,
        );
        assert!(moves.contains_same(kingside));
    }

    #[test]
    fn would_give_check_detects_discovered_check() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3KB2 w Q - 0 1").unwrap();
        let mv = Move::new(
            Square::from_algebraic("f1").unwrap(),
            Square::from_algebraic("b5").unwrap(),
            Piece::new(PieceType::Bishop, Color::White),
            Piece::NONE,
            Piece::NONE,
            0,
        );
        // Moving the bishop off the back rank discovers the rook's check
        // only if the rook is aligned with the black king; here it is not
        // (rook on a1, king on e8, different file/rank), so this should
        // be false. Kept as a regression guard on the "no false positive"
        // side of the discovered-check logic.
        assert!(!would_give_check(&pos, mv, Color::Black));
    }
}
