//! Static Exchange Evaluation: the net material result of an exchange
//! sequence on one square, simulated by repeatedly bringing in the least
//! valuable attacker.
//!
//! Operates on a scratch copy of the board rather than the live
//! `Position`, so it never needs make/unmake and never touches piece
//! lists or signatures.

use crate::chess_move::Move;
use crate::geometry::{self, Square};
use crate::position::Position;
use crate::types::{Color, Piece, PieceType};

/// Net centipawn result of playing out the full capture sequence on
/// `mv.to_sq()` starting with `mv`. Positive means the side initiating
/// the capture comes out ahead after all profitable recaptures.
#[must_use]
pub fn see(pos: &Position, mv: Move) -> i32 {
    let target = mv.to_sq();
    let mut board = [Piece::NONE; 128];
    for sq in geometry::all_squares() {
        board[sq.index()] = pos.piece_at(sq);
    }

    let mover_color = mv.moved().color().unwrap();
    let initial_attacker_type = if mv.is_promotion() {
        mv.promoted().piece_type().unwrap()
    } else {
        mv.moved().piece_type().unwrap()
    };

    let mut gain = [0i32; 32];
    gain[0] = capture_value(mv);

    board[mv.from_sq().index()] = Piece::NONE;
    board[target.index()] = Piece::new(initial_attacker_type, mover_color);

    let mut side = mover_color.flip();
    let mut piece_value = initial_attacker_type.value();
    let mut depth = 0usize;

    loop {
        let Some((attacker_sq, attacker_type)) = least_valuable_attacker(&board, target, side)
        else {
            break;
        };
        depth += 1;
        if depth >= gain.len() {
            break;
        }
        gain[depth] = piece_value - gain[depth - 1];
        board[attacker_sq.index()] = Piece::NONE;
        board[target.index()] = Piece::new(attacker_type, side);
        piece_value = attacker_type.value();
        side = side.flip();
    }

    while depth > 0 {
        gain[depth - 1] = -(-gain[depth - 1]).max(gain[depth]);
        depth -= 1;
    }
    gain[0]
}

fn capture_value(mv: Move) -> i32 {
    let mut value = mv.captured().piece_type().map_or(0, PieceType::value);
    if mv.is_promotion() {
        value += mv.promoted().piece_type().unwrap().value() - PieceType::Pawn.value();
    }
    value
}

fn least_valuable_attacker(
    board: &[Piece; 128],
    target: Square,
    color: Color,
) -> Option<(Square, PieceType)> {
    attackers(board, target, color).into_iter().min_by_key(|&(_, pt)| pt.value())
}

fn attackers(board: &[Piece; 128], target: Square, color: Color) -> Vec<(Square, PieceType)> {
    let mut found = Vec::with_capacity(4);
    for delta in geometry::pawn_capture_deltas(color) {
        let from = target.offset(-delta);
        if from.is_on_board() && board[from.index()] == Piece::new(PieceType::Pawn, color) {
            found.push((from, PieceType::Pawn));
        }
    }
    for delta in geometry::KNIGHT_DELTAS {
        let from = target.offset(delta);
        if from.is_on_board() && board[from.index()] == Piece::new(PieceType::Knight, color) {
            found.push((from, PieceType::Knight));
        }
    }
    for delta in geometry::KING_DELTAS {
        let from = target.offset(delta);
        if from.is_on_board() && board[from.index()] == Piece::new(PieceType::King, color) {
            found.push((from, PieceType::King));
        }
    }
    for &(step, diagonal) in &geometry::RAY_DIRECTIONS {
        let mut cur = target.offset(step);
        while cur.is_on_board() {
            let occ = board[cur.index()];
            if occ.is_some() {
                if occ.color() == Some(color) {
                    let pt = occ.piece_type().unwrap();
                    let slides = if diagonal {
                        matches!(pt, PieceType::Bishop | PieceType::Queen)
                    } else {
                        matches!(pt, PieceType::Rook | PieceType::Queen)
                    };
                    if slides {
                        found.push((cur, pt));
                    }
                }
                break;
            }
            cur = cur.offset(step);
        }
    }
    found
}

/// Convenience: is this capture at worst equal material (SEE >= 0)? Used
/// by move ordering to split "winning/even" from "losing" captures.
#[must_use]
pub fn is_winning_or_even(pos: &Position, mv: Move) -> bool {
    !mv.is_capture_or_promotion() || see(pos, mv) >= 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_move::flags;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn simple_pawn_takes_pawn_with_no_recapture_wins_a_pawn() {
        let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mv = Move::new(
            sq("e4"),
            sq("d5"),
            Piece::new(PieceType::Pawn, Color::White),
            Piece::new(PieceType::Pawn, Color::Black),
            Piece::NONE,
            0,
        );
        assert_eq!(see(&pos, mv), PieceType::Pawn.value());
    }

    #[test]
    fn losing_the_exchange_is_negative() {
        // White queen takes a pawn defended by a black knight: loses the queen
        // for a pawn.
        let pos = Position::from_fen("4k3/8/5n2/3p4/8/8/8/3QK3 w - - 0 1").unwrap();
        let mv = Move::new(
            sq("d1"),
            sq("d5"),
            Piece::new(PieceType::Queen, Color::White),
            Piece::new(PieceType::Pawn, Color::Black),
            Piece::NONE,
            0,
        );
        assert!(see(&pos, mv) < 0);
    }

    #[test]
    fn xray_attacker_behind_the_first_defender_is_found() {
        // Rook takes pawn; pawn defended by a rook, itself backed by a queen
        // on the same file. After RxP RxR, the queen recaptures.
        let pos =
            Position::from_fen("4k3/8/8/8/3p4/3r4/8/3RQ1K1 w - - 0 1").unwrap();
        let mv = Move::new(
            sq("d1"),
            sq("d4"),
            Piece::new(PieceType::Rook, Color::White),
            Piece::new(PieceType::Pawn, Color::Black),
            Piece::NONE,
            0,
        );
        // R x p, r x R, Q defends further -- but white has no piece behind
        // to recapture, so white ends up down a rook for a pawn.
        assert!(see(&pos, mv) < 0);
    }

    #[test]
    fn promotion_capture_values_the_promoted_piece() {
        let pos = Position::from_fen("3n1k2/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = Move::new(
            sq("e7"),
            sq("d8"),
            Piece::new(PieceType::Pawn, Color::White),
            Piece::new(PieceType::Knight, Color::Black),
            Piece::new(PieceType::Queen, Color::White),
            flags::SPECIAL,
        );
        let gain = see(&pos, mv);
        assert_eq!(
            gain,
            PieceType::Knight.value() + PieceType::Queen.value() - PieceType::Pawn.value()
        );
    }
}
