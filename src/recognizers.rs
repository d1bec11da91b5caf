//! Interior-node recognizers: cheap, exact-knowledge shortcuts for a
//! handful of drawn or trivially-won material balances, consulted before
//! falling through to full search or the evaluator. These are not a
//! tablebase -- `egtb.rs` is the seam for that --
//! just pattern matches on the piece lists that are essentially free to
//! check given `Position` already maintains them incrementally.

use crate::position::Position;
use crate::types::{Color, PieceType};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Recognized {
    Draw,
}

/// Returns `Some(Recognized::Draw)` if the position is drawn by
/// insufficient mating material for both sides (K v K, K+N v K, K+B v K,
/// or K+B v K+B with same-colored bishops), independent of the fifty-move
/// counter or repetition history.
#[must_use]
pub fn recognize(pos: &Position) -> Option<Recognized> {
    if pos.pawn_squares(Color::White).is_empty()
        && pos.pawn_squares(Color::Black).is_empty()
        && is_insufficient_material(pos)
    {
        Some(Recognized::Draw)
    } else {
        None
    }
}

fn is_insufficient_material(pos: &Position) -> bool {
    let minor_count = |color: Color| {
        pos.non_pawn_type_count(color, PieceType::Knight)
            + pos.non_pawn_type_count(color, PieceType::Bishop)
    };
    let has_major = |color: Color| {
        pos.non_pawn_type_count(color, PieceType::Rook) > 0
            || pos.non_pawn_type_count(color, PieceType::Queen) > 0
    };

    if has_major(Color::White) || has_major(Color::Black) {
        return false;
    }

    let white_minors = minor_count(Color::White);
    let black_minors = minor_count(Color::Black);

    match (white_minors, black_minors) {
        (0, 0) => true,
        (1, 0) | (0, 1) => true,
        (1, 1) => {
            let white_bishop = pos.non_pawn_type_count(Color::White, PieceType::Bishop) == 1;
            let black_bishop = pos.non_pawn_type_count(Color::Black, PieceType::Bishop) == 1;
            if white_bishop && black_bishop {
                let white_sq = pos
                    .non_pawn_squares(Color::White)
                    .iter()
                    .copied()
                    .find(|&sq| pos.piece_at(sq).piece_type() == Some(PieceType::Bishop))
                    .unwrap();
                let black_sq = pos
                    .non_pawn_squares(Color::Black)
                    .iter()
                    .copied()
                    .find(|&sq| pos.piece_at(sq).piece_type() == Some(PieceType::Bishop))
                    .unwrap();
                white_sq.is_white_square() == black_sq.is_white_square()
            } else {
                false
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_kings_is_a_recognized_draw() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(recognize(&pos), Some(Recognized::Draw));
    }

    #[test]
    fn king_and_knight_vs_king_is_a_recognized_draw() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3NK3 w - - 0 1").unwrap();
        assert_eq!(recognize(&pos), Some(Recognized::Draw));
    }

    #[test]
    fn same_colored_bishops_is_a_recognized_draw() {
        let pos = Position::from_fen("4k3/8/8/8/8/b7/8/2B1K3 w - - 0 1").unwrap();
        assert_eq!(recognize(&pos), Some(Recognized::Draw));
    }

    #[test]
    fn king_and_rook_vs_king_is_not_a_draw() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3RK3 w - - 0 1").unwrap();
        assert_eq!(recognize(&pos), None);
    }

    #[test]
    fn opposite_colored_bishops_is_not_recognized_here() {
        let pos = Position::from_fen("2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
        assert_eq!(recognize(&pos), None);
    }
}
