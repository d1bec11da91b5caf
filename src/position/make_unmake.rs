//! Make/unmake move application.
//!
//! `make_move` mutates the position in place and returns an `Unmake`
//! token capturing exactly what `unmake_move` needs to restore the prior
//! state; no second position is ever allocated. A move that leaves the
//! mover's own king in check is rejected: `make_move` unwinds itself and
//! returns `Err(())`, matching `MakeUserMove`'s "illegal, nothing
//! happened" contract from the reference engine.

use super::Position;
use crate::chess_move::Move;
use crate::geometry::{self, Square};
use crate::types::{CastleRights, Color, Piece, PieceType};

/// A sentinel value callers can use to represent "this branch failed
/// legality" in contexts that want a plain `i32`, such as a move-making
/// loop in search that scores illegal moves out of contention instead of
/// propagating a `Result`.
pub const LEGALITY_FAILURE_VALUE: i32 = i32::MIN;

/// Everything needed to reverse one `make_move` call.
#[derive(Clone, Copy)]
pub struct Unmake {
    captured: Piece,
    capture_square: Square,
    prev_castling: CastleRights,
    prev_ep_square: Option<Square>,
    prev_halfmove_clock: u32,
    prev_fullmove_number: u32,
    prev_has_castled: bool,
    mover: Color,
}

pub fn make_move(pos: &mut Position, mv: Move) -> Result<Unmake, ()> {
    let mover = pos.side_to_move();
    let from = mv.from_sq();
    let to = mv.to_sq();

    let prev_castling = pos.castling();
    let prev_ep_square = pos.ep_square();
    let prev_halfmove_clock = pos.halfmove_clock();
    let prev_fullmove_number = pos.fullmove_number();
    let prev_has_castled = pos.has_castled(mover);

    let is_pawn_move = mv.moved().piece_type() == Some(PieceType::Pawn);
    let mut captured = Piece::NONE;
    let mut capture_square = to;

    if mv.is_castle() {
        do_castle(pos, mover, from, to);
    } else if mv.is_en_passant() {
        capture_square = to.offset(-geometry::pawn_push_delta(mover));
        captured = pos.remove_piece(capture_square);
        pos.slide_piece(from, to);
    } else if mv.is_promotion() {
        if mv.is_capture() {
            captured = pos.remove_piece(to);
        }
        pos.remove_piece(from);
        pos.add_piece(to, mv.promoted());
    } else {
        if mv.is_capture() {
            captured = pos.remove_piece(to);
        }
        pos.slide_piece(from, to);
    }

    if mv.is_double_pawn_push() {
        pos.set_ep_square(Some(to.offset(-geometry::pawn_push_delta(mover))));
    } else {
        pos.set_ep_square(None);
    }

    update_castling_rights(pos, mover, from, to, mv.moved().piece_type());

    if is_pawn_move || captured.is_some() {
        *pos.halfmove_clock_mut() = 0;
    } else {
        *pos.halfmove_clock_mut() += 1;
    }
    if mover == Color::Black {
        *pos.fullmove_number_mut() += 1;
    }

    pos.flip_side_to_move();

    let undo = Unmake {
        captured,
        capture_square,
        prev_castling,
        prev_ep_square,
        prev_halfmove_clock,
        prev_fullmove_number,
        prev_has_castled,
        mover,
    };

    if pos.is_square_attacked(pos.king_square(mover), mover.flip()) {
        unmake_move(pos, mv, &undo);
        return Err(());
    }

    Ok(undo)
}

pub fn unmake_move(pos: &mut Position, mv: Move, undo: &Unmake) {
    pos.flip_side_to_move();

    let from = mv.from_sq();
    let to = mv.to_sq();
    let mover = undo.mover;

    if mv.is_castle() {
        undo_castle(pos, mover, from, to);
    } else if mv.is_promotion() {
        pos.remove_piece(to);
        pos.add_piece(from, mv.moved());
        if undo.captured.is_some() {
            pos.add_piece(undo.capture_square, undo.captured);
        }
    } else {
        pos.slide_piece(to, from);
        if undo.captured.is_some() {
            pos.add_piece(undo.capture_square, undo.captured);
        }
    }

    pos.set_castling(undo.prev_castling);
    pos.set_ep_square(undo.prev_ep_square);
    *pos.halfmove_clock_mut() = undo.prev_halfmove_clock;
    *pos.fullmove_number_mut() = undo.prev_fullmove_number;
    pos.set_has_castled(mover, undo.prev_has_castled);
}

fn do_castle(pos: &mut Position, color: Color, king_from: Square, king_to: Square) {
    let rank = king_from.rank();
    let kingside = king_to.file() == 6;
    let (rook_from_file, rook_to_file) = if kingside { (7, 5) } else { (0, 3) };
    let rook_from = Square::from_file_rank(rook_from_file, rank);
    let rook_to = Square::from_file_rank(rook_to_file, rank);
    pos.slide_piece(king_from, king_to);
    pos.slide_piece(rook_from, rook_to);
    pos.set_has_castled(color, true);
}

fn undo_castle(pos: &mut Position, color: Color, king_from: Square, king_to: Square) {
    let rank = king_from.rank();
    let kingside = king_to.file() == 6;
    let (rook_from_file, rook_to_file) = if kingside { (7, 5) } else { (0, 3) };
    let rook_from = Square::from_file_rank(rook_from_file, rank);
    let rook_to = Square::from_file_rank(rook_to_file, rank);
    pos.slide_piece(king_to, king_from);
    pos.slide_piece(rook_to, rook_from);
    let _ = color;
}

/// Clears castling rights touched by this move: the mover's own rights if
/// a king moved, either side's rights if a rook left or a rook was
/// captured on its home square.
fn update_castling_rights(
    pos: &mut Position,
    mover: Color,
    from: Square,
    to: Square,
    moved_type: Option<PieceType>,
) {
    let mut rights = pos.castling();
    if rights.0 == 0 {
        return;
    }
    if moved_type == Some(PieceType::King) {
        rights.clear_color(mover);
    }
    clear_rook_right_if_home(&mut rights, from);
    clear_rook_right_if_home(&mut rights, to);
    pos.set_castling(rights);
}

fn clear_rook_right_if_home(rights: &mut CastleRights, sq: Square) {
    match sq {
        s if s == Square::from_file_rank(0, 0) => rights.clear(CastleRights::WHITE_LONG),
        s if s == Square::from_file_rank(7, 0) => rights.clear(CastleRights::WHITE_SHORT),
        s if s == Square::from_file_rank(0, 7) => rights.clear(CastleRights::BLACK_LONG),
        s if s == Square::from_file_rank(7, 7) => rights.clear(CastleRights::BLACK_SHORT),
        _ => {}
    }
}
