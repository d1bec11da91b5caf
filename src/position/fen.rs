//! FEN parsing and serialization.
//!
//! Nominally the structured-input side of the board lives with an outside
//! collaborator (a UI, a PGN reader); in practice the testable properties
//! in this engine's own test suite need FEN round-trips, so a minimal
//! internal parser/writer lives here rather than being assumed away.

use super::Position;
use crate::error::FenError;
use crate::geometry::Square;
use crate::types::{CastleRights, Color, Piece, PieceType};

pub const STARTING_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const DEFAULT_FEN: &str = STARTING_FEN;

pub fn parse(fen: &str) -> Result<Position, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(FenError::TooFewParts { found: parts.len() });
    }

    let mut pos = Position::empty();
    parse_placement(&mut pos, parts[0])?;

    let side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(FenError::InvalidSideToMove {
                found: other.to_string(),
            })
        }
    };
    pos.init_side_to_move(side_to_move);

    let castling = parse_castling(parts[2])?;
    pos.init_castling(castling);

    let ep = parse_ep_square(parts[3])?;
    pos.init_ep_square(ep);

    let halfmove = parts
        .get(4)
        .map(|s| s.parse::<u32>())
        .transpose()
        .map_err(|_| FenError::BadHalfmoveClock(parts[4].to_string()))?
        .unwrap_or(0);
    pos.init_halfmove_clock(halfmove);

    let fullmove = parts
        .get(5)
        .map(|s| s.parse::<u32>())
        .transpose()
        .map_err(|_| FenError::BadFullmoveNumber(parts[5].to_string()))?
        .unwrap_or(1);
    pos.init_fullmove_number(fullmove.max(1));

    pos.finish_init();
    Ok(pos)
}

fn parse_placement(pos: &mut Position, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRank {
            rank: ranks.len(),
            files: 0,
        });
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
                continue;
            }
            if file >= 8 {
                return Err(FenError::InvalidRank {
                    rank: rank as usize,
                    files: file as usize + 1,
                });
            }
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let pt = PieceType::from_char(c).ok_or(FenError::InvalidPiece { c })?;
            let sq = Square::from_file_rank(file, rank);
            pos.add_piece(sq, Piece::new(pt, color));
            file += 1;
        }
        if file != 8 {
            return Err(FenError::InvalidRank {
                rank: rank as usize,
                files: file as usize,
            });
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> Result<CastleRights, FenError> {
    if field == "-" {
        return Ok(CastleRights::NONE);
    }
    let mut bits = 0u8;
    for c in field.chars() {
        bits |= match c {
            'K' => CastleRights::WHITE_SHORT,
            'Q' => CastleRights::WHITE_LONG,
            'k' => CastleRights::BLACK_SHORT,
            'q' => CastleRights::BLACK_LONG,
            other => return Err(FenError::InvalidCastling { c: other }),
        };
    }
    Ok(CastleRights(bits))
}

fn parse_ep_square(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    Square::from_algebraic(field)
        .map(Some)
        .ok_or_else(|| FenError::InvalidEnPassant {
            found: field.to_string(),
        })
}

pub fn write(pos: &Position) -> String {
    let mut out = String::new();
    for rank_from_top in 0..8u8 {
        let rank = 7 - rank_from_top;
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            let sq = Square::from_file_rank(file, rank);
            let piece = pos.piece_at(sq);
            if piece.is_none() {
                empty_run += 1;
                continue;
            }
            if empty_run > 0 {
                out.push_str(&empty_run.to_string());
                empty_run = 0;
            }
            let pt = piece.piece_type().unwrap();
            let ch = pt.to_char();
            out.push(if piece.color() == Some(Color::White) {
                ch.to_ascii_uppercase()
            } else {
                ch
            });
        }
        if empty_run > 0 {
            out.push_str(&empty_run.to_string());
        }
        if rank_from_top != 7 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(if pos.side_to_move() == Color::White { 'w' } else { 'b' });

    out.push(' ');
    let castling = pos.castling();
    if castling.0 == 0 {
        out.push('-');
    } else {
        if castling.has(CastleRights::WHITE_SHORT) {
            out.push('K');
        }
        if castling.has(CastleRights::WHITE_LONG) {
            out.push('Q');
        }
        if castling.has(CastleRights::BLACK_SHORT) {
            out.push('k');
        }
        if castling.has(CastleRights::BLACK_LONG) {
            out.push('q');
        }
    }

    out.push(' ');
    match pos.ep_square() {
        Some(sq) => out.push_str(&sq.to_algebraic()),
        None => out.push('-'),
    }

    out.push_str(&format!(" {} {}", pos.halfmove_clock(), pos.fullmove_number()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_fen_round_trips() {
        let pos = Position::from_fen(STARTING_FEN).unwrap();
        assert_eq!(pos.to_fen(), STARTING_FEN);
    }

    #[test]
    fn custom_fen_with_ep_square_round_trips() {
        let fen = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
        assert_eq!(pos.ep_square(), Square::from_algebraic("c6"));
    }

    #[test]
    fn rejects_short_field_count() {
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8"),
            Err(FenError::TooFewParts { .. })
        ));
    }

    #[test]
    fn rejects_bad_piece_letter() {
        let fen = "rnbqkbnx/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            Position::from_fen(fen),
            Err(FenError::InvalidPiece { c: 'x' })
        ));
    }
}
