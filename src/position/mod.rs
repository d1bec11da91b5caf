//! The board representation: a 0x88 mailbox plus per-color piece lists
//! with board back-references.
//!
//! Every square holds a `Piece` and, for occupied squares, an index into
//! that piece's color/kind piece list. Adding, removing, and sliding a
//! piece are O(1): list removal swaps the last live entry into the hole
//! and patches that entry's back-reference, rather than shifting the list.

mod fen;
mod make_unmake;

pub use fen::{DEFAULT_FEN, STARTING_FEN};
pub use make_unmake::{Unmake, LEGALITY_FAILURE_VALUE};

use crate::chess_move::Move;
use crate::error::FenError;
use crate::geometry::{self, Square};
use crate::types::{CastleRights, Color, Piece, PieceType};
use crate::zobrist;

/// Maximum non-king non-pawn pieces a side can field without promotions
/// running away with the array (2 rooks/knights/bishops + 1 queen = 7,
/// generously doubled for under-promotion chains).
pub const MAX_NON_PAWNS: usize = 16;
pub const MAX_PAWNS: usize = 8;

/// The board plus all state needed to make/unmake moves and to answer
/// `check_invariants` without rescanning the 128-element array.
#[derive(Clone)]
pub struct Position {
    board: [Piece; 128],
    /// Index into `pawns[color]` or `non_pawns[color]` for the piece
    /// standing on this square; meaningless where `board[sq]` is `NONE`.
    board_index: [u8; 128],

    side_to_move: Color,
    castling: CastleRights,
    ep_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    has_castled: [bool; 2],

    pawns: [[Square; MAX_PAWNS]; 2],
    pawn_count: [u8; 2],
    non_pawns: [[Square; MAX_NON_PAWNS]; 2],
    non_pawn_count: [u8; 2],
    non_pawn_type_counts: [[u8; 6]; 2],
    bishop_light_count: [u8; 2],

    pawn_material: [i32; 2],
    non_pawn_material: [i32; 2],

    sig_pawn: u64,
    sig_non_pawn: u64,
}

impl Position {
    /// An otherwise-empty position: white to move, no castling rights, no
    /// pieces. Callers build up real positions via `from_fen` or by
    /// placing pieces with `add_piece`.
    #[must_use]
    pub fn empty() -> Position {
        Position {
            board: [Piece::NONE; 128],
            board_index: [0; 128],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            ep_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            has_castled: [false, false],
            pawns: [[Square(0); MAX_PAWNS]; 2],
            pawn_count: [0, 0],
            non_pawns: [[Square(0); MAX_NON_PAWNS]; 2],
            non_pawn_count: [0, 0],
            non_pawn_type_counts: [[0; 6]; 2],
            bishop_light_count: [0, 0],
            pawn_material: [0, 0],
            non_pawn_material: [0, 0],
            sig_pawn: 0,
            sig_non_pawn: 0,
        }
    }

    #[must_use]
    pub fn startpos() -> Position {
        Position::from_fen(STARTING_FEN).expect("startpos FEN is well-formed")
    }

    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        fen::parse(fen)
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        fen::write(self)
    }

    // -- accessors -----------------------------------------------------

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn has_castled(&self, color: Color) -> bool {
        self.has_castled[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.non_pawns[color.index()][0]
    }

    #[inline]
    #[must_use]
    pub fn pawn_squares(&self, color: Color) -> &[Square] {
        &self.pawns[color.index()][..self.pawn_count[color.index()] as usize]
    }

    #[inline]
    #[must_use]
    pub fn non_pawn_squares(&self, color: Color) -> &[Square] {
        &self.non_pawns[color.index()][..self.non_pawn_count[color.index()] as usize]
    }

    #[inline]
    #[must_use]
    pub fn non_pawn_type_count(&self, color: Color, pt: PieceType) -> u8 {
        self.non_pawn_type_counts[color.index()][pt.index()]
    }

    #[inline]
    #[must_use]
    pub fn material(&self, color: Color) -> i32 {
        self.pawn_material[color.index()] + self.non_pawn_material[color.index()]
    }

    /// Material balance from `color`'s perspective (their total minus the
    /// opponent's), excluding king value.
    #[must_use]
    pub fn material_balance(&self, color: Color) -> i32 {
        let king_value = PieceType::King.value();
        let own = self.material(color) - king_value;
        let their = self.material(color.flip()) - king_value;
        own - their
    }

    #[inline]
    #[must_use]
    pub fn signature(&self) -> u64 {
        self.sig_pawn ^ self.sig_non_pawn
    }

    #[inline]
    #[must_use]
    pub fn pawn_signature(&self) -> u64 {
        self.sig_pawn
    }

    #[inline]
    #[must_use]
    pub fn non_pawn_signature(&self) -> u64 {
        self.sig_non_pawn
    }

    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.is_attacked(self.king_square(self.side_to_move), self.side_to_move.flip())
    }

    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.is_attacked(sq, by)
    }

    // -- piece-list bookkeeping -----------------------------------------

    /// Places `piece` on `sq`, which must currently be empty. Updates
    /// piece lists, material, light-square-bishop count, and the
    /// appropriate signature. Does not touch side-to-move/castling/ep.
    pub(crate) fn add_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.board[sq.index()].is_none());
        let color = piece.color().expect("add_piece: not a real piece");
        let pt = piece.piece_type().expect("add_piece: not a real piece");
        self.board[sq.index()] = piece;
        let c = color.index();

        if pt == PieceType::Pawn {
            let idx = self.pawn_count[c] as usize;
            self.pawns[c][idx] = sq;
            self.board_index[sq.index()] = idx as u8;
            self.pawn_count[c] += 1;
            self.pawn_material[c] += pt.value();
            self.sig_pawn ^= zobrist::pawn_seed(color, sq);
        } else {
            let idx = self.non_pawn_count[c] as usize;
            self.non_pawns[c][idx] = sq;
            self.board_index[sq.index()] = idx as u8;
            self.non_pawn_count[c] += 1;
            self.non_pawn_material[c] += pt.value();
            self.non_pawn_type_counts[c][pt.index()] += 1;
            if pt == PieceType::Bishop && sq.is_white_square() {
                self.bishop_light_count[c] += 1;
            }
            self.sig_non_pawn ^= zobrist::piece_seed(color, pt, sq);
        }
    }

    /// Removes whatever piece stands on `sq`, which must be occupied, and
    /// returns it. Swaps the last piece-list entry into the vacated slot.
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Piece {
        let piece = self.board[sq.index()];
        debug_assert!(piece.is_some());
        let color = piece.color().unwrap();
        let pt = piece.piece_type().unwrap();
        self.board[sq.index()] = Piece::NONE;
        let c = color.index();

        if pt == PieceType::Pawn {
            let idx = self.board_index[sq.index()] as usize;
            let last = self.pawn_count[c] as usize - 1;
            let moved_sq = self.pawns[c][last];
            self.pawns[c][idx] = moved_sq;
            if idx != last {
                self.board_index[moved_sq.index()] = idx as u8;
            }
            self.pawn_count[c] -= 1;
            self.pawn_material[c] -= pt.value();
            self.sig_pawn ^= zobrist::pawn_seed(color, sq);
        } else {
            let idx = self.board_index[sq.index()] as usize;
            let last = self.non_pawn_count[c] as usize - 1;
            let moved_sq = self.non_pawns[c][last];
            self.non_pawns[c][idx] = moved_sq;
            if idx != last {
                self.board_index[moved_sq.index()] = idx as u8;
            }
            self.non_pawn_count[c] -= 1;
            self.non_pawn_material[c] -= pt.value();
            self.non_pawn_type_counts[c][pt.index()] -= 1;
            if pt == PieceType::Bishop && sq.is_white_square() {
                self.bishop_light_count[c] -= 1;
            }
            self.sig_non_pawn ^= zobrist::piece_seed(color, pt, sq);
        }
        piece
    }

    /// Slides the piece on `from` to the empty square `to`, without any
    /// material/signature change beyond the piece's own positional seed.
    pub(crate) fn slide_piece(&mut self, from: Square, to: Square) {
        let piece = self.board[from.index()];
        debug_assert!(piece.is_some());
        debug_assert!(self.board[to.index()].is_none());
        let color = piece.color().unwrap();
        let pt = piece.piece_type().unwrap();
        let idx = self.board_index[from.index()];

        self.board[from.index()] = Piece::NONE;
        self.board[to.index()] = piece;
        self.board_index[to.index()] = idx;

        let c = color.index();
        if pt == PieceType::Pawn {
            self.pawns[c][idx as usize] = to;
            self.sig_pawn ^= zobrist::pawn_seed(color, from);
            self.sig_pawn ^= zobrist::pawn_seed(color, to);
        } else {
            self.non_pawns[c][idx as usize] = to;
            if pt == PieceType::Bishop {
                if from.is_white_square() {
                    self.bishop_light_count[c] -= 1;
                }
                if to.is_white_square() {
                    self.bishop_light_count[c] += 1;
                }
            }
            self.sig_non_pawn ^= zobrist::piece_seed(color, pt, from);
            self.sig_non_pawn ^= zobrist::piece_seed(color, pt, to);
        }
    }

    pub(crate) fn set_castling(&mut self, new_rights: CastleRights) {
        self.sig_non_pawn ^= zobrist::castle_seed(self.castling);
        self.castling = new_rights;
        self.sig_non_pawn ^= zobrist::castle_seed(self.castling);
    }

    pub(crate) fn set_ep_square(&mut self, new_ep: Option<Square>) {
        self.sig_non_pawn ^= zobrist::ep_file_seed(self.ep_square.map(Square::file));
        self.ep_square = new_ep;
        self.sig_non_pawn ^= zobrist::ep_file_seed(self.ep_square.map(Square::file));
    }

    pub(crate) fn flip_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.flip();
        self.sig_non_pawn ^= zobrist::side_to_move_seed();
    }

    // -- attacks ---------------------------------------------------------

    /// True if any `by`-colored piece attacks `sq`, scanning outward from
    /// `sq` rather than over every piece of `by`.
    #[must_use]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        for delta in geometry::pawn_capture_deltas(by) {
            let from = sq.offset(-delta);
            if from.is_on_board() && self.board[from.index()] == Piece::new(PieceType::Pawn, by) {
                return true;
            }
        }
        for delta in geometry::KNIGHT_DELTAS {
            let from = sq.offset(delta);
            if from.is_on_board() && self.board[from.index()] == Piece::new(PieceType::Knight, by)
            {
                return true;
            }
        }
        for delta in geometry::KING_DELTAS {
            let from = sq.offset(delta);
            if from.is_on_board() && self.board[from.index()] == Piece::new(PieceType::King, by) {
                return true;
            }
        }
        for &(step, diagonal) in &geometry::RAY_DIRECTIONS {
            let mut cur = sq.offset(step);
            while cur.is_on_board() {
                let occ = self.board[cur.index()];
                if occ.is_some() {
                    if occ.color() == Some(by) {
                        let pt = occ.piece_type().unwrap();
                        let slides = if diagonal {
                            matches!(pt, PieceType::Bishop | PieceType::Queen)
                        } else {
                            matches!(pt, PieceType::Rook | PieceType::Queen)
                        };
                        if slides {
                            return true;
                        }
                    }
                    break;
                }
                cur = cur.offset(step);
            }
        }
        false
    }

    /// Recomputes both signatures from the board/state from scratch,
    /// independent of the incremental bookkeeping in `add_piece` et al.
    /// Used only by `check_invariants`.
    fn recompute_signatures(&self) -> (u64, u64) {
        let mut sig_pawn = 0u64;
        let mut sig_non_pawn = 0u64;
        for color in [Color::White, Color::Black] {
            for &sq in self.pawn_squares(color) {
                sig_pawn ^= zobrist::pawn_seed(color, sq);
            }
            for &sq in self.non_pawn_squares(color) {
                let pt = self.piece_at(sq).piece_type().unwrap();
                sig_non_pawn ^= zobrist::piece_seed(color, pt, sq);
            }
        }
        sig_non_pawn ^= zobrist::castle_seed(self.castling);
        sig_non_pawn ^= zobrist::ep_file_seed(self.ep_square.map(Square::file));
        if self.side_to_move == Color::Black {
            sig_non_pawn ^= zobrist::side_to_move_seed();
        }
        (sig_pawn, sig_non_pawn)
    }

    /// Debug-only consistency check, traceable 1:1 against the eight
    /// documented invariants I1-I8 (I2, material-balance symmetry, is
    /// skipped: it's derived by construction from `material`/`material_balance`
    /// rather than stored twice, so there's nothing separate to cross-check).
    /// Panics via `position_panic!` on failure; compiled out in release
    /// builds except where explicitly called from tests.
    pub fn check_invariants(&self) {
        // I1: incremental signatures match a from-scratch recomputation.
        let (sig_pawn, sig_non_pawn) = self.recompute_signatures();
        if sig_pawn != self.sig_pawn || sig_non_pawn != self.sig_non_pawn {
            crate::position_panic!(
                "I1",
                self.to_fen(),
                "signature mismatch: incremental ({:#x},{:#x}) vs recomputed ({:#x},{:#x})",
                self.sig_pawn,
                self.sig_non_pawn,
                sig_pawn,
                sig_non_pawn
            );
        }

        // I3: per-type non-pawn counts and pawn counts sum to the stored
        // material totals, and each side has exactly one king.
        for color in [Color::White, Color::Black] {
            let c = color.index();
            let mut material = 0i32;
            for pt in crate::types::PIECE_TYPES {
                if pt == PieceType::Pawn {
                    continue;
                }
                material += self.non_pawn_type_counts[c][pt.index()] as i32 * pt.value();
            }
            if material != self.non_pawn_material[c] {
                crate::position_panic!(
                    "I3",
                    self.to_fen(),
                    "non-pawn material mismatch for color {}: {} vs {}",
                    c,
                    material,
                    self.non_pawn_material[c]
                );
            }
            if self.non_pawn_type_counts[c][PieceType::King.index()] != 1 {
                crate::position_panic!("I3", self.to_fen(), "color {} does not have exactly one king", c);
            }
            if self.pawn_count[c] as usize > MAX_PAWNS {
                crate::position_panic!("I3", self.to_fen(), "color {} has too many pawns", c);
            }
            if self.pawn_material[c] != self.pawn_count[c] as i32 * PieceType::Pawn.value() {
                crate::position_panic!("I3", self.to_fen(), "pawn material mismatch for color {}", c);
            }
        }

        // I4: every piece-list entry's square points back to a matching
        // board_index, and every occupied board square belongs to exactly
        // one piece list.
        let mut seen = [false; 128];
        for color in [Color::White, Color::Black] {
            for (i, &sq) in self.pawn_squares(color).iter().enumerate() {
                if self.board_index[sq.index()] as usize != i
                    || self.board[sq.index()].piece_type() != Some(PieceType::Pawn)
                    || self.board[sq.index()].color() != Some(color)
                {
                    crate::position_panic!("I4", self.to_fen(), "pawn list/board mismatch at {:?}", sq);
                }
                seen[sq.index()] = true;
            }
            for (i, &sq) in self.non_pawn_squares(color).iter().enumerate() {
                if self.board_index[sq.index()] as usize != i
                    || self.board[sq.index()].is_none()
                    || self.board[sq.index()].piece_type() == Some(PieceType::Pawn)
                    || self.board[sq.index()].color() != Some(color)
                {
                    crate::position_panic!(
                        "I4",
                        self.to_fen(),
                        "non-pawn list/board mismatch at {:?}",
                        sq
                    );
                }
                seen[sq.index()] = true;
            }
        }
        for sq in geometry::all_squares() {
            let occupied = self.board[sq.index()].is_some();
            if occupied != seen[sq.index()] {
                crate::position_panic!(
                    "I4",
                    self.to_fen(),
                    "board/list disagreement on occupancy at {:?}",
                    sq
                );
            }
        }

        // I5: non-pawn list index 0 is always the king.
        for color in [Color::White, Color::Black] {
            let c = color.index();
            if self.non_pawn_count[c] == 0
                || self.board[self.non_pawns[c][0].index()].piece_type() != Some(PieceType::King)
            {
                crate::position_panic!("I5", self.to_fen(), "non-pawn list slot 0 is not the king");
            }
        }

        // I6: if a color has castled, its castling rights bits are clear.
        for color in [Color::White, Color::Black] {
            let (short_bit, long_bit) = match color {
                Color::White => (CastleRights::WHITE_SHORT, CastleRights::WHITE_LONG),
                Color::Black => (CastleRights::BLACK_SHORT, CastleRights::BLACK_LONG),
            };
            if self.has_castled[color.index()] && (self.castling.has(short_bit) || self.castling.has(long_bit)) {
                crate::position_panic!(
                    "I6",
                    self.to_fen(),
                    "color {:?} has castled but still claims castling rights",
                    color
                );
            }
        }

        // I7: light-square bishop count does not exceed total bishop count.
        for color in [Color::White, Color::Black] {
            let c = color.index();
            let total_bishops = self.non_pawn_type_counts[c][PieceType::Bishop.index()];
            if self.bishop_light_count[c] > total_bishops {
                crate::position_panic!(
                    "I7",
                    self.to_fen(),
                    "color {} has {} light-square bishops but only {} bishops total",
                    c,
                    self.bishop_light_count[c],
                    total_bishops
                );
            }
        }

        // I8: en-passant square, if set, lies on rank 3 or rank 6 (the
        // square a pawn of the side to move would capture onto).
        if let Some(ep) = self.ep_square {
            let expected_rank = if self.side_to_move == Color::White { 5 } else { 2 };
            if ep.rank() != expected_rank {
                crate::position_panic!("I8", self.to_fen(), "en passant square on wrong rank");
            }
        }

        // Additional sanity checks with no direct invariant number of their
        // own: castling rights only claim what the king/rook placement
        // could still support, no pawns sit on the back rank, and the side
        // not to move is never in check.
        for color in [Color::White, Color::Black] {
            let (home_king, kingside_rook, queenside_rook, short_bit, long_bit) = match color {
                Color::White => (
                    Square::from_algebraic("e1").unwrap(),
                    Square::from_algebraic("h1").unwrap(),
                    Square::from_algebraic("a1").unwrap(),
                    CastleRights::WHITE_SHORT,
                    CastleRights::WHITE_LONG,
                ),
                Color::Black => (
                    Square::from_algebraic("e8").unwrap(),
                    Square::from_algebraic("h8").unwrap(),
                    Square::from_algebraic("a8").unwrap(),
                    CastleRights::BLACK_SHORT,
                    CastleRights::BLACK_LONG,
                ),
            };
            let king_home = self.king_square(color) == home_king;
            let rook = |sq: Square| {
                self.board[sq.index()].piece_type() == Some(PieceType::Rook)
                    && self.board[sq.index()].color() == Some(color)
            };
            if self.castling.has(short_bit) && !(king_home && rook(kingside_rook)) {
                crate::position_panic!("castle-support", self.to_fen(), "castling right claimed without king/rook in place");
            }
            if self.castling.has(long_bit) && !(king_home && rook(queenside_rook)) {
                crate::position_panic!("castle-support", self.to_fen(), "castling right claimed without king/rook in place");
            }
        }
        for color in [Color::White, Color::Black] {
            for &sq in self.pawn_squares(color) {
                if sq.rank() == 0 || sq.rank() == 7 {
                    crate::position_panic!("pawn-rank", self.to_fen(), "pawn on back rank at {:?}", sq);
                }
            }
        }
        if self.is_attacked(self.king_square(self.side_to_move.flip()), self.side_to_move) {
            crate::position_panic!("mover-safety", self.to_fen(), "side not to move is in check");
        }
    }

    /// Sets castling rights directly; only used while constructing a
    /// position from FEN, before any signature contributions exist.
    pub(crate) fn init_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    pub(crate) fn init_ep_square(&mut self, sq: Option<Square>) {
        self.ep_square = sq;
    }

    pub(crate) fn init_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn init_halfmove_clock(&mut self, n: u32) {
        self.halfmove_clock = n;
    }

    pub(crate) fn init_fullmove_number(&mut self, n: u32) {
        self.fullmove_number = n;
    }

    /// Computes signatures from scratch and stores them; called once after
    /// a FEN load finishes placing pieces and setting state fields.
    pub(crate) fn finish_init(&mut self) {
        let (sig_pawn, sig_non_pawn) = self.recompute_signatures();
        self.sig_pawn = sig_pawn;
        self.sig_non_pawn = sig_non_pawn;
    }

    pub(crate) fn halfmove_clock_mut(&mut self) -> &mut u32 {
        &mut self.halfmove_clock
    }

    pub(crate) fn fullmove_number_mut(&mut self) -> &mut u32 {
        &mut self.fullmove_number
    }

    pub(crate) fn set_has_castled(&mut self, color: Color, value: bool) {
        self.has_castled[color.index()] = value;
    }

    // -- draw detection ----------------------------------------------------

    /// Fifty-move rule: true once the halfmove clock reaches 100 plies
    /// (50 full moves) since the last capture or pawn push.
    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Threefold repetition, scanned backward through `history` (a
    /// persistent record of signatures for the game so far, most recent
    /// last, NOT including the current position). Stops at the first
    /// irreversible move (a `None` sentinel marking a capture/pawn-move
    /// boundary), since no position before it can recur.
    #[must_use]
    pub fn is_repetition(&self, history: &[Option<u64>]) -> bool {
        let current = self.signature();
        let mut count = 1;
        for &entry in history.iter().rev() {
            match entry {
                None => break,
                Some(sig) => {
                    if sig == current {
                        count += 1;
                        if count >= 3 {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    pub fn make_move(&mut self, mv: Move) -> Result<Unmake, ()> {
        make_unmake::make_move(self, mv)
    }

    pub fn unmake_move(&mut self, mv: Move, undo: &Unmake) {
        make_unmake::unmake_move(self, mv, undo);
    }

    /// Null move: flips side to move and clears any en-passant square,
    /// without touching the board. Returns the undo state for
    /// `unmake_null_move`.
    pub fn make_null_move(&mut self) -> Option<Square> {
        let prev_ep = self.ep_square;
        self.set_ep_square(None);
        self.flip_side_to_move();
        prev_ep
    }

    pub fn unmake_null_move(&mut self, prev_ep: Option<Square>) {
        self.flip_side_to_move();
        self.set_ep_square(prev_ep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_has_sixteen_pieces_per_side() {
        let pos = Position::startpos();
        assert_eq!(pos.pawn_squares(Color::White).len(), 8);
        assert_eq!(pos.non_pawn_squares(Color::White).len(), 8);
        assert_eq!(pos.pawn_squares(Color::Black).len(), 8);
        assert_eq!(pos.non_pawn_squares(Color::Black).len(), 8);
        pos.check_invariants();
    }

    #[test]
    fn startpos_is_not_in_check() {
        let pos = Position::startpos();
        assert!(!pos.is_in_check());
    }

    #[test]
    fn king_square_tracks_the_king() {
        let pos = Position::startpos();
        assert_eq!(pos.king_square(Color::White), Square::from_algebraic("e1").unwrap());
        assert_eq!(pos.king_square(Color::Black), Square::from_algebraic("e8").unwrap());
    }

    #[test]
    fn add_and_remove_piece_round_trip_signature() {
        let mut pos = Position::empty();
        pos.add_piece(Square::from_algebraic("e1").unwrap(), Piece::new(PieceType::King, Color::White));
        pos.add_piece(Square::from_algebraic("e8").unwrap(), Piece::new(PieceType::King, Color::Black));
        pos.finish_init();
        let before = pos.signature();
        let sq = Square::from_algebraic("d4").unwrap();
        pos.add_piece(sq, Piece::new(PieceType::Queen, Color::White));
        assert_ne!(pos.signature(), before);
        pos.remove_piece(sq);
        assert_eq!(pos.signature(), before);
    }

    #[test]
    fn repetition_counts_identical_signatures_since_last_irreversible_move() {
        let pos = Position::startpos();
        let sig = pos.signature();
        let history = vec![Some(sig), Some(sig)];
        assert!(pos.is_repetition(&history));
    }

    #[test]
    #[should_panic(expected = "I6")]
    fn having_castled_while_still_claiming_rights_violates_i6() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        pos.set_has_castled(Color::White, true);
        pos.check_invariants();
    }

    #[test]
    fn clearing_rights_after_castling_satisfies_i6() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        pos.set_has_castled(Color::White, true);
        pos.check_invariants();
    }

    #[test]
    #[should_panic(expected = "I7")]
    fn light_bishop_count_exceeding_total_bishops_violates_i7() {
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        pos.bishop_light_count[Color::White.index()] = 1;
        pos.check_invariants();
    }
}
