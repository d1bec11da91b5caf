//! Draw-by-rule detection: fifty-move clock, threefold repetition via the
//! search's reversible-move history, and insufficient-material recognizers.

use quartergame::position::Position;
use quartergame::recognizers::{self, Recognized};

#[test]
fn ninety_nine_halfmoves_is_not_yet_a_fifty_move_draw() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 99 50").unwrap();
    assert!(!pos.is_fifty_move_draw());
}

#[test]
fn one_hundred_halfmoves_is_a_fifty_move_draw() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 100 50").unwrap();
    assert!(pos.is_fifty_move_draw());
}

#[test]
fn two_prior_occurrences_of_the_same_signature_is_a_repetition_draw() {
    let pos = Position::startpos();
    let sig = pos.signature();
    let history = vec![Some(sig), Some(sig)];
    assert!(pos.is_repetition(&history));
}

#[test]
fn a_single_prior_occurrence_is_not_yet_a_repetition_draw() {
    let pos = Position::startpos();
    let sig = pos.signature();
    let history = vec![Some(sig)];
    assert!(!pos.is_repetition(&history));
}

#[test]
fn an_irreversible_move_boundary_stops_repetition_counting() {
    let pos = Position::startpos();
    let sig = pos.signature();
    // None marks a capture/pawn-move boundary: the two earlier occurrences
    // of `sig` are on the far side of it and shouldn't count.
    let history = vec![Some(sig), Some(sig), None];
    assert!(!pos.is_repetition(&history));
}

#[test]
fn bare_kings_are_recognized_as_an_insufficient_material_draw() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(recognizers::recognize(&pos), Some(Recognized::Draw));
}

#[test]
fn a_lone_extra_rook_is_not_an_insufficient_material_draw() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/3RK3 w - - 0 1").unwrap();
    assert_eq!(recognizers::recognize(&pos), None);
}
