//! Tests for the board presentation model.

use std::collections::{BTreeMap, BTreeSet};

use strictly_chess::{Board, Coordinate, Highlight, Piece, PieceKind, Shade, Side, starting_layout};

fn at(token: &str) -> Coordinate {
    token.parse().expect("valid token")
}

#[test]
fn test_board_has_64_distinct_cells() {
    let board = Board::new();
    let coords: BTreeSet<_> = board.cells().map(|c| c.coordinate()).collect();
    assert_eq!(coords.len(), 64);
}

#[test]
fn test_cell_shading_alternates() {
    let board = Board::new();
    for cell in board.cells() {
        let c = cell.coordinate();
        let expected = if (c.file() + c.rank()) % 2 == 0 { Shade::Light } else { Shade::Dark };
        assert_eq!(cell.shade(), expected, "cell {c}");
    }
    assert_eq!(board.cell(at("00")).shade(), Shade::Light);
    assert_eq!(board.cell(at("10")).shade(), Shade::Dark);
}

#[test]
fn test_initialize_places_canonical_arrangement() {
    let board = Board::new();
    assert_eq!(board.marker_count(), 32);

    let expected = [
        ("00", "white-rook"),
        ("10", "white-knight"),
        ("20", "white-bishop"),
        ("30", "white-queen"),
        ("40", "white-king"),
        ("50", "white-bishop"),
        ("60", "white-knight"),
        ("70", "white-rook"),
        ("07", "black-rook"),
        ("17", "black-knight"),
        ("27", "black-bishop"),
        ("37", "black-queen"),
        ("47", "black-king"),
        ("57", "black-bishop"),
        ("67", "black-knight"),
        ("77", "black-rook"),
    ];
    for (token, id) in expected {
        assert_eq!(
            board.piece_at(at(token)).map(|p| p.to_string()).as_deref(),
            Some(id),
            "{token}"
        );
    }
    for file in 0..8 {
        let white = Coordinate::new(file, 1).unwrap();
        let black = Coordinate::new(file, 6).unwrap();
        assert_eq!(board.piece_at(white), Some(Piece::new(Side::White, PieceKind::Pawn)));
        assert_eq!(board.piece_at(black), Some(Piece::new(Side::Black, PieceKind::Pawn)));
        for rank in 2..6 {
            assert!(!board.is_occupied(Coordinate::new(file, rank).unwrap()));
        }
    }
    assert_eq!(board.markers(), starting_layout().collect::<BTreeMap<_, _>>());
}

#[test]
fn test_initialize_discards_prior_state() {
    let mut board = Board::new();
    board.move_marker(at("11"), at("13"));
    board.move_marker(at("30"), at("36"));
    board.highlight([at("22"), at("23")], Highlight::LegalMove);
    board.mark_captured(at("36"));

    board.initialize();

    assert_eq!(board, Board::new());
    assert!(board.highlighted(Highlight::LegalMove).is_empty());
}

#[test]
fn test_place_piece_refuses_occupied_cell() {
    let mut board = Board::new();
    let intruder = Piece::new(Side::Black, PieceKind::Queen);

    let err = board.place_piece(at("40"), intruder).unwrap_err();
    assert_eq!(err.coordinate, at("40"));
    assert_eq!(err.occupant, Piece::new(Side::White, PieceKind::King));
    assert_eq!(board.piece_at(at("40")), Some(Piece::new(Side::White, PieceKind::King)));

    assert!(board.place_piece(at("44"), intruder).is_ok());
    assert_eq!(board.piece_at(at("44")), Some(intruder));
}

#[test]
fn test_move_marker_to_empty_cell() {
    let mut board = Board::new();
    let moved = board.move_marker(at("11"), at("12"));
    assert_eq!(moved, Some(Piece::new(Side::White, PieceKind::Pawn)));
    assert!(!board.is_occupied(at("11")));
    assert!(board.is_occupied(at("12")));
    assert_eq!(board.cell(at("12")).displaced(), None);
}

#[test]
fn test_move_marker_from_empty_cell_is_noop() {
    let mut board = Board::new();
    let before = board.clone();
    assert_eq!(board.move_marker(at("33"), at("34")), None);
    assert_eq!(board, before);
}

#[test]
fn test_move_marker_keeps_destination_occupant_until_removed() {
    let mut board = Board::new();
    board.move_marker(at("21"), at("36"));

    let cell = board.cell(at("36"));
    assert_eq!(cell.occupant(), Some(Piece::new(Side::White, PieceKind::Pawn)));
    assert_eq!(cell.displaced(), Some(Piece::new(Side::Black, PieceKind::Pawn)));
    assert_eq!(board.marker_count(), 31);

    assert!(board.mark_captured(at("36")));
    assert!(board.cell(at("36")).has_highlight(Highlight::Captured));

    let removed = board.remove_displaced(at("36"));
    assert_eq!(removed, Some(Piece::new(Side::Black, PieceKind::Pawn)));
    assert_eq!(board.cell(at("36")).displaced(), None);
    assert!(!board.cell(at("36")).has_highlight(Highlight::Captured));
}

#[test]
fn test_mark_captured_without_displaced_marker() {
    let mut board = Board::new();
    assert!(!board.mark_captured(at("40")));
    assert!(board.highlighted(Highlight::Captured).is_empty());
}

#[test]
fn test_highlights_are_idempotent() {
    let mut board = Board::new();
    board.highlight([at("12"), at("13")], Highlight::LegalMove);
    board.highlight([at("12"), at("13")], Highlight::LegalMove);
    board.highlight([at("11")], Highlight::Selected);
    assert_eq!(board.highlighted(Highlight::LegalMove), BTreeSet::from([at("12"), at("13")]));

    board.clear_highlights(Highlight::LegalMove);
    let once = board.clone();
    board.clear_highlights(Highlight::LegalMove);
    assert_eq!(board, once);
    assert!(board.highlighted(Highlight::LegalMove).is_empty());
    assert_eq!(board.highlighted(Highlight::Selected), BTreeSet::from([at("11")]));
}
