//! Per-piece reachable-square generation.
//!
//! Each generator returns destinations in a fixed deterministic order
//! (direction order as listed in the offset/ray tables, then distance along
//! the ray) so the legal-response output is reproducible.

use crate::board::Board;
use crate::types::{Piece, PieceKind, Position, Side};

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

// up, down, left, right in grid terms (row 0 is rank 8)
const ROOK_RAYS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const BISHOP_RAYS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Squares the piece can reach given current occupancy. Does not account
/// for checks; that is the board's validation layer.
pub fn reachable_squares(board: &Board, piece: &Piece) -> Vec<Position> {
    match piece.kind {
        PieceKind::King => offset_moves(board, piece, &KING_OFFSETS),
        PieceKind::Knight => offset_moves(board, piece, &KNIGHT_OFFSETS),
        PieceKind::Rook => ray_moves(board, piece, &ROOK_RAYS),
        PieceKind::Bishop => ray_moves(board, piece, &BISHOP_RAYS),
        PieceKind::Queen => {
            let mut moves = ray_moves(board, piece, &ROOK_RAYS);
            moves.extend(ray_moves(board, piece, &BISHOP_RAYS));
            moves
        }
        PieceKind::Pawn => pawn_moves(board, piece),
    }
}

/// Fixed-offset pieces (king, knight): a destination is reachable when it
/// is on the grid and not occupied by a same-side piece.
fn offset_moves(board: &Board, piece: &Piece, offsets: &[(i8, i8)]) -> Vec<Position> {
    let mut moves = Vec::new();
    for &(row_delta, col_delta) in offsets {
        let Some(dest) = piece.position().offset(row_delta, col_delta) else {
            continue;
        };
        match board.piece_at(dest) {
            Some(other) if other.side == piece.side => {}
            _ => moves.push(dest),
        }
    }
    moves
}

/// Sliding pieces: walk each ray until the board edge, stopping short of a
/// same-side piece and including an opponent piece as the ray's last entry.
fn ray_moves(board: &Board, piece: &Piece, rays: &[(i8, i8)]) -> Vec<Position> {
    let mut moves = Vec::new();
    for &(row_delta, col_delta) in rays {
        let mut current = piece.position();
        while let Some(dest) = current.offset(row_delta, col_delta) {
            match board.piece_at(dest) {
                None => {
                    moves.push(dest);
                    current = dest;
                }
                Some(other) => {
                    if other.side != piece.side {
                        moves.push(dest);
                    }
                    break;
                }
            }
        }
    }
    moves
}

fn pawn_direction(side: Side) -> i8 {
    match side {
        Side::White => -1,
        _ => 1,
    }
}

fn pawn_starting_row(side: Side) -> usize {
    match side {
        Side::White => 6,
        _ => 1,
    }
}

/// Pawns move forward onto empty squares and capture diagonally onto
/// opponent-occupied squares. The two-step advance from the starting row
/// checks only the landing square, not the square in between; this mirrors
/// the original engine's behavior and a regression test pins it.
fn pawn_moves(board: &Board, piece: &Piece) -> Vec<Position> {
    let mut moves = Vec::new();
    let pos = piece.position();
    let direction = pawn_direction(piece.side);

    if let Some(one_step) = pos.offset(direction, 0) {
        if board.piece_at(one_step).is_none() {
            moves.push(one_step);
        }
    }

    if pos.row == pawn_starting_row(piece.side) {
        if let Some(two_step) = pos.offset(2 * direction, 0) {
            if board.piece_at(two_step).is_none() {
                moves.push(two_step);
            }
        }
    }

    for col_delta in [-1, 1] {
        let Some(diagonal) = pos.offset(direction, col_delta) else {
            continue;
        };
        if board
            .piece_at(diagonal)
            .is_some_and(|other| other.side != piece.side)
        {
            moves.push(diagonal);
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(placements: &[(char, &str)]) -> Board {
        let placements: Vec<(char, String)> = placements
            .iter()
            .map(|(sign, pos)| (*sign, pos.to_string()))
            .collect();
        let mut board = Board::new();
        board.setup(&placements, &[], &[]).unwrap();
        board
    }

    fn reachable_coordinates(board: &Board, at: &str) -> Vec<String> {
        let piece = *board
            .piece_at(Position::from_coordinate(at).unwrap())
            .unwrap();
        reachable_squares(board, &piece)
            .iter()
            .map(Position::to_coordinate)
            .collect()
    }

    #[test]
    fn test_king_in_the_open() {
        let board = board_with(&[('k', "e4")]);
        let moves = reachable_coordinates(&board, "e4");
        assert_eq!(moves.len(), 8);
        for dest in ["d3", "d4", "d5", "e3", "e5", "f3", "f4", "f5"] {
            assert!(moves.contains(&dest.to_string()), "missing {dest}");
        }
    }

    #[test]
    fn test_king_blocked_by_own_piece() {
        let board = board_with(&[('k', "e4"), ('p', "e5"), ('P', "e3")]);
        let moves = reachable_coordinates(&board, "e4");
        assert!(!moves.contains(&"e5".to_string()));
        assert!(moves.contains(&"e3".to_string()));
    }

    #[test]
    fn test_knight_in_the_corner() {
        let board = board_with(&[('n', "a1")]);
        let moves = reachable_coordinates(&board, "a1");
        assert_eq!(moves, vec!["b3".to_string(), "c2".to_string()]);
    }

    #[test]
    fn test_knight_jumps_over_pieces() {
        let board = board_with(&[('n', "b1"), ('p', "b2"), ('p', "c2"), ('P', "a3")]);
        let moves = reachable_coordinates(&board, "b1");
        // a3 is an opponent capture, c3 and d2 are open; b2/c2 don't block
        assert_eq!(
            moves,
            vec!["a3".to_string(), "c3".to_string(), "d2".to_string()]
        );
    }

    #[test]
    fn test_rook_open_file_order() {
        let board = board_with(&[('r', "d4")]);
        let moves = reachable_coordinates(&board, "d4");
        // up the board first, then down, then left, then right
        assert_eq!(
            moves,
            vec!["d5", "d6", "d7", "d8", "d3", "d2", "d1", "c4", "b4", "a4", "e4", "f4", "g4", "h4"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_rook_ray_stops_at_blockers() {
        let board = board_with(&[('r', "d4"), ('p', "d6"), ('P', "f4")]);
        let moves = reachable_coordinates(&board, "d4");
        // own pawn at d6 excluded, squares past it unreachable
        assert!(moves.contains(&"d5".to_string()));
        assert!(!moves.contains(&"d6".to_string()));
        assert!(!moves.contains(&"d7".to_string()));
        // opponent pawn at f4 included as the last entry of its ray
        assert!(moves.contains(&"e4".to_string()));
        assert!(moves.contains(&"f4".to_string()));
        assert!(!moves.contains(&"g4".to_string()));
        assert_eq!(moves.last(), Some(&"f4".to_string()));
    }

    #[test]
    fn test_bishop_rays() {
        let board = board_with(&[('b', "c1"), ('p', "e3")]);
        let moves = reachable_coordinates(&board, "c1");
        assert!(moves.contains(&"d2".to_string()));
        assert!(!moves.contains(&"e3".to_string()));
        assert!(moves.contains(&"b2".to_string()));
        assert!(moves.contains(&"a3".to_string()));
    }

    #[test]
    fn test_queen_is_rook_then_bishop() {
        let board = board_with(&[('q', "a1")]);
        let moves = reachable_coordinates(&board, "a1");
        // 7 up + 7 right + 7 diagonal
        assert_eq!(moves.len(), 21);
        assert_eq!(moves[0], "a2");
        // rook rays come first, the diagonal is appended after them
        assert_eq!(moves[14], "b2");
        assert_eq!(moves[20], "h8");
    }

    #[test]
    fn test_generator_never_targets_own_side() {
        let board = board_with(&[
            ('k', "e1"),
            ('q', "d1"),
            ('r', "a1"),
            ('b', "c1"),
            ('n', "b1"),
            ('p', "a2"),
            ('p', "b2"),
            ('p', "c2"),
            ('p', "d2"),
            ('p', "e2"),
            ('K', "e8"),
            ('R', "a8"),
        ]);
        for piece in board.side_pieces(Side::White) {
            for dest in reachable_squares(&board, &piece) {
                assert!(
                    board.piece_at(dest).map_or(true, |p| p.side != Side::White),
                    "{} at {} may not move onto own piece at {}",
                    piece.kind.to_human(),
                    piece.position().to_coordinate(),
                    dest.to_coordinate()
                );
            }
        }
    }

    #[test]
    fn test_white_pawn_moves_toward_rank_eight() {
        let board = board_with(&[('p', "e2")]);
        let moves = reachable_coordinates(&board, "e2");
        assert_eq!(moves, vec!["e3".to_string(), "e4".to_string()]);
    }

    #[test]
    fn test_black_pawn_moves_toward_rank_one() {
        let board = board_with(&[('P', "e7")]);
        let moves = reachable_coordinates(&board, "e7");
        assert_eq!(moves, vec!["e6".to_string(), "e5".to_string()]);
    }

    #[test]
    fn test_pawn_single_step_needs_empty_square() {
        let board = board_with(&[('p', "e4"), ('P', "e5")]);
        let moves = reachable_coordinates(&board, "e4");
        assert!(moves.is_empty());
    }

    #[test]
    fn test_pawn_two_step_only_from_starting_row() {
        let board = board_with(&[('p', "e3")]);
        let moves = reachable_coordinates(&board, "e3");
        assert_eq!(moves, vec!["e4".to_string()]);
    }

    #[test]
    fn test_pawn_two_step_blocked_landing_square() {
        let board = board_with(&[('p', "a2"), ('P', "a4")]);
        let moves = reachable_coordinates(&board, "a2");
        assert_eq!(moves, vec!["a3".to_string()]);
    }

    /// The two-step advance ignores the square directly ahead: with a3
    /// occupied and a4 free the jump is still offered. This pins the
    /// original engine's behavior; fixing it would change this test.
    #[test]
    fn test_pawn_two_step_ignores_intermediate_square() {
        let board = board_with(&[('p', "a2"), ('P', "a3")]);
        let moves = reachable_coordinates(&board, "a2");
        assert_eq!(moves, vec!["a4".to_string()]);
    }

    #[test]
    fn test_pawn_diagonal_capture_requires_opponent() {
        let board = board_with(&[('p', "e4"), ('P', "d5"), ('p', "f5")]);
        let moves = reachable_coordinates(&board, "e4");
        // d5 is a capture, f5 holds an own piece, empty diagonals are never offered
        assert_eq!(moves, vec!["e5".to_string(), "d5".to_string()]);
    }

    #[test]
    fn test_pawn_capture_both_diagonals() {
        let board = board_with(&[('P', "d5"), ('p', "c4"), ('p', "e4")]);
        let moves = reachable_coordinates(&board, "d5");
        assert_eq!(
            moves,
            vec!["d4".to_string(), "c4".to_string(), "e4".to_string()]
        );
    }
}
