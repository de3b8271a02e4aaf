//! Obstruction checks for the sliding pieces
//!
//! Both checks visit all 64 squares and accumulate whether any occupied square lies strictly
//! between the two endpoints, so the amount of work never depends on where the pieces are.

use board::{abs_diff, Board, Coordinate};

/// Whether every square strictly between `from` and `to` along a rank or file is empty
///
/// If the two squares share neither a rank nor a file, nothing lies between them and the path
/// counts as clear; the rook's geometry check is what rejects such moves.
///
/// ```
/// # use board::{Board, Coordinate};
/// # use rules::rook_path_clear;
/// let board = Board::STARTING;
/// assert!(!rook_path_clear(&board, Coordinate::new(0, 0), Coordinate::new(0, 4)));
/// assert!(rook_path_clear(&board, Coordinate::new(0, 2), Coordinate::new(7, 2)));
/// ```
pub fn rook_path_clear(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    let (low_x, high_x) = (from.x.min(to.x), from.x.max(to.x));
    let (low_y, high_y) = (from.y.min(to.y), from.y.max(to.y));
    let same_file = from.x == to.x;
    let same_rank = from.y == to.y;

    let mut blocked = false;
    for (square, code) in board.squares() {
        let along_file =
            same_file & (square.x == from.x) & (low_y < square.y) & (square.y < high_y);
        let along_rank =
            same_rank & (square.y == from.y) & (low_x < square.x) & (square.x < high_x);
        blocked |= !code.is_empty() & (along_file | along_rank);
    }
    !blocked
}

/// Whether every square strictly between `from` and `to` along their diagonal is empty
///
/// Works in all four diagonal directions. Squares are only considered when they are inside the
/// box spanned by the endpoints and equally far from `from` in both directions.
///
/// ```
/// # use board::{Board, Coordinate};
/// # use rules::diagonal_path_clear;
/// let board = Board::STARTING;
/// assert!(!diagonal_path_clear(&board, Coordinate::new(2, 0), Coordinate::new(4, 2)));
/// assert!(diagonal_path_clear(&board, Coordinate::new(2, 2), Coordinate::new(5, 5)));
/// ```
pub fn diagonal_path_clear(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    let (low_x, high_x) = (from.x.min(to.x), from.x.max(to.x));
    let (low_y, high_y) = (from.y.min(to.y), from.y.max(to.y));

    let mut blocked = false;
    for (square, code) in board.squares() {
        let between =
            (low_x < square.x) & (square.x < high_x) & (low_y < square.y) & (square.y < high_y);
        let on_line = abs_diff(square.x, from.x) == abs_diff(square.y, from.y);
        blocked |= !code.is_empty() & between & on_line;
    }
    !blocked
}
