//! Detection of check and checkmate
//!
//! These are reporting helpers: moving into or staying in check is not rejected by
//! [`crate::validate_move`]. Everything here is built from the same per-piece rules, by scanning
//! the board for pieces whose rule accepts a move onto a given square.

use board::{Board, CheckStatus, Color, Coordinate, Piece, PieceKind};

use crate::{validate_move, KingRule, MovementRule};

/// The steps a king can take
const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Find the king of the given color
///
/// Returns `None` if there is no such king. With several, the one on the lowest square is used.
pub fn find_king(board: &Board, color: Color) -> Option<Coordinate> {
    let king = Piece::new(PieceKind::King, color).code();
    board
        .squares()
        .find(|&(_, code)| code == king)
        .map(|(square, _)| square)
}

/// All squares holding a piece of color `by` which could move onto `target`
pub fn attackers(board: &Board, target: Coordinate, by: Color) -> Vec<Coordinate> {
    board
        .squares()
        .filter(|&(square, code)| code.is_color(by) && validate_move(board, square, target))
        .map(|(square, _)| square)
        .collect()
}

/// Whether the king of `color` is attacked
///
/// A side without a king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    find_king(board, color).is_some_and(|king| !attackers(board, king, color.other()).is_empty())
}

/// Whether moving `from` to `to` is legal and leaves the king of `color` unattacked
fn resolves_check(board: &Board, color: Color, from: Coordinate, to: Coordinate) -> bool {
    validate_move(board, from, to) && !is_in_check(&board.apply_move(from, to), color)
}

/// The pieces of `color`, optionally leaving out the king
fn pieces_of(board: &Board, color: Color, with_king: bool) -> Vec<Coordinate> {
    board
        .squares()
        .filter(|&(_, code)| {
            code.is_color(color) && (with_king || code.kind() != Some(PieceKind::King))
        })
        .map(|(square, _)| square)
        .collect()
}

/// Whether the king of `color` can step to a neighbouring square where it is not attacked
pub fn king_can_flee(board: &Board, color: Color) -> bool {
    let Some(king) = find_king(board, color) else {
        return false;
    };
    KING_STEPS.into_iter().any(|(dx, dy)| {
        let to = king.offset(dx, dy);
        KingRule::is_legal(board, king, to) && !is_in_check(&board.apply_move(king, to), color)
    })
}

/// Whether some piece of `color` can capture a piece giving check, ending the check
pub fn can_capture_attacker(board: &Board, color: Color) -> bool {
    let Some(king) = find_king(board, color) else {
        return false;
    };
    let defenders = pieces_of(board, color, true);
    attackers(board, king, color.other())
        .into_iter()
        .any(|attacker| {
            defenders
                .iter()
                .any(|&defender| resolves_check(board, color, defender, attacker))
        })
}

/// The squares strictly between two squares on a shared rank, file or diagonal
///
/// Empty if the squares are not on a shared line, are adjacent, or either is off the board.
///
/// ```
/// # use board::Coordinate;
/// # use rules::check::squares_between;
/// assert_eq!(
///     squares_between(Coordinate::new(7, 3), Coordinate::new(4, 0)),
///     vec![Coordinate::new(6, 2), Coordinate::new(5, 1)],
/// );
/// assert!(squares_between(Coordinate::new(0, 0), Coordinate::new(1, 2)).is_empty());
/// ```
pub fn squares_between(from: Coordinate, to: Coordinate) -> Vec<Coordinate> {
    let (dx, dy) = from.delta(to);
    if !(from.is_on_board() && to.is_on_board() && (dx == 0 || dy == 0 || dx == dy)) {
        return Vec::new();
    }
    let step_x = (to.x as i16 - from.x as i16).signum() as i8;
    let step_y = (to.y as i16 - from.y as i16).signum() as i8;
    let distance = dx.max(dy);
    (1..distance.max(1))
        .map(|step| from.offset(step_x * step as i8, step_y * step as i8))
        .collect()
}

/// Whether some piece other than the king of `color` can block a single sliding attacker
///
/// Double checks cannot be blocked, and checks from knights, pawns or kings have nothing to block.
pub fn can_interpose(board: &Board, color: Color) -> bool {
    let Some(king) = find_king(board, color) else {
        return false;
    };
    let checkers = attackers(board, king, color.other());
    let &[attacker] = checkers.as_slice() else {
        return false;
    };
    if !board
        .piece_at(attacker)
        .kind()
        .is_some_and(PieceKind::is_sliding)
    {
        return false;
    }
    let path = squares_between(attacker, king);
    pieces_of(board, color, false).into_iter().any(|defender| {
        path.iter()
            .any(|&square| resolves_check(board, color, defender, square))
    })
}

/// Whether the king of `color` is in check and nothing gets it out
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_in_check(board, color)
        && !king_can_flee(board, color)
        && !can_capture_attacker(board, color)
        && !can_interpose(board, color)
}

/// Summarize the threats against the king of `color`
pub fn check_status(board: &Board, color: Color) -> CheckStatus {
    match (is_in_check(board, color), is_checkmate(board, color)) {
        (false, _) => CheckStatus::None,
        (true, false) => CheckStatus::Check,
        (true, true) => CheckStatus::Checkmate,
    }
}
