//! Move legality for a [`Board`]
//!
//! Each kind of piece has one [`MovementRule`]. [`classify_move`] looks at what occupies the
//! source square and asks exactly that rule about the move; nothing else is consulted.

use board::{Board, Coordinate, PieceKind};

pub mod check;
mod path;
mod pieces;

pub use crate::path::{diagonal_path_clear, rook_path_clear};
pub use crate::pieces::{
    check_final_placement, BishopRule, KingRule, KnightRule, PawnRule, QueenRule, RookRule,
};

pub type Result<T, E = MoveError> = core::result::Result<T, E>;

/// Why [`classify_move`] rejects a move
///
/// The two cases are exhaustive, so callers may match on them without a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no piece to move at the source square")]
    EmptySource,
    #[error("destination is not reachable for the piece being moved")]
    IllegalGeometry,
}

/// The movement of one kind of piece
///
/// Implementations answer whether `to` is a legal destination for whatever stands on `from`,
/// ignoring whose turn it is and whether the move leaves a king attacked. They return `false`
/// for every violation, including coordinates off the board, and never panic.
pub trait MovementRule {
    /// The kind of piece this rule governs
    const KIND: PieceKind;

    fn is_legal(board: &Board, from: Coordinate, to: Coordinate) -> bool;
}

/// The signature shared by every [`MovementRule::is_legal`]
pub type Validator = fn(&Board, Coordinate, Coordinate) -> bool;

/// Select the one rule which governs pieces of the given kind
pub fn rule_for(kind: PieceKind) -> Validator {
    match kind {
        PieceKind::Pawn => PawnRule::is_legal,
        PieceKind::Knight => KnightRule::is_legal,
        PieceKind::Bishop => BishopRule::is_legal,
        PieceKind::Rook => RookRule::is_legal,
        PieceKind::Queen => QueenRule::is_legal,
        PieceKind::King => KingRule::is_legal,
    }
}

/// Check the move against the rule of the piece standing on `from`
///
/// Returns the kind of piece which moves, or why the move is rejected. Codes which name no piece
/// have no rule, so they never move.
///
/// ```
/// # use board::{Board, Coordinate, PieceKind};
/// # use rules::{classify_move, MoveError};
/// let board = Board::STARTING;
/// assert_eq!(
///     classify_move(&board, Coordinate::new(1, 0), Coordinate::new(2, 2)),
///     Ok(PieceKind::Knight),
/// );
/// assert_eq!(
///     classify_move(&board, Coordinate::new(1, 0), Coordinate::new(1, 2)),
///     Err(MoveError::IllegalGeometry),
/// );
/// assert_eq!(
///     classify_move(&board, Coordinate::new(1, 3), Coordinate::new(1, 4)),
///     Err(MoveError::EmptySource),
/// );
/// ```
pub fn classify_move(board: &Board, from: Coordinate, to: Coordinate) -> Result<PieceKind> {
    let code = board.piece_at(from);
    if code.is_empty() {
        return Err(MoveError::EmptySource);
    }
    let kind = code.kind().ok_or(MoveError::IllegalGeometry)?;
    if rule_for(kind)(board, from, to) {
        Ok(kind)
    } else {
        Err(MoveError::IllegalGeometry)
    }
}

/// Whether the piece on `from` may move to `to`
pub fn validate_move(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    classify_move(board, from, to).is_ok()
}
