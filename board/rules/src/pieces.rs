//! One [`MovementRule`] per kind of piece
//!
//! Every rule evaluates all of its conditions and combines them with non-short-circuiting `&` and
//! `|`, so a rejected move costs the same as an accepted one.

use board::{Board, Coordinate, PieceKind};

use crate::{diagonal_path_clear, rook_path_clear, MovementRule};

/// Conditions every move shares: both squares on the board, and actually going somewhere
fn is_real_move(from: Coordinate, to: Coordinate) -> bool {
    from.is_on_board() & to.is_on_board() & (from != to)
}

/// Whether the piece on `from` may end up on `to`
///
/// The destination must be empty or hold a piece of the other color. This says nothing about
/// whether the piece can get there.
///
/// ```
/// # use board::{Board, Coordinate};
/// # use rules::check_final_placement;
/// let board = Board::STARTING;
/// // Onto an empty square, onto an enemy, and onto a friend
/// assert!(check_final_placement(&board, Coordinate::new(0, 1), Coordinate::new(0, 4)));
/// assert!(check_final_placement(&board, Coordinate::new(0, 1), Coordinate::new(0, 6)));
/// assert!(!check_final_placement(&board, Coordinate::new(0, 1), Coordinate::new(1, 1)));
/// ```
pub fn check_final_placement(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    let target = board.piece_at(to);
    target.is_empty() | board.piece_at(from).is_opponent_of(target)
}

/// Pawns move one rank forward, two from their home rank, and capture one step diagonally
///
/// White advances towards higher ranks from rank 1, black towards lower ranks from rank 6.
/// Straight moves need every square they cross and land on to be empty; diagonal moves need an
/// enemy piece to capture.
pub struct PawnRule;
impl PawnRule {
    /// The rank a pawn of each color starts on
    pub const WHITE_HOME_RANK: u8 = 1;
    pub const BLACK_HOME_RANK: u8 = 6;
}
impl MovementRule for PawnRule {
    const KIND: PieceKind = PieceKind::Pawn;

    fn is_legal(board: &Board, from: Coordinate, to: Coordinate) -> bool {
        let mover = board.piece_at(from);
        let target = board.piece_at(to);
        let white = mover.is_white();
        let (dx, _) = from.delta(to);

        let white_one = from.y.checked_add(1) == Some(to.y);
        let black_one = to.y.checked_add(1) == Some(from.y);
        let white_two = from.y.checked_add(2) == Some(to.y);
        let black_two = to.y.checked_add(2) == Some(from.y);

        let forward_one = (white & white_one) | (!white & black_one);
        let forward_two = (white & white_two & (from.y == Self::WHITE_HOME_RANK))
            | (!white & black_two & (from.y == Self::BLACK_HOME_RANK));
        let skipped = Coordinate::new(from.x, ((from.y as u16 + to.y as u16) / 2) as u8);

        let advance = (dx == 0)
            & target.is_empty()
            & (forward_one | (forward_two & board.piece_at(skipped).is_empty()));
        let capture = (dx == 1) & forward_one & mover.is_opponent_of(target);

        is_real_move(from, to) & (advance | capture) & check_final_placement(board, from, to)
    }
}

/// Knights jump two squares one way and one square the other
pub struct KnightRule;
impl MovementRule for KnightRule {
    const KIND: PieceKind = PieceKind::Knight;

    fn is_legal(board: &Board, from: Coordinate, to: Coordinate) -> bool {
        let (dx, dy) = from.delta(to);
        let jump = ((dx == 1) & (dy == 2)) | ((dx == 2) & (dy == 1));
        is_real_move(from, to) & jump & check_final_placement(board, from, to)
    }
}

/// Bishops slide any distance along an unobstructed diagonal
pub struct BishopRule;
impl MovementRule for BishopRule {
    const KIND: PieceKind = PieceKind::Bishop;

    fn is_legal(board: &Board, from: Coordinate, to: Coordinate) -> bool {
        let (dx, dy) = from.delta(to);
        is_real_move(from, to)
            & (dx == dy)
            & (dx != 0)
            & diagonal_path_clear(board, from, to)
            & check_final_placement(board, from, to)
    }
}

/// Rooks slide any distance along an unobstructed rank or file
pub struct RookRule;
impl MovementRule for RookRule {
    const KIND: PieceKind = PieceKind::Rook;

    fn is_legal(board: &Board, from: Coordinate, to: Coordinate) -> bool {
        let (dx, dy) = from.delta(to);
        is_real_move(from, to)
            & ((dx == 0) != (dy == 0))
            & rook_path_clear(board, from, to)
            & check_final_placement(board, from, to)
    }
}

/// Queens move as either a rook or a bishop
pub struct QueenRule;
impl MovementRule for QueenRule {
    const KIND: PieceKind = PieceKind::Queen;

    fn is_legal(board: &Board, from: Coordinate, to: Coordinate) -> bool {
        RookRule::is_legal(board, from, to) | BishopRule::is_legal(board, from, to)
    }
}

/// Kings step to any neighbouring square
///
/// Castling is not supported, and stepping into check is not prevented here.
pub struct KingRule;
impl MovementRule for KingRule {
    const KIND: PieceKind = PieceKind::King;

    fn is_legal(board: &Board, from: Coordinate, to: Coordinate) -> bool {
        let (dx, dy) = from.delta(to);
        is_real_move(from, to) & (dx <= 1) & (dy <= 1) & check_final_placement(board, from, to)
    }
}
