//! Turn keeping for a game played on committed boards
//!
//! A game never stores its board. The [`GameState`] holds a commitment to it, and every move comes
//! with the board it is played on. [`propose_move`] accepts the move only if that board matches
//! the commitment, the right player moves a piece of their own color, and the piece's
//! [`rules::MovementRule`] allows it. The result is the state for the next move.

use board::{Board, BoardCommitment, Color, Coordinate};
use rules::MoveError;
use tracing::{debug, info, instrument};

mod session;
mod state;

pub use crate::session::{Game, SharedGame};
pub use crate::state::{GameState, PlayerId};

pub type Result<T, E = Rejection> = core::result::Result<T, E>;

/// Why a proposed move was not played
///
/// A rejected move never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Rejection {
    #[error("the game is over")]
    GameOver,
    #[error("stale or forged board: it does not match the committed one")]
    StaleBoard,
    #[error("unauthorized mover: it is not this player's turn")]
    UnauthorizedMover,
    #[error("no piece to move at the source square")]
    EmptySource,
    #[error("wrong-color piece: {0} is to move")]
    WrongColorPiece(Color),
    #[error("destination is not reachable for the piece being moved")]
    IllegalGeometry,
}
impl From<MoveError> for Rejection {
    fn from(value: MoveError) -> Self {
        match value {
            MoveError::EmptySource => Self::EmptySource,
            MoveError::IllegalGeometry => Self::IllegalGeometry,
        }
    }
}

/// Start a new game between two players, with `player1` on white
///
/// ```
/// # use board::Board;
/// # use game::{reset_game, PlayerId};
/// let state = reset_game(PlayerId([1; 32]), PlayerId([2; 32]));
/// assert!(state.white_to_move);
/// assert_eq!(state.commitment, Board::STARTING.commitment());
/// ```
pub fn reset_game(player1: PlayerId, player2: PlayerId) -> GameState {
    GameState::new(player1, player2)
}

/// The commitment a [`GameState`] keeps for the given board
pub fn board_hash(board: &Board) -> BoardCommitment {
    board.commitment()
}

/// Play the move `from` to `to` on `board`, on behalf of `mover`
///
/// `board` must be the board committed to in `state`. On success, returns the state after the
/// move; the new board itself is `board.apply_move(from, to)`, which [`Game`] keeps track of.
///
/// The checks happen in this order, and the first one failing decides the rejection:
/// 1. the game must not be over,
/// 2. `board` must match the commitment,
/// 3. `mover` must be the player whose turn it is,
/// 4. there must be a piece on `from`,
/// 5. that piece must be of the color to move,
/// 6. the piece must be able to move to `to`.
///
/// ```
/// # use board::{Board, Coordinate};
/// # use game::{propose_move, reset_game, PlayerId, Rejection};
/// let (white, black) = (PlayerId([1; 32]), PlayerId([2; 32]));
/// let state = reset_game(white, black);
/// let (from, to) = (Coordinate::new(4, 1), Coordinate::new(4, 3));
///
/// assert_eq!(
///     propose_move(&state, &Board::STARTING, from, to, black),
///     Err(Rejection::UnauthorizedMover),
/// );
/// let next = propose_move(&state, &Board::STARTING, from, to, white).unwrap();
/// assert_eq!(next.commitment, Board::STARTING.apply_move(from, to).commitment());
/// assert!(!next.white_to_move);
/// ```
#[instrument(level = "debug", skip_all, fields(%from, %to))]
pub fn propose_move(
    state: &GameState,
    board: &Board,
    from: Coordinate,
    to: Coordinate,
    mover: PlayerId,
) -> Result<GameState> {
    let (next, _) = play(state, board, from, to, mover)?;
    info!(
        side = %state.side_to_move(),
        commitment = %next.commitment,
        "move played"
    );
    Ok(next)
}

/// Check and apply a move, returning the next state and the board it commits to
pub(crate) fn play(
    state: &GameState,
    board: &Board,
    from: Coordinate,
    to: Coordinate,
    mover: PlayerId,
) -> Result<(GameState, Board)> {
    check_move(state, board, from, to, mover).inspect_err(|rejection| {
        debug!(%rejection, %mover, "move rejected");
    })?;
    let board = board.apply_move(from, to);
    Ok((state.advance(&board), board))
}

fn check_move(
    state: &GameState,
    board: &Board,
    from: Coordinate,
    to: Coordinate,
    mover: PlayerId,
) -> Result<()> {
    if state.is_game_over {
        return Err(Rejection::GameOver);
    }
    if board_hash(board) != state.commitment {
        return Err(Rejection::StaleBoard);
    }
    if mover != state.player_to_move() {
        return Err(Rejection::UnauthorizedMover);
    }
    let piece = board.piece_at(from);
    if piece.is_empty() {
        return Err(Rejection::EmptySource);
    }
    let side = state.side_to_move();
    if !piece.is_color(side) {
        return Err(Rejection::WrongColorPiece(side));
    }
    rules::classify_move(board, from, to)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::{Piece, PieceCode, PieceKind};

    const WHITE: PlayerId = PlayerId([0x11; 32]);
    const BLACK: PlayerId = PlayerId([0x22; 32]);

    const fn at(x: u8, y: u8) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_move_error_conversion() {
        assert_eq!(
            Rejection::from(MoveError::EmptySource),
            Rejection::EmptySource
        );
        assert_eq!(
            Rejection::from(MoveError::IllegalGeometry),
            Rejection::IllegalGeometry
        );
    }

    #[test]
    fn test_game_over_comes_first() {
        let state = reset_game(WHITE, BLACK).conclude();
        // Stale board, wrong player and an empty square, but the game being over wins
        assert_eq!(
            propose_move(&state, &Board::EMPTY, at(3, 3), at(3, 4), BLACK),
            Err(Rejection::GameOver)
        );
        assert_eq!(
            propose_move(&state, &Board::STARTING, at(4, 1), at(4, 3), WHITE),
            Err(Rejection::GameOver)
        );
    }

    #[test]
    fn test_stale_board_before_mover() {
        let state = reset_game(WHITE, BLACK);
        let forged =
            Board::STARTING.with_piece(at(3, 3), Piece::new(PieceKind::Queen, Color::White));
        assert_eq!(
            propose_move(&state, &forged, at(4, 1), at(4, 3), BLACK),
            Err(Rejection::StaleBoard)
        );
    }

    #[test]
    fn test_stranger_cannot_move() {
        let state = reset_game(WHITE, BLACK);
        let stranger = PlayerId([0x33; 32]);
        assert_eq!(
            propose_move(&state, &Board::STARTING, at(4, 1), at(4, 3), stranger),
            Err(Rejection::UnauthorizedMover)
        );
    }

    #[test]
    fn test_empty_source_before_color() {
        let state = reset_game(WHITE, BLACK);
        assert_eq!(
            propose_move(&state, &Board::STARTING, at(4, 4), at(4, 5), WHITE),
            Err(Rejection::EmptySource)
        );
    }

    #[test]
    fn test_wrong_color() {
        let state = reset_game(WHITE, BLACK);
        assert_eq!(
            propose_move(&state, &Board::STARTING, at(4, 6), at(4, 4), WHITE),
            Err(Rejection::WrongColorPiece(Color::White))
        );
    }

    #[test]
    fn test_illegal_geometry() {
        let state = reset_game(WHITE, BLACK);
        assert_eq!(
            propose_move(&state, &Board::STARTING, at(4, 1), at(4, 4), WHITE),
            Err(Rejection::IllegalGeometry)
        );
        // Off the board
        assert_eq!(
            propose_move(&state, &Board::STARTING, at(1, 0), at(255, 2), WHITE),
            Err(Rejection::IllegalGeometry)
        );
    }

    #[test]
    fn test_unnamed_code_is_illegal_geometry() {
        let board = Board::STARTING.with_piece(at(3, 3), PieceCode(13));
        let state = GameState {
            commitment: board_hash(&board),
            ..reset_game(WHITE, BLACK)
        };
        assert_eq!(
            propose_move(&state, &board, at(3, 3), at(3, 4), WHITE),
            Err(Rejection::IllegalGeometry)
        );
    }

    #[test]
    fn test_play_returns_new_board() {
        let state = reset_game(WHITE, BLACK);
        let (next, board) = play(&state, &Board::STARTING, at(6, 0), at(5, 2), WHITE).unwrap();
        assert_eq!(board.piece_at(at(6, 0)), PieceCode::EMPTY);
        assert_eq!(
            board.piece_at(at(5, 2)),
            Piece::new(PieceKind::Knight, Color::White).code()
        );
        assert_eq!(next.commitment, board_hash(&board));
        assert_eq!(next.player_to_move(), BLACK);
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::WrongColorPiece(Color::Black).to_string(),
            "wrong-color piece: black is to move"
        );
        assert_eq!(
            Rejection::StaleBoard.to_string(),
            "stale or forged board: it does not match the committed one"
        );
    }
}
