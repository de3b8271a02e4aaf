use std::sync::{Mutex, PoisonError};

use board::{Board, CheckStatus, Coordinate};
use tracing::info;

use crate::{play, reset_game, GameState, PlayerId, Result};

/// A game which keeps its own board next to the committed state
///
/// Unlike [`crate::propose_move`], moves only need the squares and the mover: the board to play
/// on is always the one the last move produced.
#[derive(Clone, Debug)]
pub struct Game {
    /// The current board, matching `state.commitment`
    board: Board,
    /// The committed state
    state: GameState,
}

impl Game {
    /// Create a new game from the starting board, with `player1` on white
    pub fn new(player1: PlayerId, player2: PlayerId) -> Self {
        Self {
            board: Board::STARTING,
            state: reset_game(player1, player2),
        }
    }

    /// Make a move for `mover`
    ///
    /// On success, this updates both the board and the state and returns the new state. On failure
    /// nothing changes.
    pub fn play(&mut self, from: Coordinate, to: Coordinate, mover: PlayerId) -> Result<GameState> {
        let (state, board) = play(&self.state, &self.board, from, to, mover)?;
        info!(%from, %to, commitment = %state.commitment, "move played");
        self.board = board;
        self.state = state;
        Ok(state)
    }

    /// Mark the game as over
    pub fn conclude(&mut self) {
        self.state = self.state.conclude();
    }

    /// Whether the side to move is in check
    pub fn check_status(&self) -> CheckStatus {
        self.state.check_status(&self.board)
    }

    /// Get the board right now
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the state of the game right now
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

/// A [`GameState`] shared between threads
///
/// Moves are checked and applied while holding a lock, so out of several moves proposed against
/// the same committed board, only the first to get the lock is played. The others find the
/// commitment changed and are rejected as stale.
#[derive(Debug)]
pub struct SharedGame {
    state: Mutex<GameState>,
}

impl SharedGame {
    pub fn new(player1: PlayerId, player2: PlayerId) -> Self {
        Self::from_state(reset_game(player1, player2))
    }

    /// Share an existing state
    pub const fn from_state(state: GameState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Play a move, see [`crate::propose_move`]
    ///
    /// Returns the new board along with the new state, so the caller can supply it for the next
    /// move.
    pub fn propose_move(
        &self,
        board: &Board,
        from: Coordinate,
        to: Coordinate,
        mover: PlayerId,
    ) -> Result<(GameState, Board)> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (state, board) = play(&guard, board, from, to, mover)?;
        info!(%from, %to, commitment = %state.commitment, "move played");
        *guard = state;
        Ok((state, board))
    }

    /// Mark the game as over
    pub fn conclude(&self) {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = guard.conclude();
    }

    /// A copy of the current state
    pub fn snapshot(&self) -> GameState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
