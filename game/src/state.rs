use core::{fmt, str::FromStr};

use board::{Board, BoardCommitment, CheckStatus, Color};

/// The public identity of someone taking part in a game
///
/// This is opaque to the engine, typically the digest of a public key. Only equality is ever
/// checked.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub [u8; 32]);
impl PlayerId {
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlayerId")
            .field(&format_args!("{self}"))
            .finish()
    }
}
impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
impl FromStr for PlayerId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut id = [0; 32];
        hex::decode_to_slice(s.strip_prefix("0x").unwrap_or(s), &mut id)?;
        Ok(Self(id))
    }
}
impl From<[u8; 32]> for PlayerId {
    fn from(value: [u8; 32]) -> Self {
        Self(value)
    }
}

/// Everything which is remembered between two moves
///
/// The board itself is not part of the state, only its commitment: whoever proposes a move also
/// supplies the board, and it is checked against [`GameState::commitment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// The commitment to the current board
    pub commitment: BoardCommitment,
    /// The player of the white pieces
    pub player1: PlayerId,
    /// The player of the black pieces
    pub player2: PlayerId,
    pub white_to_move: bool,
    pub is_game_over: bool,
}
impl GameState {
    /// The state at the start of a game between the two players, white to move
    pub fn new(player1: PlayerId, player2: PlayerId) -> Self {
        Self {
            commitment: Board::STARTING.commitment(),
            player1,
            player2,
            white_to_move: true,
            is_game_over: false,
        }
    }

    /// The color whose turn it is
    pub const fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// The player who is allowed to make the next move
    pub const fn player_to_move(&self) -> PlayerId {
        match self.side_to_move() {
            Color::White => self.player1,
            Color::Black => self.player2,
        }
    }

    /// The color the given player controls, if they play in this game
    pub fn color_of(&self, player: PlayerId) -> Option<Color> {
        if player == self.player1 {
            Some(Color::White)
        } else if player == self.player2 {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// The state after a move which produced `board`
    pub(crate) fn advance(&self, board: &Board) -> Self {
        Self {
            commitment: board.commitment(),
            white_to_move: !self.white_to_move,
            ..*self
        }
    }

    /// The same state, but with the game over
    ///
    /// Deciding that a game has ended is up to the caller; no further moves are accepted.
    #[must_use]
    pub fn conclude(&self) -> Self {
        Self {
            is_game_over: true,
            ..*self
        }
    }

    /// Whether the side to move is in check or checkmated on `board`
    ///
    /// This is for reporting only. It does not end the game, nor does it restrict the moves
    /// [`crate::propose_move`] accepts.
    pub fn check_status(&self, board: &Board) -> CheckStatus {
        rules::check::check_status(board, self.side_to_move())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::Coordinate;
    use quickcheck::quickcheck;

    const ALICE: PlayerId = PlayerId([0xa1; 32]);
    const BOB: PlayerId = PlayerId([0xb0; 32]);

    quickcheck! {
        fn test_player_id_display_round_trip(bytes: Vec<u8>) -> bool {
            let mut id = [0; 32];
            for (byte, value) in id.iter_mut().zip(bytes) {
                *byte = value;
            }
            let id = PlayerId(id);
            id.to_string().parse::<PlayerId>() == Ok(id)
        }
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(ALICE, BOB);
        assert_eq!(state.commitment, Board::STARTING.commitment());
        assert!(state.white_to_move);
        assert!(!state.is_game_over);
        assert_eq!(state.side_to_move(), Color::White);
        assert_eq!(state.player_to_move(), ALICE);
    }

    #[test]
    fn test_colors() {
        let state = GameState::new(ALICE, BOB);
        assert_eq!(state.color_of(ALICE), Some(Color::White));
        assert_eq!(state.color_of(BOB), Some(Color::Black));
        assert_eq!(state.color_of(PlayerId([0; 32])), None);
    }

    #[test]
    fn test_advance_flips_turn() {
        let state = GameState::new(ALICE, BOB);
        let board = Board::STARTING.apply_move(Coordinate::new(4, 1), Coordinate::new(4, 3));
        let next = state.advance(&board);
        assert_eq!(next.commitment, board.commitment());
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.player_to_move(), BOB);
        assert_eq!(next.advance(&board).player_to_move(), ALICE);
    }

    #[test]
    fn test_conclude() {
        let state = GameState::new(ALICE, BOB).conclude();
        assert!(state.is_game_over);
        assert_eq!(state.commitment, Board::STARTING.commitment());
        assert!(state.white_to_move);
    }

    #[test]
    fn test_player_id_format() {
        assert_eq!(ALICE.to_string(), "a1".repeat(32));
        assert_eq!(format!("0x{BOB}").parse::<PlayerId>(), Ok(BOB));
        assert!("a1".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_check_status_of_side_to_move() {
        let state = GameState::new(ALICE, BOB);
        assert_eq!(state.check_status(&Board::STARTING), CheckStatus::None);
    }
}
