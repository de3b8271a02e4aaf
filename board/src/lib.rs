//! The data model for a committed chess position
//!
//! A [`Board`] is a plain 8x8 grid of [`PieceCode`]s. Every lookup and update scans all 64 cells
//! and selects without branching on which cell matched, so the same work is done for every input,
//! including coordinates that are off the board.

use core::fmt;

#[cfg(any(test, feature = "quickcheck"))]
mod arbitrary;
mod commitment;
mod fen;

pub use crate::commitment::BoardCommitment;
pub use crate::fen::FenError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BoardError {
    #[error("piece code {code} at {at} is outside of 0..=12")]
    InvalidPieceCode { code: u8, at: Coordinate },
}

/// The types of pieces there are
///
/// The discriminant is the piece code of the black piece of that kind.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}
impl PieceKind {
    /// All the kinds of pieces there are
    pub const KINDS: [PieceKind; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    /// The capitalized version of the letter used for this piece in FEN
    pub const fn fen_letter(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Whether this piece moves along lines and can be blocked on the way
    pub const fn is_sliding(self) -> bool {
        matches!(self, Self::Bishop | Self::Rook | Self::Queen)
    }
}

/// The colors a piece can have
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub const fn is_black(self) -> bool {
        match self {
            Color::White => false,
            Color::Black => true,
        }
    }

    pub const fn is_white(self) -> bool {
        match self {
            Color::White => true,
            Color::Black => false,
        }
    }
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

/// A piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}
impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub const fn fen_letter(self) -> char {
        match self.color {
            Color::White => self.kind.fen_letter().to_ascii_uppercase(),
            Color::Black => self.kind.fen_letter().to_ascii_lowercase(),
        }
    }

    /// Parse a piece from its FEN letter
    ///
    /// ```
    /// # use board::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::from_fen_letter('q'), Some(Piece::new(PieceKind::Queen, Color::Black)));
    /// assert_eq!(Piece::from_fen_letter('x'), None);
    /// ```
    pub const fn from_fen_letter(letter: char) -> Option<Self> {
        let kind = match letter.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { kind, color })
    }

    /// The code stored on the board for this piece
    pub const fn code(self) -> PieceCode {
        match self.color {
            Color::Black => PieceCode(self.kind as u8),
            Color::White => PieceCode(self.kind as u8 + PieceCode::WHITE_OFFSET),
        }
    }

    /// Returns an iterator of all pieces that exist
    pub fn all_pieces() -> impl Iterator<Item = Self> {
        [Color::White, Color::Black]
            .into_iter()
            .flat_map(|color| {
                PieceKind::KINDS
                    .into_iter()
                    .map(move |kind| Self { kind, color })
            })
    }
}

/// The numeric encoding of the contents of one square
///
/// `0` is empty, `1..=6` are black pawn, knight, bishop, rook, queen, king, and `7..=12` are the
/// white pieces in the same order.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PieceCode(pub u8);
impl PieceCode {
    pub const EMPTY: Self = Self(0);

    /// The largest code that names a piece
    pub const MAX: u8 = 12;

    /// What is added to a black piece's code to get the white piece of the same kind
    pub const WHITE_OFFSET: u8 = 6;

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_white(self) -> bool {
        self.0 >= 7
    }

    pub const fn is_black(self) -> bool {
        self.0 >= 1 && self.0 <= 6
    }

    /// Whether this is one of the 13 codes a board may hold
    pub const fn is_valid(self) -> bool {
        self.0 <= Self::MAX
    }

    /// The color of the piece, or `None` for an empty square
    pub const fn color(self) -> Option<Color> {
        if self.is_white() {
            Some(Color::White)
        } else if self.is_black() {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// The kind of piece, ignoring color
    ///
    /// ```
    /// # use board::{PieceCode, PieceKind};
    /// assert_eq!(PieceCode(4).kind(), Some(PieceKind::Rook));
    /// assert_eq!(PieceCode(10).kind(), Some(PieceKind::Rook));
    /// assert_eq!(PieceCode(0).kind(), None);
    /// assert_eq!(PieceCode(13).kind(), None);
    /// ```
    pub const fn kind(self) -> Option<PieceKind> {
        match self.0 {
            1 | 7 => Some(PieceKind::Pawn),
            2 | 8 => Some(PieceKind::Knight),
            3 | 9 => Some(PieceKind::Bishop),
            4 | 10 => Some(PieceKind::Rook),
            5 | 11 => Some(PieceKind::Queen),
            6 | 12 => Some(PieceKind::King),
            _ => None,
        }
    }

    pub const fn piece(self) -> Option<Piece> {
        match (self.kind(), self.color()) {
            (Some(kind), Some(color)) => Some(Piece { kind, color }),
            _ => None,
        }
    }

    /// Whether both squares hold pieces, and of different colors
    pub const fn is_opponent_of(self, other: Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.is_white() != other.is_white()
    }

    /// Whether this square holds a piece of the given color
    pub const fn is_color(self, color: Color) -> bool {
        match color {
            Color::White => self.is_white(),
            Color::Black => self.is_black(),
        }
    }
}
impl From<Piece> for PieceCode {
    fn from(value: Piece) -> Self {
        value.code()
    }
}
impl fmt::Debug for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.piece() {
            Some(piece) => write!(f, "PieceCode({} '{}')", self.0, piece.fen_letter()),
            None => write!(f, "PieceCode({})", self.0),
        }
    }
}

/// Branch-free `if cond { a } else { b }`
///
/// ```
/// # use board::{select, PieceCode};
/// assert_eq!(select(true, PieceCode(3), PieceCode(9)), PieceCode(3));
/// assert_eq!(select(false, PieceCode(3), PieceCode(9)), PieceCode(9));
/// ```
#[inline]
pub const fn select(cond: bool, a: PieceCode, b: PieceCode) -> PieceCode {
    let mask = (cond as u8).wrapping_neg();
    PieceCode((a.0 & mask) | (b.0 & !mask))
}

/// The absolute difference between two unsigned values, as `max - min`
#[inline]
pub fn abs_diff(a: u8, b: u8) -> u8 {
    a.max(b) - a.min(b)
}

/// A square on the board, by file `x` and rank `y`
///
/// Both are meant to be in `0..=7`, but any value is representable so that being on the board is
/// something to check rather than something to assume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}
impl Coordinate {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns if this coordinate names a square of the board
    ///
    /// ```
    /// # use board::Coordinate;
    /// assert!(Coordinate::new(7, 0).is_on_board());
    /// assert!(!Coordinate::new(8, 0).is_on_board());
    /// assert!(!Coordinate::new(0, u8::MAX).is_on_board());
    /// ```
    pub const fn is_on_board(self) -> bool {
        self.x <= 7 && self.y <= 7
    }

    /// Returns if this coordinate is exactly the square `(x, y)`
    #[inline]
    pub const fn is(self, x: u8, y: u8) -> bool {
        (self.x == x) & (self.y == y)
    }

    /// The absolute file and rank distances to `other`
    pub fn delta(self, other: Self) -> (u8, u8) {
        (abs_diff(self.x, other.x), abs_diff(self.y, other.y))
    }

    /// Offset by the given number of files and ranks
    ///
    /// Stepping off the low edge wraps to a large value, which is off the board.
    ///
    /// ```
    /// # use board::Coordinate;
    /// assert_eq!(Coordinate::new(3, 3).offset(1, -2), Coordinate::new(4, 1));
    /// assert!(!Coordinate::new(0, 0).offset(-1, 0).is_on_board());
    /// ```
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.wrapping_add_signed(dx),
            y: self.y.wrapping_add_signed(dy),
        }
    }

    /// An iterator over all squares on the board, rank by rank
    ///
    /// ```
    /// assert_eq!(board::Coordinate::all_squares().count(), 64);
    /// ```
    pub fn all_squares() -> impl Iterator<Item = Self> {
        (0..64).map(|idx| Self::new(idx & 0x07, idx >> 3))
    }
}
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", (b'a' + self.x) as char, self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// The outcome of looking for threats against a king
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CheckStatus {
    None,
    Check,
    Checkmate,
}
/// Returns the status as appended to a move in algebraic notation
impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "",
            Self::Check => "+",
            Self::Checkmate => "#",
        })
    }
}

/// The contents of every square on the board
///
/// Stored as `cells[y][x]`, so rank 0 (white's back rank) is the first row. This is a value type:
/// moving a piece produces a new board and leaves the old one alone.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[PieceCode; 8]; 8],
}

/// Build a rank of piece codes in a `const` context
const fn rank(codes: [u8; 8]) -> [PieceCode; 8] {
    let mut out = [PieceCode::EMPTY; 8];
    let mut idx = 0;
    while idx < 8 {
        out[idx] = PieceCode(codes[idx]);
        idx += 1;
    }
    out
}

impl Board {
    /// A board with no pieces on it
    pub const EMPTY: Self = Self {
        cells: [[PieceCode::EMPTY; 8]; 8],
    };

    /// The position at the start of a chess game
    pub const STARTING: Self = Self {
        cells: [
            rank([10, 8, 9, 11, 12, 9, 8, 10]),
            rank([7; 8]),
            rank([0; 8]),
            rank([0; 8]),
            rank([0; 8]),
            rank([0; 8]),
            rank([1; 8]),
            rank([4, 2, 3, 5, 6, 3, 2, 4]),
        ],
    };

    pub const fn starting() -> Self {
        Self::STARTING
    }

    /// Build a board from raw codes, given as `rows[y][x]`
    ///
    /// ```
    /// # use board::Board;
    /// let mut rows = [[0; 8]; 8];
    /// rows[0][4] = 12;
    /// assert!(Board::from_rows(rows).is_ok());
    /// rows[3][3] = 13;
    /// assert!(Board::from_rows(rows).is_err());
    /// ```
    pub fn from_rows(rows: [[u8; 8]; 8]) -> Result<Self, BoardError> {
        let mut cells = [[PieceCode::EMPTY; 8]; 8];
        for (y, row) in rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let code = PieceCode(code);
                if !code.is_valid() {
                    return Err(BoardError::InvalidPieceCode {
                        code: code.0,
                        at: Coordinate::new(x as u8, y as u8),
                    });
                }
                cells[y][x] = code;
            }
        }
        Ok(Self { cells })
    }

    /// The raw codes, as `rows[y][x]`
    pub fn to_rows(&self) -> [[u8; 8]; 8] {
        self.cells.map(|row| row.map(|code| code.0))
    }

    /// Find the code at the given square
    ///
    /// Returns [`PieceCode::EMPTY`] if the square is empty or not on the board. Every cell is
    /// visited regardless of where the match is.
    ///
    /// ```
    /// # use board::{Board, Coordinate, PieceCode};
    /// assert_eq!(Board::STARTING.piece_at(Coordinate::new(4, 0)), PieceCode(12));
    /// assert_eq!(Board::STARTING.piece_at(Coordinate::new(4, 8)), PieceCode::EMPTY);
    /// ```
    pub fn piece_at(&self, at: Coordinate) -> PieceCode {
        let mut found = PieceCode::EMPTY;
        for (y, row) in self.cells.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                found = select(at.is(x as u8, y as u8), cell, found);
            }
        }
        found
    }

    /// Move whatever is on `from` to `to`, without checking legality
    ///
    /// `from` is emptied and anything on `to` is overwritten. If `to` is off the board, the piece
    /// is simply lifted off.
    ///
    /// ```
    /// # use board::{Board, Coordinate, PieceCode};
    /// let board = Board::STARTING.apply_move(Coordinate::new(0, 1), Coordinate::new(0, 3));
    /// assert_eq!(board.piece_at(Coordinate::new(0, 1)), PieceCode::EMPTY);
    /// assert_eq!(board.piece_at(Coordinate::new(0, 3)), PieceCode(7));
    /// ```
    #[must_use]
    pub fn apply_move(&self, from: Coordinate, to: Coordinate) -> Self {
        let moving = self.piece_at(from);
        let mut cells = self.cells;
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let (x, y) = (x as u8, y as u8);
                *cell = select(from.is(x, y), PieceCode::EMPTY, *cell);
                *cell = select(to.is(x, y), moving, *cell);
            }
        }
        Self { cells }
    }

    /// A copy of this board with `piece` placed on `at`
    ///
    /// Off-board squares leave the board unchanged.
    #[must_use]
    pub fn with_piece(&self, at: Coordinate, piece: impl Into<PieceCode>) -> Self {
        let piece = piece.into();
        let mut cells = self.cells;
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = select(at.is(x as u8, y as u8), piece, *cell);
            }
        }
        Self { cells }
    }

    /// All 64 squares with their contents, rank by rank
    pub fn squares(&self) -> impl Iterator<Item = (Coordinate, PieceCode)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &code)| (Coordinate::new(x as u8, y as u8), code))
        })
    }

    /// The number of pieces of the given color
    pub fn count(&self, color: Color) -> usize {
        self.squares()
            .filter(|(_, code)| code.is_color(color))
            .count()
    }

    /// The cells as one sequence, rank 0 first
    pub fn flatten(&self) -> [u8; 64] {
        let mut flat = [0; 64];
        for (idx, (_, code)) in self.squares().enumerate() {
            flat[idx] = code.0;
        }
        flat
    }
}
impl Default for Board {
    fn default() -> Self {
        Self::STARTING
    }
}
impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board")
            .field(&format_args!("{}", self.to_fen_placement()))
            .finish()
    }
}
/// Display as a grid, with white's side at the bottom
///
/// ```
/// let text = board::Board::STARTING.to_string();
/// assert_eq!(text.lines().next(), Some("rnbqkbnr"));
/// assert_eq!(text.lines().nth(4), Some("........"));
/// assert_eq!(text.lines().last(), Some("RNBQKBNR"));
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for row in self.cells.iter().rev() {
            for code in row {
                f.write_char(code.piece().map_or('.', Piece::fen_letter))?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::quickcheck;

    quickcheck! {
        fn test_piece_at_off_board_is_empty(board: Board, at: Coordinate) -> bool {
            at.is_on_board() || board.piece_at(at).is_empty()
        }

        fn test_apply_move_moves_the_piece(board: Board, from: Coordinate, to: Coordinate) -> bool {
            if from == to || !from.is_on_board() || !to.is_on_board() {
                return true;
            }
            let after = board.apply_move(from, to);
            after.piece_at(to) == board.piece_at(from) && after.piece_at(from).is_empty()
        }

        fn test_apply_move_leaves_other_squares(
            board: Board,
            from: Coordinate,
            to: Coordinate
        ) -> bool {
            let after = board.apply_move(from, to);
            Coordinate::all_squares()
                .filter(|&square| square != from && square != to)
                .all(|square| after.piece_at(square) == board.piece_at(square))
        }

        fn test_piece_at_matches_rows(board: Board, at: Coordinate) -> bool {
            !at.is_on_board()
                || board.piece_at(at).0 == board.to_rows()[at.y as usize][at.x as usize]
        }
    }

    #[test]
    fn test_piece_codes_round_trip() {
        for piece in Piece::all_pieces() {
            assert_eq!(piece.code().piece(), Some(piece));
        }
        assert_eq!(Piece::all_pieces().count(), 12);
    }

    #[test]
    fn test_piece_code_colors() {
        assert_eq!(PieceCode(0).color(), None);
        for code in 1..=6 {
            assert_eq!(PieceCode(code).color(), Some(Color::Black));
            assert_eq!(PieceCode(code + 6).color(), Some(Color::White));
            assert!(PieceCode(code).is_opponent_of(PieceCode(code + 6)));
            assert!(!PieceCode(code).is_opponent_of(PieceCode(code)));
            assert!(!PieceCode(code).is_opponent_of(PieceCode::EMPTY));
        }
    }

    #[test]
    fn test_starting_layout() {
        let board = Board::STARTING;
        assert_eq!(board.count(Color::White), 16);
        assert_eq!(board.count(Color::Black), 16);
        for x in 0..8 {
            assert_eq!(board.piece_at(Coordinate::new(x, 1)), PieceCode(7));
            assert_eq!(board.piece_at(Coordinate::new(x, 6)), PieceCode(1));
            let white = board.piece_at(Coordinate::new(x, 0));
            let black = board.piece_at(Coordinate::new(x, 7));
            assert_eq!(white.0, black.0 + PieceCode::WHITE_OFFSET);
        }
        assert_eq!(
            board.piece_at(Coordinate::new(3, 0)).piece(),
            Some(Piece::new(PieceKind::Queen, Color::White)),
        );
        assert_eq!(
            board.piece_at(Coordinate::new(4, 7)).piece(),
            Some(Piece::new(PieceKind::King, Color::Black)),
        );
    }

    #[test]
    fn test_null_move_keeps_board() {
        let square = Coordinate::new(1, 0);
        assert_eq!(Board::STARTING.apply_move(square, square), Board::STARTING);
    }

    #[test]
    fn test_apply_move_returns_new_board() {
        let before = Board::STARTING;
        let after = before.apply_move(Coordinate::new(6, 0), Coordinate::new(5, 2));
        assert_ne!(before, after);
        assert_eq!(before, Board::STARTING);
    }

    #[test]
    fn test_with_piece_off_board_is_noop() {
        let piece = Piece::new(PieceKind::Queen, Color::White);
        assert_eq!(
            Board::EMPTY.with_piece(Coordinate::new(9, 2), piece),
            Board::EMPTY
        );
    }

    #[test]
    fn test_coordinate_display() {
        assert_eq!(Coordinate::new(0, 0).to_string(), "a1");
        assert_eq!(Coordinate::new(4, 7).to_string(), "e8");
        assert_eq!(Coordinate::new(8, 1).to_string(), "(8, 1)");
    }

    #[test]
    fn test_abs_diff_is_symmetric() {
        for a in 0..=9 {
            for b in 0..=9 {
                assert_eq!(abs_diff(a, b), abs_diff(b, a));
                assert_eq!(abs_diff(a, b), (a as i8 - b as i8).unsigned_abs());
            }
        }
    }
}
