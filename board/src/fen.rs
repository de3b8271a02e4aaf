//! Piece placement in FEN, the first field of a FEN record

use crate::{Board, Coordinate, Piece};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FenError {
    #[error("expected 8 ranks in piece placement, found {0}")]
    WrongRankCount(usize),
    #[error("rank {rank} describes {files} files instead of 8")]
    WrongFileCount { rank: u8, files: usize },
    #[error("unknown piece letter {0:?}")]
    UnknownPiece(char),
}

impl Board {
    /// Parse the piece placement field of a FEN record
    ///
    /// Anything after the first space is ignored, so a full FEN record is accepted too.
    ///
    /// ```
    /// # use board::Board;
    /// assert_eq!(
    ///     Board::from_fen_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    ///     Ok(Board::STARTING),
    /// );
    /// ```
    pub fn from_fen_placement(fen: &str) -> Result<Self, FenError> {
        let placement = fen.split(' ').next().unwrap_or_default();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount(ranks.len()));
        }
        let mut board = Self::EMPTY;
        for (rank_idx, rank) in ranks.into_iter().enumerate() {
            let y = 7 - rank_idx as u8;
            let mut file = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_fen_letter(c).ok_or(FenError::UnknownPiece(c))?;
                if file < 8 {
                    board = board.with_piece(Coordinate::new(file as u8, y), piece);
                }
                file += 1;
            }
            if file != 8 {
                return Err(FenError::WrongFileCount {
                    rank: y + 1,
                    files: file,
                });
            }
        }
        Ok(board)
    }

    /// Convert to the piece placement field of a FEN record
    ///
    /// Codes which name no piece are written as empty squares.
    pub fn to_fen_placement(&self) -> String {
        let mut fen = String::with_capacity(71);
        for y in (0..8).rev() {
            let mut empty = 0;
            for x in 0..8 {
                match self.piece_at(Coordinate::new(x, y)).piece() {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.fen_letter());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if y > 0 {
                fen.push('/');
            }
        }
        fen
    }
}
