use core::{fmt, str::FromStr};

use sha2::{Digest, Sha256};

use crate::Board;

/// A SHA-256 hash binding a claimant to one exact board
///
/// The digest covers the 64 piece codes in row-major order, rank 0 first, so any difference in
/// any cell yields a different commitment.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardCommitment(pub [u8; 32]);
impl BoardCommitment {
    /// Hash the given sequence of cells
    fn of_cells(cells: &[u8; 64]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(cells);
        let mut digest = [0; 32];
        digest.copy_from_slice(&hasher.finalize());
        Self(digest)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
impl fmt::Debug for BoardCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoardCommitment")
            .field(&format_args!("{self}"))
            .finish()
    }
}
impl fmt::Display for BoardCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
impl FromStr for BoardCommitment {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut digest = [0; 32];
        hex::decode_to_slice(s.strip_prefix("0x").unwrap_or(s), &mut digest)?;
        Ok(Self(digest))
    }
}

impl Board {
    /// The commitment to this exact board
    ///
    /// ```
    /// # use board::{Board, Coordinate};
    /// let moved = Board::STARTING.apply_move(Coordinate::new(4, 1), Coordinate::new(4, 3));
    /// assert_eq!(Board::STARTING.commitment(), Board::starting().commitment());
    /// assert_ne!(Board::STARTING.commitment(), moved.commitment());
    /// ```
    pub fn commitment(&self) -> BoardCommitment {
        BoardCommitment::of_cells(&self.flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{Coordinate, PieceCode};
    use quickcheck::quickcheck;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    quickcheck! {
        fn test_commitment_is_deterministic(board: Board) -> bool {
            let copy = Board::from_rows(board.to_rows()).expect("board codes are in range");
            board.commitment() == copy.commitment()
        }

        fn test_commitment_display_round_trip(board: Board) -> bool {
            let commitment = board.commitment();
            commitment.to_string().parse::<BoardCommitment>().ok() == Some(commitment)
        }
    }

    #[test]
    fn test_single_cell_mutation_changes_commitment() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut board = Board::STARTING;
        for _ in 0..2_000 {
            let square = Coordinate::new(rng.gen_range(0..8), rng.gen_range(0..8));
            let old = board.piece_at(square);
            let mut new = PieceCode(rng.gen_range(0..=PieceCode::MAX));
            if new == old {
                new = PieceCode((old.0 + 1) % (PieceCode::MAX + 1));
            }
            let mutated = board.with_piece(square, new);
            assert_ne!(
                board.commitment(),
                mutated.commitment(),
                "changing {square} from {old:?} to {new:?} kept the commitment",
            );
            board = mutated;
        }
    }

    #[test]
    fn test_commitment_is_order_sensitive() {
        // Swapping two different pieces keeps the multiset of codes but not the sequence
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(1, 0);
        let swapped = Board::STARTING
            .with_piece(a, Board::STARTING.piece_at(b))
            .with_piece(b, Board::STARTING.piece_at(a));
        assert_ne!(Board::STARTING.commitment(), swapped.commitment());
    }

    #[test]
    fn test_commitment_hex_format() {
        let text = Board::EMPTY.commitment().to_string();
        assert_eq!(text.len(), 64);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            format!("0x{text}").parse::<BoardCommitment>().ok(),
            Some(Board::EMPTY.commitment())
        );
    }
}
