//! [`quickcheck`] support for property tests, here and in downstream crates

use quickcheck::{Arbitrary, Gen};

use crate::{Board, Coordinate, PieceCode};

impl Arbitrary for PieceCode {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(u8::arbitrary(g) % (PieceCode::MAX + 1))
    }
}

/// Mostly squares on the board, with the occasional out-of-range value
impl Arbitrary for Coordinate {
    fn arbitrary(g: &mut Gen) -> Self {
        if u8::arbitrary(g) % 8 == 0 {
            Self::new(u8::arbitrary(g), u8::arbitrary(g))
        } else {
            Self::new(u8::arbitrary(g) % 8, u8::arbitrary(g) % 8)
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let Self { x, y } = *self;
        Box::new(
            x.shrink()
                .map(move |x| Self::new(x, y))
                .chain(y.shrink().map(move |y| Self::new(x, y))),
        )
    }
}

/// About half of the squares are occupied
impl Arbitrary for Board {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut rows = [[0; 8]; 8];
        for row in &mut rows {
            for cell in row {
                if bool::arbitrary(g) {
                    *cell = PieceCode::arbitrary(g).0;
                }
            }
        }
        Self::from_rows(rows).unwrap_or(Self::EMPTY)
    }
}
