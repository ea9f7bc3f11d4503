//! Board symmetries
//!
//! Each of the eight symmetries of the square maps a board to another board, moving the pieces
//! without changing their colors. This is mostly useful for testing: move generation must commute
//! with the symmetries that don't swap files and ranks.

use crate::board::Board;
use crate::types::{Coord, File, Rank};

fn relocate(b: &Board, f: impl Fn(Coord) -> Coord) -> Board {
    let mut res = Board::empty();
    for (c, cell) in b.iter() {
        res.put(f(c), cell);
    }
    res
}

/// Rotates the board by 90 degrees clockwise
pub fn rotate(b: &Board) -> Board {
    relocate(b, |c| {
        Coord::from_parts(
            File::from_index(7 - c.rank().index()),
            Rank::from_index(c.file().index()),
        )
    })
}

/// Swaps the files, so that the queen side becomes the king side
pub fn mirror_files(b: &Board) -> Board {
    relocate(b, Coord::flipped_file)
}

/// Swaps the ranks, so that rank 1 becomes rank 8
pub fn mirror_ranks(b: &Board) -> Board {
    relocate(b, Coord::flipped_rank)
}

/// Reflects the board through its center
pub fn mirror_both(b: &Board) -> Board {
    relocate(b, |c| c.flipped_file().flipped_rank())
}

/// Symmetry of the board
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Symmetry {
    Identity = 0,
    MirrorFiles = 1,
    MirrorRanks = 2,
    MirrorBoth = 3,
    Rotate = 4,
    RotateMirrorFiles = 5,
    RotateMirrorRanks = 6,
    RotateMirrorBoth = 7,
}

impl Symmetry {
    pub const COUNT: usize = 8;

    #[inline]
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Returns the symmetry with index `val`, or `None` if `val >= 8`
    pub const fn from_index(val: usize) -> Option<Symmetry> {
        match val {
            0 => Some(Symmetry::Identity),
            1 => Some(Symmetry::MirrorFiles),
            2 => Some(Symmetry::MirrorRanks),
            3 => Some(Symmetry::MirrorBoth),
            4 => Some(Symmetry::Rotate),
            5 => Some(Symmetry::RotateMirrorFiles),
            6 => Some(Symmetry::RotateMirrorRanks),
            7 => Some(Symmetry::RotateMirrorBoth),
            _ => None,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).filter_map(Symmetry::from_index)
    }

    /// Returns `true` if the symmetry turns files into ranks
    pub const fn is_rotated(&self) -> bool {
        self.index() >= 4
    }

    /// Returns the symmetry applied after the rotation, or `self` if there is no rotation
    pub const fn unrotated(&self) -> Symmetry {
        match *self {
            Symmetry::Rotate => Symmetry::Identity,
            Symmetry::RotateMirrorFiles => Symmetry::MirrorFiles,
            Symmetry::RotateMirrorRanks => Symmetry::MirrorRanks,
            Symmetry::RotateMirrorBoth => Symmetry::MirrorBoth,
            s => s,
        }
    }

    /// Applies the symmetry to the board
    ///
    /// The last four symmetries rotate the board first and then apply one of the first four.
    pub fn apply(&self, b: &Board) -> Board {
        match *self {
            Symmetry::Identity => *b,
            Symmetry::MirrorFiles => mirror_files(b),
            Symmetry::MirrorRanks => mirror_ranks(b),
            Symmetry::MirrorBoth => mirror_both(b),
            Symmetry::Rotate
            | Symmetry::RotateMirrorFiles
            | Symmetry::RotateMirrorRanks
            | Symmetry::RotateMirrorBoth => self.unrotated().apply(&rotate(b)),
        }
    }
}

impl Board {
    /// Returns the board transformed by the symmetry `s`
    pub fn transformed(&self, s: Symmetry) -> Board {
        s.apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legal;
    use crate::moves::Move;
    use crate::types::{Cell, Color};

    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn random_board(rng: &mut Xoshiro256PlusPlus) -> Board {
        let mut b = Board::empty();
        for coord in Coord::iter() {
            if rng.gen_range(0..3) == 0 {
                b.put(coord, Cell::from_index(rng.gen_range(1..Cell::COUNT)));
            }
        }
        b
    }

    #[test]
    fn test_simple() {
        let b = Board::from_fen("k7/8/8/8/8/8/8/6RK").unwrap();
        assert_eq!(rotate(&b).as_fen(), "7k/8/8/8/8/8/R7/K7");
        assert_eq!(mirror_files(&b).as_fen(), "7k/8/8/8/8/8/8/KR6");
        assert_eq!(mirror_ranks(&b).as_fen(), "6RK/8/8/8/8/8/8/k7");
        assert_eq!(mirror_both(&b).as_fen(), "KR6/8/8/8/8/8/8/7k");
        assert_eq!(b.transformed(Symmetry::Identity), b);
        assert_eq!(
            b.transformed(Symmetry::RotateMirrorFiles).as_fen(),
            "k7/8/8/8/8/8/7R/7K"
        );
    }

    #[test]
    fn test_index() {
        for (i, s) in Symmetry::iter().enumerate() {
            assert_eq!(s.index(), i);
            assert_eq!(Symmetry::from_index(i), Some(s));
            assert_eq!(s.is_rotated(), i >= 4);
        }
        assert_eq!(Symmetry::iter().count(), Symmetry::COUNT);
        assert_eq!(Symmetry::from_index(Symmetry::COUNT), None);
    }

    #[test]
    fn test_group_laws() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        for _ in 0..100 {
            let b = random_board(&mut rng);
            assert_eq!(mirror_both(&mirror_both(&b)), b);
            assert_eq!(mirror_files(&mirror_files(&b)), b);
            assert_eq!(mirror_ranks(&mirror_ranks(&b)), b);
            assert_eq!(rotate(&rotate(&rotate(&rotate(&b)))), b);
            assert_eq!(rotate(&rotate(&b)), mirror_both(&b));
            assert_eq!(mirror_files(&mirror_ranks(&b)), mirror_both(&b));

            let images: Vec<Board> = Symmetry::iter().map(|s| s.apply(&b)).collect();
            let count = |b: &Board| b.iter().filter(|(_, c)| c.is_occupied()).count();
            for (s, image) in Symmetry::iter().zip(&images) {
                assert_eq!(count(image), count(&b));
                assert_eq!(s.unrotated().index(), s.index() % 4);
                if s.is_rotated() {
                    assert_eq!(*image, s.unrotated().apply(&rotate(&b)));
                }
            }
        }
    }

    fn map_coord(s: Symmetry, c: Coord) -> Coord {
        let mut b = Board::empty();
        b.put(c, Cell::from_char('K').unwrap());
        s.apply(&b).king_pos(Color::White).unwrap()
    }

    #[test]
    fn test_movegen_commutes() {
        let b = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R").unwrap();
        let expected = legal::legal_moves(&b, Color::White, None).unwrap();
        let image = mirror_files(&b);
        let moves = legal::legal_moves(&image, Color::White, None).unwrap();
        let mut mapped: Vec<Move> = moves
            .iter()
            .map(|mv| {
                Move::new(
                    map_coord(Symmetry::MirrorFiles, mv.src()),
                    map_coord(Symmetry::MirrorFiles, mv.dst()),
                )
            })
            .collect();
        mapped.sort();
        let mut expected: Vec<Move> = expected.into();
        expected.sort();
        assert_eq!(mapped, expected);
    }
}
