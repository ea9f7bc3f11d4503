//! Moves and move lists

use crate::types::{Coord, CoordParseError};

use std::fmt;
use std::slice;
use std::str::FromStr;
use std::vec;

use derive_more::{Deref, DerefMut};
use thiserror::Error;

/// Error parsing [`Move`] from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    /// String is not exactly four characters long
    #[error("invalid string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    Src(CoordParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    Dst(CoordParseError),
}

/// Move candidate
///
/// A move is just a pair of squares. It doesn't know which piece moves, whether something is
/// captured or whether it's en passant. If you need such details, look at the board before the
/// move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    src: Coord,
    dst: Coord,
}

impl Move {
    #[inline]
    pub const fn new(src: Coord, dst: Coord) -> Move {
        Move { src, dst }
    }

    /// Source square
    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    /// Destination square
    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }
}

impl From<(Coord, Coord)> for Move {
    #[inline]
    fn from((src, dst): (Coord, Coord)) -> Move {
        Move::new(src, dst)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(MoveParseError::BadLength);
        }
        let src = Coord::from_str(&s[0..2]).map_err(MoveParseError::Src)?;
        let dst = Coord::from_str(&s[2..4]).map_err(MoveParseError::Dst)?;
        Ok(Move::new(src, dst))
    }
}

/// List of moves
///
/// Dereferences into the underlying vector.
#[derive(Default, Debug, Clone, Eq, PartialEq, Deref, DerefMut)]
pub struct MoveList(Vec<Move>);

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> MoveList {
        MoveList(Vec::with_capacity(capacity))
    }

    /// Returns `true` if the list contains the move `src`-`dst`
    pub fn contains_move(&self, src: Coord, dst: Coord) -> bool {
        self.0.contains(&Move::new(src, dst))
    }

    /// Iterates over the destinations of the moves starting from `src`, keeping their order
    pub fn destinations(&self, src: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.0
            .iter()
            .filter(move |mv| mv.src() == src)
            .map(|mv| mv.dst())
    }
}

impl From<Vec<Move>> for MoveList {
    fn from(v: Vec<Move>) -> MoveList {
        MoveList(v)
    }
}

impl From<MoveList> for Vec<Move> {
    fn from(l: MoveList) -> Vec<Move> {
        l.0
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> MoveList {
        MoveList(iter.into_iter().collect())
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut MoveList {
    type Item = &'a mut Move;
    type IntoIter = slice::IterMut<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl fmt::Display for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, mv) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}
