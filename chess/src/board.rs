//! Board and its textual form

use crate::types::{Cell, Color, Coord, File, Piece, Rank};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Shortest possible piece placement, i.e. `8/8/8/8/8/8/8/8`
pub const MIN_FEN_LEN: usize = 15;
/// Longest possible piece placement, i.e. 64 pieces and 7 delimiters
pub const MAX_FEN_LEN: usize = 71;

/// Error parsing the piece placement part of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum BoardParseError {
    /// String is shorter than any valid placement
    #[error("placement is too short ({0} bytes)")]
    TooShort(usize),
    /// String is longer than any valid placement
    #[error("placement is too long ({0} bytes)")]
    TooLong(usize),
    /// Character is neither a piece letter, nor a digit from 1 to 8, nor a delimiter
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    /// Number of `/` delimiters is not equal to 7
    #[error("expected 7 rank delimiters, found {0}")]
    DelimiterCount(usize),
    /// Rank doesn't describe exactly 8 squares
    #[error("rank {rank} describes {len} squares instead of 8")]
    RankLength { rank: Rank, len: usize },
}

/// Chess board
///
/// The board is just 64 cells, indexed in the same way as [`Coord`]. There are no piece lists or
/// any other auxiliary structures, so copying the board is cheap and all the queries scan it
/// directly.
///
/// # Example
///
/// ```
/// # use arraychess::{Board, Cell, Color, File, Piece, Rank};
/// #
/// let mut board = Board::empty();
/// board.put2(File::B, Rank::R2, Cell::from_parts(Color::White, Piece::King));
/// board.put2(File::D, Rank::R5, Cell::from_parts(Color::Black, Piece::King));
/// assert_eq!(board.as_fen(), "8/8/8/3k4/8/8/1K6/8");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Cell; 64],
}

impl Board {
    /// Returns a board without any pieces
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; 64],
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::Rook));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Queen));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::King));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::Rook));
        }
        res
    }

    /// Builds a board from its cells
    #[inline]
    pub const fn from_cells(cells: [Cell; 64]) -> Board {
        Board { cells }
    }

    /// Parses a board from the piece placement part of FEN
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Board, BoardParseError> {
        Board::from_str(fen)
    }

    /// Converts the board into the piece placement part of FEN
    ///
    /// Empty squares are always merged, so the result is canonical.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell; 64] {
        &self.cells
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` to the square with coordinate `c`
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Iterates over all the squares in ascending order together with their contents
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        Coord::iter().zip(self.cells.iter().copied())
    }

    /// Returns the position of the king of color `c`
    ///
    /// If there are many such kings, the one with the least index is returned.
    pub fn king_pos(&self, c: Color) -> Option<Coord> {
        let king = Cell::from_parts(c, Piece::King);
        self.iter()
            .find_map(|(coord, cell)| (cell == king).then_some(coord))
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

fn is_placement_char(b: u8) -> bool {
    matches!(b, b'/' | b'1'..=b'8')
        || matches!(Cell::from_char(b as char), Some(c) if c.is_occupied())
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = BoardParseError;

        if s.len() < MIN_FEN_LEN {
            return Err(Error::TooShort(s.len()));
        }
        if s.len() > MAX_FEN_LEN {
            return Err(Error::TooLong(s.len()));
        }
        if let Some(c) = s
            .chars()
            .find(|&c| !c.is_ascii() || !is_placement_char(c as u8))
        {
            return Err(Error::UnexpectedChar(c));
        }
        let delimiters = s.bytes().filter(|&b| b == b'/').count();
        if delimiters != 7 {
            return Err(Error::DelimiterCount(delimiters));
        }

        let mut cells = [Cell::EMPTY; 64];
        for (rank, part) in Rank::iter().zip(s.split('/')) {
            let mut file = 0_usize;
            for b in part.bytes() {
                match b {
                    b'1'..=b'8' => file += (b - b'0') as usize,
                    _ => {
                        if file < 8 {
                            // Checked by `is_placement_char()` above
                            cells[rank.index() * 8 + file] =
                                Cell::from_char(b as char).unwrap_or(Cell::EMPTY);
                        }
                        file += 1;
                    }
                }
            }
            if file != 8 {
                return Err(Error::RankLength { rank, len: file });
            }
        }

        Ok(Board { cells })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank.index() != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                let cell = self.get2(file, rank);
                if cell.is_free() {
                    empty += 1;
                    continue;
                }
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", cell)?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}
