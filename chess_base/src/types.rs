//! Value types shared by the board and the move generators

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastlingRightsParseError {
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    #[error("duplicate char {0:?}")]
    DuplicateChar(char),
    #[error("unexpected empty string")]
    EmptyString,
}

/// Raw square index outside of its allowed domain
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("square index {value} is out of range {min}..={max}")]
pub struct RangeError {
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

/// Board file, from `a` (index 0) to `h` (index 7)
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the file with index `val`
    ///
    /// # Panics
    ///
    /// Panics if `val >= 8`.
    pub const fn from_index(val: usize) -> File {
        Self::ALL[val]
    }

    pub fn iter() -> impl Iterator<Item = File> {
        Self::ALL.into_iter()
    }

    pub fn from_char(c: char) -> Option<File> {
        let idx = (c as u32).checked_sub('a' as u32)?;
        Self::ALL.get(idx as usize).copied()
    }

    pub fn as_char(&self) -> char {
        char::from(b'a' + *self as u8)
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Board rank
///
/// Ranks are indexed from the top of the board: [`Rank::R8`] has index 0 and [`Rank::R1`] has
/// index 7.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R8 = 0,
    R7 = 1,
    R6 = 2,
    R5 = 3,
    R4 = 4,
    R3 = 5,
    R2 = 6,
    R1 = 7,
}

impl Rank {
    const ALL: [Rank; 8] = [
        Rank::R8,
        Rank::R7,
        Rank::R6,
        Rank::R5,
        Rank::R4,
        Rank::R3,
        Rank::R2,
        Rank::R1,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the rank with index `val`
    ///
    /// # Panics
    ///
    /// Panics if `val >= 8`.
    pub const fn from_index(val: usize) -> Rank {
        Self::ALL[val]
    }

    /// Iterates from rank 8 down to rank 1
    pub fn iter() -> impl Iterator<Item = Rank> {
        Self::ALL.into_iter()
    }

    pub fn from_char(c: char) -> Option<Rank> {
        let idx = ('8' as u32).checked_sub(c as u32)?;
        Self::ALL.get(idx as usize).copied()
    }

    pub fn as_char(&self) -> char {
        char::from(b'8' - *self as u8)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Square on the board
///
/// Squares are numbered row by row, starting from a8 (index 0) and ending with h1 (index 63).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

impl Coord {
    /// Returns the square with index `val`
    ///
    /// # Panics
    ///
    /// Panics if `val >= 64`.
    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(rank as u8 * 8 + file as u8)
    }

    pub const fn file(&self) -> File {
        File::ALL[(self.0 % 8) as usize]
    }

    pub const fn rank(&self) -> Rank {
        Rank::ALL[(self.0 / 8) as usize]
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Same file, rank mirrored (a8 becomes a1)
    pub const fn flipped_rank(self) -> Coord {
        Coord::from_parts(self.file(), Rank::from_index(7 - self.rank().index()))
    }

    /// Same rank, file mirrored (a8 becomes h8)
    pub const fn flipped_file(self) -> Coord {
        Coord::from_parts(File::from_index(7 - self.file().index()), self.rank())
    }

    /// Moves the square by `delta_file` columns and `delta_rank` rows
    ///
    /// Positive `delta_rank` moves towards rank 1, as ranks are indexed from the top. Returns
    /// `None` if the resulting square is off the board.
    pub fn try_shift(self, delta_file: isize, delta_rank: isize) -> Option<Coord> {
        let file = self.file().index() as isize + delta_file;
        let rank = self.rank().index() as isize + delta_rank;
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }
        Some(Coord((rank * 8 + file) as u8))
    }

    pub fn iter() -> impl Iterator<Item = Coord> {
        (0..64).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Coord, Self::Err> {
        let (file_ch, rank_ch) = match *s.as_bytes() {
            [f, r] => (char::from(f), char::from(r)),
            _ => return Err(CoordParseError::BadLength),
        };
        let file = File::from_char(file_ch)
            .ok_or(CoordParseError::UnexpectedFileChar(file_ch))?;
        let rank = Rank::from_char(rank_ch)
            .ok_or(CoordParseError::UnexpectedRankChar(rank_ch))?;
        Ok(Coord::from_parts(file, rank))
    }
}

impl TryFrom<i32> for Coord {
    type Error = RangeError;

    fn try_from(val: i32) -> Result<Coord, RangeError> {
        match u8::try_from(val) {
            Ok(idx) if idx < 64 => Ok(Coord(idx)),
            _ => Err(RangeError {
                value: val,
                min: 0,
                max: 63,
            }),
        }
    }
}

impl From<Coord> for i32 {
    fn from(c: Coord) -> i32 {
        i32::from(c.0)
    }
}

/// Converts a raw en passant target into a square
///
/// Raw targets use `-1` to denote that no en passant capture is possible.
pub fn enpassant_from_raw(val: i32) -> Result<Option<Coord>, RangeError> {
    if val == -1 {
        return Ok(None);
    }
    Coord::try_from(val)
        .map(Some)
        .map_err(|e| RangeError { min: -1, ..e })
}

/// Inverse of [`enpassant_from_raw`]
pub fn enpassant_to_raw(ep: Option<Coord>) -> i32 {
    ep.map_or(-1, i32::from)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Color, Self::Err> {
        let ch = match *s.as_bytes() {
            [b] => char::from(b),
            _ => return Err(ColorParseError::BadLength),
        };
        Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    King = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
}

impl Piece {
    pub const COUNT: usize = 6;

    const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::King,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub fn iter() -> impl Iterator<Item = Piece> {
        Self::ALL.into_iter()
    }
}

const CELL_CHARS: &[u8; Cell::COUNT] = b".PKNBRQpknbrq";

/// Contents of a single square
///
/// A cell is either empty or holds one piece of some color. Asking an empty cell for its color
/// or piece yields `None`. Index 0 is the empty cell, 1 to 6 are the white pieces and 7 to 12
/// are the black ones, in the order of [`Piece`].
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const COUNT: usize = 13;

    pub const fn is_free(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    /// Returns the cell with index `val`
    ///
    /// # Panics
    ///
    /// Panics if `val >= Cell::COUNT`.
    pub const fn from_index(val: usize) -> Cell {
        assert!(val < Self::COUNT, "cell index too large");
        Cell(val as u8)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn from_parts(c: Color, p: Piece) -> Cell {
        Cell(1 + c as u8 * Piece::COUNT as u8 + p as u8)
    }

    pub const fn color(&self) -> Option<Color> {
        match self.0 {
            0 => None,
            1..=6 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    pub const fn piece(&self) -> Option<Piece> {
        if self.0 == 0 {
            return None;
        }
        Some(Piece::ALL[(self.0 as usize - 1) % Piece::COUNT])
    }

    /// Returns `true` if the cell holds a piece of color `c`
    pub const fn has_color(&self, c: Color) -> bool {
        matches!(self.color(), Some(color) if color as u8 == c as u8)
    }

    pub fn iter() -> impl Iterator<Item = Cell> {
        (0..Self::COUNT as u8).map(Cell)
    }

    pub fn as_char(&self) -> char {
        char::from(CELL_CHARS[self.index()])
    }

    /// Parses a FEN piece letter, or `.` for the empty cell
    pub fn from_char(c: char) -> Option<Cell> {
        CELL_CHARS
            .iter()
            .position(|&b| char::from(b) == c)
            .map(|idx| Cell(idx as u8))
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.as_char())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

/// Castling flags in FEN order, with their letters
const CASTLING_ORDER: [(Color, CastlingSide, char); 4] = [
    (Color::White, CastlingSide::King, 'K'),
    (Color::White, CastlingSide::Queen, 'Q'),
    (Color::Black, CastlingSide::King, 'k'),
    (Color::Black, CastlingSide::Queen, 'q'),
];

/// Castling flags of both sides
///
/// They are only stored and printed. Move generation never looks at them.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const EMPTY: CastlingRights = CastlingRights(0);
    pub const FULL: CastlingRights = CastlingRights(0b1111);

    const fn bit(c: Color, s: CastlingSide) -> u8 {
        1 << (c as u8 * 2 + s as u8)
    }

    pub const fn has(&self, c: Color, s: CastlingSide) -> bool {
        self.0 & Self::bit(c, s) != 0
    }

    pub const fn with(self, c: Color, s: CastlingSide) -> CastlingRights {
        CastlingRights(self.0 | Self::bit(c, s))
    }

    pub fn set(&mut self, c: Color, s: CastlingSide) {
        self.0 |= Self::bit(c, s);
    }

    pub fn unset(&mut self, c: Color, s: CastlingSide) {
        self.0 &= !Self::bit(c, s);
    }

    /// Builds the rights from four flags in the order white king-side, white queen-side,
    /// black king-side, black queen-side
    pub fn from_flags(flags: [bool; 4]) -> CastlingRights {
        flags
            .into_iter()
            .zip(CASTLING_ORDER)
            .filter(|&(flag, _)| flag)
            .fold(CastlingRights::EMPTY, |res, (_, (c, s, _))| res.with(c, s))
    }

    /// Inverse of [`CastlingRights::from_flags`]
    pub fn flags(&self) -> [bool; 4] {
        CASTLING_ORDER.map(|(c, s, _)| self.has(c, s))
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({})", self)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::EMPTY {
            return write!(f, "-");
        }
        for (c, s, ch) in CASTLING_ORDER {
            if self.has(c, s) {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<CastlingRights, Self::Err> {
        type Error = CastlingRightsParseError;

        match s {
            "-" => return Ok(CastlingRights::EMPTY),
            "" => return Err(Error::EmptyString),
            _ => {}
        }
        let mut res = CastlingRights::EMPTY;
        for ch in s.chars() {
            let (c, side) = match CASTLING_ORDER.iter().find(|&&(_, _, letter)| letter == ch) {
                Some(&(c, side, _)) => (c, side),
                None => return Err(Error::UnexpectedChar(ch)),
            };
            if res.has(c, side) {
                return Err(Error::DuplicateChar(ch));
            }
            res.set(c, side);
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_file_rank() {
        for (idx, file) in File::iter().enumerate() {
            assert_eq!(file.index(), idx);
            assert_eq!(File::from_index(idx), file);
            assert_eq!(File::from_char(file.as_char()), Some(file));
        }
        for (idx, rank) in Rank::iter().enumerate() {
            assert_eq!(rank.index(), idx);
            assert_eq!(Rank::from_index(idx), rank);
            assert_eq!(Rank::from_char(rank.as_char()), Some(rank));
        }
        assert_eq!(File::H.as_char(), 'h');
        assert_eq!(Rank::R8.as_char(), '8');
        assert_eq!(File::from_char('i'), None);
        assert_eq!(File::from_char('A'), None);
        assert_eq!(Rank::from_char('0'), None);
        assert_eq!(Rank::from_char('9'), None);
    }

    #[test]
    fn test_coord() {
        let mut coords = Vec::new();
        for rank in Rank::iter() {
            for file in File::iter() {
                let coord = Coord::from_parts(file, rank);
                assert_eq!(coord.file(), file);
                assert_eq!(coord.rank(), rank);
                coords.push(coord);
            }
        }
        assert_eq!(coords, Coord::iter().collect::<Vec<_>>());
        assert_eq!(sq("a8").index(), 0);
        assert_eq!(sq("h1").index(), 63);
        assert_eq!(format!("{:?}", sq("e4")), "Coord(e4)");
    }

    #[test]
    fn test_flip() {
        assert_eq!(sq("a8").flipped_rank(), sq("a1"));
        assert_eq!(sq("c6").flipped_rank(), sq("c3"));
        assert_eq!(sq("a8").flipped_file(), sq("h8"));
        assert_eq!(sq("c6").flipped_file(), sq("f6"));
        for coord in Coord::iter() {
            let (file, rank) = (coord.file().index(), coord.rank().index());
            let by_rank = coord.flipped_rank();
            let by_file = coord.flipped_file();
            assert_eq!(by_rank.file(), coord.file());
            assert_eq!(by_rank.rank().index(), 7 - rank);
            assert_eq!(by_file.rank(), coord.rank());
            assert_eq!(by_file.file().index(), 7 - file);
            assert_eq!(by_rank.flipped_rank(), coord);
            assert_eq!(by_file.flipped_file(), coord);
        }
    }

    #[test]
    fn test_shift() {
        let e4 = sq("e4");
        assert_eq!(e4.try_shift(0, -1), Some(sq("e5")));
        assert_eq!(e4.try_shift(-1, 2), Some(sq("d2")));
        assert_eq!(e4.try_shift(3, -4), Some(sq("h8")));
        assert_eq!(e4.try_shift(4, 0), None);
        let a1 = sq("a1");
        assert_eq!(a1.try_shift(-1, 0), None);
        assert_eq!(a1.try_shift(0, 1), None);
        assert_eq!(a1.try_shift(1, -1), Some(sq("b2")));
    }

    #[test]
    fn test_coord_range() {
        assert_eq!(Coord::try_from(0), Ok(Coord::from_index(0)));
        assert_eq!(Coord::try_from(63), Ok(Coord::from_index(63)));
        assert_eq!(
            Coord::try_from(64),
            Err(RangeError {
                value: 64,
                min: 0,
                max: 63
            })
        );
        assert!(Coord::try_from(-1).is_err());
        assert_eq!(Coord::try_from(36).unwrap().to_string(), "e4");

        assert_eq!(enpassant_from_raw(-1), Ok(None));
        assert_eq!(enpassant_from_raw(20), Ok(Some(Coord::from_index(20))));
        assert_eq!(
            enpassant_from_raw(-2),
            Err(RangeError {
                value: -2,
                min: -1,
                max: 63
            })
        );
        assert!(enpassant_from_raw(64).is_err());
        assert_eq!(enpassant_to_raw(None), -1);
        assert_eq!(enpassant_to_raw(Some(Coord::from_index(44))), 44);
    }

    #[test]
    fn test_cell() {
        assert_eq!(Cell::EMPTY.color(), None);
        assert_eq!(Cell::EMPTY.piece(), None);
        assert!(!Cell::EMPTY.has_color(Color::White));
        assert!(!Cell::EMPTY.has_color(Color::Black));
        let mut cells = vec![Cell::EMPTY];
        for color in [Color::White, Color::Black] {
            for piece in Piece::iter() {
                let cell = Cell::from_parts(color, piece);
                assert_eq!(cell.color(), Some(color));
                assert_eq!(cell.piece(), Some(piece));
                assert!(cell.has_color(color));
                assert!(!cell.has_color(color.inv()));
                cells.push(cell);
            }
        }
        assert_eq!(cells, Cell::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_cell_chars() {
        let chars: String = Cell::iter().map(|cell| cell.as_char()).collect();
        assert_eq!(chars, ".PKNBRQpknbrq");
        for cell in Cell::iter() {
            assert_eq!(Cell::from_char(cell.as_char()), Some(cell));
        }
        assert_eq!(
            Cell::from_char('N'),
            Some(Cell::from_parts(Color::White, Piece::Knight))
        );
        assert_eq!(Cell::from_char('x'), None);
        assert_eq!(Cell::from_char('1'), None);
    }

    #[test]
    fn test_castling() {
        let empty = CastlingRights::EMPTY;
        assert!(!empty.has(Color::White, CastlingSide::Queen));
        assert!(!empty.has(Color::White, CastlingSide::King));
        assert!(!empty.has(Color::Black, CastlingSide::Queen));
        assert!(!empty.has(Color::Black, CastlingSide::King));
        assert_eq!(empty.to_string(), "-");
        assert_eq!(CastlingRights::from_str("-"), Ok(empty));

        let full = CastlingRights::FULL;
        assert_eq!(full.to_string(), "KQkq");
        assert_eq!(CastlingRights::from_str("KQkq"), Ok(full));
        assert_eq!(CastlingRights::from_str("qkQK"), Ok(full));
        assert_eq!(full.flags(), [true; 4]);
        assert_eq!(CastlingRights::from_flags([true; 4]), full);

        let mut rights = CastlingRights::from_flags([false, true, true, false]);
        assert_eq!(rights.to_string(), "Qk");
        rights.unset(Color::White, CastlingSide::Queen);
        rights.set(Color::Black, CastlingSide::Queen);
        assert_eq!(rights.flags(), [false, false, true, true]);
        assert_eq!(rights.to_string(), "kq");
        assert_eq!(format!("{:?}", rights), "CastlingRights(kq)");

        assert_eq!(
            CastlingRights::from_str("KK"),
            Err(CastlingRightsParseError::DuplicateChar('K'))
        );
        assert_eq!(
            CastlingRights::from_str("Kx"),
            Err(CastlingRightsParseError::UnexpectedChar('x'))
        );
        assert_eq!(
            CastlingRights::from_str(""),
            Err(CastlingRightsParseError::EmptyString)
        );
    }

    #[test]
    fn test_coord_str() {
        assert_eq!(Coord::from_parts(File::B, Rank::R4).to_string(), "b4");
        assert_eq!(Coord::from_str("a8"), Ok(Coord::from_index(0)));
        assert_eq!(Coord::from_str("h1"), Ok(Coord::from_index(63)));
        assert_eq!(
            Coord::from_str("h9"),
            Err(CoordParseError::UnexpectedRankChar('9'))
        );
        assert_eq!(
            Coord::from_str("i4"),
            Err(CoordParseError::UnexpectedFileChar('i'))
        );
        assert_eq!(Coord::from_str("e44"), Err(CoordParseError::BadLength));
        assert_eq!(Coord::from_str(""), Err(CoordParseError::BadLength));
        for coord in Coord::iter() {
            assert_eq!(Coord::from_str(&coord.to_string()), Ok(coord));
        }
    }

    #[test]
    fn test_color_str() {
        assert_eq!(Color::from_str("w"), Ok(Color::White));
        assert_eq!(Color::from_str("b"), Ok(Color::Black));
        assert_eq!(
            Color::from_str("x"),
            Err(ColorParseError::UnexpectedChar('x'))
        );
        assert_eq!(Color::from_str("wb"), Err(ColorParseError::BadLength));
        assert_eq!(Color::White.inv(), Color::Black);
        assert_eq!(Color::Black.to_string(), "b");
    }
}
