//! Position and full FEN

use crate::board::{Board, BoardParseError};
use crate::legal::{self, LegalOptions, MoveGenError};
use crate::moves::MoveList;
use crate::types::{self, CastlingRights, Color, Coord, Rank};
use crate::{attack, geometry};

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing [`Position`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// FEN contains non-ASCII characters
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// FEN doesn't have board part
    #[error("board not specified")]
    NoBoard,
    /// Error parsing board from FEN
    #[error("bad board: {0}")]
    Board(#[from] BoardParseError),
    /// FEN doesn't have move side part
    #[error("no move side")]
    NoMoveSide,
    /// Error parsing move side from FEN
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::ColorParseError),
    /// FEN doesn't have castling rights part
    #[error("no castling rights")]
    NoCastling,
    /// Error parsing castling rights from FEN
    #[error("bad castling rights: {0}")]
    Castling(#[from] types::CastlingRightsParseError),
    /// FEN doesn't have enpassant part
    #[error("no enpassant")]
    NoEnpassant,
    /// Error parsing enpassant from FEN
    #[error("bad enpassant: {0}")]
    Enpassant(#[from] types::CoordParseError),
    /// Enpassant rank is invalid
    #[error("invalid enpassant rank {0}")]
    InvalidEnpassantRank(Rank),
    /// Error parsing move counter
    #[error("bad move counter: {0}")]
    MoveCounter(ParseIntError),
    /// Error parsing move number
    #[error("bad move number: {0}")]
    MoveNumber(ParseIntError),
    /// FEN contains extra data
    #[error("extra data in FEN")]
    ExtraData,
}

/// Chess position
///
/// Contains the board alongside with the side to move, castling rights, en passant target and
/// move counters. Castling rights and counters are only stored and never affect move generation.
///
/// The position is immutable: methods like [`Position::with_board()`] return a modified copy.
/// No validation is performed on construction, so the position may be not reachable in a real
/// game. Move generation still requires the king of the side to move to be present.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    side: Color,
    castling: CastlingRights,
    ep_target: Option<Coord>,
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl Position {
    /// Creates a position with no castling rights, no en passant and counters reset
    pub const fn new(board: Board, side: Color) -> Position {
        Position {
            board,
            side,
            castling: CastlingRights::EMPTY,
            ep_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub const fn from_parts(
        board: Board,
        side: Color,
        castling: CastlingRights,
        ep_target: Option<Coord>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Position {
        Position {
            board,
            side,
            castling,
            ep_target,
            halfmove_clock,
            fullmove_number,
        }
    }

    /// Returns the initial position
    pub fn initial() -> Position {
        Position {
            castling: CastlingRights::FULL,
            ..Position::new(Board::initial(), Color::White)
        }
    }

    pub fn from_fen(fen: &str) -> Result<Position, FenParseError> {
        Position::from_str(fen)
    }

    pub fn as_fen(&self) -> String {
        self.to_string()
    }

    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub const fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub const fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// En passant target square, i.e. the square passed by the pawn which made a double move
    #[inline]
    pub const fn ep_target(&self) -> Option<Coord> {
        self.ep_target
    }

    #[inline]
    pub const fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub const fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub const fn with_board(self, board: Board) -> Position {
        Position { board, ..self }
    }

    pub const fn with_side(self, side: Color) -> Position {
        Position { side, ..self }
    }

    pub const fn with_castling(self, castling: CastlingRights) -> Position {
        Position { castling, ..self }
    }

    pub const fn with_enpassant(self, ep_target: Option<Coord>) -> Position {
        Position { ep_target, ..self }
    }

    pub const fn with_counters(self, halfmove_clock: u16, fullmove_number: u16) -> Position {
        Position {
            halfmove_clock,
            fullmove_number,
            ..self
        }
    }

    /// Returns `true` if the king of the side to move is attacked
    pub fn is_check(&self) -> bool {
        attack::is_check(&self.board, self.side)
    }

    /// Generates legal moves for the side to move
    pub fn legal_moves(&self) -> Result<MoveList, MoveGenError> {
        legal::legal_moves(&self.board, self.side, self.ep_target)
    }

    pub fn legal_moves_with(&self, opts: &LegalOptions) -> Result<MoveList, MoveGenError> {
        legal::legal_moves_with(&self.board, self.side, self.ep_target, opts)
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::initial()
    }
}

fn parse_enpassant(s: &str) -> Result<Option<Coord>, FenParseError> {
    if s == "-" {
        return Ok(None);
    }
    let ep = Coord::from_str(s)?;
    if !geometry::is_enpassant_rank(ep.rank()) {
        return Err(FenParseError::InvalidEnpassantRank(ep.rank()));
    }
    Ok(Some(ep))
}

impl FromStr for Position {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Position, Self::Err> {
        type Error = FenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut iter = s.split(' ').fuse();

        let board = Board::from_str(iter.next().ok_or(Error::NoBoard)?)?;
        let side = Color::from_str(iter.next().ok_or(Error::NoMoveSide)?)?;
        let castling = CastlingRights::from_str(iter.next().ok_or(Error::NoCastling)?)?;
        let ep_target = parse_enpassant(iter.next().ok_or(Error::NoEnpassant)?)?;
        let halfmove_clock = match iter.next() {
            Some(s) => u16::from_str(s).map_err(Error::MoveCounter)?,
            None => 0,
        };
        let fullmove_number = match iter.next() {
            Some(s) => u16::from_str(s).map_err(Error::MoveNumber)?,
            None => 1,
        };

        if iter.next().is_some() {
            return Err(Error::ExtraData);
        }

        Ok(Position {
            board,
            side,
            castling,
            ep_target,
            halfmove_clock,
            fullmove_number,
        })
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {} {}", self.board, self.side, self.castling)?;
        match self.ep_target {
            Some(p) => write!(f, " {}", p)?,
            None => write!(f, " -")?,
        };
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}
