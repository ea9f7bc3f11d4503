//! Legal move generation
//!
//! Pseudo-legal moves from [`movegen`] are filtered here. Pawns and the pieces chosen by
//! [`PinCheck`] are verified by making the move on a scratch copy of the board, the rest keep all
//! their pseudo-legal moves.
//!
//! By default ([`PinCheck::Compatible`]) only the pieces aligned with the king and not standing on
//! the board edge are verified. This is cheap, but it misses edge pins and lets unverified pieces
//! ignore a check. [`LegalOptions::exact`] verifies every piece while the king is in check and
//! every piece that stands between the king and some square behind it, and also simulates king
//! moves, so no generated move leaves the king under attack.

use crate::attack;
use crate::board::Board;
use crate::geometry;
use crate::movegen::{self, PreconditionError};
use crate::moves::{Move, MoveList};
use crate::types::{Cell, Color, Coord, Piece};

use log::trace;
use thiserror::Error;

/// Board which cannot occur in a real game and cannot be handled
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("no king of color {0}")]
    NoKing(Color),
}

/// Error generating legal moves
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
pub enum MoveGenError {
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),
    #[error("bad board: {0}")]
    Invariant(#[from] InvariantError),
}

/// How the destinations of king moves are checked for safety
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum KingSafety {
    /// The destination is tested for attacks on the board before the move
    ///
    /// This is cheap, but the king still blocks the rays going through its current square. So
    /// the king may step back along the line of a slider which attacks it, as the square behind
    /// the king looks safe while the king is still there.
    #[default]
    PreMoveBoard,
    /// The destination is tested for attacks on the board with the king already moved
    Simulated,
}

/// Which non-king pieces are verified by making their moves on a scratch board
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum PinCheck {
    /// Pawns and the pieces that are aligned with the king and don't stand on the board edge
    ///
    /// Other pieces keep all their pseudo-legal moves. This misses pieces pinned along the edge
    /// and moves which don't resolve a check.
    #[default]
    Compatible,
    /// Pawns, all the pieces while the king is in check, and the pieces aligned with the king
    /// such that the line from the king continues past them
    Exact,
}

/// Options for legal move generation
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct LegalOptions {
    pub king_safety: KingSafety,
    pub pin_check: PinCheck,
}

impl LegalOptions {
    pub const fn new() -> LegalOptions {
        LegalOptions {
            king_safety: KingSafety::PreMoveBoard,
            pin_check: PinCheck::Compatible,
        }
    }

    /// Options under which every generated move keeps the king safe
    pub const fn exact() -> LegalOptions {
        LegalOptions {
            king_safety: KingSafety::Simulated,
            pin_check: PinCheck::Exact,
        }
    }

    pub const fn with_king_safety(self, king_safety: KingSafety) -> LegalOptions {
        LegalOptions {
            king_safety,
            ..self
        }
    }

    pub const fn with_pin_check(self, pin_check: PinCheck) -> LegalOptions {
        LegalOptions { pin_check, ..self }
    }
}

/// Returns `true` if the piece on `src` may be pinned to the king on `king`
///
/// This holds if both squares are on the same line and the line continues past `src`. The
/// test only considers the geometry, so the actual pinner is not required to exist.
fn may_be_pinned(king: Coord, src: Coord) -> bool {
    match geometry::direction(king, src) {
        Some((df, dr)) => src.try_shift(df, dr).is_some(),
        None => false,
    }
}

fn needs_verify(mode: PinCheck, king: Coord, src: Coord, in_check: bool) -> bool {
    match mode {
        PinCheck::Compatible => !geometry::is_edge(src) && geometry::is_aligned(king, src),
        PinCheck::Exact => in_check || may_be_pinned(king, src),
    }
}

struct Checker<'a> {
    board: &'a Board,
    side: Color,
    king: Coord,
    ep: Option<Coord>,
}

impl<'a> Checker<'a> {
    fn new(board: &'a Board, side: Color, ep: Option<Coord>) -> Result<Self, InvariantError> {
        let king = board.king_pos(side).ok_or(InvariantError::NoKing(side))?;
        Ok(Checker {
            board,
            side,
            king,
            ep,
        })
    }

    fn is_check(&self) -> bool {
        attack::is_square_attacked(self.board, self.side, self.king)
    }

    /// Returns a copy of the board with the move `src`-`dst` made
    ///
    /// Captures simply overwrite the destination. A pawn going onto the empty en passant target
    /// also removes the enemy pawn it passes by.
    fn make_move(&self, src: Coord, dst: Coord) -> Board {
        let mut b = *self.board;
        let cell = b.get(src);
        if cell.piece() == Some(Piece::Pawn) && Some(dst) == self.ep && b.get(dst).is_free() {
            let victim = Coord::from_parts(dst.file(), src.rank());
            if b.get(victim) == Cell::from_parts(self.side.inv(), Piece::Pawn) {
                b.put(victim, Cell::EMPTY);
            }
        }
        b.put(dst, cell);
        b.put(src, Cell::EMPTY);
        b
    }

    /// Returns `true` if the king stays safe after a non-king move `src`-`dst`
    fn is_legal_after(&self, src: Coord, dst: Coord) -> bool {
        let b = self.make_move(src, dst);
        !attack::is_square_attacked(&b, self.side, self.king)
    }

    fn is_king_move_safe(&self, src: Coord, dst: Coord, mode: KingSafety) -> bool {
        match mode {
            KingSafety::PreMoveBoard => !attack::is_square_attacked(self.board, self.side, dst),
            KingSafety::Simulated => {
                let b = self.make_move(src, dst);
                !attack::is_square_attacked(&b, self.side, dst)
            }
        }
    }
}

/// Generates legal moves for `side` with default options
///
/// See [`legal_moves_with`] for details.
pub fn legal_moves(b: &Board, side: Color, ep: Option<Coord>) -> Result<MoveList, MoveGenError> {
    legal_moves_with(b, side, ep, &LegalOptions::default())
}

/// Generates legal moves for `side`
///
/// The moves are grouped by source square in ascending order, and the destinations of each piece
/// follow the order of the corresponding generator in [`movegen`]. Castling is not generated.
///
/// The board must contain the king of `side`, and `ep`, if set, must be on rank 3 or rank 6.
/// Other than that, the board is not validated.
pub fn legal_moves_with(
    b: &Board,
    side: Color,
    ep: Option<Coord>,
    opts: &LegalOptions,
) -> Result<MoveList, MoveGenError> {
    let checker = Checker::new(b, side, ep)?;
    movegen::check_enpassant(ep)?;

    let in_check = checker.is_check();
    let mut res = MoveList::with_capacity(64);
    let mut simulated = 0_usize;

    for (src, cell) in b.iter() {
        let piece = match cell.piece() {
            Some(p) if cell.has_color(side) => p,
            _ => continue,
        };

        if piece == Piece::King {
            for dst in movegen::king(b, src, side) {
                if checker.is_king_move_safe(src, dst, opts.king_safety) {
                    res.push(Move::new(src, dst));
                }
            }
            continue;
        }

        let targets = movegen::cell_moves(b, src, side, piece, ep);
        let verify = piece == Piece::Pawn
            || needs_verify(opts.pin_check, checker.king, src, in_check);
        if verify {
            simulated += targets.len();
            res.extend(
                targets
                    .into_iter()
                    .filter(|&dst| checker.is_legal_after(src, dst))
                    .map(|dst| Move::new(src, dst)),
            );
        } else {
            res.extend(targets.into_iter().map(|dst| Move::new(src, dst)));
        }
    }

    trace!(
        "generated {} legal moves for {:?}, simulated {} candidates, in check: {}",
        res.len(),
        side,
        simulated,
        in_check
    );
    Ok(res)
}
