//! Pseudo-legal move generation for single pieces
//!
//! The functions here know nothing about checks or pins; they return every square a piece may
//! move to, judging only by the board geometry and the colors of the pieces on the way. See
//! [`legal`](crate::legal) for the filter which turns these candidates into legal moves.
//!
//! The order in which the destinations are returned is deterministic and is a part of the
//! contract, because legal move lists are built from these lists as is.

use crate::board::Board;
use crate::generic;
use crate::geometry;
use crate::types::{Color, Coord, Piece};

use arrayvec::ArrayVec;
use thiserror::Error;

/// Destinations of a single piece
///
/// A queen on an empty board has 27 moves, so 32 is enough for any piece.
pub type Targets = ArrayVec<Coord, 32>;

/// Violation of the move generator contract by the caller
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("no piece on source square {0}")]
    EmptySource(Coord),
    #[error("en passant target {0} is not on rank 3 or rank 6")]
    InvalidEnpassant(Coord),
}

pub(crate) const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
];

pub(crate) const KING_DELTAS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub(crate) const UP_RIGHT: (isize, isize) = (1, -1);
pub(crate) const DOWN_RIGHT: (isize, isize) = (1, 1);
pub(crate) const DOWN_LEFT: (isize, isize) = (-1, 1);
pub(crate) const UP_LEFT: (isize, isize) = (-1, -1);
pub(crate) const LEFT: (isize, isize) = (-1, 0);
pub(crate) const UP: (isize, isize) = (0, -1);
pub(crate) const RIGHT: (isize, isize) = (1, 0);
pub(crate) const DOWN: (isize, isize) = (0, 1);

pub(crate) const DIAG_DELTAS: [(isize, isize); 4] = [UP_RIGHT, DOWN_RIGHT, DOWN_LEFT, UP_LEFT];
pub(crate) const LINE_DELTAS: [(isize, isize); 4] = [LEFT, UP, RIGHT, DOWN];

/// Checks that `ep` may be used as an en passant target
pub fn check_enpassant(ep: Option<Coord>) -> Result<(), PreconditionError> {
    match ep {
        Some(c) if !geometry::is_enpassant_rank(c.rank()) => {
            Err(PreconditionError::InvalidEnpassant(c))
        }
        _ => Ok(()),
    }
}

#[inline]
fn can_land(b: &Board, dst: Coord, color: Color) -> bool {
    !b.get(dst).has_color(color)
}

fn do_pawn<C: generic::Color>(b: &Board, src: Coord, ep: Option<Coord>) -> Targets {
    let mut res = Targets::new();
    let single = match src.try_shift(0, C::PAWN_DELTA) {
        Some(c) => c,
        None => return res,
    };

    let enemy = <C::Inv as generic::Color>::COLOR;
    let is_capture = |dst: &Coord| b.get(*dst).has_color(enemy) || Some(*dst) == ep;
    let left = src.try_shift(-1, C::PAWN_DELTA).filter(is_capture);
    let right = src.try_shift(1, C::PAWN_DELTA).filter(is_capture);
    let single_free = b.get(single).is_free();
    let double = if single_free && src.rank() == C::PAWN_HOME_RANK {
        single
            .try_shift(0, C::PAWN_DELTA)
            .filter(|dst| b.get(*dst).is_free())
    } else {
        None
    };
    let single = if single_free { Some(single) } else { None };

    let order = match C::COLOR {
        Color::White => [double, left, single, right],
        Color::Black => [left, single, right, double],
    };
    res.extend(order.into_iter().flatten());
    res
}

/// Pawn moves without en passant
///
/// White pawns yield the double step, the left capture, the single step and the right capture,
/// in this order. Black pawns yield the left capture, the single step, the right capture and the
/// double step. A pawn standing on the last rank has no moves at all.
pub fn pawn(b: &Board, src: Coord, color: Color) -> Targets {
    pawn_enpassant(b, src, color, None)
}

/// Pawn moves, also capturing onto the en passant target `ep` if it lies diagonally in front
pub fn pawn_enpassant(b: &Board, src: Coord, color: Color, ep: Option<Coord>) -> Targets {
    match color {
        Color::White => do_pawn::<generic::White>(b, src, ep),
        Color::Black => do_pawn::<generic::Black>(b, src, ep),
    }
}

fn leaper(b: &Board, src: Coord, color: Color, deltas: &[(isize, isize)]) -> Targets {
    deltas
        .iter()
        .filter_map(|&(df, dr)| src.try_shift(df, dr))
        .filter(|&dst| can_land(b, dst, color))
        .collect()
}

pub fn knight(b: &Board, src: Coord, color: Color) -> Targets {
    leaper(b, src, color, &KNIGHT_DELTAS)
}

/// King moves, without castling
pub fn king(b: &Board, src: Coord, color: Color) -> Targets {
    leaper(b, src, color, &KING_DELTAS)
}

fn cast_ray(b: &Board, src: Coord, color: Color, (df, dr): (isize, isize), res: &mut Targets) {
    let mut cur = src.try_shift(df, dr);
    while let Some(dst) = cur {
        let cell = b.get(dst);
        if cell.has_color(color) {
            break;
        }
        res.push(dst);
        if cell.is_occupied() {
            break;
        }
        cur = dst.try_shift(df, dr);
    }
}

/// Casts `back` rays and reverses the result, then appends `forward` rays as is
fn cast_rays(
    b: &Board,
    src: Coord,
    color: Color,
    back: &[(isize, isize)],
    forward: &[(isize, isize)],
) -> Targets {
    let mut res = Targets::new();
    for &delta in back {
        cast_ray(b, src, color, delta, &mut res);
    }
    res.reverse();
    for &delta in forward {
        cast_ray(b, src, color, delta, &mut res);
    }
    res
}

/// Bishop moves, by rays up-right, down-right, down-left and up-left
pub fn bishop(b: &Board, src: Coord, color: Color) -> Targets {
    cast_rays(b, src, color, &[], &DIAG_DELTAS)
}

/// Rook moves, in ascending square order
pub fn rook(b: &Board, src: Coord, color: Color) -> Targets {
    cast_rays(b, src, color, &[LEFT, UP], &[RIGHT, DOWN])
}

/// Queen moves
///
/// The diagonal rays and the left and up rays are collected first and emitted in reverse, then
/// the right and down rays follow.
pub fn queen(b: &Board, src: Coord, color: Color) -> Targets {
    cast_rays(
        b,
        src,
        color,
        &[UP_RIGHT, DOWN_RIGHT, DOWN_LEFT, UP_LEFT, LEFT, UP],
        &[RIGHT, DOWN],
    )
}

/// Generates pseudo-legal moves for the piece on `src`
///
/// The color of the moving side is taken from the piece itself. If `ep` is set, pawns may also
/// capture en passant onto it.
pub fn piece_moves(b: &Board, src: Coord, ep: Option<Coord>) -> Result<Targets, PreconditionError> {
    check_enpassant(ep)?;
    let cell = b.get(src);
    match (cell.color(), cell.piece()) {
        (Some(color), Some(piece)) => Ok(cell_moves(b, src, color, piece, ep)),
        _ => Err(PreconditionError::EmptySource(src)),
    }
}

pub(crate) fn cell_moves(
    b: &Board,
    src: Coord,
    color: Color,
    piece: Piece,
    ep: Option<Coord>,
) -> Targets {
    match piece {
        Piece::Pawn => pawn_enpassant(b, src, color, ep),
        Piece::King => king(b, src, color),
        Piece::Knight => knight(b, src, color),
        Piece::Bishop => bishop(b, src, color),
        Piece::Rook => rook(b, src, color),
        Piece::Queen => queen(b, src, color),
    }
}
