use crate::types::{Color, Coord, Rank};

pub const fn pawn_home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

pub const fn enpassant_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    }
}

/// Returns `true` if an en passant target may ever be located on rank `r`
pub const fn is_enpassant_rank(r: Rank) -> bool {
    matches!(r, Rank::R3 | Rank::R6)
}

/// Row step of a pawn of color `c` moving forward
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => -1,
        Color::Black => 1,
    }
}

pub const fn is_edge(c: Coord) -> bool {
    let (file, rank) = (c.file().index(), c.rank().index());
    file == 0 || file == 7 || rank == 0 || rank == 7
}

pub const fn is_corner(c: Coord) -> bool {
    matches!(c.index(), 0 | 7 | 56 | 63)
}

pub const fn same_file(a: Coord, b: Coord) -> bool {
    a.file().index() == b.file().index()
}

pub const fn same_rank(a: Coord, b: Coord) -> bool {
    a.rank().index() == b.rank().index()
}

pub const fn same_diagonal(a: Coord, b: Coord) -> bool {
    a.file().index().abs_diff(b.file().index()) == a.rank().index().abs_diff(b.rank().index())
}

/// Returns `true` if `a` and `b` share a file, a rank or a diagonal
///
/// Note that every square is aligned with itself.
pub const fn is_aligned(a: Coord, b: Coord) -> bool {
    same_file(a, b) || same_rank(a, b) || same_diagonal(a, b)
}

/// Returns the unit step `(delta_file, delta_rank)` leading from `src` towards `dst`
///
/// Returns `None` if the squares are equal or not aligned.
pub fn direction(src: Coord, dst: Coord) -> Option<(isize, isize)> {
    if src == dst || !is_aligned(src, dst) {
        return None;
    }
    let df = dst.file().index() as isize - src.file().index() as isize;
    let dr = dst.rank().index() as isize - src.rank().index() as isize;
    Some((df.signum(), dr.signum()))
}
