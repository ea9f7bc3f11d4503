//! Attack detection

use crate::board::Board;
use crate::generic;
use crate::movegen::{Targets, DIAG_DELTAS, KING_DELTAS, KNIGHT_DELTAS, LINE_DELTAS};
use crate::types::{Cell, Color, Coord, Piece};

/// Returns the first occupied square hit by the ray from `coord` in direction `(df, dr)`
fn first_hit(b: &Board, coord: Coord, (df, dr): (isize, isize)) -> Option<(Coord, Cell)> {
    let mut cur = coord.try_shift(df, dr);
    while let Some(c) = cur {
        let cell = b.get(c);
        if cell.is_occupied() {
            return Some((c, cell));
        }
        cur = c.try_shift(df, dr);
    }
    None
}

/// Squares from which a pawn of color `C` would attack `coord`
fn pawn_sources<C: generic::Color>(coord: Coord) -> impl Iterator<Item = Coord> {
    [-1, 1]
        .into_iter()
        .filter_map(move |df| coord.try_shift(df, -C::PAWN_DELTA))
}

fn do_is_attacked<C: generic::Color>(b: &Board, coord: Coord) -> bool {
    let pawn = Cell::from_parts(C::COLOR, Piece::Pawn);
    let knight = Cell::from_parts(C::COLOR, Piece::Knight);
    let king = Cell::from_parts(C::COLOR, Piece::King);
    let line = [
        Cell::from_parts(C::COLOR, Piece::Rook),
        Cell::from_parts(C::COLOR, Piece::Queen),
    ];
    let diag = [
        Cell::from_parts(C::COLOR, Piece::Bishop),
        Cell::from_parts(C::COLOR, Piece::Queen),
    ];

    if pawn_sources::<C>(coord).any(|c| b.get(c) == pawn) {
        return true;
    }

    // Far attacks
    let hits = |deltas: &[(isize, isize)], attackers: &[Cell; 2]| {
        deltas
            .iter()
            .filter_map(|&delta| first_hit(b, coord, delta))
            .any(|(_, cell)| attackers.contains(&cell))
    };
    if hits(&LINE_DELTAS, &line) || hits(&DIAG_DELTAS, &diag) {
        return true;
    }

    // Near attacks
    let near = |deltas: &[(isize, isize)], attacker: Cell| {
        deltas
            .iter()
            .filter_map(|&(df, dr)| coord.try_shift(df, dr))
            .any(|c| b.get(c) == attacker)
    };
    near(&KNIGHT_DELTAS, knight) || near(&KING_DELTAS, king)
}

fn do_attackers<C: generic::Color>(b: &Board, coord: Coord) -> Targets {
    let mut res = Targets::new();
    let of_kind = |cell: Cell, pieces: &[Piece]| {
        cell.color() == Some(C::COLOR) && cell.piece().map_or(false, |p| pieces.contains(&p))
    };

    for c in pawn_sources::<C>(coord) {
        if of_kind(b.get(c), &[Piece::Pawn]) {
            res.push(c);
        }
    }
    for (deltas, pieces) in [
        (&LINE_DELTAS, [Piece::Rook, Piece::Queen]),
        (&DIAG_DELTAS, [Piece::Bishop, Piece::Queen]),
    ] {
        for &delta in deltas {
            if let Some((c, cell)) = first_hit(b, coord, delta) {
                if of_kind(cell, &pieces) {
                    res.push(c);
                }
            }
        }
    }
    for (deltas, piece) in [(&KNIGHT_DELTAS, Piece::Knight), (&KING_DELTAS, Piece::King)] {
        for &(df, dr) in deltas {
            if let Some(c) = coord.try_shift(df, dr) {
                if of_kind(b.get(c), &[piece]) {
                    res.push(c);
                }
            }
        }
    }

    res.sort_unstable();
    res
}

/// Returns `true` if `coord` is attacked by the opponent of `side`
///
/// The contents of `coord` itself don't matter, so this works for both empty and occupied
/// squares. Only the geometry of attacks is considered, i.e. pinned pieces still attack.
pub fn is_square_attacked(b: &Board, side: Color, coord: Coord) -> bool {
    match side {
        Color::White => do_is_attacked::<generic::Black>(b, coord),
        Color::Black => do_is_attacked::<generic::White>(b, coord),
    }
}

/// Returns all the pieces of the opponent of `side` which attack `coord`, in ascending order
pub fn square_attackers(b: &Board, side: Color, coord: Coord) -> Targets {
    match side {
        Color::White => do_attackers::<generic::Black>(b, coord),
        Color::Black => do_attackers::<generic::White>(b, coord),
    }
}

/// Returns `true` if the king of `side` is attacked
///
/// If there is no such king, returns `false`.
pub fn is_check(b: &Board, side: Color) -> bool {
    b.king_pos(side)
        .map_or(false, |k| is_square_attacked(b, side, k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen;

    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn test_attackers() {
        let b = Board::from_fen("3R3B/8/3R4/1NP1Q3/3p4/1NP5/5B2/3R1K1k").unwrap();
        let d4 = c("d4");
        assert!(is_square_attacked(&b, Color::Black, d4));
        assert_eq!(
            square_attackers(&b, Color::Black, d4).as_slice(),
            &[c("d6"), c("b5"), c("e5"), c("b3"), c("c3"), c("f2"), c("d1")]
        );
        assert!(!is_square_attacked(&b, Color::White, d4));
        assert!(square_attackers(&b, Color::White, d4).is_empty());

        let b = Board::from_fen("8/8/8/2KPk3/8/8/8/8").unwrap();
        let d5 = c("d5");
        assert!(is_square_attacked(&b, Color::Black, d5));
        assert_eq!(
            square_attackers(&b, Color::Black, d5).as_slice(),
            &[c("c5")]
        );
        assert!(is_square_attacked(&b, Color::White, d5));
        assert_eq!(
            square_attackers(&b, Color::White, d5).as_slice(),
            &[c("e5")]
        );
    }

    #[test]
    fn test_pawns() {
        let b = Board::from_fen("8/8/8/3p4/8/2P5/8/8").unwrap();
        assert!(is_square_attacked(&b, Color::White, c("c4")));
        assert!(is_square_attacked(&b, Color::White, c("e4")));
        assert!(!is_square_attacked(&b, Color::White, c("d4")));
        assert!(!is_square_attacked(&b, Color::White, c("c6")));
        assert!(is_square_attacked(&b, Color::Black, c("b4")));
        assert!(is_square_attacked(&b, Color::Black, c("d4")));
        assert!(!is_square_attacked(&b, Color::Black, c("c4")));
        assert!(!is_square_attacked(&b, Color::Black, c("d2")));

        let b = Board::from_fen("8/8/8/8/7P/p7/8/8").unwrap();
        assert!(is_square_attacked(&b, Color::Black, c("g5")));
        assert!(!is_square_attacked(&b, Color::Black, c("a5")));
        assert!(is_square_attacked(&b, Color::White, c("b2")));
        assert!(!is_square_attacked(&b, Color::White, c("h2")));
    }

    #[test]
    fn test_check() {
        let b = Board::from_fen("4k3/8/8/4r3/8/8/8/4K3").unwrap();
        assert!(is_check(&b, Color::White));
        assert!(!is_check(&b, Color::Black));
        let b = Board::from_fen("4k3/8/8/4r3/8/8/4P3/4K3").unwrap();
        assert!(!is_check(&b, Color::White));
        assert!(!is_check(&Board::empty(), Color::White));
        assert!(!is_check(&Board::initial(), Color::White));
    }

    /// Checks whether any piece of the opponent of `side` has `coord` among its pseudo-legal
    /// destinations, with a piece of `side` placed onto `coord` so pawns may capture there
    fn reference_attacked(b: &Board, side: Color, coord: Coord) -> bool {
        let mut b = *b;
        if b.get(coord).color() != Some(side) {
            b.put(coord, Cell::from_parts(side, Piece::Pawn));
        }
        let res = b
            .iter()
            .filter(|(_, cell)| cell.color() == Some(side.inv()))
            .any(|(src, _)| {
                movegen::piece_moves(&b, src, None)
                    .unwrap()
                    .contains(&coord)
            });
        res
    }

    #[test]
    fn test_random() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        for _ in 0..500 {
            let mut b = Board::empty();
            for coord in Coord::iter() {
                if rng.gen_range(0..4) == 0 {
                    b.put(coord, Cell::from_index(rng.gen_range(1..Cell::COUNT)));
                }
            }
            for coord in Coord::iter() {
                for side in [Color::White, Color::Black] {
                    let attacked = is_square_attacked(&b, side, coord);
                    assert_eq!(attacked, reference_attacked(&b, side, coord));
                    assert_eq!(attacked, !square_attackers(&b, side, coord).is_empty());
                }
            }
        }
    }
}
