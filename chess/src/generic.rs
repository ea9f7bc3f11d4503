use crate::types::{self, Rank};

pub trait Color {
    const COLOR: types::Color;
    /// Row step of this side's pawns moving forward
    const PAWN_DELTA: isize;
    const PAWN_HOME_RANK: Rank;
    type Inv: Color;
}

pub struct White;
pub struct Black;

impl Color for White {
    const COLOR: types::Color = types::Color::White;
    const PAWN_DELTA: isize = -1;
    const PAWN_HOME_RANK: Rank = Rank::R2;
    type Inv = Black;
}

impl Color for Black {
    const COLOR: types::Color = types::Color::Black;
    const PAWN_DELTA: isize = 1;
    const PAWN_HOME_RANK: Rank = Rank::R7;
    type Inv = White;
}
