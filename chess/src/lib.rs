//! Chess move generation on a plain 64-cell board
//!
//! The board is just an array of cells, without bitboards or piece lists. Move generation works
//! in two stages: [`movegen`] produces pseudo-legal destinations for single pieces, and [`legal`]
//! drops the moves which leave the king under attack.
//!
//! # Example
//!
//! ```
//! use arraychess::{Position, Board, Color};
//!
//! let pos = Position::initial();
//! let moves = pos.legal_moves().unwrap();
//! assert_eq!(moves.len(), 20);
//!
//! let board = Board::from_fen("4k3/8/8/4r3/8/8/8/4K3").unwrap();
//! assert!(arraychess::attack::is_check(&board, Color::White));
//! let moves = arraychess::legal_moves(&board, Color::White, None).unwrap();
//! assert_eq!(moves.to_string(), "e1d2 e1f2 e1d1 e1f1");
//! ```

pub mod attack;
pub mod board;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod position;
pub mod symmetry;

mod generic;

pub use arraychess_base::{geometry, types};

pub use board::Board;
pub use legal::{
    legal_moves, legal_moves_with, KingSafety, LegalOptions, MoveGenError, PinCheck,
};
pub use moves::{Move, MoveList};
pub use position::Position;
pub use symmetry::Symmetry;
pub use types::{
    CastlingRights, CastlingSide, Cell, Color, Coord, File, Piece, Rank, RangeError,
};
