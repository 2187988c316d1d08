pub mod core;
pub mod utils;

// module re-exports
pub use crate::core::definitions::{Cell, Command, Figure, MatchInterface, MatchState, Outcome, Side};
pub use crate::core::engine::{Board, Color, Direction, Piece, Rank, Square};
pub use crate::core::game::{GameService, IllegalMove};
