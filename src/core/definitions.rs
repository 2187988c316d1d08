use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::engine::{Color, Direction, Rank, Square};
use crate::core::game::IllegalMove;

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub color: Color,
    pub rank: Rank,
    /// The piece is in the middle of a capture chain.
    pub forced: bool,
    pub can_move: bool,
}

impl Figure {
    pub fn symbol(&self) -> char {
        self.rank.symbol(self.color)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Figure(Figure),
}

/// Left/right token of a move command: lower or higher file, in the
/// direction the piece travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Board direction for this token, using `color`'s sense of forward.
    pub fn resolve(self, color: Color, backward: bool) -> Direction {
        match (color, backward) {
            (Color::White, false) | (Color::Black, true) => match self {
                Side::Left => Direction::ForwardLeft,
                Side::Right => Direction::ForwardRight,
            },
            (Color::White, true) | (Color::Black, false) => match self {
                Side::Left => Direction::BackwardLeft,
                Side::Right => Direction::BackwardRight,
            },
        }
    }
}

impl TryFrom<char> for Side {
    type Error = IllegalMove;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'l' => Ok(Side::Left),
            'r' => Ok(Side::Right),
            _ => Err(IllegalMove::InvalidDirection(value)),
        }
    }
}

/// One move request: `<square> <l|r> [b]`, e.g. `a3 r` or `d4 l b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    pub square: Square,
    pub side: Side,
    pub backward: bool,
}

impl FromStr for Command {
    type Err = IllegalMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let (Some(square), Some(side)) = (tokens.next(), tokens.next()) else {
            return Err(IllegalMove::MalformedCommand(s.trim().to_string()));
        };
        let square: Square = square.parse()?;
        let mut chars = side.chars();
        let side = match (chars.next(), chars.next()) {
            (Some(token), None) => Side::try_from(token)?,
            _ => return Err(IllegalMove::MalformedCommand(s.trim().to_string())),
        };
        let backward = match tokens.next() {
            None => false,
            Some(token) if token.eq_ignore_ascii_case("b") => true,
            Some(_) => return Err(IllegalMove::MalformedCommand(s.trim().to_string())),
        };
        if tokens.next().is_some() {
            return Err(IllegalMove::MalformedCommand(s.trim().to_string()));
        }
        Ok(Command {
            square,
            side,
            backward,
        })
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    EndedByUser,
    /// The other color has no pieces left.
    Winner(Color),
    /// The side to move is stuck with pieces still on the board.
    NoMoves(Color),
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::EndedByUser => write!(f, "Game ended by user."),
            Outcome::Winner(color) => write!(
                f,
                "{color} has captured all opponent pieces. {color} wins."
            ),
            Outcome::NoMoves(color) => write!(
                f,
                "{color} has no legal moves. Draw or stalemate by no-move."
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchState {
    Active,
    /// A capture chain is running; only the piece on this square may act.
    ChainInProgress(Square),
    Over(Outcome),
}

/// Command, query and action surface a front-end drives a match through.
pub trait MatchInterface {
    /// Rows are ranks 1..=8, columns files a..=h.
    fn current_board(&self) -> Vec<Vec<Cell>>;
    fn cell(&self, square: Square) -> Cell;
    fn execute_command(&mut self, command: Command) -> Result<(), IllegalMove>;
    fn undo(&mut self) -> bool;
    fn end_game(&mut self);
    fn restart_game(&mut self);
    // info
    fn current_player(&self) -> Color;
    fn state(&self) -> MatchState;
    fn has_undo(&self) -> bool;
    fn captures(&self, color: Color) -> u32;
    fn result_text(&self) -> String;
}
