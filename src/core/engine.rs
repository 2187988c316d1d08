use std::fmt::{self, Display};
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::game::IllegalMove;
use crate::core::utils::{is_dark, is_valid_coord, parse_square, pos_to_str, FILE_LABELS, MAX, MIN};

/** Tables directions for pieces, indexed by `Direction as usize` */
const DELTAS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];

/// Diagonal directions, named from White's side of the board.
///
/// The names are board-absolute: `ForwardLeft` always points to lower files
/// and higher ranks, so Black's own forward pair is the `Backward*` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    ForwardLeft = 0,
    ForwardRight = 1,
    BackwardLeft = 2,
    BackwardRight = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::ForwardLeft,
        Direction::ForwardRight,
        Direction::BackwardLeft,
        Direction::BackwardRight,
    ];

    pub fn from_index(index: usize) -> Option<Direction> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn delta(self) -> (i8, i8) {
        DELTAS[self as usize]
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Direction::ForwardLeft => "forward-left",
            Direction::ForwardRight => "forward-right",
            Direction::BackwardLeft => "backward-left",
            Direction::BackwardRight => "backward-right",
        })
    }
}

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The two directions a man of this color may use.
    pub fn forward_directions(self) -> [Direction; 2] {
        match self {
            Color::White => [Direction::ForwardLeft, Direction::ForwardRight],
            Color::Black => [Direction::BackwardLeft, Direction::BackwardRight],
        }
    }

    /// Rank where a man of this color gets crowned.
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => MAX,
            Color::Black => MIN,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    Man,
    King,
}

impl Rank {
    /// Direction permission table: men go forward only, kings anywhere.
    pub fn allows(self, color: Color, dir: Direction) -> bool {
        match self {
            Rank::Man => color.forward_directions().contains(&dir),
            Rank::King => true,
        }
    }

    /// Board glyph: lowercase for men, uppercase for kings.
    pub fn symbol(self, color: Color) -> char {
        match (color, self) {
            (Color::White, Rank::Man) => 'w',
            (Color::White, Rank::King) => 'W',
            (Color::Black, Rank::Man) => 'b',
            (Color::Black, Rank::King) => 'B',
        }
    }
}

/// A square inside the 8×8 board, files and ranks counted from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    pub fn new(x: u8, y: u8) -> Option<Square> {
        if is_valid_coord(x as i16, y as i16) {
            Some(Square { x, y })
        } else {
            None
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        self.x
    }

    #[inline]
    pub fn y(self) -> u8 {
        self.y
    }

    pub fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        let (x, y) = (self.x as i16 + dx as i16, self.y as i16 + dy as i16);
        if is_valid_coord(x, y) {
            Some(Square {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    pub fn step(self, dir: Direction) -> Option<Square> {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

impl FromStr for Square {
    type Err = IllegalMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_square(s)
            .and_then(|(x, y)| Square::new(x, y))
            .ok_or_else(|| IllegalMove::InvalidSquare(s.trim().to_string()))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(pos_to_str(self.x, self.y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    rank: Rank,
    square: Square,
}

impl Piece {
    pub fn new(color: Color, square: Square) -> Piece {
        Piece {
            color,
            rank: Rank::Man,
            square,
        }
    }

    pub fn king(color: Color, square: Square) -> Piece {
        Piece {
            color,
            rank: Rank::King,
            square,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn square(&self) -> Square {
        self.square
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    pub fn allows_dir(&self, dir: Direction) -> bool {
        self.rank.allows(self.color, dir)
    }

    /// Destination one square away, if the piece may go that way and it is on the board.
    pub fn one_step(&self, dir: Direction) -> Option<Square> {
        if self.allows_dir(dir) {
            self.square.step(dir)
        } else {
            None
        }
    }

    /// Landing square when jumping over the adjacent square `mid`.
    /// Occupancy is not checked here.
    pub fn skip_over(&self, mid: Square) -> Option<Square> {
        let dx = if mid.x > self.square.x { 2 } else { -2 };
        let dy = if mid.y > self.square.y { 2 } else { -2 };
        self.square.offset(dx, dy)
    }

    pub fn crown(&mut self) {
        self.rank = Rank::King;
    }

    pub fn symbol(&self) -> char {
        self.rank.symbol(self.color)
    }

    fn set_square(&mut self, square: Square) {
        self.square = square;
    }
}

/** Pieces in play and capture tallies; cloning gives an independent copy */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
    white_captures: u32,
    black_captures: u32,
}

impl Board {
    /// Standard opening: White men on the dark squares of ranks 1..3,
    /// Black men on ranks 6..8.
    pub fn new() -> Board {
        let mut pieces = Vec::with_capacity(24);
        for y in (MIN..=MAX).rev() {
            for x in MIN..=MAX {
                if !is_dark(x, y) {
                    continue;
                }
                let square = Square { x, y };
                if y >= 6 {
                    pieces.push(Piece::new(Color::Black, square));
                }
                if y <= 3 {
                    pieces.push(Piece::new(Color::White, square));
                }
            }
        }
        Board {
            pieces,
            white_captures: 0,
            black_captures: 0,
        }
    }

    pub fn empty() -> Board {
        Board {
            pieces: Vec::new(),
            white_captures: 0,
            black_captures: 0,
        }
    }

    /// Puts a piece on a free square, for building custom positions.
    pub fn place(&mut self, piece: Piece) -> Result<(), IllegalMove> {
        if self.get_piece(piece.square).is_some() {
            return Err(IllegalMove::SquareOccupied(piece.square));
        }
        self.pieces.push(piece);
        Ok(())
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |piece| piece.color == color)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Number of opposing pieces `color` has taken.
    pub fn captures(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_captures,
            Color::Black => self.black_captures,
        }
    }

    pub fn get_piece(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.square == square)
    }

    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let index = self.pieces.iter().position(|piece| piece.square == square)?;
        Some(self.pieces.remove(index))
    }

    /** Move a piece without validating rules; the game layer does that. */
    pub fn move_piece_to(&mut self, from: Square, to: Square) {
        match self.pieces.iter_mut().find(|piece| piece.square == from) {
            Some(piece) => piece.set_square(to),
            None => trace!("Nothing to move on {from}! Is it intentional?"),
        }
    }

    pub fn increment_capture(&mut self, color: Color) {
        match color {
            Color::White => self.white_captures += 1,
            Color::Black => self.black_captures += 1,
        }
    }

    /// Crowns the man on `square` if it stands on the opponent's back rank.
    /// Returns whether a crowning happened.
    pub fn apply_promotion_if_eligible(&mut self, square: Square) -> bool {
        match self.pieces.iter_mut().find(|piece| piece.square == square) {
            Some(piece) if !piece.is_king() && square.y == piece.color.promotion_rank() => {
                piece.crown();
                true
            }
            _ => false,
        }
    }

    /// Whether `piece` could jump in `dir` right now.
    fn capture_in(&self, piece: &Piece, dir: Direction) -> bool {
        let Some(mid) = piece.one_step(dir) else {
            return false;
        };
        match self.get_piece(mid) {
            Some(victim) if victim.color != piece.color => piece
                .skip_over(mid)
                .is_some_and(|landing| self.get_piece(landing).is_none()),
            _ => false,
        }
    }

    pub fn can_piece_capture(&self, piece: &Piece) -> bool {
        Direction::ALL
            .into_iter()
            .any(|dir| self.capture_in(piece, dir))
    }

    pub fn any_capture_available(&self, side: Color) -> bool {
        self.pieces_of(side).any(|piece| self.can_piece_capture(piece))
    }

    /// Does `side` have anything to play? While a chain is running only
    /// further captures of the forced piece count.
    pub fn any_legal_move(&self, side: Color, forced: Option<Square>) -> bool {
        if let Some(square) = forced {
            return self
                .get_piece(square)
                .is_some_and(|piece| self.can_piece_capture(piece));
        }
        if self.any_capture_available(side) {
            return true;
        }
        self.pieces_of(side).any(|piece| {
            Direction::ALL.into_iter().any(|dir| {
                piece
                    .one_step(dir)
                    .is_some_and(|step| self.get_piece(step).is_none())
            })
        })
    }

    /// Every `(square, direction)` pair `side` may play, simple steps and captures alike.
    pub fn legal_steps(&self, side: Color, forced: Option<Square>) -> Vec<(Square, Direction)> {
        self.pieces_of(side)
            .filter(|piece| forced.map_or(true, |square| piece.square == square))
            .flat_map(|piece| {
                Direction::ALL.into_iter().filter_map(move |dir| {
                    let step = piece.one_step(dir)?;
                    let playable = match self.get_piece(step) {
                        None => forced.is_none(),
                        Some(_) => self.capture_in(piece, dir),
                    };
                    playable.then_some((piece.square, dir))
                })
            })
            .collect()
    }

    /// The surviving color once the other one has no pieces left.
    pub fn winner(&self) -> Option<Color> {
        if self.count(Color::Black) == 0 {
            Some(Color::White)
        } else if self.count(Color::White) == 0 {
            Some(Color::Black)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!("   +{}", "---+".repeat(MAX as usize));
        for y in (MIN..=MAX).rev() {
            writeln!(f, "{separator}")?;
            write!(f, "{y:2} |")?;
            for x in MIN..=MAX {
                let symbol = self
                    .get_piece(Square { x, y })
                    .map_or(' ', |piece| piece.symbol());
                write!(f, " {symbol} |")?;
            }
            if y == MAX {
                write!(f, "  Black captured: {}", self.black_captures)?;
            }
            if y == MIN {
                write!(f, "  White captured: {}", self.white_captures)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{separator}")?;
        write!(f, "    ")?;
        for label in FILE_LABELS {
            write!(f, " {label}  ")?;
        }
        writeln!(f)
    }
}
