use std::{fmt::Display, ops::AddAssign};

use log::warn;

use crate::core::definitions::MatchState;
use crate::core::engine::{Color, Direction, Square};
use crate::core::game::GameService;

/// Tally of move-action paths, where every capture hop counts as one action.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathCount {
    pub all: usize,
    pub captures: usize,
    pub promotions: usize,
    pub chains: usize,
    pub finished: usize,
}

impl PathCount {
    pub fn combine(self, other: PathCount) -> Self {
        PathCount {
            all: self.all + other.all,
            captures: self.captures + other.captures,
            promotions: self.promotions + other.promotions,
            chains: self.chains + other.chains,
            finished: self.finished + other.finished,
        }
    }
}

impl AddAssign for PathCount {
    fn add_assign(&mut self, rhs: Self) {
        self.all += rhs.all;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
        self.chains += rhs.chains;
        self.finished += rhs.finished;
    }
}

impl Display for PathCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - cp: {:<4} pr: {:<4} ch: {:<4} end: {:4}",
            self.all, self.captures, self.promotions, self.chains, self.finished
        )
    }
}

fn kings(game: &GameService) -> usize {
    game.board().pieces().iter().filter(|piece| piece.is_king()).count()
}

fn captures(game: &GameService) -> u32 {
    let board = game.board();
    board.captures(Color::White) + board.captures(Color::Black)
}

/// Plays one step on a copy of `game`; `None` if it was refused.
fn play(game: &GameService, square: Square, dir: Direction) -> Option<GameService> {
    let mut next = game.clone();
    match next.move_by_direction(square, dir) {
        Ok(()) => Some(next),
        Err(err) => {
            warn!("Listed step {square} {dir} was refused: {err}");
            None
        }
    }
}

fn classify(before: &GameService, after: &GameService) -> PathCount {
    PathCount {
        all: 1,
        captures: (captures(after) > captures(before)) as usize,
        promotions: (kings(after) > kings(before)) as usize,
        chains: matches!(after.state(), MatchState::ChainInProgress(_)) as usize,
        finished: after.is_game_over() as usize,
    }
}

/// Counts the move-action paths of length `depth` from `game`.
pub fn count_paths(game: &GameService, depth: usize) -> PathCount {
    if depth == 0 {
        return PathCount {
            all: 1,
            ..Default::default()
        };
    }
    game.legal_steps()
        .into_iter()
        .filter_map(|(square, dir)| play(game, square, dir))
        .map(|next| {
            if depth == 1 {
                classify(game, &next)
            } else {
                count_paths(&next, depth - 1)
            }
        })
        .fold(PathCount::default(), PathCount::combine)
}

/// Path counts split by the first step played.
pub fn count_paths_divided(game: &GameService, depth: usize) -> Vec<(Square, Direction, PathCount)> {
    if depth == 0 {
        return Vec::new();
    }
    game.legal_steps()
        .into_iter()
        .filter_map(|(square, dir)| {
            let next = play(game, square, dir)?;
            let count = if depth == 1 {
                classify(game, &next)
            } else {
                count_paths(&next, depth - 1)
            };
            Some((square, dir, count))
        })
        .collect()
}
