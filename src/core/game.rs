use log::{debug, info, trace};
use thiserror::Error;

use crate::core::definitions::{Cell, Command, Figure, MatchInterface, MatchState, Outcome, Side};
use crate::core::engine::{Board, Color, Direction, Piece, Square};

/// Why a request was refused. The game is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("No piece at {0}.")]
    NoPiece(Square),
    #[error("It's not {0}'s turn.")]
    WrongTurn(Color),
    #[error("Direction must be 'l' or 'r' (got '{0}').")]
    InvalidDirection(char),
    #[error("Direction index must be 0..=3 (got {0}).")]
    InvalidDirectionIndex(usize),
    #[error("'{0}' is not a square on the board.")]
    InvalidSquare(String),
    #[error("Expected '<square> <l|r> [b]', got '{0}'.")]
    MalformedCommand(String),
    #[error("Only kings can move backward.")]
    BackwardNotAllowed,
    #[error("The piece on {0} can't go {1}.")]
    DirectionNotAllowed(Square, Direction),
    #[error("You must continue the capture chain with the piece on {0}.")]
    MustContinueChain(Square),
    #[error("Square {0} is blocked.")]
    Blocked(Square),
    #[error("No landing square to complete the capture.")]
    NoLandingSquare,
    #[error("Game is already over.")]
    GameOver,
    #[error("Square {0} is already occupied.")]
    SquareOccupied(Square),
}

pub fn ui_board(board: &Board, movable: &[Square], forced: Option<Square>) -> Vec<Vec<Cell>> {
    (1..=8)
        .map(|y| {
            (1..=8)
                .filter_map(|x| Square::new(x, y))
                .map(|square| match board.get_piece(square) {
                    None => Cell::Empty,
                    Some(piece) => Cell::Figure(Figure {
                        color: piece.color(),
                        rank: piece.rank(),
                        forced: forced == Some(square),
                        can_move: movable.contains(&square),
                    }),
                })
                .collect()
        })
        .collect()
}

/// Board and turn as they were before a move or a whole capture chain.
#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    white_to_move: bool,
}

#[derive(Debug, Clone)]
pub struct GameService {
    board: Board,
    white_to_move: bool,
    /** piece that has to keep capturing, set only inside a chain */
    forced: Option<Square>,
    history: Vec<Snapshot>,
    user_ended: bool,
}

impl GameService {
    pub fn new() -> GameService {
        GameService::with_board(Board::new(), true)
    }

    pub fn with_board(board: Board, white_to_move: bool) -> GameService {
        GameService {
            board,
            white_to_move,
            forced: None,
            history: Vec::new(),
            user_ended: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_white_to_move(&self) -> bool {
        self.white_to_move
    }

    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn forced_piece(&self) -> Option<Square> {
        self.forced
    }

    pub fn has_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.user_ended {
            return Some(Outcome::EndedByUser);
        }
        if let Some(winner) = self.board.winner() {
            return Some(Outcome::Winner(winner));
        }
        let side = self.side_to_move();
        if self.board.any_legal_move(side, self.forced) {
            None
        } else {
            Some(Outcome::NoMoves(side))
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn state(&self) -> MatchState {
        match (self.outcome(), self.forced) {
            (Some(outcome), _) => MatchState::Over(outcome),
            (None, Some(square)) => MatchState::ChainInProgress(square),
            (None, None) => MatchState::Active,
        }
    }

    pub fn result_text(&self) -> String {
        self.outcome()
            .map_or_else(|| "Game in progress.".to_string(), |outcome| outcome.to_string())
    }

    /// Everything the side to move may play right now.
    pub fn legal_steps(&self) -> Vec<(Square, Direction)> {
        if self.is_game_over() {
            return Vec::new();
        }
        self.board.legal_steps(self.side_to_move(), self.forced)
    }

    /// Undo the last completed move, or the whole capture chain in progress.
    /// No effect if history is empty or the game is over.
    pub fn undo(&mut self) -> bool {
        if self.is_game_over() {
            debug!("Undo ignored: game is over");
            return false;
        }
        let Some(Snapshot {
            board,
            white_to_move,
        }) = self.history.pop()
        else {
            debug!("Undo ignored: history is empty");
            return false;
        };
        self.board = board;
        self.white_to_move = white_to_move;
        self.forced = None;
        info!("Undo applied. Restored turn: {}", self.side_to_move());
        true
    }

    pub fn end_game(&mut self) {
        self.user_ended = true;
        info!("Game flagged as ended by user.");
    }

    pub fn restart_game(&mut self) {
        info!("Restarting game: fresh board, history cleared.");
        self.board = Board::new();
        self.white_to_move = true;
        self.forced = None;
        self.history.clear();
        self.user_ended = false;
    }

    /// Plays `<square> <l|r> [b]`. Left and right are taken from the mover's
    /// side of the board, and only kings may ask for backward.
    pub fn move_from_command(
        &mut self,
        square: &str,
        direction: char,
        backward: bool,
    ) -> Result<(), IllegalMove> {
        let square: Square = square.parse()?;
        self.ensure_running()?;
        self.acting_piece(square)?;
        let side = Side::try_from(direction)?;
        self.move_by_side(square, side, backward)
    }

    fn move_by_side(&mut self, square: Square, side: Side, backward: bool) -> Result<(), IllegalMove> {
        let piece = self.acting_piece(square)?;
        if backward && !piece.is_king() {
            debug!("Illegal: non-king {} tried to move backward", piece.color());
            return Err(IllegalMove::BackwardNotAllowed);
        }
        self.move_by_direction(square, side.resolve(piece.color(), backward))
    }

    /// Same as [`GameService::move_by_direction`] with a raw direction index,
    /// `0: ForwardLeft, 1: ForwardRight, 2: BackwardLeft, 3: BackwardRight`.
    pub fn move_by_index(&mut self, square: Square, index: usize) -> Result<(), IllegalMove> {
        let dir = Direction::from_index(index).ok_or(IllegalMove::InvalidDirectionIndex(index))?;
        self.move_by_direction(square, dir)
    }

    pub fn move_by_direction(&mut self, square: Square, dir: Direction) -> Result<(), IllegalMove> {
        self.ensure_running()?;
        let piece = self.acting_piece(square)?;
        if let Some(forced) = self.forced {
            if forced != square {
                debug!("Illegal: must continue capture chain with {forced}");
                return Err(IllegalMove::MustContinueChain(forced));
            }
        }
        let Some(step) = piece.one_step(dir) else {
            debug!("Illegal: {dir} not allowed for the piece on {square}");
            return Err(IllegalMove::DirectionNotAllowed(square, dir));
        };
        match self.board.get_piece(step).map(|occupant| occupant.color()) {
            None => self.simple_move(piece, step),
            Some(color) if color == piece.color() => {
                debug!("Illegal: square blocked by own piece at {step}");
                Err(IllegalMove::Blocked(step))
            }
            Some(_) => self.capture(piece, step),
        }
    }

    fn ensure_running(&self) -> Result<(), IllegalMove> {
        if self.is_game_over() {
            debug!("Illegal: game is already over");
            Err(IllegalMove::GameOver)
        } else {
            Ok(())
        }
    }

    fn acting_piece(&self, square: Square) -> Result<Piece, IllegalMove> {
        let piece = *self.board.get_piece(square).ok_or_else(|| {
            debug!("Illegal: no piece at {square}");
            IllegalMove::NoPiece(square)
        })?;
        if piece.color() != self.side_to_move() {
            debug!(
                "Illegal: it's {}'s turn, but {} piece selected",
                self.side_to_move(),
                piece.color()
            );
            return Err(IllegalMove::WrongTurn(piece.color()));
        }
        Ok(piece)
    }

    fn simple_move(&mut self, piece: Piece, to: Square) -> Result<(), IllegalMove> {
        if let Some(forced) = self.forced {
            debug!("Illegal: attempted simple move while in capture chain");
            return Err(IllegalMove::MustContinueChain(forced));
        }
        self.snapshot();
        self.board.move_piece_to(piece.square(), to);
        self.promote(to);
        self.end_turn();
        Ok(())
    }

    fn capture(&mut self, piece: Piece, victim: Square) -> Result<(), IllegalMove> {
        let landing = piece
            .skip_over(victim)
            .filter(|landing| self.board.get_piece(*landing).is_none())
            .ok_or_else(|| {
                debug!("Illegal: no valid landing square after {victim}");
                IllegalMove::NoLandingSquare
            })?;

        // one snapshot per chain, taken before its first hop
        if self.forced.is_none() {
            self.snapshot();
        }
        debug!(
            "Capture {} {} x {} -> {}",
            piece.color(),
            piece.square(),
            victim,
            landing
        );
        self.board.remove_piece(victim);
        self.board.move_piece_to(piece.square(), landing);
        self.board.increment_capture(piece.color());
        self.promote(landing);

        let can_continue = self
            .board
            .get_piece(landing)
            .is_some_and(|moved| self.board.can_piece_capture(moved));
        if can_continue {
            self.forced = Some(landing);
            debug!("Capture chain continues from {landing}");
        } else {
            self.end_turn();
        }
        Ok(())
    }

    fn promote(&mut self, square: Square) {
        if self.board.apply_promotion_if_eligible(square) {
            info!("Promotion: {} crowned at {square}", self.side_to_move());
        }
    }

    fn end_turn(&mut self) {
        self.white_to_move = !self.white_to_move;
        self.forced = None;
        debug!("Turn ended. Next to move: {}", self.side_to_move());
    }

    fn snapshot(&mut self) {
        self.history.push(Snapshot {
            board: self.board.clone(),
            white_to_move: self.white_to_move,
        });
        trace!("Snapshot saved (history size = {})", self.history.len());
    }
}

impl Default for GameService {
    fn default() -> Self {
        GameService::new()
    }
}

impl MatchInterface for GameService {
    fn current_board(&self) -> Vec<Vec<Cell>> {
        let movable: Vec<Square> = self
            .legal_steps()
            .into_iter()
            .map(|(square, _)| square)
            .collect();
        ui_board(&self.board, &movable, self.forced)
    }

    fn cell(&self, square: Square) -> Cell {
        match self.board.get_piece(square) {
            None => Cell::Empty,
            Some(piece) => Cell::Figure(Figure {
                color: piece.color(),
                rank: piece.rank(),
                forced: self.forced == Some(square),
                can_move: self.legal_steps().iter().any(|(from, _)| *from == square),
            }),
        }
    }

    fn execute_command(&mut self, command: Command) -> Result<(), IllegalMove> {
        self.ensure_running()?;
        self.move_by_side(command.square, command.side, command.backward)
    }

    fn undo(&mut self) -> bool {
        GameService::undo(self)
    }

    fn end_game(&mut self) {
        GameService::end_game(self)
    }

    fn restart_game(&mut self) {
        GameService::restart_game(self)
    }

    fn current_player(&self) -> Color {
        self.side_to_move()
    }

    fn state(&self) -> MatchState {
        GameService::state(self)
    }

    fn has_undo(&self) -> bool {
        GameService::has_undo(self)
    }

    fn captures(&self, color: Color) -> u32 {
        self.board.captures(color)
    }

    fn result_text(&self) -> String {
        GameService::result_text(self)
    }
}
