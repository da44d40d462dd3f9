use tracing::{debug, info};

use crate::board::{Board, compute_destination};
use crate::types::{Coord, Direction, GameSnapshot, MoveOutcome, MoveRecord, PieceId, RejectReason, Side};

/// Number of history entries exposed in snapshots.
pub const HISTORY_TAIL: usize = 10;

/// A single game session. Owns every piece of mutable state.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_player: Side,
    selected: Option<PieceId>,
    history: Vec<MoveRecord>,
    game_over: bool,
    winner: Option<Side>,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Side::A,
            selected: None,
            history: Vec::new(),
            game_over: false,
            winner: None,
        }
    }

    /// Discards the current game and starts over from the home-row layout.
    pub fn initialize(&mut self) {
        *self = Self::new();
        info!("game initialized");
    }

    /// Selects the piece on `pos` if it belongs to `requesting_player` and that
    /// player is on turn; otherwise clears the selection. Returns the new selection.
    ///
    /// Does nothing once the game is over.
    pub fn select_at(&mut self, pos: Coord, requesting_player: Side) -> Option<PieceId> {
        if self.game_over {
            debug!(%pos, "selection ignored: game is over");
            return self.selected;
        }

        self.selected = self.board.piece_at(pos).filter(|piece| {
            piece.side == requesting_player && requesting_player == self.current_player
        });
        debug!(%pos, selected = ?self.selected, "selection updated");
        self.selected
    }

    /// Moves the selected piece one class-determined stride in `direction`.
    ///
    /// A rejected move leaves every field untouched, including the turn and
    /// the selection.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        match self.try_move(direction) {
            Ok(outcome) => outcome,
            Err(reason) => {
                debug!(%direction, %reason, "move rejected");
                MoveOutcome::Rejected { reason }
            }
        }
    }

    fn try_move(&mut self, direction: Direction) -> Result<MoveOutcome, RejectReason> {
        if self.game_over {
            return Err(RejectReason::GameOver);
        }
        let piece = self.selected.ok_or(RejectReason::NoSelection)?;
        let from = self
            .board
            .locate(piece)
            .ok_or(RejectReason::PieceMissing(piece))?;

        let to = compute_destination(from, direction, piece.steps());
        if !to.in_bounds() {
            return Err(RejectReason::OutOfBounds(to));
        }
        if let Some(occupant) = self.board.piece_at(to) {
            if occupant.side == piece.side {
                return Err(RejectReason::OccupiedByOwnPiece(occupant));
            }
        }

        let captured = self.board.relocate(from, to);
        let record = MoveRecord { piece, to, captured };
        debug!(%record, "move applied");
        self.history.push(record);
        self.selected = None;

        self.evaluate_winner();
        self.current_player = self.current_player.opponent();

        Ok(match captured {
            Some(captured) => MoveOutcome::Captured { piece, captured, to },
            None => MoveOutcome::Moved { piece, to },
        })
    }

    /// A side with no pieces left loses. A is checked before B.
    fn evaluate_winner(&mut self) {
        let winner = if !self.board.has_pieces(Side::A) {
            Side::B
        } else if !self.board.has_pieces(Side::B) {
            Side::A
        } else {
            return;
        };
        self.game_over = true;
        self.winner = Some(winner);
        info!(%winner, moves = self.history.len(), "game over");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Side {
        self.current_player
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Full history, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The last `HISTORY_TAIL` records, oldest first.
    pub fn history_tail(&self) -> &[MoveRecord] {
        let start = self.history.len().saturating_sub(HISTORY_TAIL);
        &self.history[start..]
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn status_line(&self) -> String {
        format!("Current Player: {}", self.current_player)
    }

    pub fn selection_line(&self) -> String {
        match self.selected {
            Some(piece) => format!("Selected: {piece}"),
            None => "Selected: None".to_string(),
        }
    }

    /// `"Game Over! A Wins!"` once decided, empty otherwise.
    pub fn winner_message(&self) -> String {
        match (self.game_over, self.winner) {
            (true, Some(winner)) => format!("Game Over! {winner} Wins!"),
            _ => String::new(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self
                .board
                .rows()
                .iter()
                .map(|row| row.iter().map(|cell| cell.map(|p| p.to_string())).collect())
                .collect(),
            current_player: self.current_player,
            selected: self.selected.map(|p| p.to_string()),
            history_tail: self.history_tail().iter().map(ToString::to_string).collect(),
            game_over: self.game_over,
            winner: self.winner,
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Side) {
        self.board = board;
        self.current_player = current_player;
        self.selected = None;
        self.game_over = false;
        self.winner = None;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PIECES_PER_SIDE;
    use crate::types::Role;

    fn piece(side: Side, role: Role) -> PieceId {
        PieceId::new(side, role)
    }

    fn select(game: &mut Game, x: i32, y: i32) -> Option<PieceId> {
        let player = game.current_player();
        game.select_at(Coord::new(x, y), player)
    }

    fn board_with(pieces: &[(i32, i32, PieceId)]) -> Board {
        let mut board = Board::empty();
        for &(x, y, p) in pieces {
            board.place(Coord::new(x, y), Some(p));
        }
        board
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Game::new();

        assert_eq!(game.current_player(), Side::A);
        assert_eq!(game.selected(), None);
        assert!(game.history().is_empty());
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        assert_eq!(game.board().count(Side::A), PIECES_PER_SIDE);
        assert_eq!(game.board().count(Side::B), PIECES_PER_SIDE);
    }

    #[test]
    fn selection_requires_own_piece_on_turn() {
        let mut game = Game::new();

        assert_eq!(select(&mut game, 1, 0), Some(piece(Side::A, Role::P2)));
        assert_eq!(select(&mut game, 1, 4), None);
        assert_eq!(game.selected(), None);

        select(&mut game, 1, 0);
        assert_eq!(select(&mut game, 2, 2), None);

        assert_eq!(game.select_at(Coord::new(1, 4), Side::B), None);
        assert_eq!(game.select_at(Coord::new(9, 9), Side::A), None);
    }

    #[test]
    fn pawn_moves_one_and_turn_passes() {
        let mut game = Game::new();
        select(&mut game, 0, 0);

        let outcome = game.apply_move(Direction::B);

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                piece: piece(Side::A, Role::P1),
                to: Coord::new(0, 1),
            }
        );
        assert_eq!(game.board().piece_at(Coord::new(0, 0)), None);
        assert_eq!(game.selected(), None);
        assert_eq!(game.current_player(), Side::B);
        assert_eq!(game.history()[0].to_string(), "A-P1 moved to (0, 1)");
    }

    #[test]
    fn hero_moves_two_cells() {
        let mut game = Game::new();
        let hero = piece(Side::A, Role::H1);
        let pawn = piece(Side::A, Role::P1);
        game.set_board_for_test(
            board_with(&[(0, 2, hero), (0, 3, pawn), (4, 4, piece(Side::B, Role::P1))]),
            Side::A,
        );

        select(&mut game, 0, 2);
        game.apply_move(Direction::R);
        assert_eq!(game.board().locate(hero), Some(Coord::new(2, 2)));

        game.set_board_for_test(
            board_with(&[(0, 2, pawn), (4, 4, piece(Side::B, Role::P1))]),
            Side::A,
        );
        select(&mut game, 0, 2);
        game.apply_move(Direction::R);
        assert_eq!(game.board().locate(pawn), Some(Coord::new(1, 2)));
    }

    #[test]
    fn out_of_bounds_is_rejected_without_side_effects() {
        let mut game = Game::new();
        select(&mut game, 0, 0);
        let before = game.snapshot();

        let outcome = game.apply_move(Direction::L);

        assert_eq!(
            outcome,
            MoveOutcome::Rejected {
                reason: RejectReason::OutOfBounds(Coord::new(-1, 0)),
            }
        );
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.selected(), Some(piece(Side::A, Role::P1)));
    }

    #[test]
    fn own_piece_blocks_move() {
        let mut game = Game::new();
        select(&mut game, 0, 0);
        let before = game.snapshot();

        let outcome = game.apply_move(Direction::R);

        assert_eq!(
            outcome,
            MoveOutcome::Rejected {
                reason: RejectReason::OccupiedByOwnPiece(piece(Side::A, Role::P2)),
            }
        );
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.current_player(), Side::A);
    }

    #[test]
    fn capture_removes_exactly_one_piece() {
        let mut game = Game::new();
        let attacker = piece(Side::A, Role::P2);
        let victim = piece(Side::B, Role::P2);
        let mut board = Board::new();
        board.relocate(Coord::new(1, 0), Coord::new(2, 1));
        board.relocate(Coord::new(1, 4), Coord::new(2, 2));
        game.set_board_for_test(board, Side::A);

        select(&mut game, 2, 1);
        let outcome = game.apply_move(Direction::B);

        assert_eq!(
            outcome,
            MoveOutcome::Captured {
                piece: attacker,
                captured: victim,
                to: Coord::new(2, 2),
            }
        );
        assert_eq!(game.board().piece_at(Coord::new(2, 2)), Some(attacker));
        assert_eq!(game.board().piece_at(Coord::new(2, 1)), None);
        assert_eq!(game.board().locate(victim), None);
        assert_eq!(game.board().iter().count(), 2 * PIECES_PER_SIDE - 1);
        assert_eq!(game.history()[0].to_string(), "A-P2 captured B-P2 to (2, 2)");
        assert!(!game.is_game_over());
    }

    #[test]
    fn last_capture_ends_game_and_locks_input() {
        let mut game = Game::new();
        game.set_board_for_test(
            board_with(&[
                (1, 1, piece(Side::A, Role::H2)),
                (3, 3, piece(Side::B, Role::P3)),
            ]),
            Side::A,
        );

        select(&mut game, 1, 1);
        let outcome = game.apply_move(Direction::BR);

        assert!(outcome.is_success());
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Side::A));
        assert_eq!(game.current_player(), Side::B);
        assert_eq!(game.winner_message(), "Game Over! A Wins!");

        let before = game.snapshot();
        assert_eq!(game.select_at(Coord::new(3, 3), Side::B), None);
        assert_eq!(
            game.apply_move(Direction::F),
            MoveOutcome::Rejected {
                reason: RejectReason::GameOver,
            }
        );
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn missing_side_a_is_checked_first() {
        let mut game = Game::new();
        game.set_board_for_test(Board::empty(), Side::A);

        game.evaluate_winner();

        assert_eq!(game.winner(), Some(Side::B));
    }

    #[test]
    fn selected_piece_missing_from_board_is_rejected() {
        let mut game = Game::new();
        select(&mut game, 0, 0);
        game.board.place(Coord::new(0, 0), None);

        let outcome = game.apply_move(Direction::B);

        assert_eq!(
            outcome,
            MoveOutcome::Rejected {
                reason: RejectReason::PieceMissing(piece(Side::A, Role::P1)),
            }
        );
        assert_eq!(game.current_player(), Side::A);
    }

    #[test]
    fn moving_without_selection_changes_nothing() {
        let mut game = Game::new();
        let before = game.snapshot();

        for dir in Direction::ALL {
            assert_eq!(
                game.apply_move(dir),
                MoveOutcome::Rejected {
                    reason: RejectReason::NoSelection,
                }
            );
        }

        assert_eq!(game.snapshot(), before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn initialize_resets_mid_game() {
        let mut game = Game::new();
        select(&mut game, 0, 0);
        game.apply_move(Direction::B);
        select(&mut game, 0, 4);

        game.initialize();

        assert_eq!(game.snapshot(), Game::new().snapshot());
    }

    #[test]
    fn status_lines_follow_state() {
        let mut game = Game::new();

        assert_eq!(game.status_line(), "Current Player: A");
        assert_eq!(game.selection_line(), "Selected: None");
        assert_eq!(game.winner_message(), "");

        select(&mut game, 2, 0);
        assert_eq!(game.selection_line(), "Selected: A-H1");
    }
}
