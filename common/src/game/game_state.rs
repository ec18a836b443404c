use crate::RoundId;
use super::board::Board;
use super::types::{GameMode, GameStatus, Mark};
use super::win_detector::check_win;

#[derive(Debug)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub mode: GameMode,
    pub round: RoundId,
    pub last_move: Option<usize>,
}

impl TicTacToeGameState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            mode,
            round: RoundId::first(),
            last_move: None,
        }
    }

    pub fn place_mark(&mut self, index: usize) -> Result<(), String> {
        if self.status != GameStatus::InProgress {
            return Err("Round is already over".to_string());
        }

        if !Board::is_inside(index) {
            return Err(format!("Cell index {} out of bounds", index));
        }

        if self.board.cell(index) != Mark::Empty {
            return Err(format!("Cell {} is already marked", index));
        }

        self.board.set_cell(index, self.current_mark);
        self.last_move = Some(index);

        self.check_round_over();

        // The turn only passes while the round is live; a terminal move
        // leaves the winner as the current mark.
        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.current_mark = Mark::X;
        self.status = GameStatus::InProgress;
        self.round = self.round.next();
        self.last_move = None;
    }

    pub fn is_bot_turn(&self) -> bool {
        self.mode == GameMode::Bot
            && self.status == GameStatus::InProgress
            && self.current_mark == Mark::O
    }

    pub fn winner(&self) -> Option<Mark> {
        self.status.winner()
    }

    fn switch_turn(&mut self) {
        self.current_mark = match self.current_mark {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => unreachable!("current mark is never empty"),
        };
    }

    fn check_round_over(&mut self) {
        if let Some(winner_mark) = check_win(&self.board) {
            self.status = match winner_mark {
                Mark::X => GameStatus::XWon,
                Mark::O => GameStatus::OWon,
                Mark::Empty => unreachable!("winning line is never empty"),
            };
            return;
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
        }
    }
}
