mod board;
mod bot_controller;
mod broadcaster;
mod game_state;
mod session;
mod session_rng;
mod types;
mod win_detector;

pub use board::{BOARD_CELLS, Board, WINNING_LINES, get_available_moves};
pub use bot_controller::calculate_bot_move;
pub use broadcaster::GameBroadcaster;
pub use game_state::TicTacToeGameState;
pub use session::{GameCommand, GameStateUpdate, TicTacToeSession};
pub use session_rng::SessionRng;
pub use types::{GameMode, GameStatus, Mark, WinningLine};
pub use win_detector::{check_win, check_win_with_line};
