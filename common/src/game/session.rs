use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::{RoundId, SessionId};
use super::board::BOARD_CELLS;
use super::bot_controller::calculate_bot_move;
use super::broadcaster::GameBroadcaster;
use super::game_state::TicTacToeGameState;
use super::session_rng::SessionRng;
use super::types::{GameMode, GameStatus, Mark, WinningLine};
use super::win_detector::check_win_with_line;

#[derive(Debug, Clone)]
pub enum GameCommand {
    PlaceMark { index: usize },
    NewRound,
}

/// Snapshot of the session state pushed to the view layer after every
/// accepted state change.
#[derive(Debug, Clone)]
pub struct GameStateUpdate {
    pub cells: [Mark; BOARD_CELLS],
    pub current_mark: Mark,
    pub status: GameStatus,
    pub mode: GameMode,
    pub round: RoundId,
    pub last_move: Option<usize>,
    pub bot_thinking: bool,
    pub winning_line: Option<WinningLine>,
}

struct PendingBotMove {
    round: RoundId,
    deadline: Instant,
}

pub struct TicTacToeSession;

impl TicTacToeSession {
    /// Runs one session: a fixed mode, any number of rounds. All state
    /// transitions happen inside this loop; the only deferred work is the
    /// bot's artificial thinking delay. Ends when the command channel
    /// closes.
    pub async fn run(
        session_id: SessionId,
        mode: GameMode,
        bot_delay: Duration,
        mut rng: SessionRng,
        mut command_rx: mpsc::UnboundedReceiver<GameCommand>,
        broadcaster: impl GameBroadcaster,
    ) {
        let mut state = TicTacToeGameState::new(mode);
        let mut pending_bot: Option<PendingBotMove> = None;

        crate::log!(
            "[session:{}] starting {} mode, seed {}, round {}",
            session_id,
            mode,
            rng.seed(),
            state.round
        );
        broadcast_state(&state, pending_bot.is_some(), &broadcaster).await;

        loop {
            // Copied out so the timer branch does not hold a borrow on the
            // pending move while the command branch mutates it.
            let bot_deadline = pending_bot.as_ref().map(|pending| pending.deadline);

            tokio::select! {
                command = command_rx.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    handle_command(
                        &session_id,
                        command,
                        &mut state,
                        &mut pending_bot,
                        bot_delay,
                        &broadcaster,
                    )
                    .await;
                }
                _ = tokio::time::sleep_until(bot_deadline.unwrap_or_else(Instant::now)),
                    if bot_deadline.is_some() =>
                {
                    let pending = pending_bot.take().unwrap();
                    play_bot_turn(&session_id, pending, &mut state, &mut rng, &broadcaster).await;
                }
            }
        }

        crate::log!("[session:{}] session ended", session_id);
    }
}

async fn handle_command(
    session_id: &SessionId,
    command: GameCommand,
    state: &mut TicTacToeGameState,
    pending_bot: &mut Option<PendingBotMove>,
    bot_delay: Duration,
    broadcaster: &impl GameBroadcaster,
) {
    match command {
        GameCommand::PlaceMark { index } => {
            if state.is_bot_turn() {
                crate::log!(
                    "[session:{}] rejected mark at {}: waiting for the bot",
                    session_id,
                    index
                );
                return;
            }

            match state.place_mark(index) {
                Ok(()) => {
                    schedule_bot_move(session_id, state, pending_bot, bot_delay);
                    broadcast_state(state, pending_bot.is_some(), broadcaster).await;
                    if state.status.is_over() {
                        crate::log!(
                            "[session:{}] round {} over: {:?}",
                            session_id,
                            state.round,
                            state.status
                        );
                    }
                }
                Err(e) => {
                    crate::log!(
                        "[session:{}] rejected mark at {}: {}",
                        session_id,
                        index,
                        e
                    );
                }
            }
        }
        GameCommand::NewRound => {
            // Any bot move scheduled for the old round dies here; the
            // round id check below is the second fence.
            *pending_bot = None;
            state.reset();
            crate::log!("[session:{}] new round {}", session_id, state.round);
            broadcast_state(state, false, broadcaster).await;
        }
    }
}

async fn play_bot_turn(
    session_id: &SessionId,
    pending: PendingBotMove,
    state: &mut TicTacToeGameState,
    rng: &mut SessionRng,
    broadcaster: &impl GameBroadcaster,
) {
    if pending.round != state.round || !state.is_bot_turn() {
        crate::log!(
            "[session:{}] discarded stale bot move for round {}",
            session_id,
            pending.round
        );
        return;
    }

    let Some(index) = calculate_bot_move(&state.board, Mark::O, rng) else {
        crate::log!("[session:{}] bot found no move", session_id);
        return;
    };

    match state.place_mark(index) {
        Ok(()) => {
            crate::log!("[session:{}] bot marked cell {}", session_id, index);
            broadcast_state(state, false, broadcaster).await;
            if state.status.is_over() {
                crate::log!(
                    "[session:{}] round {} over: {:?}",
                    session_id,
                    state.round,
                    state.status
                );
            }
        }
        Err(e) => {
            crate::log!("[session:{}] bot failed to mark cell {}: {}", session_id, index, e);
        }
    }
}

fn schedule_bot_move(
    session_id: &SessionId,
    state: &TicTacToeGameState,
    pending_bot: &mut Option<PendingBotMove>,
    bot_delay: Duration,
) {
    if !state.is_bot_turn() || pending_bot.is_some() {
        return;
    }

    *pending_bot = Some(PendingBotMove {
        round: state.round,
        deadline: Instant::now() + bot_delay,
    });
    crate::log!("[session:{}] bot thinking for round {}", session_id, state.round);
}

async fn broadcast_state(
    state: &TicTacToeGameState,
    bot_thinking: bool,
    broadcaster: &impl GameBroadcaster,
) {
    let winning_line = if state.status.is_over() {
        check_win_with_line(&state.board)
    } else {
        None
    };

    broadcaster
        .broadcast_state(GameStateUpdate {
            cells: *state.board.cells(),
            current_mark: state.current_mark,
            status: state.status,
            mode: state.mode,
            round: state.round,
            last_move: state.last_move,
            bot_thinking,
            winning_line,
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct TestBroadcaster {
        updates: Arc<Mutex<Vec<GameStateUpdate>>>,
    }

    impl TestBroadcaster {
        fn new() -> Self {
            Self {
                updates: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn latest(&self) -> GameStateUpdate {
            self.updates.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl GameBroadcaster for TestBroadcaster {
        async fn broadcast_state(&self, update: GameStateUpdate) {
            self.updates.lock().unwrap().push(update);
        }
    }

    fn start_session(
        mode: GameMode,
        bot_delay: Duration,
    ) -> (
        mpsc::UnboundedSender<GameCommand>,
        TestBroadcaster,
        tokio::task::JoinHandle<()>,
    ) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let broadcaster = TestBroadcaster::new();
        let handle = tokio::spawn(TicTacToeSession::run(
            SessionId::new("test".to_string()),
            mode,
            bot_delay,
            SessionRng::new(42),
            command_rx,
            broadcaster.clone(),
        ));
        (command_tx, broadcaster, handle)
    }

    fn count_marks(cells: &[Mark; BOARD_CELLS], mark: Mark) -> usize {
        cells.iter().filter(|&&cell| cell == mark).count()
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_replies_after_delay() {
        let (command_tx, broadcaster, handle) =
            start_session(GameMode::Bot, Duration::from_millis(1000));

        command_tx.send(GameCommand::PlaceMark { index: 4 }).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let update = broadcaster.latest();
        assert_eq!(count_marks(&update.cells, Mark::X), 1);
        assert_eq!(count_marks(&update.cells, Mark::O), 1);
        assert_eq!(update.current_mark, Mark::X);
        assert!(!update.bot_thinking);

        drop(command_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_reports_bot_thinking_during_delay() {
        let (command_tx, broadcaster, handle) =
            start_session(GameMode::Bot, Duration::from_millis(1000));

        command_tx.send(GameCommand::PlaceMark { index: 4 }).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let update = broadcaster.latest();
        assert!(update.bot_thinking);
        assert_eq!(count_marks(&update.cells, Mark::O), 0);

        drop(command_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_invalidates_pending_bot_move() {
        let (command_tx, broadcaster, handle) =
            start_session(GameMode::Bot, Duration::from_millis(1000));

        command_tx.send(GameCommand::PlaceMark { index: 4 }).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        command_tx.send(GameCommand::NewRound).unwrap();
        tokio::time::sleep(Duration::from_millis(2000)).await;

        // The bot move scheduled before the reset never lands.
        let update = broadcaster.latest();
        assert_eq!(count_marks(&update.cells, Mark::X), 0);
        assert_eq!(count_marks(&update.cells, Mark::O), 0);
        assert_eq!(update.round, RoundId::first().next());
        assert_eq!(update.current_mark, Mark::X);

        drop(command_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_human_cannot_move_for_the_bot() {
        let (command_tx, broadcaster, handle) =
            start_session(GameMode::Bot, Duration::from_millis(1000));

        command_tx.send(GameCommand::PlaceMark { index: 4 }).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        // It is the bot's turn now; this must be a no-op.
        command_tx.send(GameCommand::PlaceMark { index: 0 }).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let update = broadcaster.latest();
        assert_eq!(count_marks(&update.cells, Mark::X), 1);
        assert_eq!(count_marks(&update.cells, Mark::O), 0);

        drop(command_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_friend_mode_never_schedules_bot() {
        let (command_tx, broadcaster, handle) =
            start_session(GameMode::Friend, Duration::from_millis(100));

        command_tx.send(GameCommand::PlaceMark { index: 0 }).unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;

        let update = broadcaster.latest();
        assert_eq!(count_marks(&update.cells, Mark::X), 1);
        assert_eq!(count_marks(&update.cells, Mark::O), 0);
        assert_eq!(update.current_mark, Mark::O);
        assert!(!update.bot_thinking);

        drop(command_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_win_announced_with_line() {
        let (command_tx, broadcaster, handle) =
            start_session(GameMode::Friend, Duration::from_millis(100));

        for index in [0, 4, 3, 1, 6] {
            command_tx.send(GameCommand::PlaceMark { index }).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(100)).await;

        let update = broadcaster.latest();
        assert_eq!(update.status, GameStatus::XWon);
        let line = update.winning_line.unwrap();
        assert_eq!(line.mark, Mark::X);
        assert_eq!(line.cells, [0, 3, 6]);

        // Moves after the terminal one are rejected.
        command_tx.send(GameCommand::PlaceMark { index: 8 }).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(broadcaster.latest().cells, update.cells);

        drop(command_tx);
        handle.await.unwrap();
    }
}
