use std::time::Duration;
use tokio::sync::mpsc;

use common::game::{GameMode, SessionRng, TicTacToeSession};
use common::id_generator::generate_session_name;
use common::identifiers::SessionId;

use crate::broadcaster::LocalBroadcaster;
use crate::state::{AppState, ClientCommand, MenuCommand, SharedState};

/// Background task bridging the UI channel to game sessions. Each mode
/// selection runs one session; leaving it returns to the mode screen.
pub async fn game_loop_task(
    shared_state: SharedState,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
    bot_delay: Duration,
) {
    while let Some(command) = command_rx.recv().await {
        if let ClientCommand::Menu(MenuCommand::SelectMode(mode)) = command {
            run_tictactoe_game(&shared_state, &mut command_rx, mode, bot_delay).await;
            shared_state.set_state(AppState::ModeSelect);
        }
    }
}

async fn run_tictactoe_game(
    shared_state: &SharedState,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    mode: GameMode,
    bot_delay: Duration,
) {
    let session_id = SessionId::new(generate_session_name());
    let broadcaster = LocalBroadcaster::new(shared_state.clone());
    let rng = SessionRng::from_random();
    let (game_tx, game_rx) = mpsc::unbounded_channel();

    shared_state.set_state(AppState::InGame { update: None });

    let mut session_handle = tokio::spawn(TicTacToeSession::run(
        session_id,
        mode,
        bot_delay,
        rng,
        game_rx,
        broadcaster,
    ));

    loop {
        tokio::select! {
            _ = &mut session_handle => {
                return;
            }
            command = command_rx.recv() => {
                match command {
                    Some(ClientCommand::Game(game_command)) => {
                        let _ = game_tx.send(game_command);
                    }
                    Some(ClientCommand::Menu(MenuCommand::LeaveGame)) | None => {
                        break;
                    }
                    Some(ClientCommand::Menu(MenuCommand::SelectMode(_))) => {
                        // Mode is fixed for the session; leave first.
                    }
                }
            }
        }
    }

    // Closing the command channel ends the session loop.
    drop(game_tx);
    let _ = session_handle.await;
}
