use std::future::Future;

use super::session::GameStateUpdate;

/// Seam between the session loop and whatever is displaying the game.
/// The session pushes a full snapshot after every state change; the view
/// layer decides how to render it.
pub trait GameBroadcaster: Send + 'static {
    fn broadcast_state(&self, update: GameStateUpdate) -> impl Future<Output = ()> + Send;
}
