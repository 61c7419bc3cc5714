use super::game::{SnakeGame, TickOutcome};
use super::snapshot::GameSnapshot;

/// Observer side of the engine: renderers and persistence implement this and
/// receive a snapshot after every advance.
pub trait GameBroadcaster {
    fn broadcast_state(&self, snapshot: &GameSnapshot);

    fn broadcast_game_over(&self, snapshot: &GameSnapshot);
}

/// Notifies `broadcaster` about a tick result. Skipped ticks publish nothing.
/// Returns true when the game reached a terminal status on this tick.
pub fn publish_outcome<B: GameBroadcaster>(
    broadcaster: &B,
    game: &SnakeGame,
    outcome: &TickOutcome,
) -> bool {
    let TickOutcome::Advanced(report) = outcome else {
        return false;
    };

    let snapshot = game.snapshot();
    broadcaster.broadcast_state(&snapshot);

    if report.status.is_terminal() {
        broadcaster.broadcast_game_over(&snapshot);
        return true;
    }
    false
}
