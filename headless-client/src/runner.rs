use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval};

use snake_common::engine::{
    GameBroadcaster, GameSnapshot, Key, SkipReason, SnakeGame, TickOutcome, publish_outcome,
};
use snake_common::config::ConfigContentProvider;
use snake_common::high_score::HighScoreStore;
use snake_common::{log, log_error};

/// Cadence of the host's frame callback; the engine throttles itself on top of it.
pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

pub struct RunSummary {
    pub advances: u64,
    pub final_snapshot: GameSnapshot,
}

/// Drives `game` from a periodic frame timer until it finishes, stops playing or
/// `max_advances` steps were made. Script steps are fed one per advance.
pub async fn run_game<B, P>(
    game: &mut SnakeGame,
    script: &[Option<Key>],
    max_advances: u64,
    high_score_store: &mut HighScoreStore<P>,
    broadcaster: &B,
) -> RunSummary
where
    B: GameBroadcaster,
    P: ConfigContentProvider,
{
    let mut frames = interval(FRAME_PERIOD);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let started = Instant::now();
    let mut steps = script.iter();
    let mut advances = 0;
    feed_next_step(game, &mut steps);

    while advances < max_advances {
        frames.tick().await;

        let outcome = game.tick(started.elapsed());
        match outcome {
            TickOutcome::Skipped(SkipReason::NotPlaying) => {
                log!("Game is not playing, stopping the frame loop");
                break;
            }
            TickOutcome::Skipped(_) => continue,
            TickOutcome::Advanced(_) => {}
        }

        advances += 1;
        if publish_outcome(broadcaster, game, &outcome) {
            persist_high_score(high_score_store, game.high_score());
            break;
        }
        feed_next_step(game, &mut steps);
    }

    RunSummary {
        advances,
        final_snapshot: game.snapshot(),
    }
}

pub fn persist_high_score<P: ConfigContentProvider>(
    high_score_store: &mut HighScoreStore<P>,
    high_score: u32,
) {
    if let Err(e) = high_score_store.save(high_score) {
        log_error!("Failed to save high score: {}", e);
    }
}

fn feed_next_step<'a>(game: &mut SnakeGame, steps: &mut impl Iterator<Item = &'a Option<Key>>) {
    if let Some(Some(key)) = steps.next() {
        game.enqueue_direction(*key);
    }
}
