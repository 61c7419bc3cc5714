//! Snake simulation: wraparound board, queued input, food, win/loss and
//! speed-dependent tick throttling. Rendering, input capture and storage live in the host.

mod board;
mod broadcaster;
mod error;
mod food;
mod game;
mod rules;
mod session_rng;
mod settings;
mod snake;
mod snapshot;
mod throttle;
mod types;

pub use board::Board;
pub use broadcaster::{GameBroadcaster, publish_outcome};
pub use error::EngineError;
pub use food::place_food;
pub use game::{AdvanceReport, INITIAL_SPEED, SnakeGame, TickOutcome};
pub use rules::{check_game_over, check_win};
pub use session_rng::SessionRng;
pub use settings::{DEFAULT_CONFIG_FILE, EngineSettings};
pub use snake::{MAX_KEYS_PER_ADVANCE, Snake};
pub use snapshot::GameSnapshot;
pub use throttle::{SkipReason, Throttle};
pub use types::{Coord, Direction, GameStatus, Key};
