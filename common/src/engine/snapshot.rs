use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{Coord, Direction, GameStatus};

/// Consistent copy of everything a renderer or persistence layer reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board_width: usize,
    pub board_height: usize,
    pub snake: Vec<Coord>,
    pub previous_snake: Vec<Coord>,
    pub food: Option<Coord>,
    pub direction: Direction,
    pub status: GameStatus,
    pub is_playing: bool,
    pub speed: f64,
    pub frame_interval: Duration,
    pub execution_time: Duration,
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
}
