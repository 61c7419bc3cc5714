use std::collections::HashSet;

use super::board::Board;
use super::session_rng::SessionRng;
use super::snake::Snake;
use super::types::Coord;

const MAX_REJECTED_DRAWS: usize = 64;

/// Picks a uniformly random cell not covered by `snake`, or `None` on a full board.
///
/// Draws blindly first; on a crowded board it falls back to choosing among the
/// enumerated free cells, which keeps the distribution uniform and bounds the work.
pub fn place_food(snake: &Snake, board: &Board, rng: &mut SessionRng) -> Option<Coord> {
    for _ in 0..MAX_REJECTED_DRAWS {
        let pos = rng.random_coord(board);
        if !snake.contains(pos) {
            return Some(pos);
        }
    }

    let occupied: HashSet<Coord> = snake.body().iter().copied().collect();
    let free: Vec<Coord> = board.cells().filter(|c| !occupied.contains(c)).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}
