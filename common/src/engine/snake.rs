use std::collections::VecDeque;

use super::board::Board;
use super::types::{Coord, Direction, Key};

/// Raw keys translated into direction commitments per advance.
pub const MAX_KEYS_PER_ADVANCE: usize = 2;

/// Snake body plus its input pipeline.
///
/// `pending_keys` holds raw input in arrival order. `directions` holds accepted
/// commitments: the front is the direction of the current move, the back is the
/// most recent turn. Neither `body` nor `directions` is ever empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Coord>,
    directions: VecDeque<Direction>,
    pending_keys: VecDeque<Key>,
}

impl Snake {
    pub fn new(start_pos: Coord, direction: Direction) -> Self {
        Self::from_body(vec![start_pos], direction)
    }

    /// Builds a snake from explicit cells, head first.
    pub fn from_body(body: Vec<Coord>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "Snake body should never be empty");
        Self {
            body: body.into(),
            directions: VecDeque::from([direction]),
            pending_keys: VecDeque::new(),
        }
    }

    pub fn head(&self) -> Coord {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn body(&self) -> &VecDeque<Coord> {
        &self.body
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.body.contains(&coord)
    }

    /// Direction the next move uses when no further turn is queued.
    pub fn direction(&self) -> Direction {
        *self
            .directions
            .front()
            .expect("Snake always has a committed direction")
    }

    pub fn last_committed(&self) -> Direction {
        *self
            .directions
            .back()
            .expect("Snake always has a committed direction")
    }

    pub fn pending_keys(&self) -> usize {
        self.pending_keys.len()
    }

    pub fn queued_turns(&self) -> usize {
        self.directions.len() - 1
    }

    pub fn enqueue_key(&mut self, key: Key) {
        self.pending_keys.push_back(key);
    }

    /// Accepts `direction` as the newest commitment unless it lies on the axis of
    /// the previous one. Reversals would fold the snake onto itself, repeats add nothing.
    pub fn commit(&mut self, direction: Direction) -> bool {
        if direction.is_same_axis(&self.last_committed()) {
            return false;
        }
        self.directions.push_back(direction);
        true
    }

    /// Translates at most `MAX_KEYS_PER_ADVANCE` raw keys; rejected keys count too.
    /// Returns the number of accepted commitments.
    pub fn drain_keys(&mut self) -> usize {
        let mut accepted = 0;
        for _ in 0..MAX_KEYS_PER_ADVANCE {
            let Some(key) = self.pending_keys.pop_front() else {
                break;
            };
            if self.commit(Direction::from(key)) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Consumes the oldest commitment when a newer one is waiting, so each
    /// move absorbs at most one turn.
    pub fn next_direction(&mut self) -> Direction {
        if self.directions.len() > 1
            && let Some(direction) = self.directions.pop_front()
        {
            return direction;
        }
        self.direction()
    }

    /// Drains input, picks this move's direction and pushes the new head.
    /// The tail is left in place; call `drop_tail` unless the snake grows.
    pub fn step(&mut self, board: &Board) -> Coord {
        self.drain_keys();
        let direction = self.next_direction();
        let next_head = board.wrap(self.head(), direction, 1);
        self.body.push_front(next_head);
        next_head
    }

    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }
}
