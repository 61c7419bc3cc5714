use super::types::{Coord, Direction};

/// Fixed-size toroidal grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }

    /// Moves `coord` by `steps` cells. Leaving the board on one side lands on the
    /// outermost cell of the opposite side.
    pub fn wrap(&self, coord: Coord, direction: Direction, steps: usize) -> Coord {
        match direction {
            Direction::Up => Coord::new(coord.x, wrapping_dec(coord.y, steps, self.height)),
            Direction::Down => Coord::new(coord.x, wrapping_inc(coord.y, steps, self.height)),
            Direction::Left => Coord::new(wrapping_dec(coord.x, steps, self.width), coord.y),
            Direction::Right => Coord::new(wrapping_inc(coord.x, steps, self.width), coord.y),
        }
    }
}

fn wrapping_inc(value: usize, steps: usize, max: usize) -> usize {
    if steps >= max.saturating_sub(value) {
        0
    } else {
        value + steps
    }
}

fn wrapping_dec(value: usize, steps: usize, max: usize) -> usize {
    if steps > value {
        max - 1
    } else {
        value - steps
    }
}
