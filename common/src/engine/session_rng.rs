use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::board::Board;
use super::types::{Coord, Direction};

/// Seedable randomness owned by one game; a fixed seed replays the same spawns.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn random_coord(&mut self, board: &Board) -> Coord {
        let x = self.rng.random_range(0..board.width);
        let y = self.rng.random_range(0..board.height);
        Coord::new(x, y)
    }

    pub fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.random_range(0..Direction::ALL.len())]
    }
}
