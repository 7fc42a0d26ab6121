use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use crate::grid::{self, Coordinates, GRID_SIZE};

pub struct FoodSpawner {
    rng: StdRng,
    seed: u64,
}

impl FoodSpawner {
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

    /// Picks a random cell that is not in `occupied`, or `None` when the board is full.
    pub fn spawn(&mut self, occupied: &HashSet<Coordinates>) -> Option<Coordinates> {
        let board_size = grid::cell_count();
        if occupied.len() >= board_size {
            return None;
        }

        // if the snake covers more than 80% of the board, choose among the
        // free cells directly, else draw random cells until one is free
        if occupied.len() > (board_size * 4) / 5 {
            let empty_positions: Vec<Coordinates> =
                grid::cells().filter(|c| !occupied.contains(c)).collect();
            if empty_positions.is_empty() {
                return None;
            }
            let random_index = self.rng.random_range(0..empty_positions.len());
            return Some(empty_positions[random_index]);
        }

        loop {
            let random_x = self.rng.random_range(0..GRID_SIZE);
            let random_y = self.rng.random_range(0..GRID_SIZE);
            let position = Coordinates::new(random_x, random_y);
            if !occupied.contains(&position) {
                return Some(position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_avoids_occupied_cells() {
        let mut spawner = FoodSpawner::new(42);
        let occupied: HashSet<Coordinates> = (0..GRID_SIZE)
            .map(|x| Coordinates::new(x, 10))
            .collect();
        for _ in 0..500 {
            let food = spawner.spawn(&occupied).unwrap();
            assert!(grid::in_bounds(&food));
            assert!(!occupied.contains(&food));
        }
    }

    #[test]
    fn test_spawn_on_dense_board_finds_the_last_free_cell() {
        let mut spawner = FoodSpawner::new(7);
        let free = Coordinates::new(3, 17);
        let occupied: HashSet<Coordinates> = grid::cells().filter(|c| *c != free).collect();
        assert_eq!(spawner.spawn(&occupied), Some(free));
    }

    #[test]
    fn test_spawn_on_full_board_returns_none() {
        let mut spawner = FoodSpawner::new(7);
        let occupied: HashSet<Coordinates> = grid::cells().collect();
        assert_eq!(spawner.spawn(&occupied), None);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let occupied = HashSet::new();
        let mut a = FoodSpawner::new(1234);
        let mut b = FoodSpawner::new(1234);
        for _ in 0..20 {
            assert_eq!(a.spawn(&occupied), b.spawn(&occupied));
        }
        assert_eq!(a.seed(), 1234);
    }
}
