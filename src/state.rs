use std::collections::{HashSet, VecDeque};

use crate::direction::Direction;
use crate::food::FoodSpawner;
use crate::grid::Coordinates;

pub const INITIAL_SNAKE: [Coordinates; 3] = [
    Coordinates::new(10, 10),
    Coordinates::new(10, 11),
    Coordinates::new(10, 12),
];
pub const INITIAL_DIRECTION: Direction = Direction::Up;
pub const FOOD_SCORE: u32 = 10;

/// Snapshot of a running game. The head is the first element of `snake`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: VecDeque<Coordinates>,
    pub food: Coordinates,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub is_game_over: bool,
    pub is_paused: bool,
}

impl GameState {
    /// Fresh game with the starting snake and food placed by `spawner`.
    /// The high score is carried over from whoever owns the previous game.
    pub fn new(high_score: u32, spawner: &mut FoodSpawner) -> Self {
        let snake: VecDeque<Coordinates> = INITIAL_SNAKE.iter().copied().collect();
        let occupied: HashSet<Coordinates> = snake.iter().copied().collect();
        // the starting snake covers three cells, a free one always exists
        let food = spawner
            .spawn(&occupied)
            .unwrap_or(Coordinates::new(5, 5));
        Self::with_snake(snake, INITIAL_DIRECTION, food, high_score)
    }

    pub fn with_snake(
        snake: impl IntoIterator<Item = Coordinates>,
        direction: Direction,
        food: Coordinates,
        high_score: u32,
    ) -> Self {
        Self {
            snake: snake.into_iter().collect(),
            food,
            direction,
            score: 0,
            high_score,
            is_game_over: false,
            is_paused: false,
        }
    }

    pub fn head(&self) -> Coordinates {
        *self.snake.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Coordinates {
        *self.snake.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn occupies(&self, position: &Coordinates) -> bool {
        self.snake.iter().any(|segment| segment == position)
    }

    pub fn occupancy(&self) -> HashSet<Coordinates> {
        self.snake.iter().copied().collect()
    }

    pub fn is_running(&self) -> bool {
        !self.is_game_over && !self.is_paused
    }
}
