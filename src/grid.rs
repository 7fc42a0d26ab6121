// the board is a fixed GRID_SIZE x GRID_SIZE square, (0,0) is the top left cell
use crate::direction::Direction;

pub const GRID_SIZE: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub const fn new(x: i32, y: i32) -> Coordinates {
        Coordinates { x, y }
    }

    pub fn get_left(&self) -> Coordinates {
        Coordinates::new(self.x - 1, self.y)
    }
    pub fn get_right(&self) -> Coordinates {
        Coordinates::new(self.x + 1, self.y)
    }
    pub fn get_up(&self) -> Coordinates {
        Coordinates::new(self.x, self.y - 1)
    }
    pub fn get_down(&self) -> Coordinates {
        Coordinates::new(self.x, self.y + 1)
    }

    /// The neighbouring cell one step away in `direction`. May be off the grid.
    pub fn step(&self, direction: Direction) -> Coordinates {
        match direction {
            Direction::Up => self.get_up(),
            Direction::Down => self.get_down(),
            Direction::Left => self.get_left(),
            Direction::Right => self.get_right(),
        }
    }
}

pub fn in_bounds(position: &Coordinates) -> bool {
    position.x >= 0 && position.x < GRID_SIZE && position.y >= 0 && position.y < GRID_SIZE
}

/// Every cell of the board, row by row.
pub fn cells() -> impl Iterator<Item = Coordinates> {
    (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Coordinates::new(x, y)))
}

pub fn cell_count() -> usize {
    (GRID_SIZE * GRID_SIZE) as usize
}
