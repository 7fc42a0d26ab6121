pub mod logger;

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod input;
pub mod persistence;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod terminal;

pub use direction::Direction;
pub use engine::{advance, CrashReason, TickEvent, TickOutcome};
pub use grid::{in_bounds, Coordinates, GRID_SIZE};
pub use session::GameSession;
pub use state::GameState;
