// one tick moves the snake by one cell: the head is pushed in front, the tail
// is popped unless food was eaten this tick
use crate::direction::Direction;
use crate::food::FoodSpawner;
use crate::grid;
use crate::log;
use crate::state::{GameState, FOOD_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashReason {
    Wall,
    SelfBite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Paused or already over, nothing changed.
    Skipped,
    Moved,
    Ate,
    /// Food was eaten and no free cell is left for the next one.
    BoardFilled,
    Crashed(CrashReason),
}

#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: GameState,
    pub event: TickEvent,
}

/// Resolves the direction the snake will travel this tick. A request for the
/// exact reverse of the current heading is ignored.
pub fn resolve_direction(current: Direction, pending: Direction) -> Direction {
    if pending.is_opposite(&current) {
        current
    } else {
        pending
    }
}

/// Advances `state` by one tick and returns the next snapshot.
///
/// Collisions are checked against the body before the tail moves, so the cell
/// the tail is about to leave still counts as occupied.
pub fn advance(state: &GameState, pending: Direction, spawner: &mut FoodSpawner) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome {
            state: state.clone(),
            event: TickEvent::Skipped,
        };
    }

    let direction = resolve_direction(state.direction, pending);
    let new_head = state.head().step(direction);

    if !grid::in_bounds(&new_head) {
        return crashed(state, CrashReason::Wall);
    }
    if state.occupies(&new_head) {
        return crashed(state, CrashReason::SelfBite);
    }

    let mut next = state.clone();
    next.direction = direction;
    next.snake.push_front(new_head);

    if new_head != state.food {
        next.snake.pop_back();
        return TickOutcome {
            state: next,
            event: TickEvent::Moved,
        };
    }

    next.score += FOOD_SCORE;
    if next.score > next.high_score {
        next.high_score = next.score;
    }

    let event = match spawner.spawn(&next.occupancy()) {
        Some(food) => {
            log!("Food eaten at ({}, {}), score {}, next food at ({}, {})",
                new_head.x, new_head.y, next.score, food.x, food.y);
            next.food = food;
            TickEvent::Ate
        }
        None => {
            log!("Board filled with score {}", next.score);
            next.is_game_over = true;
            TickEvent::BoardFilled
        }
    };

    TickOutcome { state: next, event }
}

fn crashed(state: &GameState, reason: CrashReason) -> TickOutcome {
    log!("Crashed into {:?} at ({}, {}) with score {}",
        reason, state.head().x, state.head().y, state.score);
    let mut next = state.clone();
    next.is_game_over = true;
    TickOutcome {
        state: next,
        event: TickEvent::Crashed(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Coordinates, GRID_SIZE};
    use crate::state::INITIAL_SNAKE;

    fn snake_of(state: &GameState) -> Vec<Coordinates> {
        state.snake.iter().copied().collect()
    }

    fn initial_with_food(food: Coordinates) -> GameState {
        GameState::with_snake(INITIAL_SNAKE, Direction::Up, food, 0)
    }

    #[test]
    fn test_move_keeps_length() {
        let mut spawner = FoodSpawner::new(42);
        let state = initial_with_food(Coordinates::new(0, 0));
        let outcome = advance(&state, Direction::Up, &mut spawner);
        assert_eq!(outcome.event, TickEvent::Moved);
        assert_eq!(
            snake_of(&outcome.state),
            vec![Coordinates::new(10, 9), Coordinates::new(10, 10), Coordinates::new(10, 11)]
        );
        assert_eq!(outcome.state.score, 0);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut spawner = FoodSpawner::new(42);
        let state = initial_with_food(Coordinates::new(10, 9));
        let outcome = advance(&state, Direction::Up, &mut spawner);
        assert_eq!(outcome.event, TickEvent::Ate);
        assert_eq!(
            snake_of(&outcome.state),
            vec![
                Coordinates::new(10, 9),
                Coordinates::new(10, 10),
                Coordinates::new(10, 11),
                Coordinates::new(10, 12),
            ]
        );
        assert_eq!(outcome.state.score, 10);
        assert_eq!(outcome.state.high_score, 10);
        assert!(!outcome.state.occupies(&outcome.state.food));
    }

    #[test]
    fn test_high_score_not_lowered() {
        let mut spawner = FoodSpawner::new(42);
        let mut state = initial_with_food(Coordinates::new(10, 9));
        state.high_score = 500;
        let outcome = advance(&state, Direction::Up, &mut spawner);
        assert_eq!(outcome.state.score, 10);
        assert_eq!(outcome.state.high_score, 500);
    }

    #[test]
    fn test_reverse_request_is_ignored() {
        let mut spawner = FoodSpawner::new(42);
        let state = initial_with_food(Coordinates::new(0, 0));
        let outcome = advance(&state, Direction::Down, &mut spawner);
        assert_eq!(outcome.event, TickEvent::Moved);
        assert_eq!(outcome.state.direction, Direction::Up);
        assert_eq!(outcome.state.head(), Coordinates::new(10, 9));
    }

    #[test]
    fn test_turn_is_committed() {
        let mut spawner = FoodSpawner::new(42);
        let state = initial_with_food(Coordinates::new(0, 0));
        let outcome = advance(&state, Direction::Left, &mut spawner);
        assert_eq!(outcome.state.direction, Direction::Left);
        assert_eq!(outcome.state.head(), Coordinates::new(9, 10));
    }

    #[test]
    fn test_wall_crash_freezes_snake() {
        let mut spawner = FoodSpawner::new(42);
        let state = GameState::with_snake(
            [Coordinates::new(0, 5), Coordinates::new(1, 5), Coordinates::new(2, 5)],
            Direction::Left,
            Coordinates::new(10, 10),
            0,
        );
        let outcome = advance(&state, Direction::Left, &mut spawner);
        assert_eq!(outcome.event, TickEvent::Crashed(CrashReason::Wall));
        assert!(outcome.state.is_game_over);
        assert_eq!(outcome.state.snake, state.snake);
    }

    #[test]
    fn test_bottom_wall_crash() {
        let mut spawner = FoodSpawner::new(42);
        let state = GameState::with_snake(
            [Coordinates::new(4, GRID_SIZE - 1), Coordinates::new(4, GRID_SIZE - 2)],
            Direction::Down,
            Coordinates::new(10, 10),
            0,
        );
        let outcome = advance(&state, Direction::Down, &mut spawner);
        assert_eq!(outcome.event, TickEvent::Crashed(CrashReason::Wall));
    }

    #[test]
    fn test_self_bite() {
        let mut spawner = FoodSpawner::new(42);
        // head at (5,5) moving up, turning right into (6,5) which is body
        let state = GameState::with_snake(
            [
                Coordinates::new(5, 5),
                Coordinates::new(5, 6),
                Coordinates::new(6, 6),
                Coordinates::new(6, 5),
                Coordinates::new(6, 4),
            ],
            Direction::Up,
            Coordinates::new(10, 10),
            0,
        );
        let outcome = advance(&state, Direction::Right, &mut spawner);
        assert_eq!(outcome.event, TickEvent::Crashed(CrashReason::SelfBite));
        assert!(outcome.state.is_game_over);
        assert_eq!(outcome.state.snake, state.snake);
    }

    #[test]
    fn test_moving_into_current_tail_is_a_collision() {
        let mut spawner = FoodSpawner::new(42);
        // a 2x2 loop: the head's right neighbour is the tail
        let state = GameState::with_snake(
            [
                Coordinates::new(5, 5),
                Coordinates::new(5, 6),
                Coordinates::new(6, 6),
                Coordinates::new(6, 5),
            ],
            Direction::Up,
            Coordinates::new(10, 10),
            0,
        );
        let outcome = advance(&state, Direction::Right, &mut spawner);
        assert_eq!(outcome.event, TickEvent::Crashed(CrashReason::SelfBite));
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut spawner = FoodSpawner::new(42);
        let mut state = initial_with_food(Coordinates::new(10, 9));
        state.is_game_over = true;
        for direction in [Direction::Up, Direction::Left, Direction::Right] {
            let outcome = advance(&state, direction, &mut spawner);
            assert_eq!(outcome.event, TickEvent::Skipped);
            assert_eq!(outcome.state, state);
        }
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let mut spawner = FoodSpawner::new(42);
        let mut state = initial_with_food(Coordinates::new(10, 9));
        state.is_paused = true;
        let outcome = advance(&state, Direction::Up, &mut spawner);
        assert_eq!(outcome.event, TickEvent::Skipped);
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn test_filling_the_board_ends_the_game() {
        let mut spawner = FoodSpawner::new(42);
        // snake snakes through every cell except (0,0) which holds the food
        let mut body: Vec<Coordinates> = Vec::new();
        for y in 0..GRID_SIZE {
            let row: Vec<i32> = if y % 2 == 0 {
                (0..GRID_SIZE).collect()
            } else {
                (0..GRID_SIZE).rev().collect()
            };
            for x in row {
                body.push(Coordinates::new(x, y));
            }
        }
        body.remove(0);
        // head must be next to (0,0): (1,0) is the first remaining cell
        let state = GameState::with_snake(body, Direction::Left, Coordinates::new(0, 0), 0);
        let outcome = advance(&state, Direction::Left, &mut spawner);
        assert_eq!(outcome.event, TickEvent::BoardFilled);
        assert!(outcome.state.is_game_over);
        assert_eq!(outcome.state.len(), grid::cell_count());
    }

    #[test]
    fn test_resolve_direction() {
        assert_eq!(resolve_direction(Direction::Up, Direction::Down), Direction::Up);
        assert_eq!(resolve_direction(Direction::Up, Direction::Left), Direction::Left);
        assert_eq!(resolve_direction(Direction::Left, Direction::Left), Direction::Left);
    }
}
