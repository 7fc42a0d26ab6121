// draws a frame from a game snapshot; every cell is two columns wide so the
// board looks square in most terminal fonts
use colored::Colorize;
use std::fmt::Write;

use crate::grid::{Coordinates, GRID_SIZE};
use crate::state::GameState;

pub const HEAD_GLYPH: &str = "Ӫ ";
pub const BODY_GLYPH: &str = "⏺ ";
pub const FOOD_GLYPH: &str = "♦ ";
pub const CRASH_GLYPH: &str = "✖ ";
const EMPTY_CELL: &str = "  ";

pub struct RenderOptions {
    pub show_legend: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { show_legend: true }
    }
}

pub fn render_frame(state: &GameState, options: &RenderOptions) -> String {
    let mut frame = String::new();
    render_header(state, &mut frame);
    render_board(state, &mut frame);
    render_status(state, &mut frame);
    if options.show_legend {
        render_legend(&mut frame);
    }
    frame
}

fn render_header(state: &GameState, frame: &mut String) {
    let title = "SNAKE.PRO";
    let best = format!("Best: {}", state.high_score);
    let score = format!("Score: {}", state.score);
    // board width in columns including both borders
    let width = (GRID_SIZE as usize) * 2 + 2;
    let gap = width.saturating_sub(title.len() + best.len() + score.len() + 3);
    let _ = writeln!(
        frame,
        "{}  {}{}{}",
        title.green().bold(),
        best.yellow(),
        " ".repeat(gap + 1),
        score.bold()
    );
}

fn render_board(state: &GameState, frame: &mut String) {
    //border up
    frame.push('▗');
    for _ in 0..GRID_SIZE {
        frame.push_str("▄▄");
    }
    frame.push_str("▖\n");
    for y in 0..GRID_SIZE {
        //border left
        frame.push('▐');
        for x in 0..GRID_SIZE {
            frame.push_str(&render_cell(state, Coordinates::new(x, y)));
        }
        //border right
        frame.push_str("▌\n");
    }
    //border down
    frame.push('▝');
    for _ in 0..GRID_SIZE {
        frame.push_str("▀▀");
    }
    frame.push_str("▘\n");
}

fn render_cell(state: &GameState, position: Coordinates) -> String {
    if position == state.head() {
        if state.is_game_over {
            return CRASH_GLYPH.red().bold().to_string();
        }
        return HEAD_GLYPH.yellow().to_string();
    }
    if state.occupies(&position) {
        return BODY_GLYPH.green().to_string();
    }
    if position == state.food {
        return FOOD_GLYPH.red().to_string();
    }
    EMPTY_CELL.to_string()
}

fn render_status(state: &GameState, frame: &mut String) {
    if state.is_game_over {
        let _ = writeln!(frame, "{}", "CRASHED!".red().bold());
        let _ = writeln!(frame, "Final Score: {}", state.score);
        let _ = writeln!(frame, "Press R to try again");
    } else if state.is_paused {
        let _ = writeln!(frame, "{}", "PAUSED".yellow().bold());
        let _ = writeln!(frame, "Press SPACE to resume");
    }
}

fn render_legend(frame: &mut String) {
    let _ = writeln!(
        frame,
        "{}",
        "Arrows/WASD move  SPACE pause  R restart  Q quit".dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::state::INITIAL_SNAKE;

    fn sample_state() -> GameState {
        let mut state = GameState::with_snake(INITIAL_SNAKE, Direction::Up, Coordinates::new(5, 5), 90);
        state.score = 30;
        state
    }

    #[test]
    fn test_frame_shows_scores_and_board() {
        let frame = render_frame(&sample_state(), &RenderOptions::default());
        assert!(frame.contains("Score: 30"));
        assert!(frame.contains("Best: 90"));
        assert_eq!(frame.matches(HEAD_GLYPH).count(), 1);
        assert_eq!(frame.matches(BODY_GLYPH).count(), 2);
        assert_eq!(frame.matches(FOOD_GLYPH).count(), 1);
        assert_eq!(frame.matches('▐').count(), GRID_SIZE as usize);
        assert!(frame.contains("Q quit"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = sample_state();
        state.is_paused = true;
        let frame = render_frame(&state, &RenderOptions::default());
        assert!(frame.contains("PAUSED"));
        assert!(!frame.contains("CRASHED!"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = sample_state();
        state.is_game_over = true;
        let frame = render_frame(&state, &RenderOptions { show_legend: false });
        assert!(frame.contains("CRASHED!"));
        assert!(frame.contains("Final Score: 30"));
        assert!(frame.contains(CRASH_GLYPH));
        assert!(!frame.contains(HEAD_GLYPH));
        assert!(!frame.contains("Q quit"));
    }
}
