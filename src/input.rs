// raw stdin bytes are buffered and decoded into keys; arrow keys arrive as
// 3 byte escape sequences (27, 91, 65..=68) that may be split across reads
use circular_buffer::CircularBuffer;

use crate::direction::Direction;
use crate::state::GameState;

type InputBuffer = CircularBuffer<1024, u8>; // 1024 bytes in input buffer

const ESC: u8 = 27;
const CSI: u8 = 91; // '['

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Pause,
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEffect {
    /// The pending direction now holds this direction.
    Turn(Direction),
    /// Reverse of the committed direction, pending direction left as it was.
    Rejected,
    /// Pause flag flipped, carries the new value.
    TogglePause(bool),
    Reset,
    Quit,
    /// Key has no meaning in the current state.
    Ignored,
}

pub struct KeyDecoder {
    input_buffer: InputBuffer,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self {
            input_buffer: InputBuffer::new(),
        }
    }

    pub fn push(&mut self, byte: u8) {
        if !is_relevant(byte) {
            return;
        }
        // if the buffer is full, ignore the input
        if self.input_buffer.is_full() {
            return;
        }
        self.input_buffer.push_back(byte);
    }

    /// Next complete key in the buffer. Returns `None` when the buffer is empty
    /// or ends in an unfinished escape sequence.
    pub fn next_key(&mut self) -> Option<Key> {
        while let Some(&first) = self.input_buffer.front() {
            if first == ESC {
                match self.input_buffer.nth_front(1).copied() {
                    None => return None,
                    Some(CSI) => {}
                    Some(_) => {
                        // lone escape, drop it
                        self.input_buffer.pop_front();
                        continue;
                    }
                }
                let third = self.input_buffer.nth_front(2).copied()?;
                let direction = match third {
                    65 => Some(Direction::Up),
                    66 => Some(Direction::Down),
                    67 => Some(Direction::Right),
                    68 => Some(Direction::Left),
                    _ => None,
                };
                if let Some(direction) = direction {
                    self.input_buffer.pop_front();
                    self.input_buffer.pop_front();
                    self.input_buffer.pop_front();
                    return Some(Key::Move(direction));
                }
                // not an arrow, skip the escape and rescan
                self.input_buffer.pop_front();
                continue;
            }

            self.input_buffer.pop_front();
            if let Some(key) = decode_plain(first) {
                return Some(key);
            }
        }
        None
    }

    pub fn pending_bytes(&self) -> usize {
        self.input_buffer.len()
    }
}

fn is_relevant(byte: u8) -> bool {
    matches!(byte, ESC | CSI | 65..=68) || decode_plain(byte).is_some()
}

fn decode_plain(byte: u8) -> Option<Key> {
    match byte {
        b'w' | b'W' => Some(Key::Move(Direction::Up)),
        b's' | b'S' => Some(Key::Move(Direction::Down)),
        b'a' | b'A' => Some(Key::Move(Direction::Left)),
        b'd' | b'D' => Some(Key::Move(Direction::Right)),
        b' ' => Some(Key::Pause),
        b'r' | b'R' => Some(Key::Reset),
        b'q' | b'Q' => Some(Key::Quit),
        _ => None,
    }
}

/// Buffers the direction the player asked for until the next tick consumes it.
pub struct InputController {
    pending_direction: Direction,
}

impl InputController {
    pub fn new(direction: Direction) -> Self {
        Self {
            pending_direction: direction,
        }
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn reset(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    pub fn on_key(&mut self, key: Key, state: &mut GameState) -> ControllerEffect {
        match key {
            Key::Quit => ControllerEffect::Quit,
            Key::Reset => ControllerEffect::Reset,
            _ if state.is_game_over => ControllerEffect::Ignored,
            Key::Pause => {
                state.is_paused = !state.is_paused;
                ControllerEffect::TogglePause(state.is_paused)
            }
            Key::Move(direction) => {
                if direction.is_opposite(&state.direction) {
                    ControllerEffect::Rejected
                } else {
                    self.pending_direction = direction;
                    ControllerEffect::Turn(direction)
                }
            }
        }
    }
}
