use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Instant;

use crate::direction::Direction;
use crate::engine::{self, TickEvent};
use crate::food::FoodSpawner;
use crate::input::{ControllerEffect, InputController, Key, KeyDecoder};
use crate::log;
use crate::persistence::HighScoreStore;
use crate::scheduler::{Scheduler, SpeedPolicy};
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Idle,
    Quit,
}

/// Owns everything one game needs: the current snapshot, the buffered input,
/// the tick timer, the food RNG and the high score store.
pub struct GameSession<S: HighScoreStore> {
    state: GameState,
    controller: InputController,
    scheduler: Scheduler,
    spawner: FoodSpawner,
    store: S,
}

impl<S: HighScoreStore> GameSession<S> {
    pub fn new(store: S, mut spawner: FoodSpawner, policy: SpeedPolicy, now: Instant) -> Self {
        let high_score = store.load();
        let state = GameState::new(high_score, &mut spawner);
        let controller = InputController::new(state.direction);
        let mut scheduler = Scheduler::new(policy);
        scheduler.start(state.score, now);
        log!("New session, high score {}, food seed {}", high_score, spawner.seed());
        Self {
            state,
            controller,
            scheduler,
            spawner,
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn pending_direction(&self) -> Direction {
        self.controller.pending_direction()
    }

    pub fn handle_key(&mut self, key: Key, now: Instant) -> Flow {
        match self.controller.on_key(key, &mut self.state) {
            ControllerEffect::Quit => Flow::Quit,
            ControllerEffect::Reset => {
                self.reset(now);
                Flow::Redraw
            }
            ControllerEffect::TogglePause(paused) => {
                log!("{}", if paused { "Paused" } else { "Resumed" });
                Flow::Redraw
            }
            ControllerEffect::Turn(_) | ControllerEffect::Rejected | ControllerEffect::Ignored => Flow::Idle,
        }
    }

    /// Runs one tick with the latest buffered direction.
    pub fn handle_tick(&mut self, now: Instant) -> TickEvent {
        let previous_score = self.state.score;
        let previous_high_score = self.state.high_score;

        let outcome = engine::advance(&self.state, self.controller.pending_direction(), &mut self.spawner);
        self.state = outcome.state;
        // a skipped tick keeps whatever turn was buffered during the pause
        if outcome.event != TickEvent::Skipped {
            self.controller.reset(self.state.direction);
        }

        if self.state.high_score > previous_high_score {
            log!("New high score {}", self.state.high_score);
            self.store.store(self.state.high_score);
        }
        if self.state.is_game_over {
            // nothing moves until reset, which rearms the timer
            self.scheduler.stop();
        } else if self.state.score != previous_score {
            self.scheduler.reschedule(self.state.score, now);
            log!("Tick interval now {} ms", self.scheduler.period().as_millis());
        }
        outcome.event
    }

    /// Fires a tick if one is due.
    pub fn poll_tick(&mut self, now: Instant) -> Option<TickEvent> {
        if self.scheduler.poll(now) {
            Some(self.handle_tick(now))
        } else {
            None
        }
    }

    /// Starts a new game. The high score is the only thing carried over.
    pub fn reset(&mut self, now: Instant) {
        self.scheduler.stop();
        self.state = GameState::new(self.state.high_score, &mut self.spawner);
        self.controller.reset(self.state.direction);
        self.scheduler.start(self.state.score, now);
        log!("Game reset");
    }

    pub fn teardown(&mut self) {
        self.scheduler.stop();
        log!("Session closed with score {}, high score {}", self.state.score, self.state.high_score);
    }

    /// Event loop: waits for key bytes until the next tick is due, handles
    /// every complete key, fires the tick and hands changed snapshots to
    /// `present`. Returns on quit or when the key channel closes.
    pub fn run<F>(&mut self, keys: &Receiver<u8>, mut present: F) -> Result<(), String>
    where
        F: FnMut(&GameState) -> Result<(), String>,
    {
        let result = self.event_loop(keys, &mut present);
        self.teardown();
        result
    }

    fn event_loop<F>(&mut self, keys: &Receiver<u8>, present: &mut F) -> Result<(), String>
    where
        F: FnMut(&GameState) -> Result<(), String>,
    {
        let mut decoder = KeyDecoder::new();
        present(&self.state)?;

        loop {
            let received = match self.scheduler.time_until_next(Instant::now()) {
                Some(wait) => match keys.recv_timeout(wait) {
                    Ok(byte) => Some(byte),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                },
                None => match keys.recv() {
                    Ok(byte) => Some(byte),
                    Err(_) => break,
                },
            };

            let mut redraw = false;
            if let Some(byte) = received {
                decoder.push(byte);
                // take whatever already arrived so escape sequences come in whole
                while let Ok(byte) = keys.try_recv() {
                    decoder.push(byte);
                }
                while let Some(key) = decoder.next_key() {
                    match self.handle_key(key, Instant::now()) {
                        Flow::Quit => return Ok(()),
                        Flow::Redraw => redraw = true,
                        Flow::Idle => {}
                    }
                }
            }

            if let Some(event) = self.poll_tick(Instant::now()) {
                redraw |= event != TickEvent::Skipped;
            }
            if redraw {
                present(&self.state)?;
            }
        }

        Ok(())
    }
}
