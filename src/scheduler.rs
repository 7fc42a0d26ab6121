// the tick timer is a deadline owned by the session loop: the loop sleeps
// until the deadline, fires one tick and arms the next deadline
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedPolicy {
    pub base_interval_ms: u64,
    pub min_interval_ms: u64,
    pub interval_step_ms: u64,
    pub points_per_step: u32,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self {
            base_interval_ms: 150,
            min_interval_ms: 70,
            interval_step_ms: 10,
            points_per_step: 50,
        }
    }
}

impl SpeedPolicy {
    /// Tick period for `score`: one step faster every `points_per_step`
    /// points, never below `min_interval_ms`.
    pub fn interval_for(&self, score: u32) -> Duration {
        let steps = (score / self.points_per_step.max(1)) as u64;
        let speedup = steps.saturating_mul(self.interval_step_ms);
        let raw = self.base_interval_ms.saturating_sub(speedup);
        Duration::from_millis(num::clamp(raw, self.min_interval_ms, self.base_interval_ms))
    }
}

pub struct Scheduler {
    policy: SpeedPolicy,
    period: Duration,
    next_fire: Option<Instant>,
}

impl Scheduler {
    pub fn new(policy: SpeedPolicy) -> Self {
        Self {
            period: policy.interval_for(0),
            policy,
            next_fire: None,
        }
    }

    pub fn start(&mut self, score: u32, now: Instant) {
        self.period = self.policy.interval_for(score);
        self.next_fire = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    /// Recomputes the period for a new score and rearms the timer from `now`.
    pub fn reschedule(&mut self, score: u32, now: Instant) {
        self.stop();
        self.start(score, now);
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// How long the loop may wait for input before the next tick is due.
    /// `None` when the timer is stopped.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_fire
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns true if a tick is due. A late tick fires once and the next
    /// deadline is measured from `now`, missed periods are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_fire {
            Some(deadline) if now >= deadline => {
                self.next_fire = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}
