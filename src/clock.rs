//! Simulation clock: three independent repeating timers driving the session.
//!
//! Each timer is a scoped handle that is armed only while its activation
//! predicate holds and disarmed on every exit path, so a session that has
//! ended can never be mutated by a stale tick. Tick callbacks in
//! [`crate::game::logic`] re-check the session state as a second line of
//! defense.

use crate::constants::{COUNTDOWN_TICK_MS, GRAVITY_TICK_MS, OBSTACLE_TICK_MS};
use crate::game::logic::{
    countdown_tick, evaluate_collision, gravity_tick, obstacle_tick, SessionEvent,
};
use crate::game::types::GameSession;
use rand::Rng;
use std::time::{Duration, Instant};

/// A repeating deadline. `None` means disarmed: polling never fires and
/// elapsed wall time is not accumulated.
#[derive(Debug, Clone, Copy)]
pub struct TickTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period: Duration::from_millis(period_ms),
            next_due: None,
        }
    }

    pub fn armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedule the first tick one period from `now`. No-op if already armed.
    pub fn arm(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Consume one due tick, if any, advancing the deadline by one period.
    /// Multiple elapsed periods yield multiple `true` polls.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}

/// Owns the gravity, obstacle, and countdown timers and applies their due
/// ticks to a session.
#[derive(Debug)]
pub struct SimulationClock {
    gravity: TickTimer,
    obstacle: TickTimer,
    countdown: TickTimer,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            gravity: TickTimer::new(GRAVITY_TICK_MS),
            obstacle: TickTimer::new(OBSTACLE_TICK_MS),
            countdown: TickTimer::new(COUNTDOWN_TICK_MS),
        }
    }

    /// Arm or disarm each timer from the session's current flags. Called
    /// before ticking and again after every fired tick, so a terminate
    /// transition disarms the simulation timers before any further tick of
    /// the same batch can run.
    fn sync(&mut self, session: &GameSession, now: Instant) {
        let simulating = session.state.started && !session.state.game_over;
        if simulating {
            self.gravity.arm(now);
            self.obstacle.arm(now);
        } else {
            self.gravity.disarm();
            self.obstacle.disarm();
        }

        let counting_down = session.state.game_over && !session.state.exit_allowed;
        if counting_down {
            self.countdown.arm(now);
        } else {
            self.countdown.disarm();
        }
    }

    /// Apply all ticks due at `now`, evaluating collision after every
    /// position update. Returns the state transitions that occurred.
    pub fn advance<R: Rng>(
        &mut self,
        session: &mut GameSession,
        now: Instant,
        rng: &mut R,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.sync(session, now);

        loop {
            let mut fired = false;

            if self.gravity.poll(now) {
                fired = true;
                events.extend(gravity_tick(session));
                events.extend(evaluate_collision(session));
                self.sync(session, now);
            }

            if self.obstacle.poll(now) {
                fired = true;
                events.extend(obstacle_tick(session, rng));
                events.extend(evaluate_collision(session));
                self.sync(session, now);
            }

            if self.countdown.poll(now) {
                fired = true;
                events.extend(countdown_tick(session));
                self.sync(session, now);
            }

            if !fired {
                break;
            }
        }

        events
    }

    /// Unconditionally disarm everything. Called on session teardown.
    pub fn halt(&mut self) {
        self.gravity.disarm();
        self.obstacle.disarm();
        self.countdown.disarm();
    }

    pub fn gravity_armed(&self) -> bool {
        self.gravity.armed()
    }

    pub fn obstacle_armed(&self) -> bool {
        self.obstacle.armed()
    }

    pub fn countdown_armed(&self) -> bool {
        self.countdown.armed()
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}
