//! Data structures for a play session.

use crate::constants::{BIRD_START_Y, COUNTDOWN_START, WALL_WIDTH};

/// Lifecycle phase of a session, derived from [`SessionState`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started, waiting for the first impulse.
    Idle,
    /// Simulation running.
    Active,
    /// Game over, exit countdown still running.
    Over,
    /// Game over and the countdown has elapsed; exit is enabled.
    OverExitAllowed,
}

/// Mutable flags and counters for one session. Owned by the state machine;
/// the simulation clock reads the flags to decide which timers stay armed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub started: bool,
    pub game_over: bool,
    pub score: u32,
    pub countdown: u32,
    pub exit_allowed: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            started: false,
            game_over: false,
            score: 0,
            countdown: COUNTDOWN_START,
            exit_allowed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            if self.exit_allowed {
                Phase::OverExitAllowed
            } else {
                Phase::Over
            }
        } else if self.started {
            Phase::Active
        } else {
            Phase::Idle
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Bird vertical position in field pixels. Row 0 is the ceiling; the floor
/// bound is `WALL_HEIGHT - BIRD_HEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirdState {
    pub y: i32,
}

/// The single active obstacle pair: a top segment of height `gap_top` and a
/// bottom segment below the gap, sharing one horizontal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstaclePair {
    /// Left edge in field pixels. Scrolls left past `-OBJ_WIDTH`, then resets
    /// to `WALL_WIDTH`.
    pub x: i32,
    /// Height of the top obstacle segment; the gap spans
    /// `[gap_top, gap_top + OBJ_GAP)`.
    pub gap_top: i32,
}

/// Claim eligibility as reported by the rewards backend. Fetched once per
/// session; `tokens_earned` is written once when a score submission credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimStatus {
    pub has_claimed: bool,
    pub tokens_earned: u32,
}

/// Rolling in-session message log, shown at the bottom of the scene.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<String>,
}

const LOG_CAPACITY: usize = 20;

impl MessageLog {
    pub fn add_entry(&mut self, message: String) {
        self.entries.push(message);
        if self.entries.len() > LOG_CAPACITY {
            self.entries.remove(0);
        }
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// One play session: state machine flags, simulated entities, and the
/// claim bookkeeping for score reporting.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub state: SessionState,
    pub bird: BirdState,
    pub obstacle: ObstaclePair,
    /// `None` until the claim-status check resolves (or if unauthenticated).
    pub claim: Option<ClaimStatus>,
    pub log: MessageLog,
    /// Guards the once-per-session score report on entry to game over.
    score_reported: bool,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::new(),
            bird: BirdState { y: BIRD_START_Y },
            obstacle: ObstaclePair {
                x: WALL_WIDTH,
                gap_top: 0,
            },
            claim: None,
            log: MessageLog::default(),
            score_reported: false,
        }
    }

    /// Claim the right to report this session's score. Returns the final
    /// score the first time it is called after entry to game over, `None`
    /// on every later call until the session is replayed.
    pub fn begin_score_report(&mut self) -> Option<u32> {
        if !self.state.game_over || self.score_reported {
            return None;
        }
        self.score_reported = true;
        Some(self.state.score)
    }

    pub(crate) fn clear_score_report(&mut self) {
        self.score_reported = false;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
