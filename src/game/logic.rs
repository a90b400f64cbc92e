//! Session state machine: input handling, tick mutations, and the
//! collision/scoring rules evaluated after every position update.

use super::types::GameSession;
use crate::constants::{
    BIRD_HEIGHT, BIRD_START_Y, COUNTDOWN_START, GRAVITY, HIT_WINDOW, IMPULSE, OBJ_GAP, OBJ_SPEED,
    OBJ_WIDTH, WALL_HEIGHT, WALL_WIDTH,
};
use rand::Rng;

/// Player actions fed into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Flap (Space, or a click on the play field). Starts the session from
    /// idle.
    Impulse,
    /// Start a fresh session from the game-over screen.
    Replay,
    /// Any other key.
    Other,
}

/// State transitions worth surfacing to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The obstacle pair respawned and the score incremented.
    Scored { total: u32 },
    /// The session transitioned to game over.
    Ended { final_score: u32 },
    /// The countdown elapsed; the exit action is now enabled.
    ExitUnlocked,
}

/// Process player input. An impulse from idle starts the session; while
/// active it moves the bird up by a fixed amount, clamping to the ceiling
/// when already within one bird-height of the top.
pub fn process_input(session: &mut GameSession, input: GameInput) -> Option<SessionEvent> {
    match input {
        GameInput::Impulse => {
            if session.state.game_over {
                return None;
            }
            if !session.state.started {
                session.state.started = true;
            }
            if session.bird.y < BIRD_HEIGHT {
                session.bird.y = 0;
            } else {
                session.bird.y -= IMPULSE;
            }
            // An impulse is a position update, so the collision rules run
            // against the new position immediately.
            evaluate_collision(session)
        }
        GameInput::Replay => {
            if session.state.game_over {
                replay(session);
            }
            None
        }
        GameInput::Other => None,
    }
}

/// One gravity tick: pull the bird down while it is above the floor bound,
/// end the session once the bound is reached.
pub fn gravity_tick(session: &mut GameSession) -> Option<SessionEvent> {
    if !session.state.started || session.state.game_over {
        return None;
    }

    if session.bird.y < WALL_HEIGHT - BIRD_HEIGHT {
        session.bird.y += GRAVITY;
    }
    if session.bird.y >= WALL_HEIGHT - BIRD_HEIGHT {
        return end_session(session);
    }
    None
}

/// One obstacle tick: scroll the pair left; once it has fully exited the
/// field, respawn it at the right edge with a fresh random gap and score
/// the pass.
pub fn obstacle_tick<R: Rng>(session: &mut GameSession, rng: &mut R) -> Option<SessionEvent> {
    if !session.state.started || session.state.game_over {
        return None;
    }

    if session.obstacle.x >= -OBJ_WIDTH {
        session.obstacle.x -= OBJ_SPEED;
    }
    if session.obstacle.x < -OBJ_WIDTH {
        session.obstacle.x = WALL_WIDTH;
        session.obstacle.gap_top = rng.gen_range(0..WALL_HEIGHT - OBJ_GAP);
        session.state.score += 1;
        return Some(SessionEvent::Scored {
            total: session.state.score,
        });
    }
    None
}

/// One countdown tick, running only after game over: count down to zero,
/// then unlock the exit action.
pub fn countdown_tick(session: &mut GameSession) -> Option<SessionEvent> {
    if !session.state.game_over || session.state.exit_allowed {
        return None;
    }

    if session.state.countdown > 0 {
        session.state.countdown -= 1;
    }
    if session.state.countdown == 0 {
        session.state.exit_allowed = true;
        return Some(SessionEvent::ExitUnlocked);
    }
    None
}

/// Check the bird against the obstacle pair and end the session on overlap.
///
/// The bounds are deliberately generous and must stay exactly as written:
/// the horizontal window is inclusive on both ends, the top obstacle claims
/// rows `[0, gap_top)`, and the bottom obstacle spans upward from the floor
/// by its own height plus one bird-height.
pub fn evaluate_collision(session: &mut GameSession) -> Option<SessionEvent> {
    if !session.state.started || session.state.game_over {
        return None;
    }

    let y = session.bird.y;
    let gap_top = session.obstacle.gap_top;

    let top_hit = y >= 0 && y < gap_top;
    let bottom_hit =
        y <= WALL_HEIGHT && y >= WALL_HEIGHT - (WALL_HEIGHT - OBJ_GAP - gap_top) - BIRD_HEIGHT;
    let in_window = session.obstacle.x >= OBJ_WIDTH && session.obstacle.x <= OBJ_WIDTH + HIT_WINDOW;

    if in_window && (top_hit || bottom_hit) {
        return end_session(session);
    }
    None
}

/// Transition to game over. `game_over` is monotonic within a session, so a
/// second trigger (a stale tick, or floor and pipe on the same tick) is a
/// no-op and emits nothing.
fn end_session(session: &mut GameSession) -> Option<SessionEvent> {
    if session.state.game_over {
        return None;
    }
    session.state.started = false;
    session.state.game_over = true;
    Some(SessionEvent::Ended {
        final_score: session.state.score,
    })
}

/// Reset the session for another run. Idempotent; the obstacle keeps its
/// last gap height, matching the original behavior.
pub fn replay(session: &mut GameSession) {
    session.state.started = false;
    session.state.game_over = false;
    session.state.score = 0;
    session.state.countdown = COUNTDOWN_START;
    session.state.exit_allowed = false;
    session.bird.y = BIRD_START_Y;
    session.obstacle.x = WALL_WIDTH;
    session.clear_score_report();
}
