//! The Flappy Bird play session.
//!
//! A session is a single run of the game: the bird falls under gravity each
//! tick, one obstacle pair scrolls across the field, and passing it scores a
//! point. Hitting an obstacle or the floor ends the session and starts the
//! exit countdown.

pub mod logic;
pub mod types;
