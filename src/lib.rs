//! Flappy Rewards - Terminal Flappy Bird with a rewards backend
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod backend;
pub mod build_info;
pub mod clock;
pub mod constants;
pub mod game;
pub mod reporter;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;
