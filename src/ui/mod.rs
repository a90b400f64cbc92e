//! Terminal rendering. Not exposed from the library; the scene is tightly
//! coupled to the binary's event loop.

pub mod game_scene;
