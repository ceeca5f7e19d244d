//! Level-based terminal mini-games.
//!
//! The game logic (`games`, `levels`) is free of I/O: it takes the current
//! time and a [`random::RandomSource`] explicitly. `screens` and `terminal`
//! drive it from a crossterm event loop.

pub mod config;
pub mod error;
pub mod games;
pub mod levels;
pub mod logging;
pub mod random;
pub mod screens;
pub mod terminal;
pub mod timer;
