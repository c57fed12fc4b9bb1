//! Maze Out, a terminal maze game.
//!
//! The player walks a character through a grid of walls and open paths until reaching an exit, and
//! the time taken is reported at the end. The library exposes the game core:
//!
//! - [`maze`] holds the grid, the player's position and the session timing;
//! - [`file_loader`] turns level files into a [`GameState`](maze::GameState);
//! - [`movement`] validates and applies moves and detects the win.
//!
//! The terminal front end ([`App`]) renders with Ratatui and reads input through Crossterm.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod config;
mod events;
pub mod file_loader;
pub mod logging;
pub mod maze;
pub mod movement;
mod types;
mod ui;

pub use app::App;
pub use config::{Config, InvalidLevel, Level};
