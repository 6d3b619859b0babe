//! Core game logic for gridsnake: grid geometry, the snake state machine,
//! food placement and the tick-driven game session. Everything here is
//! plain state plus deterministic transitions; the terminal front end in
//! the binary reads snapshots and feeds direction changes and ticks.

pub mod config;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

pub use config::{ConfigError, GameConfig};
pub use grid::{Cell, Grid};
pub use session::{GameEvent, GameSession, Phase, Snapshot};
pub use snake::{Direction, Snake};
