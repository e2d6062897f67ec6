//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (owned by `GameState`)
//! - Sanitized, caller-supplied delta time
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, first_collision, player_hits_asteroid};
pub use motion::{clamp_player, move_player, normalize_diagonal, sanitize_dt, update_asteroids};
pub use spawn::{difficulty_factor, random_asteroid, spawn_asteroid, spawn_interval, update_spawner};
pub use state::{Asteroid, GameEvent, GamePhase, GameState, Player, SimClock};
pub use tick::{TickInput, tick};
