//! Asteroid Runner - An arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, game state)
//! - `input`: Keyboard/joystick input snapshot read once per tick
//! - `render`: Render sink trait and fixed draw order
//! - `hud`: Score and message sink
//! - `game_loop`: Frame clock and loop runner with start/stop semantics
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Dodging pilot for headless runs

pub mod autopilot;
pub mod game_loop;
pub mod hud;
pub mod input;
pub mod render;
pub mod sim;
pub mod tuning;

pub use game_loop::{FrameClock, GameLoop, LoopControl};
pub use input::InputState;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_W: f32 = 480.0;
    pub const CANVAS_H: f32 = 720.0;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 220.0; // units/s
    /// Spawn height above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 100.0;
    /// Hitbox radius as a fraction of size (slightly forgiving)
    pub const PLAYER_HIT_RADIUS: f32 = 0.45;

    /// Asteroids
    pub const ASTEROID_MIN_SIZE: f32 = 20.0;
    pub const ASTEROID_MAX_SIZE: f32 = 60.0;
    pub const ASTEROID_MIN_SPEED: f32 = 120.0;
    pub const ASTEROID_MAX_SPEED: f32 = 260.0;
    pub const ASTEROID_HIT_RADIUS: f32 = 0.5;
    /// Cosmetic spin range, rad/s (symmetric)
    pub const ASTEROID_MAX_SPIN: f32 = 2.0;
    /// Distance past the bottom edge before an asteroid is culled
    pub const OFFSCREEN_MARGIN: f32 = 60.0;

    /// Spawn interval ramp (seconds)
    pub const SPAWN_INTERVAL_START: f32 = 0.9;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.25;
    /// Survival time at which difficulty stops ramping
    pub const DIFFICULTY_RAMP_SECS: f32 = 60.0;
    /// Lowest value of the difficulty factor (~20% of the start interval range)
    pub const DIFFICULTY_FLOOR: f32 = 0.2;

    /// Largest frame delta fed to the simulation (tab suspend, slow frames)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Joystick drag distance (pixels) that maps to full speed
    pub const MAX_DRAG_DIST: f32 = 50.0;

    /// Number of vertices in a rock outline
    pub const ROCK_POINTS: usize = 10;
}

/// Format seconds the way the HUD shows them ("12.3")
#[inline]
pub fn format_seconds(secs: f32) -> String {
    format!("{:.1}", secs)
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "0.0");
        assert_eq!(format_seconds(12.34), "12.3");
        assert_eq!(format_seconds(59.96), "60.0");
    }

    #[test]
    fn test_wrap_angle() {
        use std::f32::consts::TAU;
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert!((wrap_angle(-1.0) - (TAU - 1.0)).abs() < 1e-5);
        assert!(wrap_angle(0.5) >= 0.0);
        assert_eq!(wrap_angle(-1e-8), 0.0);
        assert!(wrap_angle(-f32::EPSILON) < TAU);
    }
}
