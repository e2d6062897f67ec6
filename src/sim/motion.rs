//! Motion integration for the player and falling asteroids

use glam::Vec2;

use super::state::{Asteroid, Player};
use crate::tuning::Tuning;
use crate::wrap_angle;

/// Validate a frame delta.
///
/// Returns `None` for non-finite or non-positive deltas (skip the tick) and
/// clamps anything above `max_dt`, so a resumed tab can't teleport entities.
pub fn sanitize_dt(dt: f32, max_dt: f32) -> Option<f32> {
    if !dt.is_finite() || dt <= 0.0 {
        return None;
    }
    Some(dt.min(max_dt))
}

/// Scale a direction so diagonal movement is no faster than axis-aligned
#[inline]
pub fn normalize_diagonal(dir: Vec2) -> Vec2 {
    if dir.x != 0.0 && dir.y != 0.0 {
        dir * std::f32::consts::FRAC_1_SQRT_2
    } else {
        dir
    }
}

/// Move the player along `dir` and keep it fully inside the canvas
pub fn move_player(player: &mut Player, dir: Vec2, tuning: &Tuning, dt: f32) {
    let dir = normalize_diagonal(dir);
    player.pos += dir * tuning.player_speed * dt;
    clamp_player(player, tuning);
}

/// Clamp the player's center to the canvas inset by half its size
pub fn clamp_player(player: &mut Player, tuning: &Tuning) {
    let half = player.half_size();
    let min = Vec2::splat(half);
    let max = Vec2::new(tuning.canvas_width - half, tuning.canvas_height - half);
    player.pos = player.pos.clamp(min, max);
}

/// Whether an asteroid has fallen past the bottom edge plus the margin
#[inline]
pub fn is_offscreen(asteroid: &Asteroid, tuning: &Tuning) -> bool {
    asteroid.pos.y - asteroid.size / 2.0 > tuning.canvas_height + tuning.offscreen_margin
}

/// Drop each asteroid by its own speed, spin it, and cull those that left the
/// canvas. Returns the number removed.
pub fn update_asteroids(asteroids: &mut Vec<Asteroid>, tuning: &Tuning, dt: f32) -> usize {
    let before = asteroids.len();
    asteroids.retain_mut(|a| {
        a.pos.y += a.speed * dt;
        a.angle = wrap_angle(a.angle + a.spin * dt);
        !is_offscreen(a, tuning)
    });
    before - asteroids.len()
}
