//! Circle-circle collision between the player and asteroids
//!
//! Hitboxes are circles: the player's radius is a fraction (0.45) of its size,
//! slightly forgiving for the triangular ship; an asteroid's is half its size.

use glam::Vec2;

use super::state::{Asteroid, Player};
use crate::tuning::Tuning;

/// Circle overlap test on squared distances. Touching circles do not collide.
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r_sum = ra + rb;
    a.distance_squared(b) < r_sum * r_sum
}

#[inline]
pub fn player_radius(player: &Player, tuning: &Tuning) -> f32 {
    player.size * tuning.player_hit_radius_factor
}

#[inline]
pub fn asteroid_radius(asteroid: &Asteroid, tuning: &Tuning) -> f32 {
    asteroid.size * tuning.asteroid_hit_radius_factor
}

/// Check one asteroid against the player
pub fn player_hits_asteroid(player: &Player, asteroid: &Asteroid, tuning: &Tuning) -> bool {
    circles_overlap(
        player.pos,
        player_radius(player, tuning),
        asteroid.pos,
        asteroid_radius(asteroid, tuning),
    )
}

/// Index of the first asteroid touching the player, if any. Stops at the
/// first hit.
pub fn first_collision(player: &Player, asteroids: &[Asteroid], tuning: &Tuning) -> Option<usize> {
    asteroids
        .iter()
        .position(|a| player_hits_asteroid(player, a, tuning))
}
