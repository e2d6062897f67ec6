//! Simple dodging pilot for headless runs and demos
//!
//! Looks at asteroids that are above the ship and close horizontally, and
//! sidesteps away from the most urgent one. With nothing threatening it drifts
//! back toward the spawn column.

use glam::Vec2;

use crate::sim::{GameState, Player};

/// How far above the ship (in ship sizes) threats are considered
const LOOKAHEAD_SIZES: f32 = 8.0;
/// Extra horizontal clearance beyond touching hitboxes
const CLEARANCE: f32 = 12.0;

/// Direction to steer this tick
pub fn steer(state: &GameState) -> Vec2 {
    let player = &state.player;
    let tuning = &state.tuning;
    let reach = player.size * tuning.player_hit_radius_factor + CLEARANCE;

    let threat = state
        .asteroids
        .iter()
        .filter(|a| {
            let above = player.pos.y - a.pos.y;
            let radius = a.size * tuning.asteroid_hit_radius_factor;
            above > -radius
                && above < player.size * LOOKAHEAD_SIZES
                && (a.pos.x - player.pos.x).abs() < reach + radius
        })
        .min_by(|a, b| {
            time_to_reach(player, a.pos.y, a.speed)
                .total_cmp(&time_to_reach(player, b.pos.y, b.speed))
        });

    match threat {
        Some(a) => {
            let mut dx = player.pos.x - a.pos.x;
            // Dodge toward the roomier side when hugging a wall
            let room_left = player.pos.x - player.half_size();
            let room_right = tuning.canvas_width - player.half_size() - player.pos.x;
            if room_left < reach && dx < 0.0 {
                dx = 1.0;
            } else if room_right < reach && dx > 0.0 {
                dx = -1.0;
            } else if dx == 0.0 {
                dx = if room_left > room_right { -1.0 } else { 1.0 };
            }
            Vec2::new(dx.signum(), 0.0)
        }
        None => {
            let home = Player::spawn_point(tuning);
            let offset = home - player.pos;
            let step = |d: f32| if d.abs() > 2.0 { d.signum() } else { 0.0 };
            Vec2::new(step(offset.x), step(offset.y))
        }
    }
}

fn time_to_reach(player: &Player, y: f32, speed: f32) -> f32 {
    (player.pos.y - y).max(0.0) / speed.max(1.0)
}
