//! Render sink and shape generation for 2D primitives
//!
//! Drawing happens outside the simulation. A frame is always painted in the
//! same order: clear, background, player, then every asteroid.

use glam::Vec2;

use crate::consts::ROCK_POINTS;
use crate::sim::{Asteroid, GameState};

/// Number of background stars
pub const STAR_COUNT: usize = 40;

/// Paint target for one frame
pub trait RenderSink {
    fn clear(&mut self);
    /// `time` is survival seconds; the starfield scrolls with it
    fn draw_background(&mut self, time: f32);
    /// `time` is wall-clock seconds, used for the thruster flicker
    fn draw_player(&mut self, pos: Vec2, size: f32, time: f32);
    fn draw_asteroid(&mut self, asteroid: &Asteroid);
}

/// Paint the current state in the fixed order
pub fn draw_frame<R: RenderSink + ?Sized>(state: &GameState, sink: &mut R, wall_time: f32) {
    sink.clear();
    sink.draw_background(state.clock.survival);
    sink.draw_player(state.player.pos, state.player.size, wall_time);
    for asteroid in &state.asteroids {
        sink.draw_asteroid(asteroid);
    }
}

/// A background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// Side of the square (1 or 2)
    pub size: f32,
    pub alpha: f32,
}

/// Parallax starfield: stars drift at one of a few speeds and wrap around
pub fn star_field(time: f32, width: f32, height: f32) -> impl Iterator<Item = Star> {
    (0..STAR_COUNT).map(move |i| {
        let fi = i as f32;
        let x = (fi * 127.0 + time * 60.0 * (i % 5) as f32).rem_euclid(width);
        let y = (fi * 233.0 + time * 40.0 * (i % 7) as f32).rem_euclid(height);
        Star {
            pos: Vec2::new(x, y),
            size: if i % 3 == 0 { 2.0 } else { 1.0 },
            alpha: 0.3 + (i % 5) as f32 * 0.15,
        }
    })
}

/// Ship triangle: nose, left wing, right wing
pub fn ship_triangle(pos: Vec2, size: f32) -> [Vec2; 3] {
    [
        pos + Vec2::new(0.0, -size * 0.6),
        pos + Vec2::new(-size * 0.4, size * 0.5),
        pos + Vec2::new(size * 0.4, size * 0.5),
    ]
}

/// Thruster flame length, flickering with time (seconds)
pub fn thruster_length(time: f32) -> f32 {
    10.0 + (time * 20.0).sin() * 4.0
}

/// Lumpy rock outline in the asteroid's local, unrotated frame
pub fn rock_outline(asteroid: &Asteroid) -> [Vec2; ROCK_POINTS] {
    let radius = asteroid.size * 0.5;
    let mut points = [Vec2::ZERO; ROCK_POINTS];
    for (i, point) in points.iter_mut().enumerate() {
        let theta = i as f32 / ROCK_POINTS as f32 * std::f32::consts::TAU;
        *point = Vec2::from_angle(theta) * radius * asteroid.outline[i];
    }
    points
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Background,
    Player { pos: Vec2 },
    Asteroid { id: u32 },
}

/// Sink that records calls instead of drawing; used headless and in tests
#[derive(Debug, Default)]
pub struct DrawLog {
    pub calls: Vec<DrawCall>,
    pub frames: usize,
}

impl RenderSink for DrawLog {
    fn clear(&mut self) {
        self.calls.clear();
        self.frames += 1;
        self.calls.push(DrawCall::Clear);
    }

    fn draw_background(&mut self, _time: f32) {
        self.calls.push(DrawCall::Background);
    }

    fn draw_player(&mut self, pos: Vec2, _size: f32, _time: f32) {
        self.calls.push(DrawCall::Player { pos });
    }

    fn draw_asteroid(&mut self, asteroid: &Asteroid) {
        self.calls.push(DrawCall::Asteroid { id: asteroid.id });
    }
}
