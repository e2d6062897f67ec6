//! Game balance parameters
//!
//! Every constant the simulation reads comes from a [`Tuning`]. Defaults match
//! `crate::consts`; alternative balances can be loaded from JSON. Missing
//! fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning set is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be positive and finite (got {value})")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} range is inverted ({min} > {max})")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} must be within [0, 1] (got {value})")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("player size {size} does not fit a {width}x{height} canvas")]
    PlayerTooLarge { size: f32, width: f32, height: f32 },
    #[error("asteroid max size {size} is wider than the canvas ({width})")]
    AsteroidTooLarge { size: f32, width: f32 },
}

/// Data-driven balance for one game instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub player_size: f32,
    /// Units per second at full input
    pub player_speed: f32,
    /// Distance of the spawn point above the bottom edge
    pub player_spawn_offset: f32,
    pub player_hit_radius_factor: f32,

    pub asteroid_min_size: f32,
    pub asteroid_max_size: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_hit_radius_factor: f32,
    pub asteroid_max_spin: f32,
    pub offscreen_margin: f32,

    pub spawn_interval_start: f32,
    pub spawn_interval_min: f32,
    pub difficulty_ramp_secs: f32,
    pub difficulty_floor: f32,

    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_W,
            canvas_height: CANVAS_H,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_spawn_offset: PLAYER_SPAWN_OFFSET,
            player_hit_radius_factor: PLAYER_HIT_RADIUS,

            asteroid_min_size: ASTEROID_MIN_SIZE,
            asteroid_max_size: ASTEROID_MAX_SIZE,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_hit_radius_factor: ASTEROID_HIT_RADIUS,
            asteroid_max_spin: ASTEROID_MAX_SPIN,
            offscreen_margin: OFFSCREEN_MARGIN,

            spawn_interval_start: SPAWN_INTERVAL_START,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            difficulty_ramp_secs: DIFFICULTY_RAMP_SECS,
            difficulty_floor: DIFFICULTY_FLOOR,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { name, value })
    }
}

fn ordered(name: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    if min <= max {
        Ok(())
    } else {
        Err(TuningError::InvertedRange { name, min, max })
    }
}

fn unit(name: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::OutOfUnitRange { name, value })
    }
}

impl Tuning {
    /// Parse and validate a tuning set
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check ranges and sizes; the simulation assumes these hold
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("player_size", self.player_size)?;
        positive("player_speed", self.player_speed)?;
        positive("asteroid_min_size", self.asteroid_min_size)?;
        positive("asteroid_min_speed", self.asteroid_min_speed)?;
        positive("spawn_interval_min", self.spawn_interval_min)?;
        positive("difficulty_ramp_secs", self.difficulty_ramp_secs)?;
        positive("max_frame_dt", self.max_frame_dt)?;

        ordered("asteroid size", self.asteroid_min_size, self.asteroid_max_size)?;
        ordered("asteroid speed", self.asteroid_min_speed, self.asteroid_max_speed)?;
        ordered(
            "spawn interval",
            self.spawn_interval_min,
            self.spawn_interval_start,
        )?;

        unit("player_hit_radius_factor", self.player_hit_radius_factor)?;
        unit("asteroid_hit_radius_factor", self.asteroid_hit_radius_factor)?;
        unit("difficulty_floor", self.difficulty_floor)?;

        if self.player_size > self.canvas_width || self.player_size > self.canvas_height {
            return Err(TuningError::PlayerTooLarge {
                size: self.player_size,
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.asteroid_max_size > self.canvas_width {
            return Err(TuningError::AsteroidTooLarge {
                size: self.asteroid_max_size,
                width: self.canvas_width,
            });
        }
        Ok(())
    }
}
