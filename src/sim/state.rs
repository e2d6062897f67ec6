//! Game state and core simulation types
//!
//! `GameState` is the whole simulation context: one per game instance, owned
//! by the caller and passed by reference into every system.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::ROCK_POINTS;
use crate::format_seconds;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing spawned yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Hit by an asteroid; frozen until the next start
    GameOver,
}

/// Things that happened during a tick, for the caller to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new asteroid entered the field
    Spawned { id: u32 },
    /// Asteroids left through the bottom edge
    Culled { count: usize },
    /// The player was hit; survival time at the moment of impact
    Collision { id: u32, survival: f32 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position (canvas units)
    pub pos: Vec2,
    /// Side of the bounding square
    pub size: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Self::spawn_point(tuning),
            size: tuning.player_size,
        }
    }

    /// Horizontal center, fixed offset above the bottom edge
    pub fn spawn_point(tuning: &Tuning) -> Vec2 {
        Vec2::new(
            tuning.canvas_width / 2.0,
            tuning.canvas_height - tuning.player_spawn_offset,
        )
    }

    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }
}

/// A falling rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    /// Fall speed (units/s), fixed at spawn
    pub speed: f32,
    /// Rotation (radians), cosmetic
    pub angle: f32,
    /// Angular velocity (rad/s), cosmetic
    pub spin: f32,
    /// Radius multipliers for the lumpy outline, cosmetic
    pub outline: [f32; ROCK_POINTS],
}

/// Survival time and spawn bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    /// Seconds alive in the current run
    pub survival: f32,
    /// Time since the last spawn
    pub spawn_timer: f32,
    /// Current spawn interval, recomputed every tick
    pub spawn_interval: f32,
}

impl SimClock {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            survival: 0.0,
            spawn_timer: 0.0,
            spawn_interval: tuning.spawn_interval_start,
        }
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub clock: SimClock,
    pub player: Player,
    /// Live asteroids in spawn order
    pub asteroids: Vec<Asteroid>,
    /// Spawn and cosmetic randomness
    pub rng: Pcg32,
    /// Simulation ticks in the current run
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create an idle game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create an idle game with custom balance. Rejects tunings that fail
    /// [`Tuning::validate`].
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            clock: SimClock::new(&tuning),
            player: Player::new(&tuning),
            asteroids: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Idle/GameOver -> Running. Returns false (and changes nothing) if
    /// already running.
    ///
    /// The RNG is not reseeded, so consecutive runs differ; create a fresh
    /// state to replay a seed.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        log::info!("Run started (from {:?}, seed {})", self.phase, self.seed);
        self.phase = GamePhase::Running;
        self.clock = SimClock::new(&self.tuning);
        self.player = Player::new(&self.tuning);
        self.asteroids.clear();
        self.time_ticks = 0;
        true
    }

    /// Running -> GameOver
    pub fn end(&mut self) {
        if !self.is_running() {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {}s ({} ticks)",
            format_seconds(self.clock.survival),
            self.time_ticks
        );
    }

    /// Survival time as shown in the HUD
    pub fn survival_text(&self) -> String {
        format_seconds(self.clock.survival)
    }
}
