//! Asteroid spawning and difficulty ramp
//!
//! The spawn interval shrinks linearly with survival time until it bottoms out
//! at `spawn_interval_min`.

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, GameState};
use crate::consts::ROCK_POINTS;
use crate::tuning::Tuning;

/// Normalized difficulty: 1.0 at the start, falling linearly to
/// `difficulty_floor` once survival reaches `difficulty_ramp_secs`
pub fn difficulty_factor(tuning: &Tuning, survival: f32) -> f32 {
    let progress = (survival.max(0.0) / tuning.difficulty_ramp_secs)
        .min(1.0 - tuning.difficulty_floor);
    1.0 - progress
}

/// Seconds between spawns at the given survival time
pub fn spawn_interval(tuning: &Tuning, survival: f32) -> f32 {
    let factor = difficulty_factor(tuning, survival);
    tuning.spawn_interval_min + (tuning.spawn_interval_start - tuning.spawn_interval_min) * factor
}

/// Advance the spawn accumulator by `dt`; spawns at most one asteroid.
///
/// When the timer reaches the interval it resets to zero rather than carrying
/// the overshoot, so long frames slightly under-spawn.
pub fn update_spawner(state: &mut GameState, dt: f32) -> Option<u32> {
    state.clock.spawn_interval = spawn_interval(&state.tuning, state.clock.survival);
    state.clock.spawn_timer += dt;
    if state.clock.spawn_timer >= state.clock.spawn_interval {
        state.clock.spawn_timer = 0.0;
        Some(spawn_asteroid(state))
    } else {
        None
    }
}

/// Spawn one asteroid above the visible area and return its ID
pub fn spawn_asteroid(state: &mut GameState) -> u32 {
    let id = state.next_entity_id();
    let asteroid = random_asteroid(id, &state.tuning, &mut state.rng);
    log::trace!(
        "Spawned asteroid {} at x={:.1} size={:.1} speed={:.1}",
        id,
        asteroid.pos.x,
        asteroid.size,
        asteroid.speed
    );
    state.asteroids.push(asteroid);
    id
}

/// Roll a new asteroid. Draw order: size, x, speed, angle, spin, outline.
pub fn random_asteroid<R: Rng>(id: u32, tuning: &Tuning, rng: &mut R) -> Asteroid {
    let size = lerp(
        tuning.asteroid_min_size,
        tuning.asteroid_max_size,
        rng.random::<f32>(),
    );
    // Full width inside the canvas
    let x = size / 2.0 + rng.random::<f32>() * (tuning.canvas_width - size);
    // Fully above the top edge so it slides in
    let y = -size;
    let speed = lerp(
        tuning.asteroid_min_speed,
        tuning.asteroid_max_speed,
        rng.random::<f32>(),
    );
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let spin = (rng.random::<f32>() * 2.0 - 1.0) * tuning.asteroid_max_spin;

    let mut outline = [1.0; ROCK_POINTS];
    for jitter in outline.iter_mut() {
        *jitter = 0.7 + rng.random::<f32>() * 0.4;
    }

    Asteroid {
        id,
        pos: Vec2::new(x, y),
        size,
        speed,
        angle,
        spin,
        outline,
    }
}

#[inline]
fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + t * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_difficulty_factor_ramp() {
        let tuning = Tuning::default();
        assert_eq!(difficulty_factor(&tuning, 0.0), 1.0);
        assert!((difficulty_factor(&tuning, 30.0) - 0.5).abs() < 1e-6);
        assert!((difficulty_factor(&tuning, 48.0) - 0.2).abs() < 1e-6);
        assert!((difficulty_factor(&tuning, 600.0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_interval_endpoints() {
        let tuning = Tuning::default();
        assert!((spawn_interval(&tuning, 0.0) - 0.9).abs() < 1e-6);
        // Floor: 0.25 + 0.65 * 0.2
        assert!((spawn_interval(&tuning, 1000.0) - 0.38).abs() < 1e-5);
    }

    #[test]
    fn test_accumulator_resets_without_remainder() {
        let mut state = GameState::new(7);
        state.start();
        assert_eq!(update_spawner(&mut state, 0.5), None);
        assert!((state.clock.spawn_timer - 0.5).abs() < 1e-6);
        // 1.0 >= 0.9 -> spawn, overshoot dropped
        assert!(update_spawner(&mut state, 0.5).is_some());
        assert_eq!(state.clock.spawn_timer, 0.0);
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_one_spawn_per_update_even_for_huge_dt() {
        let mut state = GameState::new(7);
        state.start();
        assert!(update_spawner(&mut state, 10.0).is_some());
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_random_asteroid_in_bounds() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..500 {
            let a = random_asteroid(id, &tuning, &mut rng);
            assert!(a.size >= tuning.asteroid_min_size && a.size <= tuning.asteroid_max_size);
            assert!(a.speed >= tuning.asteroid_min_speed && a.speed <= tuning.asteroid_max_speed);
            assert!(a.pos.x - a.size / 2.0 >= -1e-3);
            assert!(a.pos.x + a.size / 2.0 <= tuning.canvas_width + 1e-3);
            assert_eq!(a.pos.y, -a.size);
            assert!(a.spin.abs() <= tuning.asteroid_max_spin);
            assert!(a.outline.iter().all(|j| (0.69..=1.11).contains(j)));
        }
    }

    #[test]
    fn test_same_seed_same_asteroid() {
        let tuning = Tuning::default();
        let a = random_asteroid(1, &tuning, &mut Pcg32::seed_from_u64(3));
        let b = random_asteroid(1, &tuning, &mut Pcg32::seed_from_u64(3));
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.size, b.size);
        assert_eq!(a.speed, b.speed);
    }
}
