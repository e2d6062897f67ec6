//! Property tests for motion, spawning and collision invariants

use asteroid_runner::Tuning;
use asteroid_runner::sim::{
    GameState, Player, TickInput, circles_overlap, move_player, spawn_interval, tick,
};
use glam::Vec2;
use proptest::prelude::*;

proptest! {
    #[test]
    fn diagonal_moves_exactly_speed_times_dt(
        x in 50.0f32..430.0,
        y in 50.0f32..670.0,
        sx in prop::bool::ANY,
        sy in prop::bool::ANY,
        dt in 0.0001f32..0.1,
    ) {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos = Vec2::new(x, y);
        let dir = Vec2::new(if sx { 1.0 } else { -1.0 }, if sy { 1.0 } else { -1.0 });

        move_player(&mut player, dir, &tuning, dt);
        let moved = (player.pos - Vec2::new(x, y)).length();
        let expected = tuning.player_speed * dt;
        prop_assert!((moved - expected).abs() <= expected * 1e-4 + 1e-4);
    }

    #[test]
    fn player_stays_inside_canvas(
        x in -1000.0f32..1500.0,
        y in -1000.0f32..1500.0,
        dx in -1.0f32..1.0,
        dy in -1.0f32..1.0,
        dt in 0.0f32..5.0,
    ) {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos = Vec2::new(x, y);
        move_player(&mut player, Vec2::new(dx, dy), &tuning, dt);

        let half = player.size / 2.0;
        prop_assert!(player.pos.x >= half && player.pos.x <= tuning.canvas_width - half);
        prop_assert!(player.pos.y >= half && player.pos.y <= tuning.canvas_height - half);
    }

    #[test]
    fn spawn_interval_is_bounded_and_non_increasing(a in 0.0f32..500.0, b in 0.0f32..500.0) {
        let tuning = Tuning::default();
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let i_early = spawn_interval(&tuning, early);
        let i_late = spawn_interval(&tuning, late);
        prop_assert!(i_late <= i_early);
        for i in [i_early, i_late] {
            prop_assert!(i >= tuning.spawn_interval_min);
            prop_assert!(i <= tuning.spawn_interval_start);
        }
    }

    #[test]
    fn touching_circles_never_collide(r1 in 0.5f32..100.0, r2 in 0.5f32..100.0) {
        let sum = r1 + r2;
        prop_assert!(!circles_overlap(Vec2::ZERO, r1, Vec2::new(sum, 0.0), r2));
        prop_assert!(!circles_overlap(Vec2::ZERO, r1, Vec2::new(0.0, sum), r2));
        prop_assert!(circles_overlap(Vec2::ZERO, r1, Vec2::new(sum * 0.999, 0.0), r2));
    }

    #[test]
    fn asteroids_respect_ranges_and_leave_for_good(seed in any::<u64>()) {
        let mut state = GameState::new(seed);
        state.start();
        let tuning = state.tuning.clone();
        let limit = tuning.canvas_height + tuning.offscreen_margin;

        let mut seen_culled = Vec::new();
        for _ in 0..600 {
            let before: Vec<u32> = state.asteroids.iter().map(|a| a.id).collect();
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
            if !state.is_running() {
                break;
            }
            for a in &state.asteroids {
                prop_assert!(a.size >= tuning.asteroid_min_size && a.size <= tuning.asteroid_max_size);
                prop_assert!(a.speed >= tuning.asteroid_min_speed && a.speed <= tuning.asteroid_max_speed);
                prop_assert!(a.pos.y - a.size / 2.0 <= limit);
                prop_assert!(!seen_culled.contains(&a.id));
            }
            for id in before {
                if !state.asteroids.iter().any(|a| a.id == id) {
                    seen_culled.push(id);
                }
            }
        }
    }
}
