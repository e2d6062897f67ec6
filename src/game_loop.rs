//! Frame clock and loop runner
//!
//! The platform calls [`GameLoop::frame`] once per display refresh and only
//! schedules the next frame while it returns [`LoopControl::Continue`].
//! Leaving `Running` is the only way the loop stops.

use crate::hud::{HudSink, game_over_message, intro_message};
use crate::input::InputState;
use crate::render::{RenderSink, draw_frame};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Whether the caller should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Converts frame timestamps (milliseconds) into deltas (seconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Restart timing from `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Seconds since the previous call (0 on the first call). Timestamps that
    /// go backwards yield a negative delta, which the tick discards.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        dt
    }
}

/// One game instance: state, input snapshot and clock
#[derive(Debug, Clone)]
pub struct GameLoop {
    pub state: GameState,
    pub input: InputState,
    clock: FrameClock,
}

impl GameLoop {
    pub fn new(seed: u64) -> Self {
        Self::from_state(GameState::new(seed))
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Ok(Self::from_state(GameState::with_tuning(seed, tuning)?))
    }

    fn from_state(state: GameState) -> Self {
        Self {
            state,
            input: InputState::default(),
            clock: FrameClock::new(),
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Put up the title banner (before the first run)
    pub fn show_intro<H: HudSink + ?Sized>(&self, hud: &mut H) {
        hud.set_score_text(&self.state.survival_text());
        hud.show_message(&intro_message());
    }

    /// Start trigger (space bar / start button). Returns true if a new run
    /// began and the caller should schedule the first frame.
    pub fn start<H: HudSink + ?Sized>(&mut self, now_ms: f64, hud: &mut H) -> bool {
        if !self.state.start() {
            return false;
        }
        self.clock.reset(now_ms);
        hud.hide_message();
        hud.set_score_text(&self.state.survival_text());
        true
    }

    /// Run one frame: tick, update the HUD, paint. Stops after the frame in
    /// which the player is hit.
    pub fn frame<R, H>(&mut self, now_ms: f64, render: &mut R, hud: &mut H) -> LoopControl
    where
        R: RenderSink + ?Sized,
        H: HudSink + ?Sized,
    {
        if !self.state.is_running() {
            return LoopControl::Stop;
        }

        let dt = self.clock.delta(now_ms);
        let input = TickInput::new(self.input.direction());
        let events = tick(&mut self.state, &input, dt);

        hud.set_score_text(&self.state.survival_text());
        draw_frame(&self.state, render, (now_ms / 1000.0) as f32);

        let hit = events.iter().find_map(|e| match e {
            GameEvent::Collision { survival, .. } => Some(*survival),
            _ => None,
        });
        if let Some(survival) = hit {
            hud.show_message(&game_over_message(survival));
            return LoopControl::Stop;
        }
        LoopControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::RecordingHud;
    use crate::render::DrawLog;

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
        clock.reset(5000.0);
        assert!((clock.delta(5100.0) - 0.1).abs() < 1e-6);
        assert!(clock.delta(5000.0) < 0.0);
    }

    #[test]
    fn test_frame_when_idle_stops() {
        let mut game = GameLoop::new(1);
        let mut hud = RecordingHud::default();
        let mut log = DrawLog::default();
        assert_eq!(game.frame(0.0, &mut log, &mut hud), LoopControl::Stop);
        assert_eq!(log.frames, 0);
    }

    #[test]
    fn test_intro_then_start_hides_message() {
        let mut game = GameLoop::new(1);
        let mut hud = RecordingHud::default();
        game.show_intro(&mut hud);
        assert!(hud.message.is_some());

        assert!(game.start(0.0, &mut hud));
        assert!(hud.message.is_none());
        assert_eq!(hud.score, "0.0");
        // Space while running does nothing
        assert!(!game.start(10.0, &mut hud));
    }

    #[test]
    fn test_frames_advance_and_render() {
        let mut game = GameLoop::new(1);
        let mut hud = RecordingHud::default();
        let mut log = DrawLog::default();
        game.start(0.0, &mut hud);

        let mut now = 0.0;
        for _ in 0..30 {
            now += 1000.0 / 60.0;
            assert_eq!(game.frame(now, &mut log, &mut hud), LoopControl::Continue);
        }
        assert_eq!(log.frames, 30);
        assert_eq!(hud.score, "0.5");
        // One score update from start plus one per frame
        assert_eq!(hud.score_updates, 31);
    }

    #[test]
    fn test_with_tuning_validates() {
        let bad = Tuning {
            spawn_interval_min: 2.0,
            spawn_interval_start: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            GameLoop::with_tuning(1, bad),
            Err(TuningError::InvertedRange { .. })
        ));
        let game = GameLoop::with_tuning(1, Tuning::default()).unwrap();
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_tab_suspend_is_clamped() {
        let mut game = GameLoop::new(1);
        let mut hud = RecordingHud::default();
        let mut log = DrawLog::default();
        game.start(0.0, &mut hud);
        game.frame(60_000.0, &mut log, &mut hud);
        assert!((game.state.clock.survival - game.state.tuning.max_frame_dt).abs() < 1e-6);
    }
}
