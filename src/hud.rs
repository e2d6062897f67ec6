//! Score display and message banner
//!
//! The HUD itself lives outside the crate (DOM elements in the browser, the
//! log on native). The simulation only pushes text through [`HudSink`].

use crate::format_seconds;

/// Receiver for score and banner updates
pub trait HudSink {
    /// Survival time, already formatted with one decimal
    fn set_score_text(&mut self, text: &str);
    fn show_message(&mut self, text: &str);
    fn hide_message(&mut self);
}

/// Title banner shown before the first run
pub fn intro_message() -> String {
    [
        "🚀 ASTEROID RUNNER 🚀",
        "Move:  Joystick (touch) or WASD/Arrows",
        "Goal:  Don't get hit.",
        "",
        "Press SPACE or TAP START",
    ]
    .join("\n")
}

/// Banner shown after a collision
pub fn game_over_message(survival: f32) -> String {
    format!(
        "💥 GAME OVER 💥\nSurvival Time: {}s\n\nPress SPACE or TAP START to try again",
        format_seconds(survival)
    )
}

/// In-memory sink; records the latest state of each element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingHud {
    pub score: String,
    /// `Some(text)` while the banner is visible
    pub message: Option<String>,
    pub score_updates: usize,
}

impl HudSink for RecordingHud {
    fn set_score_text(&mut self, text: &str) {
        self.score.clear();
        self.score.push_str(text);
        self.score_updates += 1;
    }

    fn show_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }

    fn hide_message(&mut self) {
        self.message = None;
    }
}
