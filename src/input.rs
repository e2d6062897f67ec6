//! Input snapshot shared between event handlers and the tick
//!
//! Keyboard and pointer handlers overwrite fields here as events arrive; the
//! game loop reads [`InputState::direction`] once per frame.

use glam::Vec2;

use crate::consts::MAX_DRAG_DIST;

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` to a direction and a key slot.
    /// Arrows use slots 0-3, WASD 4-7, so releasing one binding doesn't
    /// cancel the other.
    pub fn from_key(key: &str) -> Option<(Direction, usize)> {
        match key {
            "ArrowUp" => Some((Direction::Up, 0)),
            "ArrowDown" => Some((Direction::Down, 1)),
            "ArrowLeft" => Some((Direction::Left, 2)),
            "ArrowRight" => Some((Direction::Right, 3)),
            "w" | "W" => Some((Direction::Up, 4)),
            "s" | "S" => Some((Direction::Down, 5)),
            "a" | "A" => Some((Direction::Left, 6)),
            "d" | "D" => Some((Direction::Right, 7)),
            _ => None,
        }
    }

    fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

const KEY_SLOTS: [Direction; 8] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Current keyboard and joystick state
#[derive(Debug, Clone)]
pub struct InputState {
    held: [bool; 8],
    /// Joystick vector, magnitude <= 1
    analog: Vec2,
    dragging: bool,
    /// Drag distance that maps to full speed
    max_drag: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(MAX_DRAG_DIST)
    }
}

impl InputState {
    pub fn new(max_drag: f32) -> Self {
        Self {
            held: [false; 8],
            analog: Vec2::ZERO,
            dragging: false,
            max_drag,
        }
    }

    /// Record a key press/release. Returns true if the key is a movement key.
    pub fn set_key(&mut self, key: &str, down: bool) -> bool {
        match Direction::from_key(key) {
            Some((_, slot)) => {
                self.held[slot] = down;
                true
            }
            None => false,
        }
    }

    /// Whether any binding for `dir` is held
    pub fn is_held(&self, dir: Direction) -> bool {
        KEY_SLOTS
            .iter()
            .zip(self.held.iter())
            .any(|(d, &down)| *d == dir && down)
    }

    /// Start a drag gesture at offset (dx, dy) from the joystick center
    pub fn begin_drag(&mut self, dx: f32, dy: f32) -> Option<Vec2> {
        self.dragging = true;
        self.drag(dx, dy)
    }

    /// Update the joystick from an offset relative to its center.
    ///
    /// The offset is clamped to `max_drag`; the clamped offset is returned so
    /// the caller can place the joystick knob. Non-finite samples are ignored.
    pub fn drag(&mut self, dx: f32, dy: f32) -> Option<Vec2> {
        if !self.dragging || !dx.is_finite() || !dy.is_finite() {
            return None;
        }
        let offset = Vec2::new(dx, dy).clamp_length_max(self.max_drag);
        self.analog = offset / self.max_drag;
        Some(offset)
    }

    /// End the gesture; the joystick snaps back to center
    pub fn release_drag(&mut self) {
        self.dragging = false;
        self.analog = Vec2::ZERO;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[inline]
    pub fn analog(&self) -> Vec2 {
        self.analog
    }

    /// Merge keys and joystick into one direction, each axis in [-1, 1]
    pub fn direction(&self) -> Vec2 {
        let mut keys = Vec2::ZERO;
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            if self.is_held(dir) {
                keys += dir.unit();
            }
        }
        (keys + self.analog).clamp(Vec2::NEG_ONE, Vec2::ONE)
    }

    /// Drop all held keys and any active drag (e.g. on window blur)
    pub fn clear(&mut self) {
        self.held = [false; 8];
        self.release_drag();
    }
}
