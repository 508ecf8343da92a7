//! Per-frame transform state.
//!
//! The update is a pure function of the previous [`TransformState`] and a
//! [`KeySnapshot`] taken once per frame, so it runs without a window or GPU.

use deltoid_engine::input::{InputState, Key};
use glam::{Mat4, Vec3};

use crate::config::TransformTuning;

/// Angle at which the rotation check fires, in degrees.
const FULL_TURN_DEG: f32 = 360.0;

/// The eight controls the demo polls, captured at the start of a frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct KeySnapshot {
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
    /// W
    pub grow: bool,
    /// S
    pub shrink: bool,
    /// A
    pub rotate_ccw: bool,
    /// D
    pub rotate_cw: bool,
}

impl KeySnapshot {
    pub fn capture(input: &InputState) -> Self {
        Self {
            right: input.key_down(Key::ArrowRight),
            left: input.key_down(Key::ArrowLeft),
            up: input.key_down(Key::ArrowUp),
            down: input.key_down(Key::ArrowDown),
            grow: input.key_down(Key::W),
            shrink: input.key_down(Key::S),
            rotate_ccw: input.key_down(Key::A),
            rotate_cw: input.key_down(Key::D),
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Translation, scale and rotation of the triangle.
///
/// Nothing here is clamped: the size and angle checks only flip
/// `scale_direction` or add a full turn, and the step direction never changes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformState {
    pub x_offset: f32,
    pub y_offset: f32,
    pub size: f32,
    /// Degrees.
    pub angle: f32,

    scale_direction: bool,
    tuning: TransformTuning,
}

impl TransformState {
    pub fn new(tuning: TransformTuning) -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            size: tuning.initial_size,
            angle: 0.0,
            scale_direction: true,
            tuning,
        }
    }

    /// Toggled each time a scale step lands outside `(min_size, max_size)`.
    /// Nothing reads it.
    pub fn scale_direction(&self) -> bool {
        self.scale_direction
    }

    /// Applies one frame of held keys.
    pub fn update(&mut self, keys: &KeySnapshot) {
        let t = self.tuning;

        if keys.right {
            self.x_offset += t.translate_step;
        }
        if keys.left {
            self.x_offset -= t.translate_step;
        }
        if keys.up {
            self.y_offset += t.translate_step;
        }
        if keys.down {
            self.y_offset -= t.translate_step;
        }

        if keys.grow {
            self.size += t.scale_step;
            self.check_size_bounds();
        }
        if keys.shrink {
            self.size -= t.scale_step;
            self.check_size_bounds();
        }

        if keys.rotate_ccw {
            self.angle += t.rotate_step_deg;
            self.check_full_turn();
        }
        if keys.rotate_cw {
            self.angle -= t.rotate_step_deg;
            self.check_full_turn();
        }
    }

    fn check_size_bounds(&mut self) {
        if self.size >= self.tuning.max_size || self.size <= self.tuning.min_size {
            self.scale_direction = !self.scale_direction;
        }
    }

    fn check_full_turn(&mut self) {
        if self.angle >= FULL_TURN_DEG {
            self.angle += FULL_TURN_DEG;
        }
    }

    /// `translate(x, y, 0) * scale(size, size, 0) * rotate_z(angle)`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.x_offset, self.y_offset, 0.0))
            * Mat4::from_scale(Vec3::new(self.size, self.size, 0.0))
            * Mat4::from_rotation_z(self.angle.to_radians())
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(TransformTuning::default())
    }
}
