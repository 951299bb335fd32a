//! Movement intent component.
//!
//! The intent is the per-tick input snapshot from player input or AI.
//! The controller systems read this snapshot and apply appropriate motion;
//! no stage re-samples input mid-tick.

use bevy::prelude::*;

/// Per-tick input snapshot for a motion-controlled character.
///
/// You handle input detection in your code (keyboard, gamepad, touch, AI,
/// network) and write the result here every frame; the controller handles
/// the motion logic. Button-like actions are plain held states - the
/// controller derives rising edges itself by latching the previous tick's
/// state at the end of each fixed tick.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use tpc_motion_controller::prelude::*;
///
/// let mut intent = MotionIntent::default();
///
/// // Push the stick forward-right, camera facing down the world Z axis
/// intent.set_move_axes(Vec2::new(1.0, 1.0));
/// intent.set_camera_yaw(0.0);
///
/// // Want to jump this frame
/// intent.set_jump_pressed(true);
/// assert!(intent.jump_just_pressed());
/// ```
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct MotionIntent {
    /// Raw locomotion axes: `x` = lateral (-1.0 = left, 1.0 = right),
    /// `y` = forward (-1.0 = back, 1.0 = forward). Each clamped to [-1, 1].
    pub move_axes: Vec2,

    /// Current camera yaw in radians. Locomotion input is interpreted
    /// relative to this heading (camera-relative steering).
    pub camera_yaw: f32,

    /// Whether the jump action is currently active.
    pub jump_pressed: bool,
    /// Previous tick's jump state (for edge detection).
    /// This is managed internally by the controller.
    pub(crate) jump_pressed_prev: bool,

    /// Whether the dodge action is currently active.
    pub dodge_pressed: bool,
    /// Previous tick's dodge state (for edge detection).
    /// This is managed internally by the controller.
    pub(crate) dodge_pressed_prev: bool,

    /// Whether the sprint input is held.
    pub sprint_held: bool,

    /// Whether the crouch input is held.
    pub crouch_held: bool,

    /// Whether the secondary action (shooting) is held. Cosmetic only.
    pub shoot_held: bool,
}

impl Default for MotionIntent {
    fn default() -> Self {
        Self {
            move_axes: Vec2::ZERO,
            camera_yaw: 0.0,
            jump_pressed: false,
            jump_pressed_prev: false,
            dodge_pressed: false,
            dodge_pressed_prev: false,
            sprint_held: false,
            crouch_held: false,
            shoot_held: false,
        }
    }
}

impl MotionIntent {
    /// Create a new empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw locomotion axes. Each component is clamped to [-1, 1].
    pub fn set_move_axes(&mut self, axes: Vec2) {
        self.move_axes = axes.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Set the camera yaw (radians).
    pub fn set_camera_yaw(&mut self, yaw: f32) {
        self.camera_yaw = yaw;
    }

    /// Set the jump state.
    ///
    /// Pass `true` while the player/AI wants to jump, `false` otherwise.
    /// Call this every frame with the current state; the controller detects
    /// the rising edge and triggers at most one jump per press.
    pub fn set_jump_pressed(&mut self, pressed: bool) {
        self.jump_pressed = pressed;
    }

    /// Set the dodge state. Same edge semantics as [`set_jump_pressed`].
    ///
    /// [`set_jump_pressed`]: MotionIntent::set_jump_pressed
    pub fn set_dodge_pressed(&mut self, pressed: bool) {
        self.dodge_pressed = pressed;
    }

    /// Set the sprint held state.
    pub fn set_sprint_held(&mut self, held: bool) {
        self.sprint_held = held;
    }

    /// Set the crouch held state.
    pub fn set_crouch_held(&mut self, held: bool) {
        self.crouch_held = held;
    }

    /// Set the secondary-action held state.
    pub fn set_shoot_held(&mut self, held: bool) {
        self.shoot_held = held;
    }

    /// Check if there is any locomotion input at all.
    pub fn has_move_input(&self) -> bool {
        self.move_axes != Vec2::ZERO
    }

    /// True on the first tick the jump action became active.
    pub fn jump_just_pressed(&self) -> bool {
        self.jump_pressed && !self.jump_pressed_prev
    }

    /// True on the first tick the dodge action became active.
    pub fn dodge_just_pressed(&self) -> bool {
        self.dodge_pressed && !self.dodge_pressed_prev
    }

    /// Latch the current pressed states for next tick's edge detection.
    /// Called once at the end of every fixed tick.
    pub(crate) fn settle_edges(&mut self) {
        self.jump_pressed_prev = self.jump_pressed;
        self.dodge_pressed_prev = self.dodge_pressed;
    }
}
