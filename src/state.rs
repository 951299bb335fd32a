//! Motion state and state marker components.
//!
//! [`MotionState`] is the single mutable record the pipeline resolves every
//! tick. The marker components mirror the interesting flags so game logic can
//! use plain marker queries; they are added/removed automatically by the
//! controller.

use bevy::prelude::*;

/// Per-character motion state, owned exclusively by the controller.
///
/// Mutated in place every tick by the pipeline systems, in pipeline order.
/// Game code should treat the fields as read-only outputs.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct MotionState {
    /// Whether the ground probe overlapped collidable geometry this tick.
    pub is_grounded: bool,

    /// Signed vertical speed. Negative = falling, positive = rising.
    /// Persists across ticks; clamped below by the configured max fall speed.
    pub vertical_speed: f32,

    /// Steering-driven horizontal velocity, recomputed each tick from input
    /// and camera yaw. Zero when there is no locomotion input or while
    /// dodging.
    pub horizontal_velocity: Vec3,

    /// This tick's normalized locomotion direction in input space
    /// (`x` lateral, `y` forward). Zero below the input deadzone.
    pub move_direction: Vec2,

    /// Active movement speed, selected each tick from the stance flags.
    pub movement_speed: f32,

    /// Whether a mid-air jump is still available. Re-armed while grounded,
    /// consumed by a jump performed in the air.
    pub double_jump_available: bool,

    /// Whether a dodge burst is currently displacing the character.
    /// While true, steering contributes no displacement.
    pub is_dodging: bool,

    /// Displacement velocity of the active dodge. Zero when not dodging.
    pub dodge_vector: Vec3,

    /// Seconds since the last dodge started. `INFINITY` before the first
    /// dodge, so a fresh character can dodge immediately.
    pub seconds_since_dodge: f32,

    /// Whether the sprint input is held. Input reflection only.
    pub is_sprinting: bool,

    /// Whether the crouch input is held. Input reflection only.
    pub is_crouching: bool,

    /// Whether the secondary action is held. Input reflection only.
    pub is_shooting: bool,

    /// Angular velocity state for yaw smoothing.
    pub(crate) turn_smooth_velocity: f32,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            is_grounded: false,
            vertical_speed: 0.0,
            horizontal_velocity: Vec3::ZERO,
            move_direction: Vec2::ZERO,
            movement_speed: 0.0,
            double_jump_available: true,
            is_dodging: false,
            dodge_vector: Vec3::ZERO,
            seconds_since_dodge: f32::INFINITY,
            is_sprinting: false,
            is_crouching: false,
            is_shooting: false,
            turn_smooth_velocity: 0.0,
        }
    }
}

impl MotionState {
    /// Create a new idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the character is airborne.
    #[inline]
    pub fn airborne(&self) -> bool {
        !self.is_grounded
    }

    /// Check if there is active locomotion input this tick.
    #[inline]
    pub fn has_move_input(&self) -> bool {
        self.move_direction != Vec2::ZERO
    }

    /// Check if enough time has passed since the last dodge start.
    #[inline]
    pub fn dodge_ready(&self, cooldown: f32) -> bool {
        self.seconds_since_dodge >= cooldown
    }
}

/// Marker component indicating the character is grounded.
///
/// Added automatically when the ground probe overlaps collidable geometry.
/// Mutually exclusive with [`Airborne`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character is airborne.
///
/// Added automatically when the ground probe finds nothing.
/// Mutually exclusive with [`Grounded`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;

/// Marker component indicating a dodge burst is active.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Dodging;
