//! Controller configuration.
//!
//! This module defines the tunables for the motion controller: locomotion
//! speeds, turn smoothing, the ground probe, gravity, jump and dodge.

use bevy::prelude::*;

/// Configuration parameters for the motion controller.
///
/// All per-tick behavior is derived from these values; there are no hardcoded
/// magic numbers in the pipeline systems.
///
/// Speeds are world units per second, angles radians, times seconds.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct MotionConfig {
    // === Locomotion Speeds ===
    /// Default walking speed.
    pub walk_speed: f32,

    /// Speed while the sprint input is held. Sprint wins over crouch.
    pub sprint_speed: f32,

    /// Speed while the crouch input is held (and sprint is not).
    pub crouch_speed: f32,

    /// Minimum raw input magnitude that counts as locomotion intent.
    /// Below this the steering stage is skipped entirely.
    pub input_deadzone: f32,

    // === Steering ===
    /// Time constant for yaw smoothing toward the input heading.
    ///
    /// The character's yaw converges asymptotically toward the target heading
    /// over roughly this duration, independent of frame rate. Zero is clamped
    /// to a small positive value rather than snapping instantly.
    pub turn_smooth_time: f32,

    // === Ground Probe ===
    /// Offset from the character position to the ground-check point.
    /// For a standing capsule this sits just above the feet.
    pub ground_check_offset: Vec3,

    /// Radius of the ground-check overlap sphere.
    pub ground_check_radius: f32,

    // === Gravity ===
    /// Downward acceleration while airborne (negative).
    pub gravity_accel: f32,

    /// Vertical speed applied while grounded and descending (small negative).
    /// Keeps the capsule pressed against ground geometry on slopes.
    pub ground_stick_speed: f32,

    /// Maximum fall speed magnitude. Vertical speed never drops below
    /// `-max_fall_speed`, for any sequence of ticks.
    pub max_fall_speed: f32,

    // === Jump ===
    /// Upward speed applied on a jump or double jump.
    pub jump_speed: f32,

    // === Dodge ===
    /// Dodge burst speed.
    pub dodge_speed: f32,

    /// How long a dodge displaces the character.
    pub dodge_duration: f32,

    /// Minimum time between dodge starts.
    pub dodge_cooldown: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            // Locomotion speeds
            walk_speed: 6.0,
            sprint_speed: 9.0,
            crouch_speed: 3.0,
            input_deadzone: 0.1,

            // Steering
            turn_smooth_time: 0.1,

            // Ground probe
            ground_check_offset: Vec3::new(0.0, -0.9, 0.0),
            ground_check_radius: 0.4,

            // Gravity
            gravity_accel: -20.0,
            ground_stick_speed: -2.0,
            max_fall_speed: 50.0,

            // Jump
            jump_speed: 200.0,

            // Dodge
            dodge_speed: 12.0,
            dodge_duration: 0.25,
            dodge_cooldown: 1.0,
        }
    }
}

impl MotionConfig {
    /// Pick the active movement speed from the stance flags.
    ///
    /// Sprint overrides crouch overrides the default walk speed.
    #[inline]
    pub fn speed_for(&self, sprinting: bool, crouching: bool) -> f32 {
        if sprinting {
            self.sprint_speed
        } else if crouching {
            self.crouch_speed
        } else {
            self.walk_speed
        }
    }

    /// Create a config optimized for responsive player control.
    pub fn player() -> Self {
        Self {
            turn_smooth_time: 0.08,
            dodge_cooldown: 0.8,
            ..default()
        }
    }

    /// Create a config for AI-controlled characters.
    pub fn ai() -> Self {
        Self {
            walk_speed: 4.0,
            sprint_speed: 6.5,
            turn_smooth_time: 0.25,
            input_deadzone: 0.2,
            ..default()
        }
    }

    /// Builder: set walk/sprint/crouch speeds.
    pub fn with_speeds(mut self, walk: f32, sprint: f32, crouch: f32) -> Self {
        self.walk_speed = walk;
        self.sprint_speed = sprint;
        self.crouch_speed = crouch;
        self
    }

    /// Builder: set walking speed.
    pub fn with_walk_speed(mut self, speed: f32) -> Self {
        self.walk_speed = speed;
        self
    }

    /// Builder: set the turn smoothing time constant.
    pub fn with_turn_smooth_time(mut self, time: f32) -> Self {
        self.turn_smooth_time = time;
        self
    }

    /// Builder: set gravity acceleration and the fall-speed clamp.
    pub fn with_gravity(mut self, accel: f32, max_fall_speed: f32) -> Self {
        self.gravity_accel = accel;
        self.max_fall_speed = max_fall_speed;
        self
    }

    /// Builder: set the grounded stick speed.
    pub fn with_ground_stick_speed(mut self, speed: f32) -> Self {
        self.ground_stick_speed = speed;
        self
    }

    /// Builder: set jump speed.
    pub fn with_jump_speed(mut self, speed: f32) -> Self {
        self.jump_speed = speed;
        self
    }

    /// Builder: set dodge parameters.
    pub fn with_dodge(mut self, speed: f32, duration: f32, cooldown: f32) -> Self {
        self.dodge_speed = speed;
        self.dodge_duration = duration;
        self.dodge_cooldown = cooldown;
        self
    }

    /// Builder: set the ground probe point and radius.
    pub fn with_ground_check(mut self, offset: Vec3, radius: f32) -> Self {
        self.ground_check_offset = offset;
        self.ground_check_radius = radius;
        self
    }

    /// Builder: set the input deadzone.
    pub fn with_input_deadzone(mut self, deadzone: f32) -> Self {
        self.input_deadzone = deadzone;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_speeds_are_ordered() {
        let config = MotionConfig::default();
        assert!(config.crouch_speed < config.walk_speed);
        assert!(config.walk_speed < config.sprint_speed);
    }

    #[test]
    fn speed_selection_priority() {
        let config = MotionConfig::default();

        // Neither held: walk
        assert_eq!(config.speed_for(false, false), config.walk_speed);

        // Crouch held: crouch
        assert_eq!(config.speed_for(false, true), config.crouch_speed);

        // Sprint held: sprint
        assert_eq!(config.speed_for(true, false), config.sprint_speed);

        // Both held: sprint wins
        assert_eq!(config.speed_for(true, true), config.sprint_speed);
    }

    #[test]
    fn gravity_points_down() {
        let config = MotionConfig::default();
        assert!(config.gravity_accel < 0.0);
        assert!(config.ground_stick_speed < 0.0);
        assert!(config.max_fall_speed > 0.0);
    }

    #[test]
    fn player_preset_turns_faster() {
        let player = MotionConfig::player();
        let default = MotionConfig::default();
        assert!(player.turn_smooth_time <= default.turn_smooth_time);
    }

    #[test]
    fn builders_chain() {
        let config = MotionConfig::default()
            .with_speeds(5.0, 8.0, 2.5)
            .with_jump_speed(10.0)
            .with_dodge(15.0, 0.3, 2.0)
            .with_gravity(-30.0, 40.0);

        assert_eq!(config.walk_speed, 5.0);
        assert_eq!(config.sprint_speed, 8.0);
        assert_eq!(config.crouch_speed, 2.5);
        assert_eq!(config.jump_speed, 10.0);
        assert_eq!(config.dodge_speed, 15.0);
        assert_eq!(config.dodge_duration, 0.3);
        assert_eq!(config.dodge_cooldown, 2.0);
        assert_eq!(config.gravity_accel, -30.0);
        assert_eq!(config.max_fall_speed, 40.0);
    }
}
