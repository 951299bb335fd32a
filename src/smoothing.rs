//! Framerate-independent angular smoothing.
//!
//! Steering does not snap the character to the input heading; it advances the
//! yaw with a critically-damped spring so the value asymptotically approaches
//! the target over a configured time constant, independent of tick rate. The
//! smoother carries its velocity between ticks, so callers must persist the
//! `velocity` value they pass in.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

/// Shortest signed angular difference from `current` to `target`, in
/// `[-PI, PI]`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    delta
}

/// Advance `current` toward `target` with a critically-damped spring.
///
/// `smooth_time` is the approximate time to reach the target; `velocity` is
/// the smoother's rate state and must persist between calls. The step never
/// overshoots the target within a single tick.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let smooth_time = smooth_time.max(1e-4);
    let dt = dt.max(1e-6);

    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Rational approximation of e^-x, stable for fixed-tick step sizes.
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let original_target = target;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // The damped step must never cross the target.
    if (original_target - current > 0.0) == (output > original_target) {
        output = original_target;
        *velocity = (output - original_target) / dt;
    }

    output
}

/// [`smooth_damp`] over an angle, taking the shortest path around the circle.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, dt)
}

/// Horizontal forward direction for a yaw angle.
///
/// Yaw zero faces `+Z`; increasing yaw turns toward `+X`, matching
/// `Quat::from_rotation_y`.
#[inline]
pub fn yaw_to_forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}
