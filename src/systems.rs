//! Core motion pipeline systems.
//!
//! These systems implement the per-tick motion resolution. They run in a
//! fixed order (see the plugin) and communicate through [`MotionState`];
//! stages that touch physics are generic over the backend.

use bevy::prelude::*;

use crate::backend::MotionPhysicsBackend;
use crate::config::MotionConfig;
use crate::intent::MotionIntent;
use crate::smoothing::{smooth_damp_angle, yaw_to_forward};
use crate::state::{Airborne, Dodging, Grounded, MotionState};

/// Probe the environment at the configured ground-check point.
///
/// Sets `is_grounded` from a sphere overlap query, excluding the character's
/// own collider. While grounded, the mid-air jump is re-armed.
pub fn update_ground_detection<B: MotionPhysicsBackend>(world: &mut World) {
    let entities: Vec<(Entity, MotionConfig)> = world
        .query::<(Entity, &MotionConfig, &MotionState)>()
        .iter(world)
        .map(|(e, config, _)| (e, *config))
        .collect();

    for (entity, config) in entities {
        let origin = B::get_position(world, entity) + config.ground_check_offset;
        let collision_groups = B::get_collision_groups(world, entity);
        let grounded = B::overlap_sphere(
            world,
            origin,
            config.ground_check_radius,
            entity,
            collision_groups,
        );

        if let Some(mut state) = world.get_mut::<MotionState>(entity) {
            state.is_grounded = grounded;
            if grounded {
                state.double_jump_available = true;
            }
        }
    }
}

/// Mirror the held sprint/crouch/shoot inputs into the state flags.
///
/// These are pure input reflections; their only downstream effect is the
/// movement speed selection.
pub fn refresh_stance_flags(mut query: Query<(&MotionIntent, &mut MotionState)>) {
    for (intent, mut state) in &mut query {
        state.is_sprinting = intent.sprint_held;
        state.is_crouching = intent.crouch_held;
        state.is_shooting = intent.shoot_held;
    }
}

/// Advance the dodge clock and clear a dodge whose duration has elapsed.
///
/// Runs before the dodge trigger stage, so a just-expired dodge can be
/// re-armed in the same tick once the cooldown also allows it.
pub fn expire_dodge(
    time: Option<Res<Time<Fixed>>>,
    mut query: Query<(&MotionConfig, &mut MotionState)>,
) {
    // Fixed timestep delta, with fallback for testing scenarios
    let dt = time
        .map(|t| t.delta_secs())
        .filter(|&d| d > 0.0)
        .unwrap_or(1.0 / 60.0);

    for (config, mut state) in &mut query {
        state.seconds_since_dodge += dt;

        if state.is_dodging && state.seconds_since_dodge >= config.dodge_duration {
            state.is_dodging = false;
            state.dodge_vector = Vec3::ZERO;
        }
    }
}

/// Pick the active movement speed: sprint overrides crouch overrides walk.
pub fn select_movement_speed(mut query: Query<(&MotionConfig, &mut MotionState)>) {
    for (config, mut state) in &mut query {
        state.movement_speed = config.speed_for(state.is_sprinting, state.is_crouching);
    }
}

/// Combine the raw locomotion axes into this tick's normalized direction.
///
/// Input below the deadzone means "no locomotion intent": the direction is
/// zeroed and later stages skip steering instead of normalizing a zero
/// vector.
pub fn sample_locomotion(mut query: Query<(&MotionConfig, &MotionIntent, &mut MotionState)>) {
    for (config, intent, mut state) in &mut query {
        let axes = intent.move_axes;
        state.move_direction = if axes.length() >= config.input_deadzone {
            axes.normalize()
        } else {
            Vec2::ZERO
        };
    }
}

/// Integrate gravity and issue the vertical displacement request.
///
/// Grounded with a descending speed snaps to the stick bias so the capsule
/// stays seated on slopes; otherwise the speed accumulates toward the fall
/// clamp. The displacement is requested every tick unconditionally.
pub fn apply_gravity<B: MotionPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);

    let entities: Vec<(Entity, MotionConfig)> = world
        .query::<(Entity, &MotionConfig, &MotionState)>()
        .iter(world)
        .map(|(e, config, _)| (e, *config))
        .collect();

    for (entity, config) in entities {
        let displacement = {
            let Some(mut state) = world.get_mut::<MotionState>(entity) else {
                continue;
            };

            if state.is_grounded && state.vertical_speed < 0.0 {
                state.vertical_speed = config.ground_stick_speed;
            } else {
                state.vertical_speed =
                    (state.vertical_speed + config.gravity_accel * dt).max(-config.max_fall_speed);
            }

            Vec3::Y * state.vertical_speed * dt
        };

        B::move_by(world, entity, displacement);
    }
}

/// Evaluate the jump edge: grounded jump, or one mid-air double jump.
///
/// A rising edge while grounded sets the vertical speed to the jump speed.
/// Airborne, the same impulse is allowed once until landing re-arms it.
/// Any further edges while airborne are no-ops. The upward displacement is
/// issued within the triggering tick.
pub fn apply_jump<B: MotionPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);

    let entities: Vec<(Entity, MotionConfig, bool)> = world
        .query::<(Entity, &MotionConfig, &MotionIntent, &MotionState)>()
        .iter(world)
        .map(|(e, config, intent, _)| (e, *config, intent.jump_just_pressed()))
        .collect();

    for (entity, config, jump_edge) in entities {
        if !jump_edge {
            continue;
        }

        let mut jumped = false;
        if let Some(mut state) = world.get_mut::<MotionState>(entity) {
            if state.is_grounded {
                state.vertical_speed = config.jump_speed;
                jumped = true;
            } else if state.double_jump_available {
                state.vertical_speed = config.jump_speed;
                state.double_jump_available = false;
                jumped = true;
            }
        }

        if jumped {
            B::move_by(world, entity, Vec3::Y * config.jump_speed * dt);
        }
    }
}

/// Steer toward the camera-relative input heading and move forward.
///
/// Only acts when there is locomotion input and no dodge is active. The yaw
/// is smooth-damped toward the target heading; the displacement follows the
/// target heading at the active movement speed.
pub fn apply_steering<B: MotionPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);

    let entities: Vec<(Entity, MotionConfig, f32)> = world
        .query::<(Entity, &MotionConfig, &MotionIntent, &MotionState)>()
        .iter(world)
        .map(|(e, config, intent, _)| (e, *config, intent.camera_yaw))
        .collect();

    for (entity, config, camera_yaw) in entities {
        let current_yaw = B::get_yaw(world, entity);

        let (new_yaw, velocity) = {
            let Some(mut state) = world.get_mut::<MotionState>(entity) else {
                continue;
            };

            if state.is_dodging {
                // Dodge owns horizontal displacement this tick
                state.horizontal_velocity = Vec3::ZERO;
                continue;
            }

            if !state.has_move_input() {
                state.horizontal_velocity = Vec3::ZERO;
                continue;
            }

            let target_yaw = state.move_direction.x.atan2(state.move_direction.y) + camera_yaw;
            let new_yaw = smooth_damp_angle(
                current_yaw,
                target_yaw,
                &mut state.turn_smooth_velocity,
                config.turn_smooth_time,
                dt,
            );

            // Displacement follows the target heading; the smoothed yaw is
            // cosmetic facing that trails it.
            let velocity = yaw_to_forward(target_yaw) * state.movement_speed;
            state.horizontal_velocity = velocity;

            (new_yaw, velocity)
        };

        B::set_yaw(world, entity, new_yaw);
        B::move_by(world, entity, velocity * dt);
    }
}

/// Trigger dodges and apply the active dodge displacement.
///
/// A dodge starts on a rising edge while grounded, outside an active dodge,
/// and past the cooldown. With locomotion input it bursts along the steering
/// heading; without, it backsteps along the character's current facing.
pub fn apply_dodge<B: MotionPhysicsBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);

    let entities: Vec<(Entity, MotionConfig, bool, f32)> = world
        .query::<(Entity, &MotionConfig, &MotionIntent, &MotionState)>()
        .iter(world)
        .map(|(e, config, intent, _)| (e, *config, intent.dodge_just_pressed(), intent.camera_yaw))
        .collect();

    for (entity, config, dodge_edge, camera_yaw) in entities {
        let current_yaw = B::get_yaw(world, entity);

        let Some(state) = world.get::<MotionState>(entity) else {
            continue;
        };
        let can_trigger = dodge_edge
            && state.is_grounded
            && !state.is_dodging
            && state.dodge_ready(config.dodge_cooldown);
        let move_direction = state.move_direction;

        if can_trigger {
            let direction = if move_direction != Vec2::ZERO {
                yaw_to_forward(move_direction.x.atan2(move_direction.y) + camera_yaw)
            } else {
                // No locomotion intent: backstep away from the current facing
                -yaw_to_forward(current_yaw)
            };

            if let Some(mut state) = world.get_mut::<MotionState>(entity) {
                state.is_dodging = true;
                state.dodge_vector = direction * config.dodge_speed;
                state.seconds_since_dodge = 0.0;
            }
        }

        let dodge_vector = world
            .get::<MotionState>(entity)
            .filter(|s| s.is_dodging)
            .map(|s| s.dodge_vector)
            .unwrap_or(Vec3::ZERO);

        if dodge_vector != Vec3::ZERO {
            B::move_by(world, entity, dodge_vector * dt);
        }
    }
}

/// Sync state marker components from the resolved [`MotionState`].
pub fn sync_state_markers(
    mut commands: Commands,
    q_states: Query<(
        Entity,
        &MotionState,
        Has<Grounded>,
        Has<Airborne>,
        Has<Dodging>,
    )>,
) {
    for (entity, state, has_grounded, has_airborne, has_dodging) in &q_states {
        // Sync Grounded/Airborne
        if state.is_grounded && !has_grounded {
            commands.entity(entity).insert(Grounded).remove::<Airborne>();
        } else if !state.is_grounded && !has_airborne {
            commands.entity(entity).insert(Airborne).remove::<Grounded>();
        }

        // Sync Dodging
        if state.is_dodging && !has_dodging {
            commands.entity(entity).insert(Dodging);
        } else if !state.is_dodging && has_dodging {
            commands.entity(entity).remove::<Dodging>();
        }
    }
}

/// Latch input edges at the end of each fixed tick.
pub fn settle_input_edges(mut q_intents: Query<&mut MotionIntent>) {
    for mut intent in &mut q_intents {
        intent.settle_edges();
    }
}
