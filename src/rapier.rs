//! Rapier3D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier3D.
//! Enable with the `rapier3d` feature.

use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::backend::{MotionPhysicsBackend, NoOpBackendPlugin};

/// Rapier3D physics backend for the motion controller.
///
/// Displacement requests accumulate into Rapier's
/// [`KinematicCharacterController`], whose sweep-and-slide pass resolves
/// collisions when the physics step runs. The ground probe uses a shape
/// intersection query against the Rapier context.
pub struct Rapier3dBackend;

impl MotionPhysicsBackend for Rapier3dBackend {
    fn plugin() -> impl Plugin {
        NoOpBackendPlugin
    }

    fn move_by(world: &mut World, entity: Entity, translation: Vec3) {
        if let Some(mut controller) = world.get_mut::<KinematicCharacterController>(entity) {
            // Requests from all pipeline stages of this tick accumulate;
            // Rapier consumes the sum in its next character-control pass.
            let pending = controller.translation.unwrap_or(Vec3::ZERO);
            controller.translation = Some(pending + translation);
        } else {
            warn!(
                "motion entity {entity:?} has no KinematicCharacterController; dropping move request"
            );
        }
    }

    fn overlap_sphere(
        world: &mut World,
        origin: Vec3,
        radius: f32,
        exclude_entity: Entity,
        collision_groups: Option<(u32, u32)>,
    ) -> bool {
        let mut context_state: SystemState<Query<&RapierContext, With<DefaultRapierContext>>> =
            SystemState::new(world);
        let rapier_context = context_state.get(world);
        let Ok(context) = rapier_context.get_single() else {
            return false;
        };

        let mut filter = QueryFilter::default()
            .exclude_rigid_body(exclude_entity)
            .exclude_sensors();
        if let Some((memberships, filters)) = collision_groups {
            filter = filter.groups(CollisionGroups::new(
                Group::from_bits_truncate(memberships),
                Group::from_bits_truncate(filters),
            ));
        }

        context
            .intersection_with_shape(origin, Quat::IDENTITY, &Collider::ball(radius), filter)
            .is_some()
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Transform>(entity)
            .map(|t| t.translation)
            .or_else(|| {
                world
                    .get::<GlobalTransform>(entity)
                    .map(|t| t.translation())
            })
            .unwrap_or(Vec3::ZERO)
    }

    fn get_yaw(world: &World, entity: Entity) -> f32 {
        world
            .get::<Transform>(entity)
            .map(|t| t.rotation.to_euler(EulerRot::YXZ).0)
            .unwrap_or(0.0)
    }

    fn set_yaw(world: &mut World, entity: Entity, yaw: f32) {
        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.rotation = Quat::from_rotation_y(yaw);
        }
    }

    fn get_collision_groups(world: &World, entity: Entity) -> Option<(u32, u32)> {
        world
            .get::<CollisionGroups>(entity)
            .map(|cg| (cg.memberships.bits(), cg.filters.bits()))
    }
}

/// Physics components for a motion-controlled character using Rapier3D.
///
/// Spawn this alongside a `Collider` (typically a capsule), the controller
/// components and a `Transform`:
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_rapier3d::prelude::*;
/// use tpc_motion_controller::prelude::*;
///
/// fn spawn_player(mut commands: Commands) {
///     commands.spawn((
///         Transform::from_xyz(0.0, 2.0, 0.0),
///         Collider::capsule_y(0.5, 0.4),
///         Rapier3dCharacterBundle::default(),
///         MotionConfig::player(),
///         MotionIntent::default(),
///         MotionState::default(),
///     ));
/// }
/// ```
#[derive(Bundle)]
pub struct Rapier3dCharacterBundle {
    /// Position-based kinematic body: the controller dictates motion,
    /// Rapier resolves collisions.
    pub rigid_body: RigidBody,
    /// Rapier's sweep-and-slide character controller.
    pub controller: KinematicCharacterController,
}

impl Default for Rapier3dCharacterBundle {
    fn default() -> Self {
        Self {
            rigid_body: RigidBody::KinematicPositionBased,
            controller: KinematicCharacterController {
                offset: CharacterLength::Absolute(0.02),
                slide: true,
                ..default()
            },
        }
    }
}

impl Rapier3dCharacterBundle {
    /// Create a bundle with the default kinematic setup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rigid body type.
    ///
    /// [`RigidBody::KinematicPositionBased`] (the default) is the right choice
    /// for this controller: motion is dictated per tick and Rapier resolves
    /// the collisions. Use [`RigidBody::KinematicVelocityBased`] only if some
    /// other system drives the body between controller ticks.
    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.rigid_body = body;
        self
    }

    /// Set the character controller's collision skin offset.
    ///
    /// A small gap Rapier keeps between the capsule and obstacles to avoid
    /// jitter from floating point contact resolution.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.controller.offset = CharacterLength::Absolute(offset);
        self
    }

    /// Enable or disable sliding along obstacles.
    pub fn with_slide(mut self, slide: bool) -> Self {
        self.controller.slide = slide;
        self
    }
}
