//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement
//! to work with the motion controller. This allows easy swapping
//! between physics engines (Rapier3D, custom, test doubles, etc.).

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the motion
/// controller. The backend handles collision-resolved movement, overlap
/// queries and transform access; the controller only ever talks to the
/// engine through these operations, so the core stays engine-agnostic and
/// unit-testable without a physics world.
///
/// # Example
///
/// For an example implementation, see the `rapier` module's `Rapier3dBackend`
/// which implements this trait for Bevy Rapier3D.
pub trait MotionPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Request a relative displacement for an entity.
    ///
    /// The backend resolves collisions (capsule sweep-and-slide) before the
    /// displacement lands on the transform. The controller may call this
    /// several times within one tick, once per contributing pipeline stage;
    /// requests accumulate in call order.
    fn move_by(world: &mut World, entity: Entity, translation: Vec3);

    /// Test a sphere against collidable geometry.
    ///
    /// Returns `true` if any collider overlaps the sphere. Used for ground
    /// detection at the configured ground-check point.
    ///
    /// # Arguments
    /// * `world` - The ECS world for queries
    /// * `origin` - Sphere center in world space
    /// * `radius` - Sphere radius
    /// * `exclude_entity` - Entity to exclude from the query (usually self)
    /// * `collision_groups` - Optional collision groups for filtering (memberships, filters)
    fn overlap_sphere(
        world: &mut World,
        origin: Vec3,
        radius: f32,
        exclude_entity: Entity,
        collision_groups: Option<(u32, u32)>,
    ) -> bool;

    /// Get the current position of an entity.
    fn get_position(world: &World, entity: Entity) -> Vec3;

    /// Get the current yaw of an entity (radians around the world up axis).
    fn get_yaw(world: &World, entity: Entity) -> f32;

    /// Set the yaw of an entity (radians around the world up axis).
    ///
    /// The controller owns the character's yaw; pitch and roll stay fixed.
    fn set_yaw(world: &mut World, entity: Entity, yaw: f32);

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 60.0)
    }

    /// Get the collision groups for an entity (memberships, filters).
    /// Returns None if the entity doesn't have collision groups.
    fn get_collision_groups(_world: &World, _entity: Entity) -> Option<(u32, u32)> {
        // Default implementation returns None
        None
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}
