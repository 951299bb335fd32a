//! # `tpc_motion_controller`
//!
//! A camera-relative third-person motion controller for kinematic characters,
//! with physics backend abstraction.
//!
//! This crate provides a deterministic, frame-stepped motion controller that:
//! - Detects ground contact with a sphere overlap probe at a configurable point
//! - Integrates gravity with a grounded stick bias and a hard fall-speed clamp
//! - Supports jump and one mid-air double jump, re-armed on landing
//! - Performs a timed directional dodge with a cooldown, mutually exclusive
//!   with steering
//! - Steers the character toward the camera-relative input heading with
//!   framerate-independent angular smoothing
//! - Abstracts the physics engine behind a small trait (Rapier3D included)
//!
//! ## Architecture
//!
//! The controller is a fixed-order per-tick pipeline where:
//! 1. Input is snapshotted once per fixed tick into a [`MotionIntent`]
//! 2. The pipeline resolves grounding, gravity, jump, steering and dodge
//!    against the shared [`MotionState`]
//! 3. Each resolving stage issues its own relative displacement request to the
//!    backend, which resolves collisions (capsule sweep-and-slide)
//!
//! [`MotionIntent`]: crate::intent::MotionIntent
//! [`MotionState`]: crate::state::MotionState
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use tpc_motion_controller::prelude::*;
//!
//! // Components for a player character
//! let config = MotionConfig::player();
//! let intent = MotionIntent::default();
//! let state = MotionState::default();
//! ```

use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod intent;
pub mod smoothing;
pub mod state;
pub mod systems;

#[cfg(feature = "rapier3d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::backend::MotionPhysicsBackend;
    pub use crate::config::MotionConfig;
    pub use crate::intent::MotionIntent;
    pub use crate::state::{Airborne, Dodging, Grounded, MotionState};
    pub use crate::MotionControllerPlugin;

    #[cfg(feature = "rapier3d")]
    pub use crate::rapier::{Rapier3dBackend, Rapier3dCharacterBundle};
}

/// Main plugin for the motion controller system.
///
/// This plugin is generic over a physics backend `B` which provides the actual
/// physics operations (collision-resolved movement, overlap queries).
///
/// # Type Parameters
/// - `B`: The physics backend implementation (e.g., `Rapier3dBackend`)
///
/// # Examples
///
/// With the Rapier3D backend:
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_rapier3d::prelude::*;
/// use tpc_motion_controller::prelude::*;
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(TransformPlugin)
///     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
///     .add_plugins(MotionControllerPlugin::<Rapier3dBackend>::default())
///     .run();
/// ```
pub struct MotionControllerPlugin<B: backend::MotionPhysicsBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::MotionPhysicsBackend> Default for MotionControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::MotionPhysicsBackend> Plugin for MotionControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::MotionConfig>();
        app.register_type::<intent::MotionIntent>();
        app.register_type::<state::MotionState>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<state::Dodging>();

        // Add the physics backend plugin
        app.add_plugins(B::plugin());

        // The per-tick pipeline. The order is load-bearing: later stages read
        // flags written by earlier stages in the same tick, and every
        // resolving stage issues its own displacement request in this order.
        app.add_systems(
            FixedUpdate,
            (
                systems::update_ground_detection::<B>,
                systems::refresh_stance_flags,
                systems::expire_dodge,
                systems::select_movement_speed,
                systems::sample_locomotion,
                systems::apply_gravity::<B>,
                systems::apply_jump::<B>,
                systems::apply_steering::<B>,
                systems::apply_dodge::<B>,
                systems::sync_state_markers,
            )
                .chain(),
        );

        // Latch input edges at end of fixed update so rising-edge detection
        // spans exactly one tick.
        app.add_systems(FixedPostUpdate, systems::settle_input_edges);
    }
}
