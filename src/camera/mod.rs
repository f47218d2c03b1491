//! Camera system for the truss viewer.
//!
//! Provides an arcball-style orbit camera with perspective and orthographic
//! projection, animated transitions, and the GPU uniform handed to the
//! renderer.

/// Core camera struct, configuration, and orbit math.
pub mod core;
/// Perspective / orthographic projection matrices.
pub mod projection;
/// Eased camera transitions between configurations.
pub mod transition;
/// GPU uniform block built from a camera.
pub mod uniform;

pub use self::core::{
    Camera, CameraConfig, Framing, OrbitState, ProjectionMode, Sensitivity,
    DEFAULT_FIT_SCALE, MIN_EXTENT, POLAR_EPSILON,
};
pub use self::projection::{DepthRange, ProjectionManager};
pub use self::transition::{CameraTransition, TransitionStatus};
pub use self::uniform::CameraUniform;
