//! Small shared helpers.

/// Easing curves for camera transitions.
pub mod easing;
/// Frame timing with smoothed FPS.
pub mod frame_timing;
