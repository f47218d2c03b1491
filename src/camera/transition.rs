//! Animated camera moves between two configurations.
//!
//! Intermediate frames are interpolated in orbit space (target, radius,
//! azimuth, polar angle) so the eye always sits on the orbit sphere of the
//! interpolated target. The final frame applies the end configuration
//! exactly.

use std::f64::consts::{PI, TAU};
use std::time::Duration;

use glam::DVec3;

use super::core::{Camera, CameraConfig, OrbitState, ProjectionMode};
use crate::util::easing::EasingFunction;

/// Result of advancing a transition by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    /// Still animating.
    Running,
    /// Reached the end configuration this tick.
    Finished,
    /// The camera was moved by hand; the transition was abandoned.
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
struct Pose {
    target: DVec3,
    orbit: OrbitState,
    up: DVec3,
    mode: ProjectionMode,
    fov: f64,
    ortho_size: f64,
    near: f64,
    far: f64,
}

impl Pose {
    fn of(camera: &Camera) -> Self {
        Self {
            target: camera.target(),
            orbit: camera.orbit_state(),
            up: camera.up(),
            mode: camera.mode(),
            fov: camera.fov(),
            ortho_size: camera.ortho_size(),
            near: camera.near(),
            far: camera.far(),
        }
    }

    fn from_config(config: &CameraConfig) -> Self {
        Self {
            target: config.target,
            orbit: OrbitState::from_offset(config.position - config.target),
            up: config.up,
            mode: config.mode,
            fov: config.fov,
            ortho_size: config.ortho_size,
            near: config.near,
            far: config.far,
        }
    }
}

/// An in-flight camera animation toward a fixed end configuration.
#[derive(Debug, Clone)]
pub struct CameraTransition {
    from: Pose,
    to: Pose,
    end: CameraConfig,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFunction,
    epoch: u64,
}

impl CameraTransition {
    /// Start animating `camera` toward `end`.
    #[must_use]
    pub fn new(
        camera: &Camera,
        end: CameraConfig,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from: Pose::of(camera),
            to: Pose::from_config(&end),
            end,
            duration,
            elapsed: Duration::ZERO,
            easing,
            epoch: camera.interaction_epoch(),
        }
    }

    /// Configuration the camera will hold once finished.
    #[must_use]
    pub fn end_config(&self) -> &CameraConfig {
        &self.end
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Advance by `dt` seconds and write the interpolated pose into
    /// `camera`.
    ///
    /// Negative or NaN steps count as zero; steps too large for a
    /// [`Duration`] finish the transition.
    pub fn advance(&mut self, camera: &mut Camera, dt: f32) -> TransitionStatus {
        if camera.interaction_epoch() != self.epoch {
            return TransitionStatus::Cancelled;
        }
        let step = Duration::try_from_secs_f32(dt.max(0.0)).unwrap_or(Duration::MAX);
        self.elapsed = self.elapsed.saturating_add(step);
        let t = self.progress();
        if t >= 1.0 {
            camera.apply_config(&self.end);
            return TransitionStatus::Finished;
        }
        self.write_pose(camera, self.easing.evaluate(t));
        TransitionStatus::Running
    }

    fn write_pose(&self, camera: &mut Camera, e: f64) {
        let (from, to) = (&self.from, &self.to);
        let target = from.target.lerp(to.target, e);
        let orbit = OrbitState {
            radius: lerp(from.orbit.radius, to.orbit.radius, e),
            theta: from.orbit.theta + shortest_arc(from.orbit.theta, to.orbit.theta) * e,
            phi: lerp(from.orbit.phi, to.orbit.phi, e),
        };
        let forward = -orbit.offset().normalize();
        let up = blend_up(from.up, to.up, forward, e);
        camera.set_pose(target, orbit, up);
        camera.set_lens(
            lerp(from.fov, to.fov, e),
            lerp(from.ortho_size, to.ortho_size, e),
            lerp(from.near, to.near, e),
            lerp(from.far, to.far, e),
        );
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Signed angle from `from` to `to` in `(-PI, PI]`.
fn shortest_arc(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

/// Interpolated up vector that never lines up with `forward`.
fn blend_up(from: DVec3, to: DVec3, forward: DVec3, t: f64) -> DVec3 {
    let usable = |up: DVec3| {
        up.length_squared() > 1e-12 && forward.cross(up.normalize()).length_squared() > 1e-12
    };
    let blended = from.normalize().lerp(to.normalize(), t);
    if usable(blended) {
        return blended.normalize();
    }
    if usable(to) {
        return to.normalize();
    }
    forward.any_orthonormal_vector()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso_camera() -> Camera {
        Camera::new(CameraConfig {
            position: DVec3::new(2.0, 2.0, 2.0),
            ..CameraConfig::default()
        })
        .unwrap()
    }

    fn front_config() -> CameraConfig {
        CameraConfig {
            position: DVec3::new(0.0, 0.0, 4.0),
            mode: ProjectionMode::Orthographic,
            ortho_size: 2.5,
            ..CameraConfig::default()
        }
    }

    #[test]
    fn shortest_arc_wraps() {
        assert!((shortest_arc(0.1, TAU - 0.1) + 0.2).abs() < 1e-12);
        assert!((shortest_arc(-3.0, 3.0) - (6.0 - TAU)).abs() < 1e-12);
        assert!((shortest_arc(1.0, 2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn intermediate_frames_stay_on_orbit_sphere() {
        let mut camera = iso_camera();
        let mut transition = CameraTransition::new(
            &camera,
            front_config(),
            Duration::from_millis(500),
            EasingFunction::SmoothStep,
        );
        let mut status = TransitionStatus::Running;
        let mut frames = 0;
        while status == TransitionStatus::Running {
            status = transition.advance(&mut camera, 0.05);
            let rebuilt = camera.target() + camera.orbit_state().offset();
            assert!((rebuilt - camera.position()).length() < 1e-6);
            assert!(!camera.view_matrix().is_nan());
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(status, TransitionStatus::Finished);
        assert_eq!(camera.config(), front_config());
        assert_eq!(camera.mode(), ProjectionMode::Orthographic);
    }

    #[test]
    fn mode_switches_only_at_the_end() {
        let mut camera = iso_camera();
        let mut transition = CameraTransition::new(
            &camera,
            front_config(),
            Duration::from_secs(1),
            EasingFunction::Linear,
        );
        assert_eq!(
            transition.advance(&mut camera, 0.5),
            TransitionStatus::Running
        );
        assert_eq!(camera.mode(), ProjectionMode::Perspective);
        assert!((transition.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn manual_orbit_cancels() {
        let mut camera = iso_camera();
        let mut transition = CameraTransition::new(
            &camera,
            front_config(),
            Duration::from_secs(1),
            EasingFunction::Linear,
        );
        let _ = transition.advance(&mut camera, 0.1);
        camera.orbit(5.0, 0.0);
        let held = camera.config();
        assert_eq!(
            transition.advance(&mut camera, 0.1),
            TransitionStatus::Cancelled
        );
        assert_eq!(camera.config(), held);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut camera = iso_camera();
        let mut transition = CameraTransition::new(
            &camera,
            front_config(),
            Duration::ZERO,
            EasingFunction::default(),
        );
        assert_eq!(
            transition.advance(&mut camera, 0.0),
            TransitionStatus::Finished
        );
        assert_eq!(camera.config(), front_config());
    }

    #[test]
    fn oversized_step_finishes_at_end_config() {
        let mut camera = iso_camera();
        let mut transition = CameraTransition::new(
            &camera,
            front_config(),
            Duration::from_secs(1),
            EasingFunction::Linear,
        );
        assert_eq!(
            transition.advance(&mut camera, f32::NAN),
            TransitionStatus::Running
        );
        assert_eq!(transition.progress(), 0.0);
        assert_eq!(
            transition.advance(&mut camera, f32::INFINITY),
            TransitionStatus::Finished
        );
        assert_eq!(transition.progress(), 1.0);
        assert_eq!(camera.config(), front_config());
    }

    #[test]
    fn up_blend_avoids_parallel_result() {
        let up = blend_up(DVec3::Y, DVec3::NEG_Y, DVec3::X, 0.5);
        assert!((up.length() - 1.0).abs() < 1e-9);
        assert!(DVec3::X.cross(up).length() > 0.5);
    }
}
