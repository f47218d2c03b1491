use std::fmt;
use std::str::FromStr;

use glam::{DMat4, DVec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::mesh::MeshBounds;

/// Polar-angle margin kept away from the poles by [`Camera::orbit`].
pub const POLAR_EPSILON: f64 = 0.01;
/// Smallest radius / orthographic half-height zoom and fit will produce.
pub const MIN_EXTENT: f64 = 1e-3;
/// Default distance multiplier applied to a bounding radius by fit.
pub const DEFAULT_FIT_SCALE: f64 = 3.0;

/// Projection model used by a [`Camera`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Symmetric perspective frustum driven by the vertical fov.
    #[default]
    Perspective,
    /// Orthographic box driven by the half-height.
    Orthographic,
}

impl ProjectionMode {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perspective => "perspective",
            Self::Orthographic => "orthographic",
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionMode {
    type Err = ViewerError;

    /// Accepts `perspective`/`persp` and `orthographic`/`ortho`, any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perspective" | "persp" => Ok(Self::Perspective),
            "orthographic" | "ortho" => Ok(Self::Orthographic),
            _ => Err(ViewerError::InvalidMode(s.to_owned())),
        }
    }
}

/// A complete, validated camera configuration.
///
/// Used for the camera's initial state, for preset payloads, and as the
/// end state of animated transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Eye position in world space.
    pub position: DVec3,
    /// Look-at point.
    pub target: DVec3,
    /// Up direction.
    pub up: DVec3,
    /// Projection model.
    pub mode: ProjectionMode,
    /// Vertical field of view in radians (perspective).
    pub fov: f64,
    /// Half-height of the view volume (orthographic).
    pub ortho_size: f64,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance.
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: DVec3::splat(1.5),
            target: DVec3::ZERO,
            up: DVec3::Y,
            mode: ProjectionMode::Perspective,
            fov: 60f64.to_radians(),
            ortho_size: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    /// Check every invariant a camera relies on.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] naming the first violation.
    pub fn validate(&self) -> Result<()> {
        let vectors = [
            ("position", self.position),
            ("target", self.target),
            ("up", self.up),
        ];
        for (name, v) in vectors {
            if !v.is_finite() {
                return Err(ViewerError::config(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        let offset = self.position - self.target;
        if offset.length() <= f64::EPSILON {
            return Err(ViewerError::config(
                "position coincides with target",
            ));
        }
        if self.up.length() <= f64::EPSILON {
            return Err(ViewerError::config("up vector has zero length"));
        }
        if offset.normalize().cross(self.up.normalize()).length() < 1e-9 {
            return Err(ViewerError::config(
                "up vector is parallel to the view direction",
            ));
        }
        if !(self.near.is_finite() && self.near > 0.0) {
            return Err(ViewerError::config(format!(
                "near must be positive, got {}",
                self.near
            )));
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(ViewerError::config(format!(
                "far ({}) must exceed near ({})",
                self.far, self.near
            )));
        }
        if !(self.fov > 0.0 && self.fov < std::f64::consts::PI) {
            return Err(ViewerError::config(format!(
                "fov must lie in (0, pi) radians, got {}",
                self.fov
            )));
        }
        if !(self.ortho_size.is_finite() && self.ortho_size > 0.0) {
            return Err(ViewerError::config(format!(
                "ortho_size must be positive, got {}",
                self.ortho_size
            )));
        }
        Ok(())
    }
}

/// Spherical orbit parameters around the camera target, measured from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Distance from target to eye.
    pub radius: f64,
    /// Azimuth in the XZ plane, radians from +X toward +Z.
    pub theta: f64,
    /// Polar angle from +Y, radians.
    pub phi: f64,
}

impl OrbitState {
    /// Derive the spherical state of an eye offset from its target.
    #[must_use]
    pub fn from_offset(offset: DVec3) -> Self {
        let radius = offset.length();
        if radius <= f64::EPSILON {
            return Self {
                radius: MIN_EXTENT,
                theta: 0.0,
                phi: std::f64::consts::FRAC_PI_2,
            };
        }
        Self {
            radius,
            theta: offset.z.atan2(offset.x),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    /// Cartesian offset from target to eye.
    #[must_use]
    pub fn offset(&self) -> DVec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.radius * DVec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta)
    }
}

/// Per-unit input scaling for orbit, pan and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensitivity {
    /// Radians per pixel of drag.
    pub orbit: f64,
    /// Fraction of the orbit radius per pixel of drag.
    pub pan: f64,
    /// Fractional distance change per scroll unit.
    pub zoom: f64,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self {
            orbit: 0.005,
            pan: 0.002,
            zoom: 0.1,
        }
    }
}

/// Bounding sphere plus the distance multiplier used to frame it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    /// Sphere to keep in view.
    pub bounds: MeshBounds,
    /// Multiplier applied to the bounding radius.
    pub scale: f64,
}

impl Framing {
    /// Frame `bounds` with the default scale.
    #[must_use]
    pub const fn new(bounds: MeshBounds) -> Self {
        Self {
            bounds,
            scale: DEFAULT_FIT_SCALE,
        }
    }
}

/// Arcball-style camera orbiting a target point.
///
/// The eye always sits at `target + orbit.offset()`; pan translates eye
/// and target together, which leaves that relationship untouched.
#[derive(Debug, Clone)]
pub struct Camera {
    position: DVec3,
    target: DVec3,
    up: DVec3,
    mode: ProjectionMode,
    fov: f64,
    ortho_size: f64,
    near: f64,
    far: f64,
    orbit: OrbitState,
    sensitivity: Sensitivity,
    initial: CameraConfig,
    /// Bumped by every manual interaction (orbit, pan, zoom, reset).
    epoch: u64,
}

impl Camera {
    /// Create a camera from a validated initial configuration.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] if `config` fails
    /// [`CameraConfig::validate`].
    pub fn new(config: CameraConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            position: config.position,
            target: config.target,
            up: config.up,
            mode: config.mode,
            fov: config.fov,
            ortho_size: config.ortho_size,
            near: config.near,
            far: config.far,
            orbit: OrbitState::from_offset(config.position - config.target),
            sensitivity: Sensitivity::default(),
            initial: config,
            epoch: 0,
        })
    }

    /// Replace the input sensitivities.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Eye position.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Look-at point.
    #[must_use]
    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// Up direction.
    #[must_use]
    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Projection model.
    #[must_use]
    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fov(&self) -> f64 {
        self.fov
    }

    /// Orthographic half-height.
    #[must_use]
    pub fn ortho_size(&self) -> f64 {
        self.ortho_size
    }

    /// Near clip distance.
    #[must_use]
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Far clip distance.
    #[must_use]
    pub fn far(&self) -> f64 {
        self.far
    }

    /// Spherical orbit state around the target.
    #[must_use]
    pub fn orbit_state(&self) -> OrbitState {
        self.orbit
    }

    /// Input sensitivities used by [`orbit`](Self::orbit),
    /// [`pan`](Self::pan) and [`zoom`](Self::zoom).
    #[must_use]
    pub fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    /// The configuration captured at construction.
    #[must_use]
    pub fn initial_config(&self) -> &CameraConfig {
        &self.initial
    }

    /// Counter of manual interactions; changes whenever the user moves
    /// the camera by hand.
    #[must_use]
    pub fn interaction_epoch(&self) -> u64 {
        self.epoch
    }

    /// Snapshot of the current state as a configuration.
    #[must_use]
    pub fn config(&self) -> CameraConfig {
        CameraConfig {
            position: self.position,
            target: self.target,
            up: self.up,
            mode: self.mode,
            fov: self.fov,
            ortho_size: self.ortho_size,
            near: self.near,
            far: self.far,
        }
    }

    /// Unit vector from eye toward target.
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        let offset = self.orbit.offset();
        let stored = self.position - self.target;
        // the stored eye loses a small offset added to a distant target;
        // the orbit angles still know where it sits
        if stored.abs_diff_eq(offset, offset.length() * 1e-6) {
            -stored.normalize()
        } else {
            -offset.normalize()
        }
    }

    /// Restore the construction-time configuration.
    pub fn reset(&mut self) {
        let initial = self.initial;
        self.apply_config(&initial);
        self.bump_epoch();
        log::debug!("camera reset to initial configuration");
    }

    /// Orbit using the configured sensitivity.
    pub fn orbit(&mut self, dx: f64, dy: f64) {
        self.orbit_with(dx, dy, self.sensitivity.orbit);
    }

    /// Orbit around the target by screen deltas.
    ///
    /// The polar angle is clamped to `[POLAR_EPSILON, PI - POLAR_EPSILON]`.
    /// Orbit angles are measured around world +Y, so a preset-supplied up
    /// vector is re-aligned to +Y here. When the eye sits on the polar axis
    /// (a top or bottom view) the azimuth is first chosen so the screen-right
    /// direction survives the re-alignment. Non-finite deltas are ignored.
    pub fn orbit_with(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        use std::f64::consts::PI;

        let d_theta = dx * sensitivity;
        let d_phi = dy * sensitivity;
        if !d_theta.is_finite() || !d_phi.is_finite() {
            log::warn!("ignoring non-finite orbit delta ({d_theta}, {d_phi})");
            return;
        }

        if !self.up.abs_diff_eq(DVec3::Y, 1e-9) && self.orbit.phi.sin() < POLAR_EPSILON {
            // with up = +Y, screen-right at either pole is (sin θ, 0, -cos θ)
            let right = self.forward().cross(self.up);
            self.orbit.theta = right.x.atan2(-right.z);
        }

        self.orbit.theta += d_theta;
        self.orbit.phi = (self.orbit.phi + d_phi).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.up = DVec3::Y;
        self.position = self.target + self.orbit.offset();
        self.bump_epoch();
    }

    /// Pan using the configured sensitivity.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_with(dx, dy, self.sensitivity.pan);
    }

    /// Translate eye and target together in the view plane.
    ///
    /// Speed scales with the orbit radius. Orbit angles are left as they
    /// were; the offset between eye and target does not change.
    pub fn pan_with(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        let view_dir = self.forward();
        let right = view_dir.cross(self.up).normalize();
        let up = right.cross(view_dir).normalize();
        let shift = (-right * dx + up * dy) * sensitivity * self.orbit.radius;
        if !shift.is_finite() {
            log::warn!("ignoring non-finite pan shift {shift}");
            return;
        }
        self.position += shift;
        self.target += shift;
        self.bump_epoch();
    }

    /// Zoom using the configured sensitivity.
    pub fn zoom(&mut self, delta: f64) {
        self.zoom_with(delta, self.sensitivity.zoom);
    }

    /// Zoom by `delta` scroll units.
    ///
    /// Perspective cameras move the eye along the view direction;
    /// orthographic cameras shrink or grow the visible half-height.
    /// Either extent is floored at [`MIN_EXTENT`].
    pub fn zoom_with(&mut self, delta: f64, sensitivity: f64) {
        let factor = 1.0 - delta * sensitivity;
        if !factor.is_finite() {
            log::warn!("ignoring non-finite zoom factor {factor}");
            return;
        }
        match self.mode {
            ProjectionMode::Perspective => {
                let view_dir = self.forward();
                self.orbit.radius = (self.orbit.radius * factor).max(MIN_EXTENT);
                self.position = self.target - view_dir * self.orbit.radius;
            }
            ProjectionMode::Orthographic => {
                self.ortho_size = (self.ortho_size * factor).max(MIN_EXTENT);
            }
        }
        self.bump_epoch();
    }

    /// Re-center on `center` and back off to `radius * scale`, keeping the
    /// current viewing angle.
    ///
    /// The stored orbit radius is never below [`MIN_EXTENT`], even when the
    /// eye offset is too small to survive addition to a distant center.
    pub fn fit(&mut self, center: DVec3, radius: f64, scale: f64) {
        let distance = radius * scale;
        if !center.is_finite() || !distance.is_finite() {
            log::warn!("ignoring fit to {center} with distance {distance}");
            return;
        }
        self.target = center;
        self.orbit.radius = distance.max(MIN_EXTENT);
        self.position = self.target + self.orbit.offset();
        let derived = OrbitState::from_offset(self.position - self.target);
        if (derived.radius - self.orbit.radius).abs() <= self.orbit.radius * 1e-6 {
            self.orbit = OrbitState {
                radius: derived.radius.max(MIN_EXTENT),
                ..derived
            };
        }
        log::debug!(
            "camera fit: center {center}, distance {:.4}",
            self.orbit.radius
        );
    }

    /// [`fit`](Self::fit) to a framing request.
    pub fn frame(&mut self, framing: &Framing) {
        self.fit(
            framing.bounds.centroid,
            framing.bounds.radius,
            framing.scale,
        );
    }

    /// Right-handed look-at view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_to_rh(self.position, self.forward(), self.up)
    }

    /// Overwrite every field from `config` and re-derive the orbit state.
    ///
    /// Does not count as a manual interaction.
    pub(crate) fn apply_config(&mut self, config: &CameraConfig) {
        self.position = config.position;
        self.target = config.target;
        self.up = config.up;
        self.mode = config.mode;
        self.fov = config.fov;
        self.ortho_size = config.ortho_size;
        self.near = config.near;
        self.far = config.far;
        self.orbit = OrbitState::from_offset(self.position - self.target);
    }

    /// Place the eye from a spherical pose without counting an interaction.
    pub(crate) fn set_pose(&mut self, target: DVec3, orbit: OrbitState, up: DVec3) {
        self.target = target;
        self.orbit = orbit;
        self.up = up;
        self.position = target + orbit.offset();
    }

    /// Set the lens parameters without counting an interaction.
    pub(crate) fn set_lens(&mut self, fov: f64, ortho_size: f64, near: f64, far: f64) {
        self.fov = fov;
        self.ortho_size = ortho_size;
        self.near = near;
        self.far = far;
    }

    fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}
