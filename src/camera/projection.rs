//! Projection matrices for perspective and orthographic cameras.

use glam::DMat4;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::core::{Camera, ProjectionMode};
use crate::error::{Result, ViewerError};

/// Clip-space depth convention expected by the consuming renderer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DepthRange {
    /// OpenGL style: near maps to -1, far to +1.
    #[default]
    NegativeOneToOne,
    /// wgpu/Vulkan/D3D style: near maps to 0, far to 1.
    ZeroToOne,
}

/// Stateless builder of projection matrices.
///
/// With [`DepthRange::NegativeOneToOne`] the perspective matrix is the
/// classic `f = 1/tan(fov/2)` frustum with
/// `M[2,2] = (far+near)/(near-far)`, `M[2,3] = 2*far*near/(near-far)` and
/// `M[3,2] = -1` (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectionManager {
    depth: DepthRange,
}

impl ProjectionManager {
    /// Manager producing OpenGL-style `[-1, 1]` depth.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            depth: DepthRange::NegativeOneToOne,
        }
    }

    /// Manager producing the given depth convention.
    #[must_use]
    pub const fn with_depth_range(depth: DepthRange) -> Self {
        Self { depth }
    }

    /// Depth convention in use.
    #[must_use]
    pub const fn depth_range(&self) -> DepthRange {
        self.depth
    }

    /// Projection matrix for `camera` at the given viewport aspect ratio.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] if `aspect` is not a positive
    /// finite number.
    pub fn projection_matrix(&self, camera: &Camera, aspect: f64) -> Result<DMat4> {
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(ViewerError::config(format!(
                "aspect ratio must be positive, got {aspect}"
            )));
        }
        let (near, far) = (camera.near(), camera.far());
        let matrix = match (camera.mode(), self.depth) {
            (ProjectionMode::Perspective, DepthRange::NegativeOneToOne) => {
                DMat4::perspective_rh_gl(camera.fov(), aspect, near, far)
            }
            (ProjectionMode::Perspective, DepthRange::ZeroToOne) => {
                DMat4::perspective_rh(camera.fov(), aspect, near, far)
            }
            (ProjectionMode::Orthographic, depth) => {
                let half_h = camera.ortho_size();
                let half_w = half_h * aspect;
                match depth {
                    DepthRange::NegativeOneToOne => DMat4::orthographic_rh_gl(
                        -half_w, half_w, -half_h, half_h, near, far,
                    ),
                    DepthRange::ZeroToOne => DMat4::orthographic_rh(
                        -half_w, half_w, -half_h, half_h, near, far,
                    ),
                }
            }
        };
        Ok(matrix)
    }

    /// Combined `projection * view` matrix.
    ///
    /// # Errors
    ///
    /// Same as [`projection_matrix`](Self::projection_matrix).
    pub fn view_projection(&self, camera: &Camera, aspect: f64) -> Result<DMat4> {
        Ok(self.projection_matrix(camera, aspect)? * camera.view_matrix())
    }
}

#[cfg(test)]
mod tests {
    use glam::{DVec3, DVec4};

    use super::*;
    use crate::camera::core::CameraConfig;

    fn camera(mode: ProjectionMode) -> Camera {
        Camera::new(CameraConfig {
            position: DVec3::new(0.0, 0.0, 5.0),
            mode,
            fov: 45f64.to_radians(),
            ortho_size: 2.0,
            near: 0.1,
            far: 100.0,
            ..CameraConfig::default()
        })
        .unwrap()
    }

    // (row, col) accessor
    fn at(m: &DMat4, row: usize, col: usize) -> f64 {
        m.col(col)[row]
    }

    #[test]
    fn perspective_matches_gl_frustum() {
        let cam = camera(ProjectionMode::Perspective);
        let aspect = 16.0 / 9.0;
        let m = ProjectionManager::new().projection_matrix(&cam, aspect).unwrap();
        let f = 1.0 / (45f64.to_radians() / 2.0).tan();
        let (near, far) = (0.1, 100.0);
        assert!((at(&m, 0, 0) - f / aspect).abs() < 1e-12);
        assert!((at(&m, 1, 1) - f).abs() < 1e-12);
        assert!((at(&m, 2, 2) - (far + near) / (near - far)).abs() < 1e-12);
        assert!((at(&m, 2, 3) - 2.0 * far * near / (near - far)).abs() < 1e-12);
        assert_eq!(at(&m, 3, 2), -1.0);
        assert_eq!(at(&m, 3, 3), 0.0);
    }

    #[test]
    fn perspective_maps_clip_planes_to_unit_depth() {
        let cam = camera(ProjectionMode::Perspective);
        let m = ProjectionManager::new().projection_matrix(&cam, 1.0).unwrap();
        let near = m * DVec4::new(0.0, 0.0, -0.1, 1.0);
        let far = m * DVec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-9);
        assert!((far.z / far.w - 1.0).abs() < 1e-9);

        let zero_one = ProjectionManager::with_depth_range(DepthRange::ZeroToOne)
            .projection_matrix(&cam, 1.0)
            .unwrap();
        let near = zero_one * DVec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((near.z / near.w).abs() < 1e-9);
    }

    #[test]
    fn orthographic_uses_half_height_and_aspect() {
        let cam = camera(ProjectionMode::Orthographic);
        let m = ProjectionManager::new().projection_matrix(&cam, 2.0).unwrap();
        assert!((at(&m, 0, 0) - 1.0 / 4.0).abs() < 1e-12);
        assert!((at(&m, 1, 1) - 1.0 / 2.0).abs() < 1e-12);
        assert!((at(&m, 2, 2) + 2.0 / 99.9).abs() < 1e-12);
        assert!((at(&m, 2, 3) + 100.1 / 99.9).abs() < 1e-12);
        assert_eq!(at(&m, 3, 3), 1.0);
    }

    #[test]
    fn rejects_bad_aspect() {
        let cam = camera(ProjectionMode::Perspective);
        let pm = ProjectionManager::new();
        assert!(pm.projection_matrix(&cam, 0.0).is_err());
        assert!(pm.projection_matrix(&cam, f64::NAN).is_err());
    }
}
