//! Per-frame camera block uploaded to the GPU.

use glam::DMat4;

use super::core::{Camera, ProjectionMode};
use super::projection::ProjectionManager;
use crate::error::Result;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform block handed to the renderer each frame.
pub struct CameraUniform {
    /// Combined projection * view matrix, column-major.
    pub view_proj: [[f32; 4]; 4],
    /// View matrix, column-major.
    pub view: [[f32; 4]; 4],
    /// Projection matrix, column-major.
    pub proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction.
    pub forward: [f32; 3],
    /// 0 = perspective, 1 = orthographic.
    pub orthographic: u32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Identity matrices looking down -Z.
    #[must_use]
    pub fn new() -> Self {
        let identity = DMat4::IDENTITY.as_mat4().to_cols_array_2d();
        Self {
            view_proj: identity,
            view: identity,
            proj: identity,
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            orthographic: 0,
        }
    }

    /// Refresh every field from the camera's current state.
    ///
    /// # Errors
    ///
    /// Propagates [`ProjectionManager::projection_matrix`] failures; the
    /// uniform is left untouched in that case.
    pub fn update(
        &mut self,
        camera: &Camera,
        projection: &ProjectionManager,
        aspect: f64,
    ) -> Result<()> {
        let proj = projection.projection_matrix(camera, aspect)?;
        let view = camera.view_matrix();
        self.view_proj = (proj * view).as_mat4().to_cols_array_2d();
        self.view = view.as_mat4().to_cols_array_2d();
        self.proj = proj.as_mat4().to_cols_array_2d();
        self.position = camera.position().as_vec3().to_array();
        self.aspect = aspect as f32;
        self.forward = camera.forward().as_vec3().to_array();
        self.orthographic = u32::from(camera.mode() == ProjectionMode::Orthographic);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::camera::core::CameraConfig;

    #[test]
    fn uniform_is_tightly_packed() {
        let uniform = CameraUniform::new();
        let bytes = bytemuck::bytes_of(&uniform);
        // three mat4s, then two vec3 + scalar pairs
        assert_eq!(bytes.len(), 3 * 64 + 32);
    }

    #[test]
    fn update_copies_camera_state() {
        let camera = Camera::new(CameraConfig {
            position: DVec3::new(0.0, 0.0, 4.0),
            ..CameraConfig::default()
        })
        .unwrap();
        let mut uniform = CameraUniform::new();
        uniform
            .update(&camera, &ProjectionManager::new(), 1.5)
            .unwrap();
        assert_eq!(uniform.position, [0.0, 0.0, 4.0]);
        assert_eq!(uniform.forward, [0.0, 0.0, -1.0]);
        assert_eq!(uniform.aspect, 1.5);
        assert_eq!(uniform.orthographic, 0);
        // view translates the eye to the origin
        assert_eq!(uniform.view[3][2], -4.0);
    }

    #[test]
    fn failed_update_leaves_uniform_untouched() {
        let camera = Camera::new(CameraConfig::default()).unwrap();
        let mut uniform = CameraUniform::new();
        assert!(uniform
            .update(&camera, &ProjectionManager::new(), -1.0)
            .is_err());
        assert_eq!(uniform, CameraUniform::new());
    }
}
