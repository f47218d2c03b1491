//! Preset definitions: the loose shape accepted at registration and the
//! validated preset stored in the registry.

use glam::DVec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraConfig, ProjectionMode};
use crate::error::{Result, ViewerError};

/// Field of view used when an orthographic preset omits one.
pub const DEFAULT_PRESET_FOV_DEG: f64 = 45.0;
/// Half-height used when a perspective preset omits one.
pub const DEFAULT_PRESET_ORTHO_SIZE: f64 = 1.0;

/// Unvalidated preset fields, as written in options files or built in code.
///
/// `position`, `target`, `up`, `mode`, `near` and `far` are required. `fov`
/// (radians) is required for perspective presets and `ortho_size` for
/// orthographic ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PresetConfig {
    /// Eye position `[x, y, z]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec<f64>>,
    /// Look-at point `[x, y, z]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec<f64>>,
    /// Up direction `[x, y, z]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up: Option<Vec<f64>>,
    /// `perspective` / `persp` or `orthographic` / `ortho`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Vertical field of view in radians.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fov: Option<f64>,
    /// Orthographic half-height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ortho_size: Option<f64>,
    /// Near clip distance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near: Option<f64>,
    /// Far clip distance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub far: Option<f64>,
}

impl PresetConfig {
    /// Validate and convert into a typed configuration.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] for missing or malformed
    /// fields, [`ViewerError::InvalidMode`] for an unknown mode string.
    pub fn resolve(&self) -> Result<CameraConfig> {
        let position = vec3("position", self.position.as_deref())?;
        let target = vec3("target", self.target.as_deref())?;
        let up = vec3("up", self.up.as_deref())?;
        let mode: ProjectionMode = required("mode", self.mode.as_deref())?.parse()?;
        let near = required("near", self.near)?;
        let far = required("far", self.far)?;
        let (fov, ortho_size) = match mode {
            ProjectionMode::Perspective => (
                required("fov", self.fov)?,
                self.ortho_size.unwrap_or(DEFAULT_PRESET_ORTHO_SIZE),
            ),
            ProjectionMode::Orthographic => (
                self.fov.unwrap_or_else(|| DEFAULT_PRESET_FOV_DEG.to_radians()),
                required("ortho_size", self.ortho_size)?,
            ),
        };
        let config = CameraConfig {
            position,
            target,
            up,
            mode,
            fov,
            ortho_size,
            near,
            far,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<&CameraConfig> for PresetConfig {
    fn from(config: &CameraConfig) -> Self {
        Self {
            position: Some(config.position.to_array().to_vec()),
            target: Some(config.target.to_array().to_vec()),
            up: Some(config.up.to_array().to_vec()),
            mode: Some(config.mode.as_str().to_owned()),
            fov: Some(config.fov),
            ortho_size: Some(config.ortho_size),
            near: Some(config.near),
            far: Some(config.far),
        }
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| {
        ViewerError::config(format!("missing required field '{field}'"))
    })
}

fn vec3(field: &str, value: Option<&[f64]>) -> Result<DVec3> {
    match required(field, value)? {
        [x, y, z] => Ok(DVec3::new(*x, *y, *z)),
        other => Err(ViewerError::config(format!(
            "field '{field}' must have 3 components, got {}",
            other.len()
        ))),
    }
}

/// A named, validated camera configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPreset {
    name: String,
    config: CameraConfig,
}

impl ViewPreset {
    pub(crate) fn new(name: String, config: CameraConfig) -> Self {
        Self { name, config }
    }

    /// Registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Camera configuration applied by this preset.
    #[must_use]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top() -> PresetConfig {
        PresetConfig {
            position: Some(vec![0.0, 5.0, 0.0]),
            target: Some(vec![0.0, 0.0, 0.0]),
            up: Some(vec![0.0, 0.0, -1.0]),
            mode: Some("ortho".into()),
            ortho_size: Some(1.0),
            near: Some(0.1),
            far: Some(10.0),
            ..PresetConfig::default()
        }
    }

    #[test]
    fn resolves_orthographic_preset_with_default_fov() {
        let config = top().resolve().unwrap();
        assert_eq!(config.mode, ProjectionMode::Orthographic);
        assert_eq!(config.position, DVec3::new(0.0, 5.0, 0.0));
        assert!((config.fov - 45f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn missing_fields_are_named() {
        let mut cfg = top();
        cfg.near = None;
        let err = cfg.resolve().unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("'near'"));

        let mut persp = top();
        persp.mode = Some("persp".into());
        let err = persp.resolve().unwrap_err();
        assert!(err.to_string().contains("'fov'"));
    }

    #[test]
    fn malformed_vectors_are_rejected() {
        let mut cfg = top();
        cfg.target = Some(vec![0.0, 0.0]);
        assert!(matches!(
            cfg.resolve(),
            Err(ViewerError::InvalidConfiguration(_))
        ));

        let mut cfg = top();
        cfg.up = Some(vec![0.0, f64::NAN, 0.0]);
        assert!(cfg.resolve().is_err());
    }

    #[test]
    fn unknown_mode_is_invalid_mode() {
        let mut cfg = top();
        cfg.mode = Some("cabinet".into());
        assert!(matches!(cfg.resolve(), Err(ViewerError::InvalidMode(_))));
    }

    #[test]
    fn typed_config_converts_back() {
        let config = top().resolve().unwrap();
        assert_eq!(PresetConfig::from(&config).resolve().unwrap(), config);
    }
}
