use std::time::Duration;

use glam::DVec3;
use rustc_hash::FxHashMap;

use super::preset::{PresetConfig, ViewPreset, DEFAULT_PRESET_FOV_DEG};
use crate::camera::{
    Camera, CameraConfig, CameraTransition, Framing, ProjectionMode,
    TransitionStatus,
};
use crate::error::{Result, ViewerError};
use crate::util::easing::EasingFunction;

/// Name of the preset most recently applied, tagged with the camera's
/// interaction epoch at that moment.
#[derive(Debug, Clone)]
struct AppliedView {
    name: String,
    epoch: u64,
}

/// Registry of named camera presets, and owner of the camera they drive.
///
/// Presets keep their first-insertion order; re-adding a name replaces the
/// payload in place.
#[derive(Debug, Clone)]
pub struct ViewManager {
    camera: Camera,
    presets: Vec<ViewPreset>,
    index: FxHashMap<String, usize>,
    applied: Option<AppliedView>,
    transition: Option<CameraTransition>,
}

impl ViewManager {
    /// Manage `camera` with an empty registry.
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            presets: Vec::new(),
            index: FxHashMap::default(),
            applied: None,
            transition: None,
        }
    }

    /// The managed camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access for orbit/pan/zoom/fit/reset.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Validate `config` and store it under `name`.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] or [`ViewerError::InvalidMode`]
    /// from [`PresetConfig::resolve`]; the registry is unchanged on error.
    pub fn add(&mut self, name: &str, config: &PresetConfig) -> Result<()> {
        let config = config.resolve()?;
        self.add_config(name, config)
    }

    /// Store an already typed configuration under `name`.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] if `config` does not validate.
    pub fn add_config(&mut self, name: &str, config: CameraConfig) -> Result<()> {
        config.validate()?;
        let preset = ViewPreset::new(name.to_owned(), config);
        match self.index.get(name) {
            Some(&slot) => {
                log::debug!("redefining view preset '{name}'");
                self.presets[slot] = preset;
            }
            None => {
                let _ = self.index.insert(name.to_owned(), self.presets.len());
                self.presets.push(preset);
            }
        }
        Ok(())
    }

    /// Register `Top`, `Front`, `Side` and `Iso` around `center`, each
    /// `distance` away along its axis. The far plane is at least ten
    /// preset distances out.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] if `distance` is not positive
    /// or `center` is not finite.
    pub fn add_standard_presets(&mut self, center: DVec3, distance: f64) -> Result<()> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(ViewerError::config(format!(
                "preset distance must be positive, got {distance}"
            )));
        }
        let base = CameraConfig {
            target: center,
            mode: ProjectionMode::Orthographic,
            fov: 60f64.to_radians(),
            ortho_size: 1.0,
            near: 0.1,
            far: (distance * 10.0).max(10.0),
            ..CameraConfig::default()
        };
        let standard = [
            ("Top", DVec3::Y, DVec3::NEG_Z),
            ("Front", DVec3::Z, DVec3::Y),
            ("Side", DVec3::X, DVec3::Y),
        ];
        for (name, axis, up) in standard {
            self.add_config(
                name,
                CameraConfig {
                    position: center + axis * distance,
                    up,
                    ..base
                },
            )?;
        }
        self.add_config(
            "Iso",
            CameraConfig {
                position: center + DVec3::ONE * distance,
                up: DVec3::Y,
                mode: ProjectionMode::Perspective,
                fov: DEFAULT_PRESET_FOV_DEG.to_radians(),
                ..base
            },
        )
    }

    /// Look up a preset by name.
    #[must_use]
    pub fn preset(&self, name: &str) -> Option<&ViewPreset> {
        self.index.get(name).map(|&i| &self.presets[i])
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names in insertion order.
    #[must_use]
    pub fn presets(&self) -> Vec<&str> {
        self.presets.iter().map(ViewPreset::name).collect()
    }

    /// Apply a preset to the camera, replacing every field.
    ///
    /// # Errors
    ///
    /// [`ViewerError::PresetNotFound`] if `name` is unregistered; the camera
    /// is untouched in that case.
    pub fn go_to(&mut self, name: &str) -> Result<()> {
        let config = *self.lookup(name)?.config();
        self.transition = None;
        self.camera.apply_config(&config);
        self.mark_applied(name);
        log::debug!("applied view preset '{name}'");
        Ok(())
    }

    /// Animate toward a preset, optionally framed on `framing`.
    ///
    /// The end state equals [`go_to`](Self::go_to) followed by
    /// [`Camera::frame`]. A zero `duration` applies it immediately.
    ///
    /// # Errors
    ///
    /// [`ViewerError::PresetNotFound`] if `name` is unregistered.
    pub fn transition_to(
        &mut self,
        name: &str,
        framing: Option<&Framing>,
        duration: Duration,
        easing: EasingFunction,
    ) -> Result<()> {
        let config = *self.lookup(name)?.config();
        let mut end = self.camera.clone();
        end.apply_config(&config);
        if let Some(framing) = framing {
            end.frame(framing);
        }
        let end = end.config();

        if duration.is_zero() {
            self.transition = None;
            self.camera.apply_config(&end);
        } else {
            log::debug!("transition to '{name}' over {duration:?}");
            self.transition = Some(CameraTransition::new(&self.camera, end, duration, easing));
        }
        self.mark_applied(name);
        Ok(())
    }

    /// Advance any running transition by `dt` seconds. Returns `true` while
    /// still animating.
    pub fn update(&mut self, dt: f32) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        match transition.advance(&mut self.camera, dt) {
            TransitionStatus::Running => true,
            TransitionStatus::Finished => {
                self.transition = None;
                false
            }
            TransitionStatus::Cancelled => {
                log::debug!("camera transition cancelled by user input");
                self.transition = None;
                false
            }
        }
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Name of the preset the camera currently shows, or `None` once the
    /// user has orbited, panned, zoomed or reset since it was applied.
    ///
    /// Advisory only; intended for overlays.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.applied
            .as_ref()
            .filter(|a| a.epoch == self.camera.interaction_epoch())
            .map(|a| a.name.as_str())
    }

    fn lookup(&self, name: &str) -> Result<&ViewPreset> {
        self.preset(name)
            .ok_or_else(|| ViewerError::PresetNotFound(name.to_owned()))
    }

    fn mark_applied(&mut self, name: &str) {
        self.applied = Some(AppliedView {
            name: name.to_owned(),
            epoch: self.camera.interaction_epoch(),
        });
    }
}
