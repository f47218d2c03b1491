//! The assembled viewer: camera, presets, projection and input wired
//! together around a scene collaborator.
//!
//! Construction is two-phase. [`ViewerBuilder`] collects configuration
//! without side effects; [`ViewerBuilder::build`] validates all of it,
//! applies the initial view, and hands back a fully linked [`Viewer`].
//!
//! ```no_run
//! # use trussview::{CameraConfig, DisplayState, MeshBounds, ViewerBuilder};
//! # fn main() -> trussview::Result<()> {
//! let mut viewer = ViewerBuilder::new(CameraConfig::default())
//!     .bounds(MeshBounds::from_points(&[]))
//!     .initial_view("Iso")
//!     .build(DisplayState::new(3), || {})?;
//! viewer.on_key("1")?;
//! let uniform = viewer.uniform(16.0 / 9.0)?;
//! # let _ = uniform;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use glam::{DMat4, DVec3};

use crate::camera::{
    Camera, CameraConfig, CameraUniform, Framing, ProjectionManager,
    DEFAULT_FIT_SCALE,
};
use crate::command::ViewerCommand;
use crate::error::{Result, ViewerError};
use crate::hud::{HudSnapshot, CUSTOM_VIEW};
use crate::input::{InputController, InputEvent, KeyBindings, MouseButton};
use crate::mesh::{BoundsProvider, MeshBounds};
use crate::options::ViewerOptions;
use crate::scene::SceneControls;
use crate::util::easing::EasingFunction;
use crate::views::{PresetConfig, ViewManager};

/// Smallest distance at which standard presets are placed.
const MIN_PRESET_DISTANCE: f64 = 1.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
#[derive(Debug, Clone)]
pub struct ViewerBuilder {
    camera: CameraConfig,
    options: ViewerOptions,
    bindings: Option<KeyBindings>,
    presets: Vec<(String, PresetConfig)>,
    standard_presets: bool,
    bounds: Option<MeshBounds>,
    initial_view: Option<String>,
}

impl ViewerBuilder {
    /// Start from the camera's initial configuration, default options,
    /// and the standard presets enabled.
    #[must_use]
    pub fn new(camera: CameraConfig) -> Self {
        Self {
            camera,
            options: ViewerOptions::default(),
            bindings: None,
            presets: Vec::new(),
            standard_presets: true,
            bounds: None,
            initial_view: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: ViewerOptions) -> Self {
        self.options = options;
        self
    }

    /// Use these key bindings instead of the ones in the options.
    #[must_use]
    pub fn key_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = Some(bindings);
        self
    }

    /// Register an extra preset. Later presets with the same name replace
    /// earlier ones, including standard and options presets.
    #[must_use]
    pub fn preset(mut self, name: impl Into<String>, config: PresetConfig) -> Self {
        self.presets.push((name.into(), config));
        self
    }

    /// Whether to register `Top`, `Front`, `Side` and `Iso`.
    #[must_use]
    pub fn standard_presets(mut self, enabled: bool) -> Self {
        self.standard_presets = enabled;
        self
    }

    /// Frame the model with these bounds after view switches and resets.
    #[must_use]
    pub fn bounds(mut self, bounds: MeshBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Frame whatever `provider` reports.
    #[must_use]
    pub fn bounds_from(self, provider: &impl BoundsProvider) -> Self {
        self.bounds(provider.bounds())
    }

    /// Preset applied at startup, overriding the options' `initial_view`.
    #[must_use]
    pub fn initial_view(mut self, name: impl Into<String>) -> Self {
        self.initial_view = Some(name.into());
        self
    }

    /// Validate everything and link the viewer.
    ///
    /// `on_exit` runs whenever an exit command is executed.
    ///
    /// # Errors
    ///
    /// - [`ViewerError::InvalidConfiguration`] for a bad camera config,
    ///   preset, option value, key name, or a key bound to a preset that
    ///   is not registered.
    /// - [`ViewerError::InvalidMode`] for an unknown preset mode string.
    /// - [`ViewerError::PresetNotFound`] if the initial view is unknown.
    pub fn build<S: SceneControls>(
        self,
        scene: S,
        on_exit: impl FnMut() + 'static,
    ) -> Result<Viewer<S>> {
        let camera_opts = &self.options.camera;
        let fit_scale = camera_opts.fit_scale;
        if !(fit_scale.is_finite() && fit_scale > 0.0) {
            return Err(ViewerError::config(format!(
                "fit scale must be positive, got {fit_scale}"
            )));
        }
        let sensitivity = camera_opts.sensitivity();
        if ![sensitivity.orbit, sensitivity.pan, sensitivity.zoom]
            .iter()
            .all(|s| s.is_finite())
        {
            return Err(ViewerError::config("sensitivities must be finite"));
        }

        let camera = Camera::new(self.camera)?.with_sensitivity(sensitivity);
        let mut views = ViewManager::new(camera);
        let framing = self.bounds.map(|bounds| Framing {
            bounds,
            scale: fit_scale,
        });

        if self.standard_presets {
            let (center, distance) = match self.bounds {
                Some(b) => (b.centroid, (b.radius * fit_scale).max(MIN_PRESET_DISTANCE)),
                None => (
                    self.camera.target,
                    self.camera.position.distance(self.camera.target),
                ),
            };
            views.add_standard_presets(center, distance)?;
        }
        for preset in &self.options.presets {
            views.add(&preset.name, &preset.config)?;
        }
        for (name, config) in &self.presets {
            views.add(name, config)?;
        }

        let bindings = match self.bindings {
            Some(bindings) => bindings,
            None => self.options.keybindings.to_bindings()?,
        };
        if let Some(missing) = bindings.view_names().find(|name| !views.contains(name)) {
            return Err(ViewerError::config(format!(
                "key bound to unregistered view preset '{missing}'"
            )));
        }

        let initial = self.initial_view.or_else(|| self.options.initial_view.clone());
        if let Some(name) = &initial {
            views.go_to(name)?;
        }
        if let Some(framing) = &framing {
            views.camera_mut().frame(framing);
        }
        log::debug!(
            "viewer built: {} presets, initial view {:?}, framing {}",
            views.presets().len(),
            initial,
            framing.is_some()
        );

        Ok(Viewer {
            views,
            projection: ProjectionManager::with_depth_range(camera_opts.depth_range),
            input: InputController::new(bindings).with_framing(framing),
            scene,
            on_exit: Box::new(on_exit),
            transition: camera_opts.transition_duration(),
            easing: camera_opts.easing,
            uniform: CameraUniform::new(),
        })
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// Interactive camera state for one truss model.
///
/// Feed it input through [`on_key`](Self::on_key),
/// [`on_mouse_drag`](Self::on_mouse_drag) and
/// [`on_scroll`](Self::on_scroll); call [`tick`](Self::tick) once per frame
/// and hand [`uniform`](Self::uniform) to the renderer.
pub struct Viewer<S> {
    views: ViewManager,
    projection: ProjectionManager,
    input: InputController,
    scene: S,
    on_exit: Box<dyn FnMut()>,
    transition: Duration,
    easing: EasingFunction,
    uniform: CameraUniform,
}

impl<S: SceneControls> Viewer<S> {
    /// Handle a key press. Unbound keys are ignored.
    ///
    /// # Errors
    ///
    /// Propagates [`execute`](Self::execute) failures.
    pub fn on_key(&mut self, key: &str) -> Result<()> {
        match self.input.on_key(key) {
            Some(cmd) => self.execute(cmd),
            None => Ok(()),
        }
    }

    /// Handle a mouse drag of `(dx, dy)` pixels.
    pub fn on_mouse_drag(&mut self, dx: f64, dy: f64, button: MouseButton) {
        let cmd = self.input.on_mouse_drag(dx, dy, button);
        self.apply_camera_command(&cmd);
    }

    /// Handle a scroll (positive = zoom in).
    pub fn on_scroll(&mut self, delta: f64) {
        let cmd = self.input.on_scroll(delta);
        self.apply_camera_command(&cmd);
    }

    /// Handle any [`InputEvent`].
    ///
    /// # Errors
    ///
    /// Propagates [`execute`](Self::execute) failures.
    pub fn handle_event(&mut self, event: &InputEvent) -> Result<()> {
        match self.input.handle_event(event) {
            Some(cmd) => self.execute(cmd),
            None => Ok(()),
        }
    }

    /// Apply a command.
    ///
    /// # Errors
    ///
    /// [`ViewerError::PresetNotFound`] for [`ViewerCommand::GoToView`]
    /// naming an unregistered preset; the camera is untouched then.
    pub fn execute(&mut self, cmd: ViewerCommand) -> Result<()> {
        match cmd {
            ViewerCommand::GoToView { name } => {
                self.views.transition_to(
                    &name,
                    self.input.framing(),
                    self.transition,
                    self.easing,
                )?;
            }
            ViewerCommand::ResetCamera => {
                let camera = self.views.camera_mut();
                camera.reset();
                if let Some(framing) = self.input.framing() {
                    camera.frame(framing);
                }
            }
            ViewerCommand::ToggleDeformed => self.scene.toggle_deformed(),
            ViewerCommand::CycleColormap => self.scene.cycle_colormap(),
            ViewerCommand::Exit => {
                log::info!("exit requested");
                (self.on_exit)();
            }
            camera_cmd => self.apply_camera_command(&camera_cmd),
        }
        Ok(())
    }

    fn apply_camera_command(&mut self, cmd: &ViewerCommand) {
        let camera = self.views.camera_mut();
        match *cmd {
            ViewerCommand::Orbit { delta } => camera.orbit(delta.x, delta.y),
            ViewerCommand::Pan { delta } => camera.pan(delta.x, delta.y),
            ViewerCommand::Zoom { delta } => camera.zoom(delta),
            _ => {}
        }
    }

    /// Advance animated view switches by `dt` seconds. Returns `true`
    /// while a transition is still running.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.views.update(dt)
    }

    /// Current view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        self.views.camera().view_matrix()
    }

    /// Current projection matrix for a viewport of the given aspect ratio.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] if `aspect` is not positive.
    pub fn projection_matrix(&self, aspect: f64) -> Result<DMat4> {
        self.projection.projection_matrix(self.views.camera(), aspect)
    }

    /// Refresh and return the GPU camera uniform.
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] if `aspect` is not positive.
    pub fn uniform(&mut self, aspect: f64) -> Result<&CameraUniform> {
        self.uniform
            .update(self.views.camera(), &self.projection, aspect)?;
        Ok(&self.uniform)
    }

    /// Overlay snapshot for the given frame rate.
    #[must_use]
    pub fn hud(&self, fps: f64) -> HudSnapshot {
        let camera = self.views.camera();
        HudSnapshot {
            view: self.views.current().unwrap_or(CUSTOM_VIEW).to_owned(),
            mode: camera.mode(),
            fov: camera.fov(),
            ortho_size: camera.ortho_size(),
            deformed: self.scene.deformed_visible(),
            colormap: self.scene.colormap(),
            fps,
        }
    }

    /// Re-frame future view switches and resets on new bounds.
    pub fn set_bounds(&mut self, bounds: Option<MeshBounds>) {
        let scale = self
            .input
            .framing()
            .map_or(DEFAULT_FIT_SCALE, |f| f.scale);
        self.input
            .set_framing(bounds.map(|bounds| Framing { bounds, scale }));
    }

    /// Centre of the current framing, if any.
    #[must_use]
    pub fn framing_center(&self) -> Option<DVec3> {
        self.input.framing().map(|f| f.bounds.centroid)
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.views.camera()
    }

    /// The preset registry.
    #[must_use]
    pub fn views(&self) -> &ViewManager {
        &self.views
    }

    /// Mutable preset registry, e.g. to add presets at runtime.
    pub fn views_mut(&mut self) -> &mut ViewManager {
        &mut self.views
    }

    /// The input controller.
    #[must_use]
    pub fn input(&self) -> &InputController {
        &self.input
    }

    /// The scene collaborator.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Mutable scene collaborator.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::camera::ProjectionMode;
    use crate::scene::DisplayState;

    const EPS: f64 = 1e-9;

    fn bounds() -> MeshBounds {
        MeshBounds {
            centroid: DVec3::new(0.5, 0.2, 0.5),
            radius: 0.8,
        }
    }

    fn viewer() -> Viewer<DisplayState> {
        ViewerBuilder::new(CameraConfig::default())
            .bounds(bounds())
            .initial_view("Iso")
            .build(DisplayState::new(3), || {})
            .unwrap()
    }

    fn assert_close(a: DVec3, b: DVec3) {
        assert!(a.abs_diff_eq(b, EPS), "{a} != {b}");
    }

    #[test]
    fn build_applies_initial_view_and_fit() {
        let v = viewer();
        let camera = v.camera();
        assert_eq!(v.views().current(), Some("Iso"));
        assert_eq!(camera.mode(), ProjectionMode::Perspective);
        assert_close(camera.target(), bounds().centroid);
        assert!((camera.position().distance(camera.target()) - 2.4).abs() < EPS);
        let dir = (camera.position() - camera.target()).normalize();
        assert_close(dir, DVec3::ONE.normalize());
    }

    #[test]
    fn digit_keys_switch_presets_and_refit() {
        let mut v = viewer();
        v.on_key("1").unwrap();
        assert_eq!(v.views().current(), Some("Top"));
        assert_eq!(v.camera().mode(), ProjectionMode::Orthographic);
        assert_close(v.camera().target(), bounds().centroid);
        assert_close(
            v.camera().position(),
            bounds().centroid + DVec3::Y * 2.4,
        );
        assert_close(v.camera().up(), DVec3::NEG_Z);

        v.on_key("Digit3").unwrap();
        assert_eq!(v.views().current(), Some("Side"));
        assert_close(
            v.camera().position(),
            bounds().centroid + DVec3::X * 2.4,
        );
    }

    #[test]
    fn small_drag_from_top_view_keeps_orientation() {
        let mut v = viewer();
        v.on_key("1").unwrap();
        let before = v.view_matrix();
        v.on_mouse_drag(0.0, 0.001, MouseButton::Left);
        let after = v.view_matrix();
        assert_eq!(v.views().current(), None);
        assert_close(v.camera().up(), DVec3::Y);
        assert!(after.abs_diff_eq(before, 0.1), "{before} -> {after}");
        assert!(!after.is_nan());
    }

    #[test]
    fn unbound_key_changes_nothing() {
        let mut v = viewer();
        let before = v.camera().config();
        v.on_key("9").unwrap();
        v.on_key("NotAKey").unwrap();
        assert_eq!(v.camera().config(), before);
        assert_eq!(v.views().current(), Some("Iso"));
    }

    #[test]
    fn manual_input_makes_view_custom() {
        let mut v = viewer();
        v.on_mouse_drag(20.0, 5.0, MouseButton::Left);
        assert_eq!(v.views().current(), None);
        assert_eq!(v.hud(60.0).view, "Custom");

        v.on_key("2").unwrap();
        assert_eq!(v.hud(60.0).view, "Front");
        v.on_scroll(1.0);
        assert_eq!(v.hud(60.0).view, "Custom");

        v.on_key("2").unwrap();
        v.on_mouse_drag(3.0, 3.0, MouseButton::Right);
        assert_eq!(v.views().current(), None);
    }

    #[test]
    fn drag_buttons_orbit_and_pan() {
        let mut v = viewer();
        let target = v.camera().target();
        v.on_mouse_drag(40.0, 0.0, MouseButton::Left);
        assert_close(v.camera().target(), target);

        let position = v.camera().position();
        v.on_mouse_drag(10.0, 0.0, MouseButton::Middle);
        let moved = v.camera().target() - target;
        assert!(moved.length() > 0.0);
        assert_close(v.camera().position() - position, moved);
    }

    #[test]
    fn reset_restores_initial_camera_then_frames() {
        let mut v = viewer();
        v.on_mouse_drag(100.0, -30.0, MouseButton::Left);
        v.on_scroll(2.0);
        v.on_key("r").unwrap();

        let initial = CameraConfig::default();
        let dir = (initial.position - initial.target).normalize();
        assert_close(v.camera().target(), bounds().centroid);
        assert_close(
            v.camera().position(),
            bounds().centroid + dir * 2.4,
        );
        assert_eq!(v.camera().fov(), initial.fov);
        assert_eq!(v.views().current(), None);
    }

    #[test]
    fn display_keys_reach_the_scene() {
        let mut v = viewer();
        v.on_key("d").unwrap();
        v.on_key("c").unwrap();
        v.on_key("c").unwrap();
        let hud = v.hud(30.0);
        assert!(hud.deformed);
        assert_eq!(hud.colormap, Some(2));
        assert_eq!(hud.lines()[2], "Deformation: On");
    }

    #[test]
    fn escape_invokes_exit_callback() {
        let exited = Rc::new(Cell::new(false));
        let flag = Rc::clone(&exited);
        let mut v = ViewerBuilder::new(CameraConfig::default())
            .build(DisplayState::default(), move || flag.set(true))
            .unwrap();
        v.on_key("Escape").unwrap();
        assert!(exited.get());
    }

    #[test]
    fn key_bound_to_unknown_view_fails_build() {
        let mut bindings = KeyBindings::default();
        bindings.bind_view("5", "Detail").unwrap();
        let result = ViewerBuilder::new(CameraConfig::default())
            .key_bindings(bindings)
            .build(DisplayState::default(), || {});
        assert!(matches!(
            result,
            Err(ViewerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn default_bindings_need_standard_presets() {
        let result = ViewerBuilder::new(CameraConfig::default())
            .standard_presets(false)
            .build(DisplayState::default(), || {});
        assert!(result.is_err());

        let v = ViewerBuilder::new(CameraConfig::default())
            .standard_presets(false)
            .key_bindings(KeyBindings::empty())
            .build(DisplayState::default(), || {})
            .unwrap();
        assert!(v.views().presets().is_empty());
    }

    #[test]
    fn unknown_initial_view_fails_build() {
        let result = ViewerBuilder::new(CameraConfig::default())
            .initial_view("Nope")
            .build(DisplayState::default(), || {});
        assert!(matches!(result, Err(ViewerError::PresetNotFound(_))));
    }

    #[test]
    fn custom_preset_and_binding() {
        let detail = PresetConfig {
            position: Some(vec![0.0, 0.0, 5.0]),
            target: Some(vec![0.0; 3]),
            up: Some(vec![0.0, 1.0, 0.0]),
            mode: Some("ortho".into()),
            ortho_size: Some(2.0),
            near: Some(0.1),
            far: Some(50.0),
            ..PresetConfig::default()
        };
        let mut bindings = KeyBindings::default();
        bindings.bind_view("5", "Detail").unwrap();
        let mut v = ViewerBuilder::new(CameraConfig::default())
            .preset("Detail", detail)
            .key_bindings(bindings)
            .build(DisplayState::default(), || {})
            .unwrap();
        v.on_key("5").unwrap();
        assert_eq!(v.views().current(), Some("Detail"));
        assert_eq!(v.camera().ortho_size(), 2.0);
        assert_close(v.camera().position(), DVec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn bad_preset_fails_build() {
        let result = ViewerBuilder::new(CameraConfig::default())
            .preset(
                "Broken",
                PresetConfig {
                    mode: Some("fisheye".into()),
                    ..PresetConfig::default()
                },
            )
            .build(DisplayState::default(), || {});
        assert!(result.is_err());
    }

    #[test]
    fn animated_switch_matches_instant_switch() {
        let mut instant = viewer();
        instant.on_key("1").unwrap();

        let mut options = ViewerOptions::default();
        options.camera.transition_ms = 100;
        let mut animated = ViewerBuilder::new(CameraConfig::default())
            .with_options(options)
            .bounds(bounds())
            .initial_view("Iso")
            .build(DisplayState::new(3), || {})
            .unwrap();
        animated.on_key("1").unwrap();
        assert!(animated.tick(0.05));
        assert_eq!(animated.camera().mode(), ProjectionMode::Perspective);
        assert!(!animated.tick(0.1));
        assert_eq!(animated.camera().config(), instant.camera().config());
        assert_eq!(animated.views().current(), Some("Top"));
    }

    #[test]
    fn manual_input_cancels_transition() {
        let mut options = ViewerOptions::default();
        options.camera.transition_ms = 500;
        let mut v = ViewerBuilder::new(CameraConfig::default())
            .with_options(options)
            .bounds(bounds())
            .build(DisplayState::default(), || {})
            .unwrap();
        v.on_key("2").unwrap();
        assert!(v.tick(0.1));
        v.on_scroll(1.0);
        assert!(!v.tick(0.1));
        assert!(!v.views().is_transitioning());
        assert_eq!(v.views().current(), None);
    }

    #[test]
    fn uniform_and_projection() {
        let mut v = viewer();
        assert!(v.projection_matrix(0.0).is_err());
        assert!(v.uniform(f64::NAN).is_err());
        let uniform = *v.uniform(2.0).unwrap();
        assert_eq!(uniform.aspect, 2.0);
        assert_eq!(uniform.orthographic, 0);
        v.on_key("2").unwrap();
        assert_eq!(v.uniform(2.0).unwrap().orthographic, 1);
    }

    #[test]
    fn set_bounds_changes_framing() {
        let mut v = viewer();
        let new_bounds = MeshBounds {
            centroid: DVec3::new(10.0, 0.0, 0.0),
            radius: 2.0,
        };
        v.set_bounds(Some(new_bounds));
        assert_eq!(v.framing_center(), Some(new_bounds.centroid));
        v.on_key("4").unwrap();
        assert_close(v.camera().target(), new_bounds.centroid);
        assert!((v.camera().position().distance(new_bounds.centroid) - 6.0).abs() < EPS);
    }
}
