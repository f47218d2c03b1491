use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{DepthRange, Sensitivity, DEFAULT_FIT_SCALE};
use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera control and framing parameters.
pub struct CameraOptions {
    /// Radians of orbit per pixel of drag.
    #[schemars(title = "Orbit Speed", range(min = 0.0005, max = 0.05), extend("step" = 0.0005))]
    pub orbit_sensitivity: f64,
    /// Pan distance per pixel of drag, relative to the eye distance.
    #[schemars(title = "Pan Speed", range(min = 0.0002, max = 0.02), extend("step" = 0.0002))]
    pub pan_sensitivity: f64,
    /// Fractional zoom per scroll unit.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_sensitivity: f64,
    /// Eye distance as a multiple of the model radius when fitting.
    #[schemars(title = "Fit Scale", range(min = 1.0, max = 10.0), extend("step" = 0.1))]
    pub fit_scale: f64,
    /// Duration of animated preset switches in milliseconds (0 = instant).
    #[schemars(title = "Transition (ms)", range(min = 0, max = 2000), extend("step" = 50))]
    pub transition_ms: u64,
    /// Clip-space depth convention of the renderer.
    #[schemars(skip)]
    pub depth_range: DepthRange,
    /// Easing curve for animated preset switches.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for CameraOptions {
    fn default() -> Self {
        let sensitivity = Sensitivity::default();
        Self {
            orbit_sensitivity: sensitivity.orbit,
            pan_sensitivity: sensitivity.pan,
            zoom_sensitivity: sensitivity.zoom,
            fit_scale: DEFAULT_FIT_SCALE,
            transition_ms: 0,
            depth_range: DepthRange::default(),
            easing: EasingFunction::DEFAULT,
        }
    }
}

impl CameraOptions {
    /// Orbit, pan and zoom sensitivities as a [`Sensitivity`].
    #[must_use]
    pub fn sensitivity(&self) -> Sensitivity {
        Sensitivity {
            orbit: self.orbit_sensitivity,
            pan: self.pan_sensitivity,
            zoom: self.zoom_sensitivity,
        }
    }

    /// Preset transition duration.
    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}
