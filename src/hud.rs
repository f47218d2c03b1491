//! Read-only snapshot of viewer state for an on-screen overlay.

use std::fmt;

use crate::camera::ProjectionMode;

/// Name shown when the camera no longer matches any preset.
pub const CUSTOM_VIEW: &str = "Custom";

/// Everything the HUD overlay draws for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    /// Active preset name, or [`CUSTOM_VIEW`].
    pub view: String,
    /// Current projection mode.
    pub mode: ProjectionMode,
    /// Vertical field of view in radians.
    pub fov: f64,
    /// Orthographic half-height.
    pub ortho_size: f64,
    /// Whether the deformed overlay is drawn.
    pub deformed: bool,
    /// Active colormap index, `None` if no colormaps are loaded.
    pub colormap: Option<usize>,
    /// Frames per second.
    pub fps: f64,
}

impl HudSnapshot {
    /// The overlay text, top to bottom.
    ///
    /// ```text
    /// View: Iso
    /// FPS: 59.9
    /// Deformation: Off
    /// Colormap: 0
    /// Projection: perspective (fov 45.0°)
    /// ```
    ///
    /// A missing colormap is shown as `-1`.
    #[must_use]
    pub fn lines(&self) -> [String; 5] {
        let colormap = self
            .colormap
            .map_or_else(|| "-1".to_owned(), |i| i.to_string());
        let lens = match self.mode {
            ProjectionMode::Perspective => {
                format!("fov {:.1}°", self.fov.to_degrees())
            }
            ProjectionMode::Orthographic => {
                format!("size {:.2}", self.ortho_size)
            }
        };
        [
            format!("View: {}", self.view),
            format!("FPS: {:.1}", self.fps),
            format!(
                "Deformation: {}",
                if self.deformed { "On" } else { "Off" }
            ),
            format!("Colormap: {colormap}"),
            format!("Projection: {} ({lens})", self.mode),
        ]
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> HudSnapshot {
        HudSnapshot {
            view: "Iso".into(),
            mode: ProjectionMode::Perspective,
            fov: 45f64.to_radians(),
            ortho_size: 1.0,
            deformed: false,
            colormap: Some(2),
            fps: 59.94,
        }
    }

    #[test]
    fn lines_match_overlay_layout() {
        let lines = snapshot().lines();
        assert_eq!(lines[0], "View: Iso");
        assert_eq!(lines[1], "FPS: 59.9");
        assert_eq!(lines[2], "Deformation: Off");
        assert_eq!(lines[3], "Colormap: 2");
        assert_eq!(lines[4], "Projection: perspective (fov 45.0°)");
    }

    #[test]
    fn custom_view_and_missing_colormap() {
        let hud = HudSnapshot {
            view: CUSTOM_VIEW.into(),
            mode: ProjectionMode::Orthographic,
            ortho_size: 2.5,
            deformed: true,
            colormap: None,
            ..snapshot()
        };
        let lines = hud.lines();
        assert_eq!(lines[0], "View: Custom");
        assert_eq!(lines[2], "Deformation: On");
        assert_eq!(lines[3], "Colormap: -1");
        assert_eq!(lines[4], "Projection: orthographic (size 2.50)");
        assert_eq!(hud.to_string().lines().count(), 5);
    }
}
