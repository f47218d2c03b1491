//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture, or a programmatic call, is represented as a `ViewerCommand`.
//! Consumers construct commands and pass them to
//! [`Viewer::execute`](crate::viewer::Viewer::execute).

use glam::DVec2;

/// A discrete or parameterized operation the viewer can perform.
///
/// ```ignore
/// viewer.execute(ViewerCommand::GoToView { name: "Iso".into() })?;
/// viewer.execute(ViewerCommand::Zoom { delta: 1.0 })?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Switch to a named preset, then re-frame the model if a framing is
    /// configured.
    GoToView {
        /// Registered preset name.
        name: String,
    },

    /// Restore the initial camera, then re-frame the model.
    ResetCamera,

    /// Orbit by `delta` pixels of drag.
    Orbit {
        /// Horizontal and vertical drag delta.
        delta: DVec2,
    },

    /// Pan by `delta` pixels of drag.
    Pan {
        /// Horizontal and vertical drag delta.
        delta: DVec2,
    },

    /// Zoom (positive = in, negative = out).
    Zoom {
        /// Scroll amount.
        delta: f64,
    },

    // ── Display ─────────────────────────────────────────────────────
    /// Show or hide the deformed-mesh overlay.
    ToggleDeformed,

    /// Advance to the next colormap.
    CycleColormap,

    // ── Application ─────────────────────────────────────────────────
    /// Invoke the exit callback.
    Exit,
}
