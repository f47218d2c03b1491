//! Display state the input layer toggles: the deformed-mesh overlay and
//! the active colormap.
//!
//! The renderer owns the actual buffers and textures. The viewer only
//! needs the small capability surface in [`SceneControls`].

/// What the viewer needs from the scene/shader side.
pub trait SceneControls {
    /// Flip visibility of the deformed-mesh overlay.
    fn toggle_deformed(&mut self);

    /// Advance to the next colormap, wrapping around.
    fn cycle_colormap(&mut self);

    /// Whether the deformed overlay is currently drawn.
    fn deformed_visible(&self) -> bool;

    /// Index of the active colormap, or `None` if none are loaded.
    fn colormap(&self) -> Option<usize>;
}

/// Default [`SceneControls`] implementation holding plain flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayState {
    deformed_visible: bool,
    colormap_count: usize,
    colormap: usize,
}

impl DisplayState {
    /// Deformed overlay hidden, first of `colormap_count` colormaps active.
    #[must_use]
    pub fn new(colormap_count: usize) -> Self {
        Self {
            deformed_visible: false,
            colormap_count,
            colormap: 0,
        }
    }

    /// Number of loaded colormaps.
    #[must_use]
    pub fn colormap_count(&self) -> usize {
        self.colormap_count
    }

    /// Change how many colormaps are loaded, keeping the active index in
    /// range.
    pub fn set_colormap_count(&mut self, count: usize) {
        self.colormap_count = count;
        if self.colormap >= count {
            self.colormap = 0;
        }
    }
}

impl SceneControls for DisplayState {
    fn toggle_deformed(&mut self) {
        self.deformed_visible = !self.deformed_visible;
    }

    fn cycle_colormap(&mut self) {
        if self.colormap_count == 0 {
            return;
        }
        self.colormap = (self.colormap + 1) % self.colormap_count;
    }

    fn deformed_visible(&self) -> bool {
        self.deformed_visible
    }

    fn colormap(&self) -> Option<usize> {
        (self.colormap_count > 0).then_some(self.colormap)
    }
}
