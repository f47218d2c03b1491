//! Named camera presets and the manager that applies them.

mod manager;
/// Preset definitions and validation.
pub mod preset;

pub use manager::ViewManager;
pub use preset::{PresetConfig, ViewPreset};
