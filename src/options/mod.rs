//! Viewer options with TOML file support.
//!
//! Camera control, key bindings, and extra view presets are consolidated
//! here. Options serialize to/from TOML so a user can ship a viewer setup
//! alongside a model.

mod camera;
mod keybindings;

use std::path::Path;

pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;
use crate::views::PresetConfig;

/// A preset definition carried in an options file.
///
/// ```toml
/// [[presets]]
/// name = "Detail"
/// position = [0.5, 0.5, 2.0]
/// target = [0.5, 0.5, 0.0]
/// up = [0.0, 1.0, 0.0]
/// mode = "perspective"
/// fov = 0.5
/// near = 0.1
/// far = 50.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct NamedPreset {
    /// Registry name.
    pub name: String,
    /// Preset fields.
    #[serde(flatten)]
    pub config: PresetConfig,
}

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct ViewerOptions {
    /// Preset applied when the viewer starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_view: Option<String>,
    /// Camera control parameters.
    pub camera: CameraOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
    /// Extra view presets registered after the standard ones.
    pub presets: Vec<NamedPreset>,
}

impl ViewerOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ViewerOptions)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ViewerError> {
        toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }
}
