use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{KeyAction, KeyBindings};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings.
///
/// ```toml
/// [keybindings.views]
/// 1 = "Top"
/// 5 = "Detail"
///
/// [keybindings.actions]
/// reset_camera = "r"
/// ```
pub struct KeybindingOptions {
    /// Maps key string → view preset name (e.g. `"1"` → `"Top"`).
    pub views: BTreeMap<String, String>,
    /// Maps action → key string (e.g. `ResetCamera` → `"r"`).
    pub actions: BTreeMap<KeyAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let views = [("1", "Top"), ("2", "Front"), ("3", "Side"), ("4", "Iso")]
            .into_iter()
            .map(|(key, view)| (key.to_owned(), view.to_owned()))
            .collect();
        let actions = BTreeMap::from([
            (KeyAction::ResetCamera, "r".into()),
            (KeyAction::ToggleDeformed, "d".into()),
            (KeyAction::CycleColormap, "c".into()),
            (KeyAction::Exit, "Escape".into()),
        ]);
        Self { views, actions }
    }
}

impl KeybindingOptions {
    /// Validate every key name and build the runtime binding map.
    ///
    /// Actions are bound after views, so a key listed in both ends up
    /// performing the action.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfiguration`](crate::ViewerError)
    /// on the first unrecognised key name or empty view name.
    pub fn to_bindings(&self) -> Result<KeyBindings> {
        let mut bindings = KeyBindings::empty();
        for (key, view) in &self.views {
            bindings.bind_view(key, view)?;
        }
        for (action, key) in &self.actions {
            bindings.bind_action(key, *action)?;
        }
        Ok(bindings)
    }
}
