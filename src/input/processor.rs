//! Converts platform input into viewer commands.
//!
//! The `InputController` is stateless apart from its key-binding map and
//! an optional model framing: it never touches the camera itself. Every
//! event becomes zero or one [`ViewerCommand`], which the
//! [`Viewer`](crate::viewer::Viewer) executes.

use glam::DVec2;
use rustc_hash::FxHashMap;

use super::event::{InputEvent, MouseButton};
use super::keyboard::{Key, KeyAction};
use crate::camera::Framing;
use crate::command::ViewerCommand;
use crate::error::{Result, ViewerError};

/// What a bound key does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyBinding {
    /// Switch to the named view preset.
    View(String),
    /// Perform a viewer action.
    Action(KeyAction),
}

impl KeyBinding {
    fn to_command(&self) -> ViewerCommand {
        match self {
            Self::View(name) => ViewerCommand::GoToView { name: name.clone() },
            Self::Action(KeyAction::ResetCamera) => ViewerCommand::ResetCamera,
            Self::Action(KeyAction::ToggleDeformed) => ViewerCommand::ToggleDeformed,
            Self::Action(KeyAction::CycleColormap) => ViewerCommand::CycleColormap,
            Self::Action(KeyAction::Exit) => ViewerCommand::Exit,
        }
    }
}

/// Maps keys to view presets and actions.
///
/// Keys are normalized through [`Key::parse`], so `"1"`, `"Digit1"` and
/// `"Numpad1"` all hit the same binding. Binding a key that is already
/// bound replaces the old binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: FxHashMap<Key, KeyBinding>,
}

impl Default for KeyBindings {
    /// Digits `1`-`4` select Top, Front, Side and Iso; `r` resets, `d`
    /// toggles the deformed overlay, `c` cycles colormaps, Escape exits.
    fn default() -> Self {
        let mut bindings = FxHashMap::default();
        for (digit, view) in [(1, "Top"), (2, "Front"), (3, "Side"), (4, "Iso")] {
            let _ = bindings.insert(Key::Digit(digit), KeyBinding::View(view.into()));
        }
        for (key, action) in [
            (Key::Letter('r'), KeyAction::ResetCamera),
            (Key::Letter('d'), KeyAction::ToggleDeformed),
            (Key::Letter('c'), KeyAction::CycleColormap),
            (Key::Escape, KeyAction::Exit),
        ] {
            let _ = bindings.insert(key, KeyBinding::Action(action));
        }
        Self { bindings }
    }
}

impl KeyBindings {
    /// A binding map with nothing bound.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    /// Bind `key` to the view preset `preset`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfiguration`] if `key` is not a
    /// recognised key name or `preset` is empty.
    pub fn bind_view(&mut self, key: &str, preset: &str) -> Result<()> {
        if preset.is_empty() {
            return Err(ViewerError::config(format!(
                "key '{key}' bound to an empty view name"
            )));
        }
        let key: Key = key.parse()?;
        let _ = self.bindings.insert(key, KeyBinding::View(preset.to_owned()));
        Ok(())
    }

    /// Bind `key` to `action`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfiguration`] if `key` is not a
    /// recognised key name.
    pub fn bind_action(&mut self, key: &str, action: KeyAction) -> Result<()> {
        let key: Key = key.parse()?;
        let _ = self.bindings.insert(key, KeyBinding::Action(action));
        Ok(())
    }

    /// Look up the binding for a key name.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&KeyBinding> {
        self.bindings.get(&Key::parse(key)?)
    }

    /// Names of every view preset referenced by a binding.
    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.values().filter_map(|binding| match binding {
            KeyBinding::View(name) => Some(name.as_str()),
            KeyBinding::Action(_) => None,
        })
    }

    /// Number of bound keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no keys are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputController
// ─────────────────────────────────────────────────────────────────────────────

/// Converts keyboard and mouse input into [`ViewerCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = controller.on_key("KeyR") {
///     viewer.execute(cmd)?;
/// }
/// viewer.execute(controller.on_mouse_drag(dx, dy, MouseButton::Left))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputController {
    bindings: KeyBindings,
    framing: Option<Framing>,
}

impl InputController {
    /// Create a controller with the given bindings and no framing.
    #[must_use]
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            framing: None,
        }
    }

    /// Set the model framing applied after view switches and resets.
    #[must_use]
    pub fn with_framing(mut self, framing: Option<Framing>) -> Self {
        self.framing = framing;
        self
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Model framing, if configured.
    #[must_use]
    pub fn framing(&self) -> Option<&Framing> {
        self.framing.as_ref()
    }

    /// Replace the model framing (e.g. after the mesh changed).
    pub fn set_framing(&mut self, framing: Option<Framing>) {
        self.framing = framing;
    }

    /// Translate a key press. Unbound and unknown keys produce nothing.
    #[must_use]
    pub fn on_key(&self, key: &str) -> Option<ViewerCommand> {
        let Some(binding) = self.bindings.lookup(key) else {
            log::trace!("ignoring unbound key '{key}'");
            return None;
        };
        Some(binding.to_command())
    }

    /// Translate a drag: the primary button orbits, any other button pans.
    #[must_use]
    pub fn on_mouse_drag(&self, dx: f64, dy: f64, button: MouseButton) -> ViewerCommand {
        let delta = DVec2::new(dx, dy);
        match button {
            MouseButton::Left => ViewerCommand::Orbit { delta },
            _ => ViewerCommand::Pan { delta },
        }
    }

    /// Translate a scroll (positive = zoom in).
    #[must_use]
    pub fn on_scroll(&self, delta: f64) -> ViewerCommand {
        ViewerCommand::Zoom { delta }
    }

    /// Translate any [`InputEvent`].
    #[must_use]
    pub fn handle_event(&self, event: &InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::Key { name } => self.on_key(name),
            InputEvent::Drag { dx, dy, button } => {
                Some(self.on_mouse_drag(*dx, *dy, *button))
            }
            InputEvent::Scroll { delta } => Some(self.on_scroll(*delta)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_views_and_actions() {
        let controller = InputController::default();
        assert_eq!(
            controller.on_key("1"),
            Some(ViewerCommand::GoToView { name: "Top".into() })
        );
        assert_eq!(
            controller.on_key("Digit4"),
            Some(ViewerCommand::GoToView { name: "Iso".into() })
        );
        assert_eq!(controller.on_key("KeyR"), Some(ViewerCommand::ResetCamera));
        assert_eq!(controller.on_key("d"), Some(ViewerCommand::ToggleDeformed));
        assert_eq!(controller.on_key("C"), Some(ViewerCommand::CycleColormap));
        assert_eq!(controller.on_key("Escape"), Some(ViewerCommand::Exit));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let controller = InputController::default();
        assert_eq!(controller.on_key("9"), None);
        assert_eq!(controller.on_key("KeyZ"), None);
        assert_eq!(controller.on_key("ShiftLeft"), None);
    }

    #[test]
    fn rebinding_replaces_previous_binding() {
        let mut bindings = KeyBindings::default();
        bindings.bind_view("r", "Custom").unwrap();
        let controller = InputController::new(bindings);
        assert_eq!(
            controller.on_key("KeyR"),
            Some(ViewerCommand::GoToView { name: "Custom".into() })
        );
    }

    #[test]
    fn binding_unknown_key_is_rejected() {
        let mut bindings = KeyBindings::empty();
        assert!(matches!(
            bindings.bind_view("Hyper", "Top"),
            Err(ViewerError::InvalidConfiguration(_))
        ));
        assert!(bindings.bind_view("5", "").is_err());
        assert!(bindings.bind_action("Tab", KeyAction::Exit).is_err());
        assert!(bindings.is_empty());
    }

    #[test]
    fn view_names_lists_bound_presets() {
        let bindings = KeyBindings::default();
        let mut names: Vec<_> = bindings.view_names().collect();
        names.sort_unstable();
        assert_eq!(names, ["Front", "Iso", "Side", "Top"]);
    }

    #[test]
    fn drag_button_selects_orbit_or_pan() {
        let controller = InputController::default();
        assert_eq!(
            controller.on_mouse_drag(3.0, -2.0, MouseButton::Left),
            ViewerCommand::Orbit {
                delta: DVec2::new(3.0, -2.0)
            }
        );
        assert_eq!(
            controller.on_mouse_drag(1.0, 1.0, MouseButton::Right),
            ViewerCommand::Pan {
                delta: DVec2::ONE
            }
        );
        assert_eq!(
            controller.handle_event(&InputEvent::Drag {
                dx: 0.0,
                dy: 4.0,
                button: MouseButton::Middle,
            }),
            Some(ViewerCommand::Pan {
                delta: DVec2::new(0.0, 4.0)
            })
        );
    }

    #[test]
    fn scroll_becomes_zoom() {
        let controller = InputController::default();
        assert_eq!(
            controller.handle_event(&InputEvent::Scroll { delta: -1.5 }),
            Some(ViewerCommand::Zoom { delta: -1.5 })
        );
    }
}
