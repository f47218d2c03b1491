//! Input handling: event types, key names, and the controller that
//! converts raw window input into viewer commands.

/// Platform-agnostic input events.
pub mod event;
/// Key names and bindable actions.
pub mod keyboard;
/// Converts raw events into viewer commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::{Key, KeyAction};
pub use processor::{InputController, KeyBinding, KeyBindings};
