/// Platform-agnostic input events.
///
/// These are fed into an [`InputController`](super::InputController) which
/// converts them into [`ViewerCommand`](crate::command::ViewerCommand)
/// values.
///
/// # Example
///
/// ```ignore
/// let cmd = controller.handle_event(&InputEvent::Scroll { delta: 1.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// Key name, e.g. `"1"`, `"r"`, `"KeyR"`, `"Escape"`.
        name: String,
    },
    /// The mouse moved while a button was held.
    Drag {
        /// Horizontal offset in pixels.
        dx: f64,
        /// Vertical offset in pixels.
        dy: f64,
        /// Which button is held.
        button: MouseButton,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount (positive = zoom in, negative = zoom out).
        delta: f64,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Any other button (back, forward, extra).
    Other,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}
