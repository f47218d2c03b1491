//! Standalone window backed by winit.
//!
//! The window feeds keyboard, drag and scroll input into a [`Viewer`],
//! ticks transitions, and logs the per-frame camera matrices. Drawing the
//! truss is left to whichever renderer consumes the
//! [`CameraUniform`](crate::camera::CameraUniform).
//!
//! ```no_run
//! # use trussview::{CameraConfig, DisplayState, ViewerBuilder};
//! ViewerBuilder::new(CameraConfig::default())
//!     .initial_view("Iso")
//!     .run(DisplayState::new(3), "trussview")
//!     .unwrap();
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::error::{Result, ViewerError};
use crate::input::MouseButton;
use crate::scene::SceneControls;
use crate::util::frame_timing::FrameTiming;
use crate::viewer::{Viewer, ViewerBuilder};

/// Scroll units per pixel for touchpads reporting pixel deltas.
const PIXEL_SCROLL_SCALE: f64 = 0.01;

impl ViewerBuilder {
    /// Build the viewer, open a window, and run the event loop. Blocks
    /// until the window is closed or an exit key is pressed.
    ///
    /// # Errors
    ///
    /// Any [`build`](Self::build) error, or [`ViewerError::Window`] if the
    /// event loop cannot be created or fails.
    pub fn run<S: SceneControls>(self, scene: S, title: &str) -> Result<()> {
        let exit = Rc::new(Cell::new(false));
        let flag = Rc::clone(&exit);
        let viewer = self.build(scene, move || flag.set(true))?;

        let event_loop =
            EventLoop::new().map_err(|e| ViewerError::Window(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            viewer,
            exit,
            title: title.to_owned(),
            shown_view: String::new(),
            drag: None,
            cursor: None,
            timing: FrameTiming::new(),
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Window(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp<S> {
    window: Option<Arc<Window>>,
    viewer: Viewer<S>,
    exit: Rc<Cell<bool>>,
    title: String,
    /// View name last written to the title bar.
    shown_view: String,
    /// Button held since the last press, if any.
    drag: Option<MouseButton>,
    cursor: Option<(f64, f64)>,
    timing: FrameTiming,
}

impl<S: SceneControls> ViewerApp<S> {
    fn aspect(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |w| {
            let size = w.inner_size();
            f64::from(size.width.max(1)) / f64::from(size.height.max(1))
        })
    }

    fn redraw(&mut self) {
        let dt = self.timing.end_frame();
        let _ = self.viewer.tick(dt);

        let aspect = self.aspect();
        match self.viewer.uniform(aspect) {
            Ok(uniform) => {
                log::debug!("view: {:?}", uniform.view);
                log::debug!("proj: {:?}", uniform.proj);
            }
            Err(e) => log::error!("camera uniform: {e}"),
        }

        let hud = self.viewer.hud(self.timing.fps());
        log::trace!("{}", hud.lines().join(" | "));
        if hud.view != self.shown_view {
            if let Some(w) = &self.window {
                w.set_title(&format!("{} | {}", self.title, hud.view));
            }
            self.shown_view = hud.view;
        }

        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn on_cursor(&mut self, x: f64, y: f64) {
        if let (Some(button), Some((px, py))) = (self.drag, self.cursor) {
            self.viewer.on_mouse_drag(x - px, y - py, button);
        }
        self.cursor = Some((x, y));
    }
}

impl<S: SceneControls> ApplicationHandler for ViewerApp<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768));
        match event_loop.create_window(attrs) {
            Ok(w) => {
                let window = Arc::new(w);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                let button = MouseButton::from(button);
                match state {
                    ElementState::Pressed => self.drag = Some(button),
                    ElementState::Released if self.drag == Some(button) => {
                        self.drag = None;
                    }
                    ElementState::Released => {}
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor(position.x, position.y);
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(y),
                    MouseScrollDelta::PixelDelta(pos) => pos.y * PIXEL_SCROLL_SCALE,
                };
                self.viewer.on_scroll(scroll);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if let Err(e) = self.viewer.on_key(&key_str) {
                    log::warn!("key '{key_str}': {e}");
                }
                if self.exit.get() {
                    event_loop.exit();
                }
            }

            _ => (),
        }
    }
}
