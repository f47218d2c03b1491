// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math casts and float comparisons are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

//! Camera and view-preset core for an interactive FEA truss viewer.
//!
//! Trussview keeps an orbiting camera pointed at a truss model, switches
//! between named view presets (optionally animated), and produces the
//! view/projection matrices a renderer needs each frame. Rendering itself
//! is left to the caller.
//!
//! # Key entry points
//!
//! - [`viewer::ViewerBuilder`] / [`viewer::Viewer`] - the wired-up viewer
//! - [`camera::Camera`] - orbit / pan / zoom / fit camera
//! - [`views::ViewManager`] - named preset registry and transitions
//! - [`camera::ProjectionManager`] - perspective and orthographic matrices
//! - [`options::ViewerOptions`] - TOML configuration
//!
//! # Architecture
//!
//! Input is translated by [`input::InputController`] into
//! [`command::ViewerCommand`] values, which the viewer applies to the
//! camera (through its [`views::ViewManager`]) or to a
//! [`scene::SceneControls`] collaborator. Once per frame the caller ticks
//! the viewer and uploads [`camera::CameraUniform`].

pub mod camera;
pub mod command;
pub mod error;
pub mod hud;
pub mod input;
pub mod mesh;
pub mod options;
pub mod scene;
pub mod util;
pub mod viewer;
pub mod views;
#[cfg(feature = "viewer")]
pub mod window;

pub use camera::{
    Camera, CameraConfig, CameraUniform, DepthRange, Framing,
    ProjectionManager, ProjectionMode,
};
pub use command::ViewerCommand;
pub use error::{Result, ViewerError};
pub use hud::HudSnapshot;
pub use input::{InputController, InputEvent, KeyBindings, MouseButton};
pub use mesh::{BoundsProvider, FieldLocation, MeshBounds, MeshData};
pub use options::ViewerOptions;
pub use scene::{DisplayState, SceneControls};
pub use util::easing::EasingFunction;
pub use viewer::{Viewer, ViewerBuilder};
pub use views::{PresetConfig, ViewManager};
