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

//! Scroll-driven 3D landing scene rendered with wgpu.
//!
//! Three toon-shaded meshes are stacked one per scroll section, surrounded
//! by a particle cloud and lit by a single directional light. Scrolling
//! moves the camera from section to section and spins the mesh of each
//! newly reached section; the cursor adds an eased parallax offset.
//!
//! # Key entry points
//!
//! - [`engine::SceneEngine`] - GPU resources plus the per-frame loop
//! - [`engine::frame::FrameStep`] - the host-independent update step
//! - [`scene::Scene`] - meshes, particles, light and camera rig
//! - [`params::ParameterStore`] - the panel-editable material color
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Hosts
//!
//! The `viewer` feature opens a winit window where the mouse wheel drives a
//! virtual document scroll; the `gui` feature adds a webview debug panel.
//! The `web` feature attaches to a `<canvas id="webgl">` and follows the
//! real page scroll.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod panel;
pub mod params;
pub mod renderer;
pub mod scene;
pub mod util;
pub mod viewport;

#[cfg(feature = "gui")]
pub mod gui;
#[cfg(feature = "viewer")]
mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::SceneEngine;
pub use error::SceneError;
pub use input::InputEvent;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
