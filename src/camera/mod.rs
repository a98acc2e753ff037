//! Camera system for the scroll scene.
//!
//! A fixed-orientation perspective camera, the rig that places it for
//! scroll and parallax, and the GPU uniform that feeds the shaders.

/// GPU camera buffer and bind group.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Parallax group and scroll placement.
pub mod rig;
