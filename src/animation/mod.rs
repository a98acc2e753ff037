//! Triggered section rotations.
//!
//! Reaching a scroll section spins its mesh by a fixed relative rotation.
//! Each trigger becomes a [`RotationTween`] that adds its delta to the mesh
//! incrementally; tweens on one mesh run concurrently and their
//! contributions sum.

mod animator;
mod tween;

pub use animator::SectionAnimator;
pub use tween::RotationTween;
