//! wgpu render backend for the AEM viewer.
//!
//! Draws the loaded scene by replaying one render bundle per frame.
//! The camera orbits, pans and dollies around a pivot point.
//!
//! # Invariants
//! - The render bundle is recorded once and never re-encoded.
//! - Depth is reversed: cleared to 0, compared with `Greater`.
//! - Camera motion is input-driven and never touches scene data.

mod camera;
mod error;
mod gpu;
mod shaders;

pub use camera::{OrbitCamera, Projection};
pub use error::GpuError;
pub use gpu::{DEPTH_FORMAT, WgpuDevice};
