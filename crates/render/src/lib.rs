//! Rendering core: everything between decoded assets and a graphics device.
//!
//! # Invariants
//! - The dynamic region of the uniform buffer starts at a multiple of the
//!   device's minimum uniform offset alignment.
//! - The same [`UniformLayout`] drives both the bind group ranges and the
//!   per-frame buffer writes.
//! - The draw sequence is recorded once at load and replayed unchanged.
//! - A [`Slot::Fallback`](aemview_assets::Slot) never indexes a real table.

mod device;
mod draw;
mod error;
mod layout;
mod light;
mod scene;
mod uniforms;

#[cfg(test)]
mod recording;

pub use device::{BufferUsage, Geometry, GraphicsDevice};
pub use draw::{DrawCall, DrawSequence, FallbackTable, TextureTable, prepare_materials};
pub use error::RenderError;
pub use layout::{UniformLayout, align};
pub use light::DirectionalLight;
pub use scene::{Scene, SceneTextures};
pub use uniforms::{SceneUniforms, Vertex, WorldUniforms};
