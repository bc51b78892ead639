use crate::draw::{DrawSequence, FallbackTable};
use crate::layout::UniformLayout;
use aemview_assets::TextureImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    Vertex,
    Index,
    Uniform,
}

/// Buffers shared by every draw in the sequence.
#[derive(Debug)]
pub struct Geometry<B> {
    pub vertex_buffer: B,
    pub index_buffer: B,
    pub uniform_buffer: B,
    pub layout: UniformLayout,
}

/// Capabilities the render core needs from a graphics backend.
///
/// Creation and writes are infallible here; backends report their own
/// failures (validation errors, lost surfaces) out of band.
pub trait GraphicsDevice {
    type Buffer;
    type Texture;
    /// Bindable diffuse + normal texture pair.
    type Material;
    /// Pre-recorded, immutable draw sequence.
    type Bundle;

    fn create_buffer(&mut self, label: &str, size: u64, usage: BufferUsage) -> Self::Buffer;

    fn write_buffer(&mut self, buffer: &Self::Buffer, offset: u64, bytes: &[u8]);

    fn create_texture(&mut self, image: &TextureImage) -> Self::Texture;

    fn create_material(
        &mut self,
        label: &str,
        diffuse: &Self::Texture,
        normal: &Self::Texture,
    ) -> Self::Material;

    /// Record `sequence` against `geometry`. The static block is bound from
    /// offset 0 and the dynamic block from `geometry.layout.dynamic_offset()`.
    fn record_draw_sequence(
        &mut self,
        geometry: &Geometry<Self::Buffer>,
        materials: &FallbackTable<Self::Material>,
        sequence: &DrawSequence,
    ) -> Self::Bundle;

    /// Replay a recorded bundle into the current frame.
    fn submit(&mut self, bundle: &Self::Bundle);
}
