use crate::device::{BufferUsage, Geometry, GraphicsDevice};
use crate::draw::{DrawSequence, FallbackTable, TextureTable, prepare_materials};
use crate::error::RenderError;
use crate::layout::UniformLayout;
use crate::uniforms::{SceneUniforms, WorldUniforms};
use aemview_assets::{ModelBatch, TextureImage};
use glam::Mat4;

/// Decoded images for a batch: one per texture name, plus the two fallbacks.
#[derive(Debug, Clone)]
pub struct SceneTextures {
    pub model: Vec<TextureImage>,
    pub fallback_diffuse: TextureImage,
    pub fallback_normal: TextureImage,
}

/// GPU-resident scene: buffers, materials and the recorded draw bundle.
///
/// Each model file of the batch is one object with its own world matrix
/// slot in the dynamic uniform region.
pub struct Scene<D: GraphicsDevice> {
    geometry: Geometry<D::Buffer>,
    materials: FallbackTable<D::Material>,
    sequence: DrawSequence,
    bundle: D::Bundle,
    worlds: Vec<Mat4>,
}

impl<D: GraphicsDevice> Scene<D> {
    /// Upload `batch` and record its draw sequence.
    ///
    /// `alignment` is the device's minimum uniform buffer offset alignment.
    pub fn load(
        device: &mut D,
        batch: &ModelBatch,
        textures: &SceneTextures,
        alignment: u64,
        world: Mat4,
    ) -> Result<Self, RenderError> {
        if textures.model.len() != batch.textures.len() {
            return Err(RenderError::TextureCountMismatch {
                expected: batch.textures.len(),
                found: textures.model.len(),
            });
        }

        let objects = batch.models.len() as u32;
        let layout = UniformLayout::scene(objects, alignment)?;

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&batch.vertices);
        let vertex_buffer =
            device.create_buffer("vertex_buffer", vertex_bytes.len() as u64, BufferUsage::Vertex);
        device.write_buffer(&vertex_buffer, 0, vertex_bytes);

        let index_bytes: &[u8] = bytemuck::cast_slice(&batch.indices);
        let index_buffer =
            device.create_buffer("index_buffer", index_bytes.len() as u64, BufferUsage::Index);
        device.write_buffer(&index_buffer, 0, index_bytes);

        let uniform_buffer =
            device.create_buffer("uniform_buffer", layout.total_size(), BufferUsage::Uniform);

        let texture_table = TextureTable {
            textures: textures
                .model
                .iter()
                .map(|image| device.create_texture(image))
                .collect(),
            fallback_diffuse: device.create_texture(&textures.fallback_diffuse),
            fallback_normal: device.create_texture(&textures.fallback_normal),
        };
        let materials = prepare_materials(device, &batch.materials, &texture_table);

        let sequence = DrawSequence::assemble(
            batch
                .mesh_lists()
                .enumerate()
                .map(|(i, meshes)| (meshes, layout.slot_offset(i as u32))),
        )?;

        let geometry = Geometry {
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            layout,
        };
        let bundle = device.record_draw_sequence(&geometry, &materials, &sequence);

        tracing::info!(
            draws = sequence.len(),
            materials = materials.len(),
            uniform_bytes = layout.total_size(),
            dynamic_offset = layout.dynamic_offset(),
            "scene loaded"
        );

        Ok(Self {
            geometry,
            materials,
            sequence,
            bundle,
            worlds: vec![world; batch.models.len().max(1)],
        })
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.geometry.layout
    }

    pub fn sequence(&self) -> &DrawSequence {
        &self.sequence
    }

    pub fn materials(&self) -> &FallbackTable<D::Material> {
        &self.materials
    }

    pub fn world(&self, object: usize) -> Option<Mat4> {
        self.worlds.get(object).copied()
    }

    pub fn set_world(&mut self, object: usize, world: Mat4) {
        if let Some(slot) = self.worlds.get_mut(object) {
            *slot = world;
        }
    }

    /// Write this frame's uniforms and replay the bundle.
    pub fn render(&self, device: &mut D, frame: &SceneUniforms) {
        let layout = &self.geometry.layout;
        let uniform_buffer = &self.geometry.uniform_buffer;

        device.write_buffer(uniform_buffer, 0, bytemuck::bytes_of(frame));
        for (i, world) in self.worlds.iter().enumerate() {
            let offset = layout.dynamic_offset() + u64::from(layout.slot_offset(i as u32));
            device.write_buffer(
                uniform_buffer,
                offset,
                bytemuck::bytes_of(&WorldUniforms::new(*world)),
            );
        }

        device.submit(&self.bundle);
    }
}
