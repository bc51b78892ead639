//! In-memory device that records every call, for tests.

use crate::device::{BufferUsage, Geometry, GraphicsDevice};
use crate::draw::{DrawSequence, FallbackTable};
use aemview_assets::TextureImage;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBuffer {
    pub label: String,
    pub size: u64,
    pub usage: BufferUsage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWrite {
    pub buffer: usize,
    pub offset: u64,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub material: (String, String),
    pub dynamic_offset: u32,
    pub indices: Range<u32>,
    pub base_vertex: i32,
}

#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub buffers: Vec<RecordedBuffer>,
    pub writes: Vec<RecordedWrite>,
    pub textures: Vec<String>,
    pub bundles: Vec<Vec<RecordedDraw>>,
    pub bound_dynamic_offset: Option<u64>,
    pub submitted: Vec<usize>,
}

impl GraphicsDevice for RecordingDevice {
    type Buffer = usize;
    type Texture = String;
    type Material = (String, String);
    type Bundle = usize;

    fn create_buffer(&mut self, label: &str, size: u64, usage: BufferUsage) -> usize {
        self.buffers.push(RecordedBuffer {
            label: label.to_string(),
            size,
            usage,
        });
        self.buffers.len() - 1
    }

    fn write_buffer(&mut self, buffer: &usize, offset: u64, bytes: &[u8]) {
        assert!(offset + bytes.len() as u64 <= self.buffers[*buffer].size);
        self.writes.push(RecordedWrite {
            buffer: *buffer,
            offset,
            bytes: bytes.to_vec(),
        });
    }

    fn create_texture(&mut self, image: &TextureImage) -> String {
        self.textures.push(image.name.clone());
        image.name.clone()
    }

    fn create_material(
        &mut self,
        _label: &str,
        diffuse: &String,
        normal: &String,
    ) -> (String, String) {
        (diffuse.clone(), normal.clone())
    }

    fn record_draw_sequence(
        &mut self,
        geometry: &Geometry<usize>,
        materials: &FallbackTable<(String, String)>,
        sequence: &DrawSequence,
    ) -> usize {
        self.bound_dynamic_offset = Some(geometry.layout.dynamic_offset());
        let draws = sequence
            .calls()
            .iter()
            .map(|call| RecordedDraw {
                material: materials.resolve(call.material).clone(),
                dynamic_offset: call.dynamic_offset,
                indices: call.indices.clone(),
                base_vertex: call.base_vertex,
            })
            .collect();
        self.bundles.push(draws);
        self.bundles.len() - 1
    }

    fn submit(&mut self, bundle: &usize) {
        self.submitted.push(*bundle);
    }
}
