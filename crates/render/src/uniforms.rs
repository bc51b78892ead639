use aemview_assets::VERTEX_SIZE;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// One interleaved vertex as stored in AEM files and vertex buffers.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub uv: [f32; 2],
}

const _: () = assert!(size_of::<Vertex>() == VERTEX_SIZE);

/// Static block at the start of the uniform buffer.
///
/// vec3 members are padded to 16 bytes to match WGSL uniform layout.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub _pad0: f32,
    pub light_direction: [f32; 3],
    pub _pad1: f32,
}

impl SceneUniforms {
    pub fn new(view_proj: Mat4, camera_position: Vec3, light_direction: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: camera_position.to_array(),
            _pad0: 0.0,
            light_direction: light_direction.to_array(),
            _pad1: 0.0,
        }
    }
}

/// Per-object block in the dynamic region.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct WorldUniforms {
    pub world: [[f32; 4]; 4],
}

impl WorldUniforms {
    pub fn new(world: Mat4) -> Self {
        Self {
            world: world.to_cols_array_2d(),
        }
    }
}
