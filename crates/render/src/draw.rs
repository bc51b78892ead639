use crate::device::GraphicsDevice;
use crate::error::RenderError;
use aemview_assets::{MaterialDefinition, MeshDescriptor, Slot};
use std::fmt;
use std::ops::Range;

/// Resolved resources plus the one used for [`Slot::Fallback`].
#[derive(Debug, Clone)]
pub struct FallbackTable<T> {
    entries: Vec<T>,
    fallback: T,
}

impl<T> FallbackTable<T> {
    pub fn new(entries: Vec<T>, fallback: T) -> Self {
        Self { entries, fallback }
    }

    pub fn resolve(&self, slot: Slot) -> &T {
        lookup(&self.entries, &self.fallback, slot)
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Model textures with one fallback per texture kind.
#[derive(Debug, Clone)]
pub struct TextureTable<T> {
    pub textures: Vec<T>,
    pub fallback_diffuse: T,
    pub fallback_normal: T,
}

impl<T> TextureTable<T> {
    pub fn diffuse(&self, slot: Slot) -> &T {
        lookup(&self.textures, &self.fallback_diffuse, slot)
    }

    pub fn normal(&self, slot: Slot) -> &T {
        lookup(&self.textures, &self.fallback_normal, slot)
    }
}

fn lookup<'a, T>(entries: &'a [T], fallback: &'a T, slot: Slot) -> &'a T {
    match slot {
        Slot::Fallback => fallback,
        Slot::Index(i) => entries.get(i as usize).unwrap_or_else(|| {
            tracing::warn!(index = i, len = entries.len(), "slot out of range, using fallback");
            fallback
        }),
    }
}

/// Create one device material per definition, plus the fallback material
/// built from both fallback textures.
pub fn prepare_materials<D: GraphicsDevice>(
    device: &mut D,
    definitions: &[MaterialDefinition],
    textures: &TextureTable<D::Texture>,
) -> FallbackTable<D::Material> {
    let materials = definitions
        .iter()
        .enumerate()
        .map(|(i, def)| {
            tracing::debug!(
                material = i,
                diffuse = %def.diffuse,
                normal = %def.normal,
                "preparing material"
            );
            device.create_material(
                &format!("material_{i}"),
                textures.diffuse(def.diffuse),
                textures.normal(def.normal),
            )
        })
        .collect();
    let fallback = device.create_material(
        "fallback_material",
        &textures.fallback_diffuse,
        &textures.fallback_normal,
    );
    FallbackTable::new(materials, fallback)
}

/// One indexed draw: bind material, bind world slot, draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub material: Slot,
    /// Offset of the object's world matrix inside the dynamic region.
    pub dynamic_offset: u32,
    pub indices: Range<u32>,
    pub base_vertex: i32,
}

/// Immutable list of draws, recorded once into a device bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawSequence {
    calls: Vec<DrawCall>,
}

impl DrawSequence {
    /// One draw per mesh, objects in order. Each object is a mesh list paired
    /// with the dynamic offset of its world matrix.
    pub fn assemble<'a>(
        objects: impl IntoIterator<Item = (&'a [MeshDescriptor], u32)>,
    ) -> Result<Self, RenderError> {
        let mut calls = Vec::new();
        for (meshes, dynamic_offset) in objects {
            for mesh in meshes {
                let base_vertex = i32::try_from(mesh.first_vertex)
                    .map_err(|_| RenderError::BaseVertexOverflow(mesh.first_vertex))?;
                calls.push(DrawCall {
                    material: mesh.material,
                    dynamic_offset,
                    indices: mesh.first_index..mesh.first_index + mesh.index_count,
                    base_vertex,
                });
            }
        }
        Ok(Self { calls })
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl fmt::Display for DrawSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, call) in self.calls.iter().enumerate() {
            writeln!(
                f,
                "draw {i}: material={} offset={} indices={}..{} base_vertex={}",
                call.material,
                call.dynamic_offset,
                call.indices.start,
                call.indices.end,
                call.base_vertex
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingDevice;

    fn mesh(
        index_count: u32,
        first_index: u32,
        first_vertex: u32,
        material: Slot,
    ) -> MeshDescriptor {
        MeshDescriptor {
            index_count,
            first_index,
            first_vertex,
            material,
        }
    }

    #[test]
    fn fallback_slot_never_indexes_table() {
        let table = FallbackTable::new(vec!["a", "b"], "fallback");
        assert_eq!(*table.resolve(Slot::Index(1)), "b");
        assert_eq!(*table.resolve(Slot::Fallback), "fallback");
        assert_eq!(*table.resolve(Slot::Index(9)), "fallback");
    }

    #[test]
    fn texture_fallbacks_are_per_kind() {
        let textures = TextureTable {
            textures: vec!["rifle.png"],
            fallback_diffuse: "fallback_diffuse",
            fallback_normal: "fallback_normal",
        };
        assert_eq!(*textures.diffuse(Slot::Index(0)), "rifle.png");
        assert_eq!(*textures.diffuse(Slot::Fallback), "fallback_diffuse");
        assert_eq!(*textures.normal(Slot::Fallback), "fallback_normal");
    }

    #[test]
    fn materials_substitute_missing_textures() {
        let mut device = RecordingDevice::default();
        let textures = TextureTable {
            textures: vec!["rifle.png".to_string()],
            fallback_diffuse: "fallback_diffuse".to_string(),
            fallback_normal: "fallback_normal".to_string(),
        };
        let definitions = [
            MaterialDefinition {
                diffuse: Slot::Index(0),
                normal: Slot::Fallback,
            },
            MaterialDefinition {
                diffuse: Slot::Fallback,
                normal: Slot::Index(0),
            },
        ];

        let materials = prepare_materials(&mut device, &definitions, &textures);

        assert_eq!(materials.len(), 2);
        assert_eq!(
            materials.resolve(Slot::Index(0)),
            &("rifle.png".to_string(), "fallback_normal".to_string())
        );
        assert_eq!(
            materials.resolve(Slot::Index(1)),
            &("fallback_diffuse".to_string(), "rifle.png".to_string())
        );
        assert_eq!(
            materials.fallback(),
            &("fallback_diffuse".to_string(), "fallback_normal".to_string())
        );
    }

    #[test]
    fn assemble_one_call_per_mesh() {
        let first = [mesh(3, 0, 0, Slot::Index(0))];
        let second = [mesh(6, 3, 3, Slot::Fallback), mesh(3, 9, 3, Slot::Index(1))];

        let sequence = DrawSequence::assemble([(&first[..], 0), (&second[..], 256)]).unwrap();

        assert_eq!(sequence.len(), 3);
        assert_eq!(
            sequence.calls()[1],
            DrawCall {
                material: Slot::Fallback,
                dynamic_offset: 256,
                indices: 3..9,
                base_vertex: 3,
            }
        );
        assert_eq!(sequence.calls()[2].indices, 9..12);
    }

    #[test]
    fn base_vertex_overflow() {
        let meshes = [mesh(3, 0, u32::MAX, Slot::Fallback)];
        assert!(matches!(
            DrawSequence::assemble([(&meshes[..], 0)]),
            Err(RenderError::BaseVertexOverflow(u32::MAX))
        ));
    }

    #[test]
    fn display_lists_draws() {
        let meshes = [mesh(3, 0, 0, Slot::Fallback)];
        let sequence = DrawSequence::assemble([(&meshes[..], 0)]).unwrap();
        assert_eq!(
            sequence.to_string(),
            "draw 0: material=fallback offset=0 indices=0..3 base_vertex=0\n"
        );
    }
}
