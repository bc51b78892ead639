//! AEM binary model format.
//!
//! # Layout
//! ```text
//! 0x00: magic           [u8; 3]  "AEM"
//! 0x03: version         u8       1
//! 0x04: vertex_count    u32
//! 0x08: index_count     u32
//! 0x0C: mesh_count      u32
//! 0x10: material_count  u32
//! 0x14: texture_count   u32
//! 0x18: vertices        vertex_count * 11 * f32 (position, normal, tangent, uv)
//! var:  indices         index_count * u32
//! var:  meshes          mesh_count * (u32 index_count, u8 material)
//! var:  materials       material_count * (u8 diffuse, u8 normal)
//! var:  textures        texture_count * [u8; 64], null padded
//! ```
//! Multi-byte values are little-endian. Sections follow each other with no
//! padding, so every section offset is derived from the header counts.

use crate::error::AssetError;
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub const MAGIC: [u8; 3] = *b"AEM";
pub const VERSION: u8 = 1;
pub const HEADER_SIZE: usize = 24;

/// Floats per vertex: position(3) + normal(3) + tangent(3) + uv(2).
pub const VERTEX_FLOATS: usize = 11;
pub const VERTEX_SIZE: usize = VERTEX_FLOATS * 4;
const INDEX_SIZE: usize = 4;
const MESH_RECORD_SIZE: usize = 5;
const MATERIAL_RECORD_SIZE: usize = 2;
pub const TEXTURE_NAME_SIZE: usize = 64;

/// Byte value marking "no material" on a mesh or "no texture" on a material.
pub const NO_ASSET: u8 = 255;

/// Reference from a mesh to a material, or from a material to a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Index into the merged table of the batch.
    Index(u32),
    /// Nothing assigned; bind the fallback resource of that kind.
    Fallback,
}

impl Slot {
    pub fn from_byte(byte: u8) -> Self {
        if byte == NO_ASSET {
            Slot::Fallback
        } else {
            Slot::Index(u32::from(byte))
        }
    }

    pub fn index(self) -> Option<u32> {
        match self {
            Slot::Index(i) => Some(i),
            Slot::Fallback => None,
        }
    }

    fn rebase(self, base: u32) -> Self {
        match self {
            Slot::Index(i) => Slot::Index(base + i),
            Slot::Fallback => Slot::Fallback,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Index(i) => write!(f, "#{i}"),
            Slot::Fallback => f.write_str("fallback"),
        }
    }
}

/// Fixed-size header at the start of every AEM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AemHeader {
    pub version: u8,
    pub vertex_count: u32,
    pub index_count: u32,
    pub mesh_count: u32,
    pub material_count: u32,
    pub texture_count: u32,
}

impl AemHeader {
    /// Read and validate the header of `bytes`. `path` is only used for errors.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.len() < HEADER_SIZE {
            return Err(AssetError::Truncated {
                path: path.to_path_buf(),
                section: "header",
                end: HEADER_SIZE,
                len: bytes.len(),
            });
        }

        let found = [bytes[0], bytes[1], bytes[2]];
        if found != MAGIC {
            return Err(AssetError::BadMagic {
                path: path.to_path_buf(),
                found,
            });
        }

        let version = bytes[3];
        if version != VERSION {
            return Err(AssetError::UnsupportedVersion {
                path: path.to_path_buf(),
                found: version,
            });
        }

        Ok(Self {
            version,
            vertex_count: read_u32(bytes, 4),
            index_count: read_u32(bytes, 8),
            mesh_count: read_u32(bytes, 12),
            material_count: read_u32(bytes, 16),
            texture_count: read_u32(bytes, 20),
        })
    }

    /// Byte ranges of every section, checked against a buffer of `len` bytes.
    pub fn sections(&self, path: &Path, len: usize) -> Result<Sections, AssetError> {
        let overflow = || AssetError::CountOverflow {
            path: path.to_path_buf(),
        };

        let mut cursor = HEADER_SIZE;
        let mut section =
            |name: &'static str, count: u32, size: usize| -> Result<Range<usize>, AssetError> {
                let bytes = usize::try_from(count)
                    .ok()
                    .and_then(|n| n.checked_mul(size))
                    .ok_or_else(overflow)?;
                let end = cursor.checked_add(bytes).ok_or_else(overflow)?;
                if end > len {
                    return Err(AssetError::Truncated {
                        path: path.to_path_buf(),
                        section: name,
                        end,
                        len,
                    });
                }
                let range = cursor..end;
                cursor = end;
                Ok(range)
            };

        Ok(Sections {
            vertices: section("vertices", self.vertex_count, VERTEX_SIZE)?,
            indices: section("indices", self.index_count, INDEX_SIZE)?,
            meshes: section("meshes", self.mesh_count, MESH_RECORD_SIZE)?,
            materials: section("materials", self.material_count, MATERIAL_RECORD_SIZE)?,
            textures: section("textures", self.texture_count, TEXTURE_NAME_SIZE)?,
        })
    }
}

/// Byte ranges of the body sections of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    pub vertices: Range<usize>,
    pub indices: Range<usize>,
    pub meshes: Range<usize>,
    pub materials: Range<usize>,
    pub textures: Range<usize>,
}

/// Draw range of one mesh inside the merged buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshDescriptor {
    pub index_count: u32,
    /// Position of the mesh's first index in the merged index array.
    pub first_index: u32,
    /// Base vertex of the owning model; indices are local to that model.
    pub first_vertex: u32,
    pub material: Slot,
}

/// Texture pair of one material. Indices point into [`ModelBatch::textures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialDefinition {
    pub diffuse: Slot,
    pub normal: Slot,
}

/// Raw contents of one model file.
#[derive(Debug, Clone)]
pub struct ModelSource {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Placement of one decoded file inside the merged batch.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub path: PathBuf,
    pub header: AemHeader,
    pub first_vertex: u32,
    pub first_index: u32,
    pub first_material: u32,
    pub first_texture: u32,
    pub meshes: Vec<MeshDescriptor>,
}

/// Result of decoding an ordered list of model files.
#[derive(Debug, Clone, Default)]
pub struct ModelBatch {
    /// Interleaved vertices, [`VERTEX_FLOATS`] floats each.
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    /// One entry per input file, in input order.
    pub models: Vec<ModelInfo>,
    pub materials: Vec<MaterialDefinition>,
    pub textures: Vec<String>,
}

impl ModelBatch {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_FLOATS
    }

    /// Mesh lists, one per input file.
    pub fn mesh_lists(&self) -> impl Iterator<Item = &[MeshDescriptor]> {
        self.models.iter().map(|m| m.meshes.as_slice())
    }
}

/// Decode `sources` into shared buffers.
///
/// All headers are validated before any body is read, so a bad file late in
/// the list still fails the batch without allocating the merged arrays.
pub fn decode_models(sources: &[ModelSource]) -> Result<ModelBatch, AssetError> {
    let mut parsed = Vec::with_capacity(sources.len());
    let mut total_vertices = 0u32;
    let mut total_indices = 0u32;

    for source in sources {
        let header = AemHeader::parse(&source.path, &source.bytes)?;
        let sections = header.sections(&source.path, source.bytes.len())?;
        let overflow = || AssetError::CountOverflow {
            path: source.path.clone(),
        };
        total_vertices = total_vertices
            .checked_add(header.vertex_count)
            .ok_or_else(overflow)?;
        total_indices = total_indices
            .checked_add(header.index_count)
            .ok_or_else(overflow)?;
        tracing::debug!(
            path = %source.path.display(),
            vertices = header.vertex_count,
            indices = header.index_count,
            meshes = header.mesh_count,
            materials = header.material_count,
            textures = header.texture_count,
            "parsed model header"
        );
        parsed.push((source, header, sections));
    }

    let mut batch = ModelBatch {
        vertices: Vec::with_capacity(total_vertices as usize * VERTEX_FLOATS),
        indices: Vec::with_capacity(total_indices as usize),
        ..ModelBatch::default()
    };

    for (source, header, sections) in parsed {
        let model = decode_body(&mut batch, source, header, &sections)?;
        batch.models.push(model);
    }

    tracing::info!(
        models = batch.models.len(),
        vertices = batch.vertex_count(),
        indices = batch.indices.len(),
        materials = batch.materials.len(),
        textures = batch.textures.len(),
        "decoded model batch"
    );
    Ok(batch)
}

fn decode_body(
    batch: &mut ModelBatch,
    source: &ModelSource,
    header: AemHeader,
    sections: &Sections,
) -> Result<ModelInfo, AssetError> {
    let bytes = &source.bytes;
    let path = &source.path;
    let overflow = || AssetError::CountOverflow { path: path.clone() };

    let first_vertex = (batch.vertices.len() / VERTEX_FLOATS) as u32;
    let first_index = batch.indices.len() as u32;
    let first_material = u32::try_from(batch.materials.len()).map_err(|_| overflow())?;
    let first_texture = u32::try_from(batch.textures.len()).map_err(|_| overflow())?;

    batch.vertices.extend(
        bytes[sections.vertices.clone()]
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]])),
    );

    // Index values stay local to this model's vertex block.
    batch.indices.extend(
        bytes[sections.indices.clone()]
            .chunks_exact(INDEX_SIZE)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])),
    );

    let mut meshes = Vec::with_capacity(header.mesh_count as usize);
    let mut mesh_offset = 0u64;
    for (i, record) in bytes[sections.meshes.clone()]
        .chunks_exact(MESH_RECORD_SIZE)
        .enumerate()
    {
        let mesh = i as u32;
        let index_count = read_u32(record, 0);
        let end = mesh_offset + u64::from(index_count);
        if end > u64::from(header.index_count) {
            return Err(AssetError::MeshOutOfRange {
                path: path.clone(),
                mesh,
                end,
                index_count: header.index_count,
            });
        }

        let material = Slot::from_byte(record[4]);
        if let Slot::Index(m) = material {
            if m >= header.material_count {
                return Err(AssetError::MaterialOutOfRange {
                    path: path.clone(),
                    mesh,
                    material: m,
                    count: header.material_count,
                });
            }
        }

        meshes.push(MeshDescriptor {
            index_count,
            first_index: first_index + mesh_offset as u32,
            first_vertex,
            material: material.rebase(first_material),
        });
        mesh_offset = end;
    }

    for (i, record) in bytes[sections.materials.clone()]
        .chunks_exact(MATERIAL_RECORD_SIZE)
        .enumerate()
    {
        let check = |byte: u8| {
            let slot = Slot::from_byte(byte);
            match slot {
                Slot::Index(t) if t >= header.texture_count => Err(AssetError::TextureOutOfRange {
                    path: path.clone(),
                    material: i as u32,
                    texture: t,
                    count: header.texture_count,
                }),
                _ => Ok(slot.rebase(first_texture)),
            }
        };
        batch.materials.push(MaterialDefinition {
            diffuse: check(record[0])?,
            normal: check(record[1])?,
        });
    }

    for (i, field) in bytes[sections.textures.clone()]
        .chunks_exact(TEXTURE_NAME_SIZE)
        .enumerate()
    {
        let name = texture_name(field).ok_or_else(|| AssetError::InvalidTextureName {
            path: path.clone(),
            texture: i as u32,
        })?;
        batch.textures.push(name);
    }

    Ok(ModelInfo {
        path: path.clone(),
        header,
        first_vertex,
        first_index,
        first_material,
        first_texture,
        meshes,
    })
}

/// Name stored in a fixed 64-byte field, cut at the first null.
/// `None` if the name is not UTF-8.
fn texture_name(field: &[u8]) -> Option<String> {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    std::str::from_utf8(&field[..len]).ok().map(str::to_owned)
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(buf)
}
