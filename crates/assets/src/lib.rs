//! Asset pipeline: AEM model decoding and texture image loading.
//!
//! Model files are decoded into one shared vertex array, one shared index
//! array and per-model mesh lists. The renderer consumes these once at load
//! time; nothing here touches the GPU.
//!
//! # Invariants
//! - A batch either decodes completely or fails with the first error in
//!   input order. No partial batches are returned.
//! - Header counts are checked against the file length before any section
//!   is read.
//! - Sentinel material/texture bytes never reach callers as indices; they
//!   decode to [`Slot::Fallback`].

mod aem;
mod error;
mod loader;
mod texture;

pub use aem::{
    AemHeader, HEADER_SIZE, MAGIC, MaterialDefinition, MeshDescriptor, ModelBatch, ModelInfo,
    ModelSource, NO_ASSET, Sections, Slot, TEXTURE_NAME_SIZE, VERSION, VERTEX_FLOATS,
    VERTEX_SIZE, decode_models,
};
pub use error::AssetError;
pub use loader::{load_models, read_models};
pub use texture::{TextureImage, load_textures};
