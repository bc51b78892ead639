/// Errors from preparing GPU-side scene data.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("uniform offset alignment {0} is not a power of two")]
    InvalidAlignment(u64),
    #[error("model batch names {expected} textures but {found} images were supplied")]
    TextureCountMismatch { expected: usize, found: usize },
    #[error("base vertex {0} does not fit a signed 32-bit draw parameter")]
    BaseVertexOverflow(u32),
}
