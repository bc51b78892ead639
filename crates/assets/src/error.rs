use std::path::PathBuf;

/// Errors from decoding model files and loading texture images.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "failed to load model {}: unsupported magic number \"{}\", expected AEM",
        .path.display(),
        .found.escape_ascii()
    )]
    BadMagic { path: PathBuf, found: [u8; 3] },
    #[error(
        "failed to load model {}: unsupported version number {found}, expected 1",
        .path.display()
    )]
    UnsupportedVersion { path: PathBuf, found: u8 },
    #[error(
        "failed to load model {}: {section} section ends at byte {end}, file is {len} bytes",
        .path.display()
    )]
    Truncated {
        path: PathBuf,
        section: &'static str,
        end: usize,
        len: usize,
    },
    #[error("failed to load model {}: element counts overflow", .path.display())]
    CountOverflow { path: PathBuf },
    #[error(
        "failed to load model {}: mesh {mesh} ends at index {end}, model has {index_count} indices",
        .path.display()
    )]
    MeshOutOfRange {
        path: PathBuf,
        mesh: u32,
        end: u64,
        index_count: u32,
    },
    #[error(
        "failed to load model {}: mesh {mesh} references material {material}, model has {count}",
        .path.display()
    )]
    MaterialOutOfRange {
        path: PathBuf,
        mesh: u32,
        material: u32,
        count: u32,
    },
    #[error(
        "failed to load model {}: material {material} uses texture {texture}, model has {count}",
        .path.display()
    )]
    TextureOutOfRange {
        path: PathBuf,
        material: u32,
        texture: u32,
        count: u32,
    },
    #[error(
        "failed to load model {}: texture {texture} name is not valid UTF-8",
        .path.display()
    )]
    InvalidTextureName { path: PathBuf, texture: u32 },
    #[error("failed to decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
