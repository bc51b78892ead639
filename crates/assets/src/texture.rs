use crate::error::AssetError;
use std::path::Path;

/// Decoded RGBA8 image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// A 1x1 image of a single colour.
    pub fn solid(name: impl Into<String>, rgba: [u8; 4]) -> Self {
        Self {
            name: name.into(),
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    pub fn fallback_diffuse() -> Self {
        Self::solid("fallback_diffuse", [128, 128, 128, 255])
    }

    /// Flat tangent-space normal (0, 0, 1).
    pub fn fallback_normal() -> Self {
        Self::solid("fallback_normal", [128, 128, 255, 255])
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        Self::from_memory(name, &bytes).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_memory(name: &str, bytes: &[u8]) -> Result<Self, image::ImageError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            name: name.to_string(),
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    /// Open `path`, or use `fallback` when the file does not exist.
    ///
    /// Files that exist but fail to decode are still an error.
    pub fn open_or(
        path: impl AsRef<Path>,
        fallback: impl FnOnce() -> Self,
    ) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "texture not found, generating fallback");
            return Ok(fallback());
        }
        Self::open(path)
    }
}

/// Load the model textures named in an AEM batch from `dir`, in order.
pub fn load_textures(
    dir: impl AsRef<Path>,
    names: &[String],
) -> Result<Vec<TextureImage>, AssetError> {
    let dir = dir.as_ref();
    names
        .iter()
        .map(|name| {
            let image = TextureImage::open(dir.join(name))?;
            tracing::debug!(name, width = image.width, height = image.height, "loaded texture");
            Ok(image)
        })
        .collect()
}
