use crate::aem::{ModelBatch, ModelSource, decode_models};
use crate::error::AssetError;
use std::path::{Path, PathBuf};

/// Read every file in `paths`.
///
/// Files are read concurrently; results are joined back into input order and
/// the first failure in that order is returned.
pub fn read_models<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ModelSource>, AssetError> {
    let results: Vec<Result<ModelSource, AssetError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|p| {
                let path = p.as_ref().to_path_buf();
                scope.spawn(move || read_one(path))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });
    results.into_iter().collect()
}

/// Read and decode `paths` into one merged batch.
pub fn load_models<P: AsRef<Path>>(paths: &[P]) -> Result<ModelBatch, AssetError> {
    let sources = read_models(paths)?;
    decode_models(&sources)
}

fn read_one(path: PathBuf) -> Result<ModelSource, AssetError> {
    match std::fs::read(&path) {
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), len = bytes.len(), "read model file");
            Ok(ModelSource { path, bytes })
        }
        Err(source) => {
            tracing::error!(path = %path.display(), "failed to read model file: {source}");
            Err(AssetError::Io { path, source })
        }
    }
}
