//! Saving the current drawing as an SVG file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::surface::SvgSurface;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `surface` to `path` as a standalone SVG document, replacing any
/// existing file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be written.
pub fn write_svg(path: &Path, surface: &SvgSurface) -> Result<(), ExportError> {
    std::fs::write(path, surface.to_svg()).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), paths = surface.len(), "exported drawing");
    Ok(())
}
