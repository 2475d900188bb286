//! Download naming.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PosterError, Result};

use super::ExportArtifact;

const FILENAME_PREFIX: &str = "map-of-love";

/// `map-of-love-<title>.<ext>` with the title lowercased and whitespace runs
/// replaced by hyphens. A blank title yields `map-of-love.<ext>`.
pub fn filename(title: &str, extension: &str) -> String {
    let slug = title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        format!("{FILENAME_PREFIX}.{extension}")
    } else {
        format!("{FILENAME_PREFIX}-{slug}.{extension}")
    }
}

/// Write `artifact` into `dir` under its download name.
pub fn save(artifact: &ExportArtifact, dir: &Path, title: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| PosterError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    let path = dir.join(filename(title, artifact.format.extension()));
    artifact.write_to(&path)?;
    info!(path = %path.display(), bytes = artifact.bytes.len(), "saved export");
    Ok(path)
}
