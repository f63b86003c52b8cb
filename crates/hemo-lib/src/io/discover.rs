use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files ending in `.<extension>` anywhere below `root`, ordered by path.
/// Files sitting directly in `root` are not recordings and are skipped.
pub fn find_recordings(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{}", extension);
    let mut found = Vec::new();
    for entry in WalkDir::new(root).min_depth(2).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(&suffix) {
            found.push(entry.into_path());
        }
    }
    log::info!("{}: {} recordings", root.display(), found.len());
    Ok(found)
}
