// Recursive filename search over a local folder

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::extract::{extension_of, SUPPORTED_EXTENSIONS};
use crate::models::FileRecord;
use crate::types::{AppError, AppResult};
use crate::utils::format_file_size;

/// Symlinked directories are followed, so the walk is bounded in depth as well
/// as protected by walkdir's loop detection.
pub const MAX_SEARCH_DEPTH: usize = 32;

/// Find supported files under `root` whose name contains `search_term`, ignoring case.
///
/// A missing root yields an empty list.
pub fn search_files(root: &Path, search_term: &str) -> AppResult<Vec<FileRecord>> {
    if !root.exists() {
        debug!(root = %root.display(), "Search root does not exist");
        return Ok(Vec::new());
    }

    let needle = search_term.to_lowercase();
    let mut results = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .max_depth(MAX_SEARCH_DEPTH)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                warn!(error = %e, "Skipping symlink loop");
                continue;
            }
            Err(e) if is_dangling_link(&e) => {
                warn!(error = %e, "Skipping symlink with missing target");
                continue;
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                return Err(AppError::read(path, source));
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().into_owned();
        let extension = extension_of(entry.path());
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str())
            || !filename.to_lowercase().contains(&needle)
        {
            continue;
        }

        let metadata = entry
            .metadata()
            .map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("metadata unavailable"));
                AppError::read(entry.path(), source)
            })?;
        let modified_date: DateTime<Utc> = metadata
            .modified()
            .map_err(|e| AppError::read(entry.path(), e))?
            .into();

        results.push(FileRecord {
            filename,
            filepath: entry.path().to_string_lossy().into_owned(),
            extension,
            size: metadata.len(),
            size_formatted: format_file_size(metadata.len()),
            modified_date,
        });
    }

    debug!(
        root = %root.display(),
        term = %search_term,
        matches = results.len(),
        "File search finished"
    );

    Ok(results)
}

/// A followed symlink whose target no longer exists.
fn is_dangling_link(e: &walkdir::Error) -> bool {
    let missing = e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::NotFound);
    missing
        && e.path()
            .and_then(|p| p.symlink_metadata().ok())
            .is_some_and(|m| m.file_type().is_symlink())
}
