//! Path utilities

use std::path::{Path, PathBuf};

use crate::error::{FreezecutError, FreezecutResult};

/// Default suffix appended to the input's file stem
pub const DEFAULT_SUFFIX: &str = "-trimmed";

/// Derive the output path for `input`: `<stem><suffix><.ext>` in the same directory
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };

    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

/// Make `path` absolute against the current directory without touching the filesystem
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Fail with `InputNotFound` unless `path` exists
pub fn ensure_exists(path: &Path) -> FreezecutResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(FreezecutError::InputNotFound {
            path: path.display().to_string(),
        })
    }
}

/// Fail with `OutputIsInput` when `output` names the same file as `input`.
///
/// Both paths are resolved through the filesystem, so `./a.mp4`, `a.mp4` and
/// symlinks to it all compare equal. An output that does not exist yet can
/// never be the input.
pub fn ensure_distinct(input: &Path, output: &Path) -> FreezecutResult<()> {
    if !output.exists() {
        return Ok(());
    }
    let input = input.canonicalize()?;
    if input == output.canonicalize()? {
        return Err(FreezecutError::OutputIsInput {
            path: input.display().to_string(),
        });
    }
    Ok(())
}
