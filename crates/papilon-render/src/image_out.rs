use crate::error::{RenderError, Result};
use image::{ImageFormat, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Encodes `image` as PNG next to `path` and renames it into place, so a
/// reader never sees a half-written file.
pub fn write_png(path: &Path, image: &RgbImage) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|source| RenderError::Io {
        path: parent.to_path_buf(),
        source,
    })?;

    let tmp_path = temp_path(path);
    if let Err(err) = image.save_with_format(&tmp_path, ImageFormat::Png) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(RenderError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("figure.png");
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let pid = std::process::id();
    parent.join(format!(".{}.part-{}-{}", file_name, pid, stamp))
}
