//! Image conversion helpers
//!
//! This module handles:
//! - Converting user-picked photo files into normalized PNG blobs for storage
//! - Turning stored blobs back into displayable iced image handles
//! - Loading the placeholder shown when a recipe has no photo

use iced::widget::image::Handle;
use image::ImageFormat;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// File extensions accepted by the image picker
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Convert a user-picked image file into the blob form stored in the database
pub fn to_db_image(path: &Path) -> Result<Vec<u8>, String> {
    let data = std::fs::read(path)
        .map_err(|e| format!("Failed to read image {}: {}", path.display(), e))?;
    normalize(&data)
}

/// Resolve the blob to persist for a submission: a photo picked this
/// session is converted and wins; otherwise an edit keeps the blob its
/// row already stored, and a fresh recipe stores nothing.
pub fn resolve_db_image(
    image_source: Option<&Path>,
    existing_image: Option<Vec<u8>>,
) -> Result<Option<Vec<u8>>, String> {
    match image_source {
        Some(path) => Ok(Some(to_db_image(path)?)),
        None => Ok(existing_image),
    }
}

/// Decode image data in any supported format and re-encode it as PNG.
/// Rejects files that are not actually images regardless of extension.
pub fn normalize(data: &[u8]) -> Result<Vec<u8>, String> {
    let img = image::load_from_memory(data)
        .map_err(|e| format!("Unrecognized image data: {}", e))?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .map_err(|e| format!("Failed to encode image: {}", e))?;

    Ok(out.into_inner())
}

/// Turn a stored blob back into a displayable image handle
pub fn from_db_image(data: &[u8]) -> Handle {
    Handle::from_bytes(data.to_vec())
}

/// Locate the placeholder image asset.
/// Looked up next to the installed executable first, falling back to the
/// working directory for development runs.
fn placeholder_path() -> PathBuf {
    let installed = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .map(|dir| dir.join("assets").join("recipe_placeholder.png"));

    match installed {
        Some(path) if path.exists() => path,
        _ => PathBuf::from("assets").join("recipe_placeholder.png"),
    }
}

/// Load the placeholder image shown when a recipe has no photo.
/// The asset ships with the program; if it is missing the install is
/// broken and the app cannot render the form, so we panic.
pub fn load_placeholder() -> Handle {
    let path = placeholder_path();
    let data = std::fs::read(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load placeholder image {}: {}. Reinstall the application.",
            path.display(),
            e
        )
    });
    Handle::from_bytes(data)
}
