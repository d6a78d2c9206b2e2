use std::path::Path;

use caption_core::SelectedImage;

/// Builds the controller's image descriptor from a local file path.
///
/// The browser-based original receives the MIME type from the file picker;
/// here it is derived from the extension, falling back to a generic binary
/// type for anything unrecognized (the service itself validates content).
pub fn selected_image_for(path: &Path) -> SelectedImage {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image")
        .to_string();
    SelectedImage {
        mime: mime_for_path(path),
        path: path.to_path_buf(),
        file_name,
    }
}

fn mime_for_path(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let mime = match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    };
    mime.to_string()
}
