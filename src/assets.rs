use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Upload types accepted for logo and signature images. Both .jpg and .jpeg
/// resolve to image/jpeg.
pub const ACCEPTED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Extensions offered in the native file picker.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("unsupported image type '{0}' (accepted: png, jpg, jpeg, webp)")]
    UnsupportedType(String),
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
}

/// Embeds raw bytes as a self-contained data URI.
pub fn to_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Reads an image file and converts it to a data URI. The MIME type is
/// guessed from the extension and must be in the accepted set.
pub fn image_file_to_data_uri(path: &Path) -> Result<String, AssetError> {
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    if !ACCEPTED_IMAGE_TYPES.contains(&mime.as_str()) {
        return Err(AssetError::UnsupportedType(mime));
    }

    let bytes = fs::read(path)?;
    Ok(to_data_uri(&bytes, &mime))
}
