//! Inline image payloads: files in, `data:` URLs stored, files back out.

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::core::errors::{Result, WorklogError};
use crate::core::utils::ensure_dir;
use crate::domain::DailyRecord;

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
];

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, mime)| *mime)
}

fn extension_for_mime(mime: &str) -> &'static str {
    IMAGE_TYPES
        .iter()
        .find(|(_, candidate)| *candidate == mime)
        .map(|(ext, _)| *ext)
        .unwrap_or("bin")
}

/// Reads an image file into a `data:<mime>;base64,...` payload.
pub fn load_photo(path: &Path) -> Result<String> {
    let mime = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_for_extension)
        .ok_or_else(|| {
            WorklogError::InvalidInput(format!("`{}` is not a supported image file", path.display()))
        })?;
    let bytes = fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), mime, "loaded photo");
    Ok(encode_photo(mime, &bytes))
}

pub fn encode_photo(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Splits a payload into its MIME type and raw bytes.
pub fn decode_photo(payload: &str) -> Result<(String, Vec<u8>)> {
    let malformed = || WorklogError::InvalidInput("photo payload is not a base64 data URL".into());
    let rest = payload.strip_prefix("data:").ok_or_else(malformed)?;
    let (header, data) = rest.split_once(',').ok_or_else(malformed)?;
    let mime = header.strip_suffix(";base64").ok_or_else(malformed)?;
    let bytes = STANDARD.decode(data.trim()).map_err(|_| malformed())?;
    Ok((mime.to_string(), bytes))
}

/// Writes every photo of `record` into `dir` as `<short id>_<n>.<ext>` and returns
/// the written paths in photo order.
pub fn export_photos(record: &DailyRecord, dir: &Path) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let mut written = Vec::with_capacity(record.photos.len());
    for (idx, payload) in record.photos.iter().enumerate() {
        let (mime, bytes) = decode_photo(payload)?;
        let path = dir.join(format!(
            "{}_{}.{}",
            record.short_id(),
            idx + 1,
            extension_for_mime(&mime)
        ));
        fs::write(&path, bytes)?;
        written.push(path);
    }
    tracing::info!(id = %record.id, count = written.len(), dir = %dir.display(), "exported photos");
    Ok(written)
}
