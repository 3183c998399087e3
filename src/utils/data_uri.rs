use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use camino::Utf8Path;
use std::fs;

/// Wraps PNG bytes as a data URI an interface layer can embed directly.
pub fn png_data_uri(png_bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png_bytes))
}

/// Loads an image file and encodes it as a data URI string.
/// Returns None if the file is missing or the extension is unsupported.
pub fn file_data_uri(path: &Utf8Path) -> Option<String> {
    let mime_type = match path.extension()?.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => return None,
    };
    let bytes = fs::read(path).ok()?;
    Some(format!("data:{mime_type};base64,{}", BASE64.encode(&bytes)))
}
