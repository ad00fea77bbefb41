//! Loading images picked for upload.

use std::io;
use std::path::Path;

use productos_core::ImageFile;

/// Content type for image file extensions; `None` for anything else.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => return None,
    })
}

pub async fn load_image(path: &Path) -> io::Result<ImageFile> {
    let content_type = content_type_for(path)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "el archivo no es una imagen"))?;
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("imagen")
        .to_string();
    Ok(ImageFile {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}
