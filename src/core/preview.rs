use crate::models::error::ShelfError;
use camino::Utf8Path;
use image::ImageFormat;

/// Installs a preview image for a package: decodes an arbitrary source
/// image, normalizes it to 3-channel RGB, and writes it as PNG at the
/// destination, overwriting any previous preview.
pub fn save_preview(src_image: &Utf8Path, dest: &Utf8Path) -> Result<(), ShelfError> {
    let img = image::open(src_image).map_err(|err| ShelfError::image(src_image, err))?;
    img.to_rgb8()
        .save_with_format(dest, ImageFormat::Png)
        .map_err(|err| ShelfError::image(dest, err))
}
