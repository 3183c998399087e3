use camino::{Utf8Path, Utf8PathBuf};

/// Extension marking a file as a mod package.
pub const PACKAGE_EXT: &str = "pak";
/// Extension of the co-located preview image.
pub const PREVIEW_EXT: &str = "png";
/// Folders may nest at most this deep below the repository root.
pub const MAX_FOLDER_DEPTH: usize = 2;

/// Whether a directory entry name classifies as a package.
/// The extension check is case-insensitive; classification never looks at
/// file contents.
pub fn is_package_name(name: &str) -> bool {
    let suffix = format!(".{PACKAGE_EXT}");
    name.len() > suffix.len() && name.to_lowercase().ends_with(&suffix)
}

/// The preview image path paired with a package path: same base name, the
/// preview extension substituted for the package extension.
pub fn preview_path(package_path: &Utf8Path) -> Utf8PathBuf {
    package_path.with_extension(PREVIEW_EXT)
}

/// Preview file name paired with a package file name.
pub fn preview_name(package_name: &str) -> String {
    preview_path(Utf8Path::new(package_name)).into_string()
}

/// Display stem of a package: the file name without the package extension.
pub fn package_stem(package_name: &str) -> &str {
    Utf8Path::new(package_name)
        .file_stem()
        .unwrap_or(package_name)
}
