use camino::{Utf8Path, Utf8PathBuf};
use derive_more::Display;

#[derive(Debug, Display)]
pub enum ShelfError {
    /// Filesystem failure, carrying the offending path.
    #[display("file operation failed at '{_0}': {_1}")]
    Io(Utf8PathBuf, String),
    /// Rejected before touching the filesystem.
    #[display("invalid name: '{_0}'")]
    InvalidName(String),
    #[display("folder nesting limit reached at '{_0}'")]
    DepthLimit(Utf8PathBuf),
    #[display("the uncategorized bucket is not a real folder")]
    VirtualCategory,
    #[display("image operation failed at '{_0}': {_1}")]
    Image(Utf8PathBuf, String),
    #[display("package not found: '{_0}'")]
    PackageNotFound(String),
    #[display("no shelf is open")]
    NoActiveShelf,
}

impl ShelfError {
    pub fn io(path: impl AsRef<Utf8Path>, err: std::io::Error) -> Self {
        Self::Io(path.as_ref().to_owned(), err.to_string())
    }

    pub fn image(path: impl AsRef<Utf8Path>, err: image::ImageError) -> Self {
        Self::Image(path.as_ref().to_owned(), err.to_string())
    }
}

impl std::error::Error for ShelfError {}
