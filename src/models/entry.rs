use crate::models::category::Category;
use camino::Utf8PathBuf;

/// A mod package file inside the repository.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Package {
    /// File name including the package extension.
    pub name: String,
    pub category: Category,
}

impl Package {
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// An organizing directory under the repository root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Folder {
    pub relative_path: Utf8PathBuf,
    /// 1 for a top-level folder, 2 for a nested one.
    pub depth: usize,
}

/// A scanned repository entry. Consumers match exhaustively; there is no
/// string tag to inspect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Folder(Folder),
    Package(Package),
}

/// Display classification of a package, in precedence order: a conflicted
/// name wins over newness, newness over plain familiarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageStatus {
    Conflicted,
    New,
    Known,
}
