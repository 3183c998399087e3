use camino::{Utf8Path, Utf8PathBuf};

/// Where a package lives inside the repository.
///
/// `Uncategorized` is the virtual bucket for loose packages at the repository
/// root. It maps to the root physically but is never a real directory entry,
/// so it cannot be created, renamed, or deleted as a folder.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Uncategorized,
    Path(Utf8PathBuf),
}

impl Category {
    /// Builds a category from a relative path, treating the empty string as
    /// the uncategorized bucket.
    pub fn from_rel(rel: impl AsRef<str>) -> Self {
        let rel = rel.as_ref();
        if rel.is_empty() {
            Self::Uncategorized
        } else {
            Self::Path(Utf8PathBuf::from(rel))
        }
    }

    /// The physical directory this category maps to.
    pub fn physical(&self, repo_root: &Utf8Path) -> Utf8PathBuf {
        match self {
            Self::Uncategorized => repo_root.to_owned(),
            Self::Path(rel) => repo_root.join(rel),
        }
    }

    /// Relative path as a string; empty for the uncategorized bucket.
    pub fn rel_str(&self) -> &str {
        match self {
            Self::Uncategorized => "",
            Self::Path(rel) => rel.as_str(),
        }
    }

    /// Nesting depth measured from the repository root. The virtual bucket
    /// counts as depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Uncategorized => 0,
            Self::Path(rel) => rel.components().count(),
        }
    }

    /// Whether this category sits at or below the given folder path.
    pub fn is_within(&self, folder: &Utf8Path) -> bool {
        match self {
            Self::Uncategorized => false,
            Self::Path(rel) => rel == folder || rel.starts_with(folder),
        }
    }
}
