use crate::core::ordering::{self, NameOrder};
use crate::models::category::Category;
use camino::{Utf8Path, Utf8PathBuf};

/// An open workspace: the repository root, the game directory, and the name
/// comparator selected for this process. Holding a `Shelf` implies nothing
/// about the directories actually existing; scanning missing roots simply
/// yields empty results.
pub struct Shelf {
    pub repo_root: Utf8PathBuf,
    pub game_root: Utf8PathBuf,
    order: &'static dyn NameOrder,
}

impl Shelf {
    pub fn open(repo_root: impl Into<Utf8PathBuf>, game_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            repo_root: canonical_or_given(repo_root.into()),
            game_root: canonical_or_given(game_root.into()),
            order: ordering::select_order(),
        }
    }

    pub fn order(&self) -> &'static dyn NameOrder {
        self.order
    }

    /// Physical path of a package file inside the repository.
    pub fn package_path(&self, category: &Category, name: &str) -> Utf8PathBuf {
        category.physical(&self.repo_root).join(name)
    }
}

/// Normalizes an existing user-supplied root; a path that cannot be
/// canonicalized (typically: does not exist yet) is kept as given.
fn canonical_or_given(path: Utf8PathBuf) -> Utf8PathBuf {
    match dunce::canonicalize(&path) {
        Ok(canonical) => Utf8PathBuf::from_path_buf(canonical).unwrap_or(path),
        Err(_) => path,
    }
}
