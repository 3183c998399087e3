use crate::core::ordering::{sort_names, NameOrder};
use crate::models::category::Category;
use crate::models::entry::{Folder, Package};
use crate::models::paths;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Packages and subdirectories directly inside one directory, each in the
/// scanner's name order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirListing {
    pub packages: Vec<String>,
    pub folders: Vec<String>,
}

/// One organizing folder with its direct contents. Subfolders only appear on
/// depth-1 nodes; the scan stops at the nesting limit.
#[derive(Debug, Clone)]
pub struct FolderNode {
    pub folder: Folder,
    pub packages: Vec<String>,
    pub subfolders: Vec<FolderNode>,
}

/// The full two-level view of the repository, re-derived from disk on every
/// refresh and never trusted across operations.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub root_packages: Vec<String>,
    pub folders: Vec<FolderNode>,
    /// Flat `(category, name)` list over everything above; this is what the
    /// selection, conflict, and batch layers consume.
    pub packages: Vec<Package>,
}

impl Snapshot {
    /// Relative paths of every folder in the snapshot, tree order.
    pub fn folder_paths(&self) -> Vec<Utf8PathBuf> {
        let mut paths = Vec::new();
        for node in &self.folders {
            paths.push(node.folder.relative_path.clone());
            for sub in &node.subfolders {
                paths.push(sub.folder.relative_path.clone());
            }
        }
        paths
    }
}

/// Lists the repository root: loose packages plus first-level folders.
pub fn scan_repository(repo_root: &Utf8Path, order: &dyn NameOrder) -> DirListing {
    scan_directory(repo_root, order)
}

/// Lists one directory, non-recursively. Missing or unreadable directories
/// yield an empty listing; scanning is best-effort and never fails.
pub fn scan_directory(dir: &Utf8Path, order: &dyn NameOrder) -> DirListing {
    let mut listing = DirListing::default();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("skipping unreadable directory '{dir}': {err}");
            return listing;
        }
    };

    for entry in entries.flatten() {
        // Non-UTF-8 names cannot be carried through the camino-based model
        // and are skipped like any other unclassifiable entry.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            listing.folders.push(name);
        } else if file_type.is_file() && paths::is_package_name(&name) {
            listing.packages.push(name);
        }
    }

    sort_names(&mut listing.packages, order);
    sort_names(&mut listing.folders, order);
    listing
}

/// Scans the full two-level hierarchy under the repository root.
pub fn snapshot(repo_root: &Utf8Path, order: &dyn NameOrder) -> Snapshot {
    let root = scan_repository(repo_root, order);

    let mut snapshot = Snapshot {
        packages: root
            .packages
            .iter()
            .map(|name| Package::new(Category::Uncategorized, name.clone()))
            .collect(),
        root_packages: root.packages,
        folders: Vec::new(),
    };

    for dir_name in root.folders {
        let rel = Utf8PathBuf::from(&dir_name);
        let listing = scan_directory(&repo_root.join(&rel), order);

        let mut node = FolderNode {
            folder: Folder {
                relative_path: rel.clone(),
                depth: 1,
            },
            packages: listing.packages,
            subfolders: Vec::new(),
        };
        for name in &node.packages {
            snapshot
                .packages
                .push(Package::new(Category::Path(rel.clone()), name.clone()));
        }

        for sub_name in listing.folders {
            let sub_rel = rel.join(&sub_name);
            // Depth 2 is the floor of the hierarchy: packages are listed,
            // anything nested deeper is not part of the model.
            let sub_listing = scan_directory(&repo_root.join(&sub_rel), order);
            for name in &sub_listing.packages {
                snapshot
                    .packages
                    .push(Package::new(Category::Path(sub_rel.clone()), name.clone()));
            }
            node.subfolders.push(FolderNode {
                folder: Folder {
                    relative_path: sub_rel,
                    depth: 2,
                },
                packages: sub_listing.packages,
                subfolders: Vec::new(),
            });
        }

        snapshot.folders.push(node);
    }

    snapshot
}
