use crate::core::batch::{self, BatchOutcome};
use crate::core::repository::Snapshot;
use crate::core::shelf::Shelf;
use crate::core::{conflicts, game_dir, lifecycle, preview, repository};
use crate::models::category::Category;
use crate::models::entry::{Entry, Package, PackageStatus};
use crate::models::error::ShelfError;
use crate::models::paths;
use crate::models::session::Session;
use crate::utils::{data_uri, names};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{error, info};

/// Everything a refresh derives from disk: the two-level snapshot, the
/// enabled set, and the conflict accounting. Built fresh after every
/// operation; never carried across one.
pub struct ShelfView {
    pub snapshot: Snapshot,
    pub enabled: BTreeSet<String>,
    pub name_counts: BTreeMap<String, usize>,
    pub conflict_groups: usize,
}

impl ShelfView {
    pub fn is_enabled(&self, name: &str) -> bool {
        game_dir::is_enabled(name, &self.enabled)
    }

    pub fn status(&self, name: &str, session: &Session) -> PackageStatus {
        conflicts::status_of(name, &self.name_counts, &session.known)
    }
}

/// Re-derives the on-disk state. On the first scan of a run an empty known
/// set is seeded with everything found.
pub fn refresh(shelf: &Shelf, session: &mut Session) -> ShelfView {
    let snapshot = repository::snapshot(&shelf.repo_root, shelf.order());
    session.seed_known_on_first_scan(&snapshot.packages);

    let enabled = game_dir::game_files(&shelf.game_root);
    let name_counts = conflicts::name_counts(&snapshot.packages);
    let conflict_groups = conflicts::conflict_groups(&name_counts);

    ShelfView {
        snapshot,
        enabled,
        name_counts,
        conflict_groups,
    }
}

/// The user-initiated refresh: marks everything currently scanned as seen
/// and drops the selection before handing back the fresh view.
pub fn manual_refresh(shelf: &Shelf, session: &mut Session) -> ShelfView {
    let view = refresh(shelf, session);
    session.mark_all_known(&view.snapshot.packages);
    session.clear_selection();
    view
}

/// Toggles one package and marks it seen. On failure the caller leaves its
/// state untouched and re-refreshes.
pub fn toggle(
    shelf: &Shelf,
    session: &mut Session,
    category: &Category,
    name: &str,
    enabled: bool,
) -> Result<bool, ShelfError> {
    let src = shelf.package_path(category, name);
    let now_enabled = lifecycle::toggle_package(&src, &shelf.game_root, name, enabled)?;
    session.mark_known(name);
    Ok(now_enabled)
}

/// Renames a package in place. The new name is normalized (trimmed, package
/// extension appended when missing) and validated before anything is
/// touched; the stale installed copy is removed from the game directory
/// first so no orphan stays enabled under the old name. Returns the name
/// actually used.
pub fn rename_package(
    shelf: &Shelf,
    session: &mut Session,
    category: &Category,
    old_name: &str,
    new_name_raw: &str,
) -> Result<String, ShelfError> {
    let new_name = names::normalize_package_name(new_name_raw)?;
    if new_name == old_name {
        return Ok(new_name);
    }

    lifecycle::disable_package(&shelf.game_root, old_name)?;
    lifecycle::rename_package(&shelf.repo_root, category, old_name, &new_name)?;
    session.rename_known(old_name, &new_name);
    info!("renamed package '{old_name}' -> '{new_name}'");
    Ok(new_name)
}

/// Renames a folder in place and relocates the expand flag keyed by its
/// path. The virtual uncategorized bucket cannot be renamed.
pub fn rename_folder(
    shelf: &Shelf,
    session: &mut Session,
    folder: &Category,
    new_name_raw: &str,
) -> Result<Utf8PathBuf, ShelfError> {
    let Category::Path(old_rel) = folder else {
        return Err(ShelfError::VirtualCategory);
    };
    let new_name = names::normalize_folder_name(new_name_raw)?;
    let new_rel = lifecycle::rename_folder(&shelf.repo_root, old_rel, &new_name)?;
    session.relocate_folder_state(old_rel, &new_rel);
    info!("renamed folder '{old_rel}' -> '{new_rel}'");
    Ok(new_rel)
}

/// Resolves where a new folder goes from the entry selected in the tree:
/// no selection (or the virtual bucket) targets the repository root, a
/// folder targets itself, a package targets its own category. The nesting
/// limit is enforced by `create_folder_in`.
pub fn folder_creation_parent(selected: Option<&Entry>) -> Category {
    match selected {
        None => Category::Uncategorized,
        Some(Entry::Folder(folder)) => Category::Path(folder.relative_path.clone()),
        Some(Entry::Package(package)) => package.category.clone(),
    }
}

/// Creates a new folder under the given parent category, enforcing the
/// two-level nesting limit. Returns the path actually created (the base name
/// may have gained a `" (n)"` suffix).
pub fn create_folder_in(
    shelf: &Shelf,
    parent: &Category,
    base_name: &str,
) -> Result<Utf8PathBuf, ShelfError> {
    if parent.depth() >= paths::MAX_FOLDER_DEPTH {
        return Err(ShelfError::DepthLimit(parent.physical(&shelf.repo_root)));
    }
    lifecycle::create_folder(&parent.physical(&shelf.repo_root), base_name)
}

/// Decodes an arbitrary dropped image and installs it as the package's
/// preview. The package is marked seen only once the write succeeded.
pub fn install_preview(
    shelf: &Shelf,
    session: &mut Session,
    category: &Category,
    name: &str,
    src_image: &Utf8Path,
) -> Result<(), ShelfError> {
    let dest = paths::preview_path(&shelf.package_path(category, name));
    preview::save_preview(src_image, &dest)?;
    session.mark_known(name);
    Ok(())
}

/// Full-size preview of a package as a data URI, if one exists on disk.
pub fn preview_data_uri(shelf: &Shelf, category: &Category, name: &str) -> Option<String> {
    data_uri::file_data_uri(&paths::preview_path(&shelf.package_path(category, name)))
}

/// Enables or disables the whole selection, best-effort. Completed items are
/// marked seen.
pub fn batch_set_enabled(shelf: &Shelf, session: &mut Session, enable: bool) -> BatchOutcome {
    let selection: Vec<Package> = session.selection.iter().cloned().collect();
    let outcome = batch::set_enabled(&shelf.repo_root, &shelf.game_root, &selection, enable);
    for name in &outcome.succeeded {
        session.mark_known(name);
    }
    if let Some(summary) = outcome.summary() {
        error!("batch {}: {summary}", if enable { "enable" } else { "disable" });
    }
    outcome
}

/// Moves the whole selection into a destination category, best-effort, then
/// clears the selection.
pub fn batch_move(
    shelf: &Shelf,
    session: &mut Session,
    dest: &Category,
) -> Result<BatchOutcome, ShelfError> {
    let selection: Vec<Package> = session.selection.iter().cloned().collect();
    let outcome = batch::move_packages(&shelf.repo_root, &selection, dest)?;
    for name in &outcome.succeeded {
        session.mark_known(name);
    }
    session.clear_selection();
    if let Some(summary) = outcome.summary() {
        error!("batch move: {summary}");
    }
    Ok(outcome)
}

/// Deletes the selected packages plus the given folders (three-stage
/// best-effort, see `batch::delete`), updating the session for exactly the
/// items that went away, then clears the selection.
pub fn batch_delete(
    shelf: &Shelf,
    session: &mut Session,
    folders: &[Utf8PathBuf],
) -> BatchOutcome {
    let packages: Vec<Package> = session.selection.iter().cloned().collect();
    let outcome = batch::delete(&shelf.repo_root, &shelf.game_root, &packages, folders);

    for folder in folders {
        if outcome.succeeded.iter().any(|done| done == folder.as_str()) {
            session.drop_folder_state(folder);
        }
    }
    for package in &packages {
        if outcome.succeeded.iter().any(|done| *done == package.name) {
            session.forget(&package.name);
        }
    }
    session.clear_selection();

    if let Some(summary) = outcome.summary() {
        error!("batch delete: {summary}");
    }
    outcome
}

/// Destination choices for a move: the uncategorized bucket pinned first,
/// then every folder in tree order.
pub fn move_targets(snapshot: &Snapshot) -> Vec<Category> {
    let mut targets = vec![Category::Uncategorized];
    targets.extend(snapshot.folder_paths().into_iter().map(Category::Path));
    targets
}

/// Matches for a case-insensitive substring search over the snapshot:
/// matching packages and folders, plus the ancestor folders that must stay
/// visible and expanded for the matches to show.
#[derive(Debug, Default)]
pub struct FilterMatches {
    pub packages: Vec<Package>,
    pub folders: Vec<Utf8PathBuf>,
    pub expand: Vec<Utf8PathBuf>,
}

pub fn search(snapshot: &Snapshot, query: &str) -> FilterMatches {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return FilterMatches {
            packages: snapshot.packages.clone(),
            folders: snapshot.folder_paths(),
            expand: Vec::new(),
        };
    }

    let mut matches = FilterMatches::default();
    let mut visible: BTreeSet<Utf8PathBuf> = BTreeSet::new();
    let mut expand: BTreeSet<Utf8PathBuf> = BTreeSet::new();

    for package in &snapshot.packages {
        if package.name.to_lowercase().contains(&needle) {
            if let Category::Path(rel) = &package.category {
                for ancestor in ancestors_of(rel) {
                    visible.insert(ancestor.clone());
                    expand.insert(ancestor);
                }
            }
            matches.packages.push(package.clone());
        }
    }

    for rel in snapshot.folder_paths() {
        let folder_name = rel.file_name().unwrap_or(rel.as_str());
        if folder_name.to_lowercase().contains(&needle) {
            // The match itself stays collapsed; only its ancestors expand.
            for ancestor in ancestors_of(&rel) {
                if ancestor != rel {
                    expand.insert(ancestor.clone());
                }
                visible.insert(ancestor);
            }
        }
    }

    matches.folders = visible.into_iter().collect();
    matches.expand = expand.into_iter().collect();
    matches
}

fn ancestors_of(rel: &Utf8Path) -> Vec<Utf8PathBuf> {
    rel.ancestors()
        .filter(|a| !a.as_str().is_empty())
        .map(Utf8Path::to_path_buf)
        .collect()
}
