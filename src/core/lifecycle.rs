use crate::models::category::Category;
use crate::models::error::ShelfError;
use crate::models::paths;
use camino::{Utf8Path, Utf8PathBuf};
use filetime::{set_file_mtime, FileTime};
use walkdir::WalkDir;

/// Flips the enabled state of one package. Enabling copies the repository
/// file into the game directory (the repository always retains the master
/// copy); disabling removes the installed copy. Returns the new flag.
pub fn toggle_package(
    package_src: &Utf8Path,
    game_root: &Utf8Path,
    name: &str,
    enabled: bool,
) -> Result<bool, ShelfError> {
    if enabled {
        disable_package(game_root, name)?;
        Ok(false)
    } else {
        enable_package(package_src, game_root, name)?;
        Ok(true)
    }
}

/// Copies a package into the game directory, overwriting any installed copy
/// and carrying over the source modification time.
pub fn enable_package(
    package_src: &Utf8Path,
    game_root: &Utf8Path,
    name: &str,
) -> Result<(), ShelfError> {
    let target = game_root.join(name);
    std::fs::copy(package_src, &target).map_err(|err| ShelfError::io(&target, err))?;
    if let Ok(meta) = std::fs::metadata(package_src) {
        let _ = set_file_mtime(&target, FileTime::from_last_modification_time(&meta));
    }
    Ok(())
}

/// Removes the installed copy from the game directory. A missing copy is not
/// an error; the package is simply already disabled.
pub fn disable_package(game_root: &Utf8Path, name: &str) -> Result<(), ShelfError> {
    let target = game_root.join(name);
    if target.exists() {
        std::fs::remove_file(&target).map_err(|err| ShelfError::io(&target, err))?;
    }
    Ok(())
}

/// Moves a package (and its paired preview, if present) between categories.
pub fn move_package(
    repo_root: &Utf8Path,
    from: &Category,
    name: &str,
    to: &Category,
) -> Result<(), ShelfError> {
    let old = from.physical(repo_root).join(name);
    let new = to.physical(repo_root).join(name);
    rename_pair(&old, &new)
}

/// Renames a package in place, preview in lockstep.
pub fn rename_package(
    repo_root: &Utf8Path,
    category: &Category,
    old_name: &str,
    new_name: &str,
) -> Result<(), ShelfError> {
    let dir = category.physical(repo_root);
    rename_pair(&dir.join(old_name), &dir.join(new_name))
}

/// Renames a folder in place, preserving its parent. Returns the new
/// relative path so callers can relocate state keyed by the old one.
pub fn rename_folder(
    repo_root: &Utf8Path,
    old_rel: &Utf8Path,
    new_name: &str,
) -> Result<Utf8PathBuf, ShelfError> {
    let parent = old_rel.parent().unwrap_or(Utf8Path::new(""));
    let new_rel = parent.join(new_name);
    let src = repo_root.join(old_rel);
    std::fs::rename(&src, repo_root.join(&new_rel)).map_err(|err| ShelfError::io(&src, err))?;
    Ok(new_rel)
}

/// Removes a package file and its paired preview. Idempotent: files that are
/// already gone are not an error.
pub fn delete_package(
    repo_root: &Utf8Path,
    category: &Category,
    name: &str,
) -> Result<(), ShelfError> {
    let target = category.physical(repo_root).join(name);
    if target.exists() {
        std::fs::remove_file(&target).map_err(|err| ShelfError::io(&target, err))?;
    }
    let preview = paths::preview_path(&target);
    if preview.exists() {
        std::fs::remove_file(&preview).map_err(|err| ShelfError::io(&preview, err))?;
    }
    Ok(())
}

/// Recursively removes a folder and everything inside it.
pub fn delete_folder(repo_root: &Utf8Path, rel: &Utf8Path) -> Result<(), ShelfError> {
    let dir = repo_root.join(rel);
    if dir.exists() {
        std::fs::remove_dir_all(&dir).map_err(|err| ShelfError::io(&dir, err))?;
    }
    Ok(())
}

/// Creates a directory named `base_name` under `target_dir`, appending
/// `" (2)"`, `" (3)"`, … until an unused name is found. Returns the path
/// actually created.
pub fn create_folder(target_dir: &Utf8Path, base_name: &str) -> Result<Utf8PathBuf, ShelfError> {
    let mut target = target_dir.join(base_name);
    let mut counter = 1u32;
    while target.exists() {
        counter += 1;
        target = target_dir.join(format!("{base_name} ({counter})"));
    }
    std::fs::create_dir_all(&target).map_err(|err| ShelfError::io(&target, err))?;
    Ok(target)
}

/// Package file names found anywhere under a folder, walked fresh from disk
/// rather than from a snapshot. Used by the batch delete pre-disable stage.
pub fn packages_under(repo_root: &Utf8Path, folder_rel: &Utf8Path) -> Vec<String> {
    WalkDir::new(repo_root.join(folder_rel))
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| paths::is_package_name(name))
        .collect()
}

/// Renames a package/preview pair. The preview goes first: a preview failure
/// aborts before the package has moved, while a package failure afterwards
/// leaves the pair split and reported (no rollback).
fn rename_pair(old: &Utf8Path, new: &Utf8Path) -> Result<(), ShelfError> {
    let old_preview = paths::preview_path(old);
    if old_preview.exists() {
        std::fs::rename(&old_preview, paths::preview_path(new))
            .map_err(|err| ShelfError::io(&old_preview, err))?;
    }
    std::fs::rename(old, new).map_err(|err| ShelfError::io(old, err))
}
