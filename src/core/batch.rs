use crate::core::{game_dir, lifecycle};
use crate::models::category::Category;
use crate::models::entry::Package;
use crate::models::error::ShelfError;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug)]
pub struct BatchFailure {
    pub name: String,
    pub error: ShelfError,
}

/// Result of a best-effort batch: every target is attempted, failures are
/// collected instead of aborting, and nothing already done is rolled back.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub attempted: usize,
    /// Names (or folder paths) of the items that completed, so callers can
    /// update bookkeeping for exactly the work that actually happened.
    pub succeeded: Vec<String>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, name: &str, error: ShelfError) {
        warn!("batch item '{name}' failed: {error}");
        self.failures.push(BatchFailure {
            name: name.to_string(),
            error,
        });
    }

    /// Failure count plus a short sample of affected names, the shape the
    /// interface reports after a partial batch.
    pub fn summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let sample: Vec<&str> = self
            .failures
            .iter()
            .take(5)
            .map(|failure| failure.name.as_str())
            .collect();
        Some(format!("{} failed: {}", self.failures.len(), sample.join(", ")))
    }
}

/// Enables or disables every selected package in sequence. Packages whose
/// repository file has vanished are skipped; they have nothing to install
/// and the next refresh drops them anyway.
pub fn set_enabled<'a>(
    repo_root: &Utf8Path,
    game_root: &Utf8Path,
    selection: impl IntoIterator<Item = &'a Package>,
    enable: bool,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for package in selection {
        let src = package.category.physical(repo_root).join(&package.name);
        if !src.exists() {
            continue;
        }
        outcome.attempted += 1;
        let result = if enable {
            lifecycle::enable_package(&src, game_root, &package.name)
        } else {
            lifecycle::disable_package(game_root, &package.name)
        };
        match result {
            Ok(()) => outcome.succeeded.push(package.name.clone()),
            Err(error) => outcome.record(&package.name, error),
        }
    }
    outcome
}

/// Moves every selected package into the destination category. The
/// destination directory is created up front; that failure is fatal since
/// no item could succeed. Items already in the destination are skipped.
pub fn move_packages<'a>(
    repo_root: &Utf8Path,
    selection: impl IntoIterator<Item = &'a Package>,
    dest: &Category,
) -> Result<BatchOutcome, ShelfError> {
    let dest_dir = dest.physical(repo_root);
    std::fs::create_dir_all(&dest_dir).map_err(|err| ShelfError::io(&dest_dir, err))?;

    let mut outcome = BatchOutcome::default();
    for package in selection {
        if package.category == *dest {
            continue;
        }
        outcome.attempted += 1;
        match lifecycle::move_package(repo_root, &package.category, &package.name, dest) {
            Ok(()) => outcome.succeeded.push(package.name.clone()),
            Err(error) => outcome.record(&package.name, error),
        }
    }
    Ok(outcome)
}

/// Deletes selected packages and folders in three best-effort stages:
///
/// 1. every affected package still installed in the game directory is
///    disabled first, so deletion leaves no orphan installed copy;
/// 2. folders are removed recursively;
/// 3. remaining packages are removed, skipping any that lived under a
///    folder handled in stage 2.
pub fn delete(
    repo_root: &Utf8Path,
    game_root: &Utf8Path,
    packages: &[Package],
    folders: &[Utf8PathBuf],
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    let mut enabled = game_dir::game_files(game_root);

    let mut to_disable: BTreeSet<String> = folders
        .iter()
        .flat_map(|folder| lifecycle::packages_under(repo_root, folder))
        .collect();
    for package in packages {
        if !under_any(package, folders) {
            to_disable.insert(package.name.clone());
        }
    }
    for name in &to_disable {
        if enabled.contains(name) {
            match lifecycle::disable_package(game_root, name) {
                Ok(()) => {
                    enabled.remove(name);
                }
                Err(error) => outcome.record(name, error),
            }
        }
    }

    for folder in folders {
        outcome.attempted += 1;
        match lifecycle::delete_folder(repo_root, folder) {
            Ok(()) => outcome.succeeded.push(folder.as_str().to_string()),
            Err(error) => outcome.record(folder.as_str(), error),
        }
    }

    for package in packages {
        if under_any(package, folders) {
            continue;
        }
        outcome.attempted += 1;
        match lifecycle::delete_package(repo_root, &package.category, &package.name) {
            Ok(()) => outcome.succeeded.push(package.name.clone()),
            Err(error) => outcome.record(&package.name, error),
        }
    }

    outcome
}

fn under_any(package: &Package, folders: &[Utf8PathBuf]) -> bool {
    folders.iter().any(|folder| package.category.is_within(folder))
}
