use crate::config::AppConfig;
use crate::models::category::Category;
use crate::models::entry::Package;
use camino::Utf8Path;
use std::collections::{BTreeMap, BTreeSet};

/// Mutable per-run state the interface layer reads and the service layer
/// maintains. Passed explicitly into operations; nothing here is ambient.
///
/// `known` and `folder_states` round-trip through the persisted
/// configuration; the selection lives only for the session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// Package names the user has already seen. Cosmetic: drives the "new"
    /// highlight only.
    pub known: BTreeSet<String>,
    /// Expanded/collapsed flag per folder, keyed by relative path.
    pub folder_states: BTreeMap<String, bool>,
    /// Currently selected packages.
    pub selection: BTreeSet<Package>,
    first_scan_done: bool,
}

impl Session {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            known: config.known_packages.clone(),
            folder_states: config.folder_states.clone(),
            selection: BTreeSet::new(),
            first_scan_done: false,
        }
    }

    /// Copies the persisted subset back into the configuration record.
    pub fn write_back(&self, config: &mut AppConfig) {
        config.known_packages = self.known.clone();
        config.folder_states = self.folder_states.clone();
    }

    // --- Known-set bookkeeping ---

    pub fn mark_known(&mut self, name: &str) {
        self.known.insert(name.to_string());
    }

    pub fn forget(&mut self, name: &str) {
        self.known.remove(name);
    }

    pub fn rename_known(&mut self, old: &str, new: &str) {
        self.known.remove(old);
        self.known.insert(new.to_string());
    }

    pub fn mark_all_known<'a>(&mut self, packages: impl IntoIterator<Item = &'a Package>) {
        for package in packages {
            self.known.insert(package.name.clone());
        }
    }

    /// On the very first scan of a repository, an empty known set is seeded
    /// with everything found so a fresh install does not flag the whole
    /// library as new. Returns whether seeding happened.
    pub fn seed_known_on_first_scan(&mut self, packages: &[Package]) -> bool {
        if self.first_scan_done {
            return false;
        }
        self.first_scan_done = true;
        if self.known.is_empty() && !packages.is_empty() {
            self.mark_all_known(packages);
            return true;
        }
        false
    }

    // --- Selection ---

    pub fn select(&mut self, package: Package) {
        self.selection.insert(package);
    }

    pub fn deselect(&mut self, package: &Package) {
        self.selection.remove(package);
    }

    /// Selects or deselects every package scoped under a tree node: the
    /// uncategorized bucket covers exactly the loose root packages, a folder
    /// covers everything at or below its path.
    pub fn select_scope(&mut self, scope: &Category, packages: &[Package], selected: bool) {
        for package in packages {
            let in_scope = match scope {
                Category::Uncategorized => package.category == Category::Uncategorized,
                Category::Path(rel) => package.category.is_within(rel),
            };
            if in_scope {
                if selected {
                    self.selection.insert(package.clone());
                } else {
                    self.selection.remove(package);
                }
            }
        }
    }

    pub fn select_all(&mut self, packages: &[Package]) {
        self.selection.extend(packages.iter().cloned());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn is_all_selected(&self, total: usize) -> bool {
        total > 0 && self.selection.len() >= total
    }

    // --- Folder expand state ---

    pub fn folder_expanded(&self, rel: &str, default: bool) -> bool {
        self.folder_states.get(rel).copied().unwrap_or(default)
    }

    pub fn set_folder_expanded(&mut self, rel: &str, expanded: bool) {
        self.folder_states.insert(rel.to_string(), expanded);
    }

    /// A folder rename moves its expand flag to the new key.
    pub fn relocate_folder_state(&mut self, old_rel: &Utf8Path, new_rel: &Utf8Path) {
        if let Some(state) = self.folder_states.remove(old_rel.as_str()) {
            self.folder_states.insert(new_rel.as_str().to_string(), state);
        }
    }

    pub fn drop_folder_state(&mut self, rel: &Utf8Path) {
        self.folder_states.remove(rel.as_str());
    }
}
