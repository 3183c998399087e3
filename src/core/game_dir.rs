use camino::Utf8Path;
use std::collections::BTreeSet;

/// Names of every entry directly inside the game directory. A package is
/// enabled iff its file name is in this set; the set is recomputed on each
/// query because the filesystem is the source of truth.
pub fn game_files(game_root: &Utf8Path) -> BTreeSet<String> {
    let Ok(entries) = std::fs::read_dir(game_root) else {
        return BTreeSet::new();
    };
    entries
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}

pub fn is_enabled(name: &str, enabled: &BTreeSet<String>) -> bool {
    enabled.contains(name)
}
