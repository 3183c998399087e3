use crate::models::entry::{Package, PackageStatus};
use std::collections::{BTreeMap, BTreeSet};

/// Occurrences of each package name across the whole repository. The game
/// directory is flat, so a name appearing more than once means the copies
/// shadow each other when enabled.
pub fn name_counts(packages: &[Package]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for package in packages {
        *counts.entry(package.name.clone()).or_insert(0) += 1;
    }
    counts
}

/// Number of distinct names that appear in more than one category (conflict
/// groups, not duplicate files). Surfaced to the user, never resolved here.
pub fn conflict_groups(counts: &BTreeMap<String, usize>) -> usize {
    counts.values().filter(|&&count| count > 1).count()
}

/// Display classification for one package name. Conflict beats newness.
pub fn status_of(
    name: &str,
    counts: &BTreeMap<String, usize>,
    known: &BTreeSet<String>,
) -> PackageStatus {
    if counts.get(name).copied().unwrap_or(0) > 1 {
        PackageStatus::Conflicted
    } else if !known.contains(name) {
        PackageStatus::New
    } else {
        PackageStatus::Known
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::Category;

    fn pkg(cat: &str, name: &str) -> Package {
        Package::new(Category::from_rel(cat), name)
    }

    #[test]
    fn groups_count_names_not_files() {
        let packages = vec![
            pkg("", "a.pak"),
            pkg("Weapons", "a.pak"),
            pkg("Armor", "a.pak"),
            pkg("Weapons", "b.pak"),
            pkg("Armor", "b.pak"),
            pkg("", "unique.pak"),
        ];
        let counts = name_counts(&packages);
        // Five duplicate files, but only two conflicted names.
        assert_eq!(conflict_groups(&counts), 2);
    }

    #[test]
    fn status_precedence_is_conflict_then_new() {
        let packages = vec![pkg("", "dup.pak"), pkg("Weapons", "dup.pak"), pkg("", "fresh.pak")];
        let counts = name_counts(&packages);
        let known: BTreeSet<String> = ["dup.pak".to_string()].into();

        assert_eq!(status_of("dup.pak", &counts, &known), PackageStatus::Conflicted);
        assert_eq!(status_of("fresh.pak", &counts, &known), PackageStatus::New);

        let known: BTreeSet<String> = ["fresh.pak".to_string()].into();
        assert_eq!(status_of("fresh.pak", &counts, &known), PackageStatus::Known);
    }
}
