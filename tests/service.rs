mod common;

use common::{create_package, create_png, setup_test_env};
use pakshelf::core::shelf::Shelf;
use pakshelf::core::shelf_service::{
    self, batch_set_enabled, create_folder_in, folder_creation_parent, install_preview,
    manual_refresh, move_targets, preview_data_uri, refresh, rename_folder, rename_package,
    search, toggle,
};
use pakshelf::models::category::Category;
use pakshelf::models::entry::{Entry, Folder, Package, PackageStatus};
use pakshelf::models::error::ShelfError;
use pakshelf::models::paths::preview_path;
use pakshelf::models::session::Session;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

#[test]
fn test_first_refresh_seeds_known_later_ones_do_not() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "", "old.pak", "o");
    let shelf = Shelf::open(repo_root.clone(), game_root);
    let mut session = Session::default();

    let view = refresh(&shelf, &mut session);
    assert_eq!(view.status("old.pak", &session), PackageStatus::Known);

    create_package(&repo_root, "", "fresh.pak", "f");
    let view = refresh(&shelf, &mut session);
    assert_eq!(view.status("fresh.pak", &session), PackageStatus::New);
    assert_eq!(view.status("old.pak", &session), PackageStatus::Known);
}

#[test]
fn test_view_reports_conflicts_and_enabled_state() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "", "dup.pak", "a");
    create_package(&repo_root, "Weapons", "dup.pak", "b");
    fs::write(game_root.join("dup.pak"), "a").unwrap();

    let shelf = Shelf::open(repo_root, game_root);
    let mut session = Session::default();
    let view = refresh(&shelf, &mut session);

    assert_eq!(view.conflict_groups, 1);
    assert!(view.is_enabled("dup.pak"));
    // Conflict outranks familiarity.
    assert_eq!(view.status("dup.pak", &session), PackageStatus::Conflicted);
}

#[test]
fn test_toggle_marks_known_and_flips_state() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "Weapons", "w.pak", "w");
    let shelf = Shelf::open(repo_root, game_root.clone());
    let mut session = Session::default();

    let cat = Category::from_rel("Weapons");
    let enabled = toggle(&shelf, &mut session, &cat, "w.pak", false).unwrap();
    assert!(enabled);
    assert!(game_root.join("w.pak").exists());
    assert!(session.known.contains("w.pak"));

    let enabled = toggle(&shelf, &mut session, &cat, "w.pak", true).unwrap();
    assert!(!enabled);
    assert!(!game_root.join("w.pak").exists());
}

#[test]
fn test_rename_package_normalizes_and_cleans_the_game_dir() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "", "old.pak", "content");
    // Stale installed copy under the old name.
    fs::write(game_root.join("old.pak"), "content").unwrap();

    let shelf = Shelf::open(repo_root.clone(), game_root.clone());
    let mut session = Session::default();
    session.mark_known("old.pak");

    let new_name = rename_package(
        &shelf,
        &mut session,
        &Category::Uncategorized,
        "old.pak",
        "renamed",
    )
    .unwrap();

    assert_eq!(new_name, "renamed.pak");
    assert!(repo_root.join("renamed.pak").exists());
    assert!(!repo_root.join("old.pak").exists());
    // The old installed copy is gone and nothing was re-enabled.
    assert!(!game_root.join("old.pak").exists());
    assert!(!game_root.join("renamed.pak").exists());
    assert!(session.known.contains("renamed.pak"));
    assert!(!session.known.contains("old.pak"));
}

#[test]
fn test_rename_rejects_malformed_targets_before_touching_disk() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "", "keep.pak", "k");
    let shelf = Shelf::open(repo_root.clone(), game_root);
    let mut session = Session::default();

    let result = rename_package(&shelf, &mut session, &Category::Uncategorized, "keep.pak", "  ");
    assert!(matches!(result, Err(ShelfError::InvalidName(_))));
    assert!(repo_root.join("keep.pak").exists());
}

#[test]
fn test_rename_folder_relocates_expand_state() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "Weapons/Rifles", "r.pak", "r");
    let shelf = Shelf::open(repo_root.clone(), game_root);
    let mut session = Session::default();
    session.set_folder_expanded("Weapons/Rifles", true);

    let new_rel = rename_folder(
        &shelf,
        &mut session,
        &Category::from_rel("Weapons/Rifles"),
        "Longarms",
    )
    .unwrap();

    assert_eq!(new_rel, Utf8PathBuf::from("Weapons/Longarms"));
    assert!(repo_root.join("Weapons/Longarms/r.pak").exists());
    assert!(session.folder_expanded("Weapons/Longarms", false));

    // The virtual bucket is never renameable.
    let result = rename_folder(&shelf, &mut session, &Category::Uncategorized, "X");
    assert!(matches!(result, Err(ShelfError::VirtualCategory)));
}

#[test]
fn test_create_folder_honors_the_depth_limit() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    fs::create_dir_all(repo_root.join("A/B")).unwrap();
    let shelf = Shelf::open(repo_root.clone(), game_root);

    let top = create_folder_in(&shelf, &Category::Uncategorized, "New Folder").unwrap();
    assert!(top.is_dir());

    let nested = create_folder_in(&shelf, &Category::from_rel("A"), "New Folder").unwrap();
    assert!(nested.is_dir());

    let result = create_folder_in(&shelf, &Category::from_rel("A/B"), "New Folder");
    assert!(matches!(result, Err(ShelfError::DepthLimit(_))));
}

#[test]
fn test_folder_creation_parent_follows_the_selected_entry() {
    assert_eq!(folder_creation_parent(None), Category::Uncategorized);

    let folder = Entry::Folder(Folder {
        relative_path: "Weapons".into(),
        depth: 1,
    });
    assert_eq!(
        folder_creation_parent(Some(&folder)),
        Category::from_rel("Weapons")
    );

    let package = Entry::Package(Package::new(Category::from_rel("Armor"), "a.pak"));
    assert_eq!(
        folder_creation_parent(Some(&package)),
        Category::from_rel("Armor")
    );
}

#[test]
fn test_install_preview_writes_png_and_marks_known() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    let pak = create_package(&repo_root, "Weapons", "w.pak", "w");
    let dropped = repo_root.join("dropped.png");
    create_png(&dropped);

    let shelf = Shelf::open(repo_root.clone(), game_root);
    let mut session = Session::default();
    let cat = Category::from_rel("Weapons");

    install_preview(&shelf, &mut session, &cat, "w.pak", &dropped).unwrap();
    assert!(preview_path(&pak).exists());
    assert!(session.known.contains("w.pak"));

    let uri = preview_data_uri(&shelf, &cat, "w.pak").unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
}

#[test]
fn test_install_preview_failure_leaves_known_untouched() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "", "w.pak", "w");
    let bogus = create_package(&repo_root, "", "garbage.png", "not an image");

    let shelf = Shelf::open(repo_root, game_root);
    let mut session = Session::default();

    let result = install_preview(
        &shelf,
        &mut session,
        &Category::Uncategorized,
        "w.pak",
        &bogus,
    );
    assert!(result.is_err());
    assert!(!session.known.contains("w.pak"));
}

#[test]
fn test_manual_refresh_marks_all_known_and_clears_selection() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "", "a.pak", "a");
    let shelf = Shelf::open(repo_root.clone(), game_root);
    let mut session = Session::default();

    // Seed the first scan, then add something new and select it.
    refresh(&shelf, &mut session);
    create_package(&repo_root, "", "b.pak", "b");
    session.select(Package::new(Category::Uncategorized, "b.pak"));

    let view = manual_refresh(&shelf, &mut session);
    assert_eq!(view.status("b.pak", &session), PackageStatus::Known);
    assert_eq!(session.selected_count(), 0);
}

#[test]
fn test_batch_wrappers_update_session() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "", "a.pak", "a");
    create_package(&repo_root, "Weapons", "b.pak", "b");
    let shelf = Shelf::open(repo_root, game_root.clone());
    let mut session = Session::default();

    session.select(Package::new(Category::Uncategorized, "a.pak"));
    session.select(Package::new(Category::from_rel("Weapons"), "b.pak"));

    let outcome = batch_set_enabled(&shelf, &mut session, true);
    assert!(outcome.is_clean());
    assert!(game_root.join("a.pak").exists());
    assert!(game_root.join("b.pak").exists());
    assert!(session.known.contains("a.pak"));
    assert!(session.known.contains("b.pak"));

    let outcome = shelf_service::batch_delete(&shelf, &mut session, &[]);
    assert!(outcome.is_clean());
    assert_eq!(session.selected_count(), 0);
    assert!(!session.known.contains("a.pak"));
    // Deleted packages were disabled first.
    assert!(!game_root.join("a.pak").exists());
}

#[test]
fn test_move_targets_pin_uncategorized_first() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "Weapons/Rifles", "r.pak", "r");
    fs::create_dir_all(repo_root.join("Armor")).unwrap();

    let shelf = Shelf::open(repo_root, game_root);
    let mut session = Session::default();
    let view = refresh(&shelf, &mut session);

    let targets = move_targets(&view.snapshot);
    assert_eq!(targets[0], Category::Uncategorized);
    assert!(targets.contains(&Category::from_rel("Armor")));
    assert!(targets.contains(&Category::from_rel("Weapons/Rifles")));
}

#[test]
fn test_search_surfaces_matches_with_their_ancestors() {
    let (_tmp, repo_root, game_root) = setup_test_env();
    create_package(&repo_root, "Weapons/Rifles", "target.pak", "t");
    create_package(&repo_root, "Armor", "plate.pak", "p");

    let shelf = Shelf::open(repo_root, game_root);
    let mut session = Session::default();
    let view = refresh(&shelf, &mut session);

    let matches = search(&view.snapshot, "TARGET");
    assert_eq!(matches.packages.len(), 1);
    assert_eq!(matches.packages[0].name, "target.pak");
    assert!(matches.folders.contains(&Utf8PathBuf::from("Weapons")));
    assert!(matches.folders.contains(&Utf8PathBuf::from("Weapons/Rifles")));
    assert!(matches.expand.contains(&Utf8PathBuf::from("Weapons")));

    // Folder-name matches keep the folder visible and expand its ancestors.
    let matches = search(&view.snapshot, "rifle");
    assert!(matches.packages.is_empty());
    assert!(matches.folders.contains(&Utf8PathBuf::from("Weapons/Rifles")));
    assert!(matches.expand.contains(&Utf8PathBuf::from("Weapons")));
    assert!(!matches.expand.contains(&Utf8PathBuf::from("Weapons/Rifles")));

    // An empty query shows everything.
    let matches = search(&view.snapshot, "");
    assert_eq!(matches.packages.len(), 2);

    let matches = search(&view.snapshot, "no such name");
    assert!(matches.packages.is_empty());
    assert!(matches.folders.is_empty());
}

#[test]
fn test_scanning_unset_directories_never_raises() {
    let shelf = Shelf::open(
        Utf8Path::new("/nonexistent/repo").to_owned(),
        Utf8Path::new("/nonexistent/game").to_owned(),
    );
    let mut session = Session::default();
    let view = refresh(&shelf, &mut session);

    assert!(view.snapshot.packages.is_empty());
    assert!(view.enabled.is_empty());
    assert_eq!(view.conflict_groups, 0);
}
