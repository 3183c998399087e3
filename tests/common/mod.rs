use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Creates a repository/game directory pair under one tempdir.
pub fn setup_test_env() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let repo_root = root.join("repo");
    let game_root = root.join("game");
    fs::create_dir_all(&repo_root).unwrap();
    fs::create_dir_all(&game_root).unwrap();

    (tmp, repo_root, game_root)
}

/// Writes a package file with distinct content so byte-identity can be
/// asserted later. `rel` of "" puts it loose at the repository root.
pub fn create_package(repo_root: &Utf8Path, rel: &str, name: &str, content: &str) -> Utf8PathBuf {
    let dir = if rel.is_empty() {
        repo_root.to_owned()
    } else {
        repo_root.join(rel)
    };
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Writes a small real PNG at the given path.
pub fn create_png(path: &Utf8Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([200, 40, 40]));
    img.save(path).unwrap();
}

pub fn digest(path: &Utf8Path) -> blake3::Hash {
    blake3::hash(&fs::read(path).unwrap())
}
