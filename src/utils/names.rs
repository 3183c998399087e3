use crate::models::error::ShelfError;
use crate::models::paths::PACKAGE_EXT;
use regex::Regex;
use std::sync::LazyLock;

/// A single filesystem entry name: no separators, no traversal.
static ENTRY_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/\\]+$").expect("entry name pattern"));

/// Validates and normalizes a package rename target. The name is trimmed and
/// the package extension appended when missing (case-insensitively), the way
/// an inline edit of `CoolMod` means `CoolMod.pak`.
pub fn normalize_package_name(raw: &str) -> Result<String, ShelfError> {
    let trimmed = validate_entry_name(raw)?;
    let suffix = format!(".{PACKAGE_EXT}");
    if trimmed.to_lowercase().ends_with(&suffix) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{suffix}"))
    }
}

/// Validates and normalizes a folder rename target.
pub fn normalize_folder_name(raw: &str) -> Result<String, ShelfError> {
    validate_entry_name(raw).map(str::to_string)
}

fn validate_entry_name(raw: &str) -> Result<&str, ShelfError> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || !ENTRY_NAME_RE.is_match(trimmed)
    {
        return Err(ShelfError::InvalidName(raw.to_string()));
    }
    Ok(trimmed)
}
