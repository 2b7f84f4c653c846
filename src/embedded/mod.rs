//! Bundled .category-checker assets embedded at compile time
//!
//! Toolsets shipped with the binary are available without any files on disk.

use include_dir::{include_dir, Dir};

/// Embedded .category-checker directory
///
/// Directory structure:
/// ```text
/// .category-checker/
/// └── toolset/
///     ├── checker.json
///     ├── full.json
///     └── validator.json
/// ```
pub static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/.category-checker");

/// Get any embedded file by path relative to .category-checker/
pub fn get_file(path: &str) -> Option<&'static str> {
    ASSETS.get_file(path)?.contents_utf8()
}

/// List all available bundled toolsets
///
/// Returns toolset names (without .json extension), sorted
pub fn list_toolsets() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ASSETS
        .get_dir("toolset")
        .map(|dir| {
            dir.files()
                .filter_map(|file| {
                    let name = file.path().file_name()?.to_str()?;
                    name.strip_suffix(".json")
                })
                .collect()
        })
        .unwrap_or_default();
    names.sort_unstable();
    names
}
