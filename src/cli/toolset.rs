//! Toolset resolution
//!
//! A toolset specification is either a name or a file path:
//! - Names: "checker", "validator", "full" → search standard locations
//! - File paths: "/path/to/file.json", "./config.json" → use directly
//!
//! Names are searched in (order):
//! 1. {config_dir}/category-checker/toolset/{name}.json
//! 2. toolsets bundled into the binary
//!
//! Cross-platform config directory resolution (via `dirs`):
//! - Linux: ~/.config/category-checker/toolset/
//! - macOS: ~/Library/Application Support/category-checker/toolset/
//! - Windows: %APPDATA%\category-checker\toolset\

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Toolset configuration loaded from JSON file
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsetConfig {
    /// List of individual tool names to enable
    pub tools: Vec<String>,
}

/// Where a toolset specification resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolsetSource {
    File(PathBuf),
    Embedded(String),
}

fn user_toolset_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("category-checker").join("toolset"))
}

/// Whether `spec` names a file rather than a toolset (cross-platform)
fn looks_like_path(spec: &str) -> bool {
    let path = Path::new(spec);
    path.is_absolute()
        || spec.contains('/')
        || spec.contains(MAIN_SEPARATOR)
        || spec.starts_with('.')
        || path.extension().is_some()
}

/// Resolve a toolset specification to its source
pub fn resolve_toolset(spec: &str) -> Result<ToolsetSource> {
    resolve_toolset_in(spec, user_toolset_dir().as_deref())
}

fn resolve_toolset_in(spec: &str, user_dir: Option<&Path>) -> Result<ToolsetSource> {
    if looks_like_path(spec) {
        let path = PathBuf::from(spec);
        if !path.exists() {
            bail!("Toolset file not found: {}", path.display());
        }
        return Ok(ToolsetSource::File(path));
    }

    if let Some(dir) = user_dir {
        let candidate = dir.join(format!("{spec}.json"));
        if candidate.is_file() {
            return Ok(ToolsetSource::File(candidate));
        }
    }

    if crate::embedded::get_file(&format!("toolset/{spec}.json")).is_some() {
        return Ok(ToolsetSource::Embedded(spec.to_string()));
    }

    bail!(
        "Toolset '{}' not found in config directory or bundled toolsets (bundled: {})",
        spec,
        crate::embedded::list_toolsets().join(", ")
    )
}

/// Load the tool names of a resolved toolset
pub async fn load_toolset(source: &ToolsetSource) -> Result<Vec<String>> {
    let config: ToolsetConfig = match source {
        ToolsetSource::Embedded(name) => {
            let content = crate::embedded::get_file(&format!("toolset/{name}.json"))
                .ok_or_else(|| anyhow::anyhow!("Embedded toolset '{}' not found", name))?;
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse embedded toolset '{}'", name))?
        }
        ToolsetSource::File(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read toolset file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse toolset file: {}", path.display()))?
        }
    };

    Ok(config.tools)
}

/// Resolve and load a toolset specification in one step
pub async fn load_toolset_spec(spec: &str) -> Result<Vec<String>> {
    let source = resolve_toolset(spec)?;
    log::debug!("Toolset '{spec}' resolved to {source:?}");
    load_toolset(&source).await
}
