//! In-memory category registry.
//!
//! Categories are loaded once from a JSON array of strings and never change
//! afterwards. Lookups are literal: membership is whole-string equality and
//! subcategory listing is a plain `starts_with` filter, so a prefix such as
//! `"Gem/Cuis"` matches `"Gem/Cuisson/Divers"`.

mod error;

pub use error::LoadError;

use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::ops::Bound;
use std::path::{Path, PathBuf};

/// File name looked up next to the executable when no path is configured.
pub const DEFAULT_CATEGORIES_FILE: &str = "uniques_categories.json";

/// Result of a detailed existence check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CategoryCheck {
    /// Whether the category is in the list
    pub exists: bool,
    /// The category that was checked, echoed back unchanged
    pub category: String,
    /// Human-readable summary
    pub message: String,
}

/// Immutable set of valid categories.
///
/// Backed by a `BTreeSet` so listings come out in ascending order without a
/// separate sort step.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: BTreeSet<String>,
}

impl CategoryRegistry {
    /// Load categories from a JSON file.
    ///
    /// A missing file produces an empty registry. Any other I/O failure, or
    /// content that is not a JSON array of strings, is returned as a
    /// [`LoadError`].
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!(
                    "Category file not found at {}, starting with an empty category list",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(LoadError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let categories: Vec<String> =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let registry: Self = categories.into_iter().collect();
        log::info!(
            "Loaded {} categories from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Default category file location: beside the running executable.
    ///
    /// Falls back to the bare file name (current directory) when the
    /// executable path cannot be determined.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CATEGORIES_FILE)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATEGORIES_FILE))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Exact membership test shared by every lookup operation.
    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Boolean validity check.
    pub fn is_valid(&self, category: &str) -> bool {
        self.contains(category)
    }

    /// Detailed existence check with a human-readable message.
    pub fn check(&self, category: &str) -> CategoryCheck {
        let exists = self.contains(category);
        let verb = if exists { "exists" } else { "does not exist" };
        CategoryCheck {
            exists,
            category: category.to_string(),
            message: format!("Category '{category}' {verb} in the list."),
        }
    }

    /// All categories starting with `prefix`, in ascending order.
    ///
    /// Includes `prefix` itself when it is a member. An empty prefix returns
    /// the whole set.
    pub fn subcategories(&self, prefix: &str) -> Vec<String> {
        // Every match sorts at or after `prefix`, so the scan can start there
        // and stop at the first miss.
        self.categories
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|category| category.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Iterate all categories in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> CategoryRegistry {
        ["Gem/Cuisson/Divers", "Gem/Cuisson/Four", "Gem/Froid/Divers"]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_check_existing_category() {
        let registry = sample();
        let result = registry.check("Gem/Cuisson/Divers");
        assert_eq!(
            result,
            CategoryCheck {
                exists: true,
                category: "Gem/Cuisson/Divers".to_string(),
                message: "Category 'Gem/Cuisson/Divers' exists in the list.".to_string(),
            }
        );
    }

    #[test]
    fn test_check_missing_category() {
        let registry = sample();
        let result = registry.check("Gem/Chaud");
        assert!(!result.exists);
        assert_eq!(result.category, "Gem/Chaud");
        assert_eq!(
            result.message,
            "Category 'Gem/Chaud' does not exist in the list."
        );
    }

    #[test]
    fn test_membership_is_whole_string() {
        let registry = sample();
        for member in registry.iter() {
            assert!(registry.is_valid(member));
            assert!(registry.check(member).exists);
        }
        for other in ["", "Gem", "Gem/Cuisson", "gem/cuisson/divers", "Gem/Cuisson/Divers/"] {
            assert!(!registry.is_valid(other), "{other:?} should not be valid");
            assert!(!registry.check(other).exists);
        }
    }

    #[test]
    fn test_empty_and_unicode_inputs() {
        let registry: CategoryRegistry = ["Épicerie/Thé", "Gem/Froid"].into_iter().collect();
        assert!(registry.is_valid("Épicerie/Thé"));
        assert_eq!(
            registry.check("").message,
            "Category '' does not exist in the list."
        );
        assert_eq!(registry.subcategories("Épi"), vec!["Épicerie/Thé"]);
    }

    #[test]
    fn test_subcategories_by_prefix() {
        let registry = sample();
        assert_eq!(
            registry.subcategories("Gem/Cuisson"),
            vec!["Gem/Cuisson/Divers", "Gem/Cuisson/Four"]
        );
        assert!(registry.subcategories("Gem/X").is_empty());
    }

    #[test]
    fn test_subcategories_prefix_is_not_segment_aware() {
        let registry = sample();
        assert_eq!(
            registry.subcategories("Gem/Cuis"),
            vec!["Gem/Cuisson/Divers", "Gem/Cuisson/Four"]
        );
    }

    #[test]
    fn test_subcategories_includes_exact_member() {
        let registry: CategoryRegistry = ["A/B", "A/B/C", "A/Bz", "A/C"].into_iter().collect();
        assert_eq!(registry.subcategories("A/B"), vec!["A/B", "A/B/C", "A/Bz"]);
    }

    #[test]
    fn test_subcategories_empty_prefix_returns_everything_sorted() {
        let registry: CategoryRegistry = ["b", "a", "c", "a"].into_iter().collect();
        assert_eq!(registry.subcategories(""), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_subcategories_are_sorted_and_prefixed() {
        let registry: CategoryRegistry = [
            "Gem/Froid/Divers",
            "Gem/Cuisson/Four",
            "Boisson",
            "Gem/Cuisson/Divers",
            "Gem",
            "Gem/Cuisson",
        ]
        .into_iter()
        .collect();

        for prefix in ["", "G", "Gem", "Gem/", "Gem/C", "Gem/Froid", "Z"] {
            let listed = registry.subcategories(prefix);
            assert!(listed.windows(2).all(|w| w[0] < w[1]), "unsorted for {prefix:?}");
            assert!(listed.iter().all(|c| c.starts_with(prefix)));
            let expected = registry.iter().filter(|c| c.starts_with(prefix)).count();
            assert_eq!(listed.len(), expected, "missing matches for {prefix:?}");
        }
    }

    #[test]
    fn test_queries_are_idempotent() {
        let registry = sample();
        assert_eq!(registry.check("Gem/Froid/Divers"), registry.check("Gem/Froid/Divers"));
        assert_eq!(registry.subcategories("Gem"), registry.subcategories("Gem"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_load_deduplicates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Gem/Froid", "Gem/Cuisson", "Gem/Froid"]"#).unwrap();

        let registry = CategoryRegistry::load(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.is_valid("Gem/Froid"));
        assert!(registry.is_valid("Gem/Cuisson"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = CategoryRegistry::load(&dir.path().join("absent.json")).unwrap();

        assert!(registry.is_empty());
        assert!(!registry.is_valid("Gem/Froid"));
        assert!(!registry.check("").exists);
        assert!(registry.subcategories("").is_empty());
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Gem/Froid", "#).unwrap();

        let err = CategoryRegistry::load(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_load_rejects_non_string_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"categories": ["Gem/Froid"]}}"#).unwrap();

        let err = CategoryRegistry::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("not a JSON array of strings"));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CategoryRegistry::load(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn test_default_path_uses_default_file_name() {
        let path = CategoryRegistry::default_path();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some(DEFAULT_CATEGORIES_FILE)
        );
    }
}
