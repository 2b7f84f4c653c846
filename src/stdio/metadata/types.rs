//! Core types for static tool metadata.

use rmcp::schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata for a single tool.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Value,
    /// Schema of the structured result, for tools returning an object
    pub output_schema: Option<Value>,
}

/// Helper to build schema from Args type.
pub fn build_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null)
}

/// Arguments for `check_category` and `is_valid_category`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryArgs {
    /// The category string to check (e.g., "Gem/Cuisson/Divers")
    pub category: String,
}

/// Arguments for `get_subcategories`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SubcategoriesArgs {
    /// Category prefix to list subcategories of (e.g., "Gem/Cuisson").
    /// Matching is a literal string prefix; an empty prefix lists every category.
    #[serde(default)]
    pub category: String,
}
