//! Static tool metadata for the stdio server.
//!
//! Schemas are generated once from the typed argument structs and cached.

mod tools;
mod types;

use once_cell::sync::Lazy;

pub use tools::{CHECK_CATEGORY, GET_SUBCATEGORIES, IS_VALID_CATEGORY};
pub use types::{CategoryArgs, SubcategoriesArgs, ToolMetadata};

/// All tools with static metadata, cached and sorted alphabetically.
static CACHED_TOOL_METADATA: Lazy<Vec<ToolMetadata>> = Lazy::new(|| {
    let mut tools = tools::category_tools();

    // Sort alphabetically by tool name for consistent ordering
    tools.sort_by(|a, b| a.name.cmp(b.name));

    tools
});

/// Returns a static reference to all tool metadata (cached, sorted).
pub fn all_tool_metadata() -> &'static [ToolMetadata] {
    &CACHED_TOOL_METADATA
}
