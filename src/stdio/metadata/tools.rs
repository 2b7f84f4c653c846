//! Category lookup tools: existence check, validity check, subcategory listing

use crate::registry::CategoryCheck;

use super::types::{build_schema, CategoryArgs, SubcategoriesArgs, ToolMetadata};

pub const CHECK_CATEGORY: &str = "check_category";
pub const IS_VALID_CATEGORY: &str = "is_valid_category";
pub const GET_SUBCATEGORIES: &str = "get_subcategories";

pub fn category_tools() -> Vec<ToolMetadata> {
    vec![
        ToolMetadata {
            name: CHECK_CATEGORY,
            description: "Check if a category exists in the valid categories list.\n\n Returns an object with 'exists' (bool), 'category' (the checked string) and a human-readable 'message'.\n\n Example: check_category({'category': 'Gem/Cuisson/Divers'})",
            schema: build_schema::<CategoryArgs>(),
            output_schema: Some(build_schema::<CategoryCheck>()),
        },
        ToolMetadata {
            name: IS_VALID_CATEGORY,
            description: "Check whether a category is valid. Returns true only if the exact string is in the valid categories list.\n\n Example: is_valid_category({'category': 'Gem/Cuisson/Divers'})",
            schema: build_schema::<CategoryArgs>(),
            output_schema: None,
        },
        ToolMetadata {
            name: GET_SUBCATEGORIES,
            description: "List every valid category starting with the given prefix, sorted alphabetically. The prefix itself is included when it is a valid category.\n\n Matching is a plain string prefix: 'Gem/Cuis' matches 'Gem/Cuisson/Divers'.\n\n Example: get_subcategories({'category': 'Gem/Cuisson'})",
            schema: build_schema::<SubcategoriesArgs>(),
            output_schema: None,
        },
    ]
}
