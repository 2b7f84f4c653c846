use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::registry::CategoryRegistry;

/// Category Checker MCP Server - look up categories in a fixed list
///
/// Available tools:
/// - `check_category`: existence check with a message
/// - `is_valid_category`: boolean validity check
/// - `get_subcategories`: prefix-based subcategory listing
#[derive(Parser, Debug)]
#[command(name = "category-checker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON file holding the array of valid categories
    ///
    /// Defaults to `uniques_categories.json` next to the executable.
    /// A missing file yields an empty category list.
    #[arg(long, value_name = "PATH", env = "CATEGORY_CHECKER_FILE")]
    pub categories_file: Option<PathBuf>,

    /// Enable specific tools by name (comma-separated)
    ///
    /// Example: --tools is_valid_category,get_subcategories
    ///
    /// If not specified, all tools are enabled.
    #[arg(long, value_delimiter = ',', conflicts_with = "tool")]
    pub tools: Option<Vec<String>>,

    /// Enable specific tool by name (can be specified multiple times)
    ///
    /// Example: --tool check_category --tool get_subcategories
    ///
    /// If not specified, all tools are enabled.
    #[arg(long = "tool", conflicts_with = "tools")]
    pub tool: Vec<String>,

    /// Load tool names from a toolset name or JSON file
    ///
    /// JSON format:
    /// ```json
    /// {
    ///   "tools": [
    ///     "is_valid_category",
    ///     "get_subcategories"
    ///   ]
    /// }
    /// ```
    ///
    /// Example: --toolset validator
    /// Example: --toolset ~/.config/category-checker/toolset/mine.json
    #[arg(long, value_name = "NAME|PATH", conflicts_with_all = ["tool", "tools"])]
    pub toolset: Option<String>,

    /// List available tool names and exit
    #[arg(long)]
    pub list_tools: bool,

    /// List bundled toolsets and exit
    #[arg(long)]
    pub list_toolsets: bool,

    /// List loaded categories and exit
    #[arg(long)]
    pub list_categories: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Check whether a category exists and print the detailed result as JSON
    Check {
        /// Category to check
        #[arg(allow_hyphen_values = true)]
        category: String,
    },

    /// Print `true` or `false` depending on whether the category is valid
    Valid {
        /// Category to check
        #[arg(allow_hyphen_values = true)]
        category: String,
    },

    /// Print the categories starting with a prefix as a JSON array
    Subcategories {
        /// Literal prefix; omit to list every category
        #[arg(default_value = "", allow_hyphen_values = true)]
        prefix: String,
    },
}

impl Cli {
    /// Get the set of enabled tool names
    ///
    /// Returns None if no filter specified (enable all tools)
    /// Returns Some(HashSet) if filter specified (enable only these tools)
    pub async fn enabled_tools(&self) -> anyhow::Result<Option<HashSet<String>>> {
        // Priority 1: --toolset
        if let Some(ref spec) = self.toolset {
            let tools = super::toolset::load_toolset_spec(spec).await?;
            return Ok(Some(tools.into_iter().collect()));
        }

        // Priority 2: --tools (comma-separated)
        if let Some(tools) = &self.tools {
            return Ok(Some(tools.iter().cloned().collect()));
        }

        // Priority 3: --tool (repeated flags)
        if !self.tool.is_empty() {
            return Ok(Some(self.tool.iter().cloned().collect()));
        }

        // No filter specified - enable all tools
        Ok(None)
    }

    /// Category file path, falling back to the file beside the executable
    pub fn categories_path(&self) -> PathBuf {
        self.categories_file
            .clone()
            .unwrap_or_else(CategoryRegistry::default_path)
    }
}

/// Get all available tool names
pub fn available_tools() -> Vec<&'static str> {
    crate::stdio::metadata::all_tool_metadata()
        .iter()
        .map(|tool| tool.name)
        .collect()
}

/// Tool names in `enabled` that no tool answers to, sorted
pub fn unknown_tools(enabled: &HashSet<String>) -> Vec<&str> {
    let available = available_tools();
    let mut invalid: Vec<&str> = enabled
        .iter()
        .map(String::as_str)
        .filter(|tool| !available.contains(tool))
        .collect();
    invalid.sort_unstable();
    invalid
}
