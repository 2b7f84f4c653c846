mod toolset;
mod types;

pub use types::{available_tools, unknown_tools, Cli, Commands};
