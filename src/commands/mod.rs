pub mod output;
pub mod query;

pub use output::write_stdout;
pub use query::handle_query;
