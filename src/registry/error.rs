use std::path::PathBuf;

/// Failure to build a [`CategoryRegistry`](super::CategoryRegistry) from disk.
///
/// A missing file is not an error (it yields an empty registry), so every
/// variant here is fatal for startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read category file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Category file {} is not a JSON array of strings: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
