use std::path::PathBuf;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Failure to enumerate a directory tree.
///
/// Fatal for the cycle in which it occurs. It is wrapped into an
/// `anyhow::Error` on the way up, so callers recover it with `downcast_ref`.
#[derive(Debug, thiserror::Error)]
pub enum EnumerationError {
    /// The tree root does not exist
    #[error("root directory does not exist: {}", root.display())]
    RootMissing {
        /// Root that was requested
        root: PathBuf,
    },

    /// The tree root exists but is not a directory
    #[error("root is not a directory: {}", root.display())]
    NotADirectory {
        /// Root that was requested
        root: PathBuf,
    },

    /// Part of the tree could not be read
    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        /// Root of the walk that failed
        root: PathBuf,
        /// Underlying traversal error
        #[source]
        source: walkdir::Error,
    },
}
