//! Error types for package loading and class resolution.
//!
//! `ResolverError` is the single error enum surfaced by this crate. Both
//! kinds propagate synchronously to the caller of the triggering operation;
//! nothing is retried or swallowed internally, and recovery is owned by the
//! caller.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Convenience alias for results using the resolver error type.
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Errors surfaced by package loading and class resolution.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// A root package could not be traversed, or a discovered module failed
    /// to load. Aborts the remainder of the triggering load call; modules
    /// loaded before the failure stay in the collection.
    #[error("failed to load module `{module}` from {}: {reason}", .path.display())]
    Load {
        /// Dotted name of the module (or package) that failed
        module: String,

        /// Filesystem path of the failing module file or package root
        path: PathBuf,

        /// Description of the underlying failure
        reason: String,
    },

    /// The descriptor passed to `resolve` does not support a conformance
    /// test. Caller error, no recovery attempted.
    #[error("invalid interface descriptor `{name}`: {reason}")]
    InvalidDescriptor {
        /// Name the caller supplied as the interface contract
        name: String,

        /// Why the name cannot be used for a conformance test
        reason: String,
    },
}

impl ResolverError {
    /// Build a load error from any displayable failure.
    pub(crate) fn load(module: &str, path: impl AsRef<Path>, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            module: module.to_string(),
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
