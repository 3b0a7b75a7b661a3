use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

use crate::error::{ResolverError, Result};

/// A root package reference supplied by the host application
///
/// A package is a directory tree: subdirectories are sub-packages and
/// module definition files are modules. The package itself is pre-existing
/// state owned by the host; this crate only walks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Namespace name of the package
    pub name: String,

    /// Filesystem root of the package tree
    pub root: PathBuf,
}

impl Package {
    /// Create a package reference rooted at the given directory, deriving
    /// the namespace name from the final path component
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ResolverError::load(&root.to_string_lossy(), root, "cannot derive a package name from the root path")
            })?;

        Self::named(name, root)
    }

    /// Create a package reference with an explicit namespace name
    pub fn named(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let name = name.into();
        let root = root.as_ref();

        if !root.is_dir() {
            return Err(ResolverError::load(&name, root, "package root is not a traversable directory"));
        }

        Ok(Self {
            name,
            root: root.to_path_buf(),
        })
    }
}

/// Identifier of a discoverable module within a package tree, produced by
/// traversal before the module is loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFile {
    /// Dotted namespace name, e.g. `plugins.widgets.fancy`
    pub name: String,

    /// Path to the module definition file
    pub path: PathBuf,
}

/// Kind of a symbol exported from a module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// A concrete class the host can instantiate
    #[default]
    Class,

    /// An abstract contract concrete classes implement
    Interface,
}

/// A top-level symbol exported from a loaded module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedSymbol {
    /// Name of the symbol
    pub name: String,

    /// Kind of the symbol
    pub kind: SymbolKind,

    /// Interfaces this class declares conformance to
    pub implements: Vec<String>,

    /// Parent interface, for interface symbols
    pub extends: Option<String>,

    /// Constructor entry point the host uses to instantiate the class
    pub entry: Option<String>,

    /// Dotted name of the module that exported this symbol
    pub module: String,

    /// Path to the file where this symbol was declared
    pub file_path: Option<PathBuf>,
}

/// A loaded module handle
///
/// Handles are owned by the resolver's collection for the lifetime of the
/// instance; there is no unloading. Re-loading the same path with unchanged
/// content yields a handle with an identical name, path and hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Dotted namespace name of the module
    pub name: String,

    /// Path of the module definition file
    pub path: PathBuf,

    /// SHA-256 hash of the file content at load time
    pub file_hash: String,

    /// When this module was loaded
    pub loaded_at: DateTime<Utc>,

    /// Symbols exported by the module, in declaration order
    pub exports: Vec<ExportedSymbol>,
}

/// Configuration options for package loading
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to follow symbolic links while walking package trees
    pub follow_links: bool,

    /// File extensions recognized as module definitions
    pub module_extensions: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            follow_links: true,
            module_extensions: vec!["yaml".to_string(), "yml".to_string()],
        }
    }
}
