pub mod error;
pub mod module;
pub mod resolver;
pub mod utils;

// Re-export main types and functions for easier access
pub use error::{Result, ResolverError};
pub use module::types::{ExportedSymbol, LoadOptions, Module, ModuleFile, Package, SymbolKind};
pub use module::collector::ModuleCollector;
pub use module::manifest::ManifestParser;
pub use resolver::types::{InterfaceDescriptor, ResolverStats};
pub use resolver::ClassResolver;

// Re-export utility functions
pub use utils::file_utils;

#[cfg(test)]
mod tests;
