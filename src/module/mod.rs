pub mod types;
pub mod collector;
pub mod manifest;

// Re-export the main API for easier access
pub use types::{ExportedSymbol, LoadOptions, Module, ModuleFile, Package, SymbolKind};
pub use collector::ModuleCollector;
pub use manifest::ManifestParser;
