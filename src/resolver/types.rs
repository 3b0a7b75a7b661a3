use serde::{Serialize, Deserialize};

/// Identity of the interface contract to search implementations of
///
/// Supplied by the caller; the name must be a valid identifier to support
/// a conformance test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    /// Name of the interface contract
    pub name: String,
}

impl InterfaceDescriptor {
    /// Create a descriptor for the named interface
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for InterfaceDescriptor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Statistics about the accumulated module collection
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ResolverStats {
    /// Total number of loaded modules, duplicates included
    pub total_modules: usize,

    /// Total number of exported symbols across all modules
    pub total_symbols: usize,

    /// Number of exported concrete classes
    pub total_classes: usize,

    /// Number of exported interfaces
    pub total_interfaces: usize,

    /// Number of modules that export nothing
    pub empty_modules: usize,
}
