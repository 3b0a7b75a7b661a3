use std::collections::HashSet;
use log::{debug, info};

use crate::error::{ResolverError, Result};
use crate::module::collector::ModuleCollector;
use crate::module::manifest::{self, ManifestParser};
use crate::module::types::{ExportedSymbol, LoadOptions, Module, Package, SymbolKind};
use super::types::{InterfaceDescriptor, ResolverStats};

/// Resolver over a collection of loaded modules
///
/// Owns the loaded-module collection: created empty, grown by
/// `load_packages` in discovery order, never cleared or deduplicated for
/// the lifetime of the instance. `resolve` is a pure read over that state.
///
/// The resolver has no internal synchronization; callers serialize access
/// to one instance or use one instance per thread.
#[derive(Debug)]
pub struct ClassResolver {
    /// Module collector for discovering module definition files
    collector: ModuleCollector,

    /// Parser for module definition files
    parser: ManifestParser,

    /// Loaded modules in discovery order
    modules: Vec<Module>,
}

impl Default for ClassResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassResolver {
    /// Create a resolver with default options and an empty module collection
    pub fn new() -> Self {
        Self::with_options(LoadOptions::default())
    }

    /// Create a resolver with the given load options
    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            collector: ModuleCollector::with_options(&options),
            parser: ManifestParser::new(),
            modules: Vec::new(),
        }
    }

    /// Load every module discoverable under the given root packages
    ///
    /// Packages are walked in argument order; within each package, modules
    /// load in lexicographic depth-first order and are appended to the
    /// collection as they load. Loading the same package again appends its
    /// modules again; the collection is not deduplicated.
    ///
    /// The first traversal or load failure is returned immediately; modules
    /// loaded before the failure stay in the collection.
    pub fn load_packages(&mut self, packages: &[Package]) -> Result<()> {
        for package in packages {
            self.load_package(package)?;
        }
        Ok(())
    }

    /// Load all modules from a single package tree
    fn load_package(&mut self, package: &Package) -> Result<()> {
        info!("Loading package `{}` from {}", package.name, package.root.display());

        let discovered = self.collector.collect_modules(package)?;

        for module_file in &discovered {
            let module = self.parser.load_module(module_file)?;
            self.modules.push(module);
        }

        info!("Loaded {} modules from package `{}`", discovered.len(), package.name);
        Ok(())
    }

    /// Resolve every concrete class conforming to the given interface
    ///
    /// Scans the loaded modules in collection order and each module's
    /// exports in declaration order. A symbol matches when it is a class,
    /// it conforms to `base` directly or through declared interface
    /// extension chains, and it is not `base` itself. The same class
    /// exported from several modules appears once per export.
    ///
    /// Returns an empty list, not an error, when nothing conforms.
    pub fn resolve(&self, base: &InterfaceDescriptor) -> Result<Vec<&ExportedSymbol>> {
        self.check_descriptor(base)?;

        let mut matches = Vec::new();

        for module in &self.modules {
            for symbol in &module.exports {
                if symbol.kind == SymbolKind::Class
                    && self.conforms(symbol, &base.name)
                    && symbol.name != base.name
                {
                    matches.push(symbol);
                }
            }
        }

        debug!("Resolved {} classes for interface `{}`", matches.len(), base.name);
        Ok(matches)
    }

    /// Verify the descriptor supports a conformance test
    ///
    /// A name only declared as a concrete class is not an interface
    /// contract. A name unknown to the collection is fine; the scan will
    /// simply come up empty.
    fn check_descriptor(&self, base: &InterfaceDescriptor) -> Result<()> {
        if !manifest::is_identifier(&base.name) {
            return Err(ResolverError::InvalidDescriptor {
                name: base.name.clone(),
                reason: "not a valid identifier".to_string(),
            });
        }

        let mut declared_class = false;
        let mut declared_interface = false;

        for symbol in self.modules.iter().flat_map(|m| m.exports.iter()) {
            if symbol.name == base.name {
                match symbol.kind {
                    SymbolKind::Class => declared_class = true,
                    SymbolKind::Interface => declared_interface = true,
                }
            }
        }

        if declared_class && !declared_interface {
            return Err(ResolverError::InvalidDescriptor {
                name: base.name.clone(),
                reason: "declared as a concrete class, not an interface contract".to_string(),
            });
        }

        Ok(())
    }

    /// Test whether a class symbol conforms to the named interface
    fn conforms(&self, symbol: &ExportedSymbol, base: &str) -> bool {
        symbol
            .implements
            .iter()
            .any(|tag| self.interface_chain_reaches(tag, base))
    }

    /// Walk declared interface extension chains from `tag` towards `base`
    ///
    /// The first declaration of an interface name in collection order wins.
    /// Chains through undeclared interfaces end there; cycles terminate.
    fn interface_chain_reaches(&self, tag: &str, base: &str) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(tag.to_string());

        while let Some(name) = current {
            if name == base {
                return true;
            }
            if !visited.insert(name.clone()) {
                return false;
            }
            current = self.find_interface(&name).and_then(|s| s.extends.clone());
        }

        false
    }

    /// First interface declaration with the given name, in collection order
    fn find_interface(&self, name: &str) -> Option<&ExportedSymbol> {
        self.modules
            .iter()
            .flat_map(|m| m.exports.iter())
            .find(|s| s.kind == SymbolKind::Interface && s.name == name)
    }

    /// All loaded modules in discovery order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Compute statistics over the accumulated module collection
    pub fn stats(&self) -> ResolverStats {
        let mut stats = ResolverStats {
            total_modules: self.modules.len(),
            ..ResolverStats::default()
        };

        for module in &self.modules {
            if module.exports.is_empty() {
                stats.empty_modules += 1;
            }
            for symbol in &module.exports {
                stats.total_symbols += 1;
                match symbol.kind {
                    SymbolKind::Class => stats.total_classes += 1,
                    SymbolKind::Interface => stats.total_interfaces += 1,
                }
            }
        }

        stats
    }
}
