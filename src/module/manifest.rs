use std::collections::HashSet;
use chrono::Utc;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{ResolverError, Result};
use crate::module::types::{ExportedSymbol, Module, ModuleFile, SymbolKind};
use crate::utils::{file_utils, hash_utils};

// Symbol and interface names must be plain identifiers
static IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap()
});

/// Check whether a name is a valid symbol or interface identifier
pub(crate) fn is_identifier(name: &str) -> bool {
    IDENT_RE.is_match(name)
}

/// Declaration of a single exported symbol as written in a module definition file
#[derive(Debug, Clone, Deserialize)]
struct ExportDecl {
    /// Name of the exported symbol
    name: String,

    /// Kind of the symbol, a concrete class unless declared otherwise
    #[serde(default)]
    kind: SymbolKind,

    /// Interfaces the symbol declares conformance to
    #[serde(default)]
    implements: Vec<String>,

    /// Parent interface, only meaningful for interface symbols
    #[serde(default)]
    extends: Option<String>,

    /// Constructor entry point for the host to instantiate the class
    #[serde(default)]
    entry: Option<String>,
}

/// On-disk shape of a module definition file
#[derive(Debug, Clone, Default, Deserialize)]
struct ModuleManifest {
    /// Exported symbols, in declaration order
    #[serde(default)]
    exports: Vec<ExportDecl>,
}

/// Parser for module definition files
#[derive(Debug, Default)]
pub struct ManifestParser {}

impl ManifestParser {
    /// Create a new manifest parser
    pub fn new() -> Self {
        Self {}
    }

    /// Load a single module definition file into a module handle
    ///
    /// An empty file is a valid module with no exports. Malformed YAML or an
    /// invalid export declaration fails the load.
    pub fn load_module(&self, module: &ModuleFile) -> Result<Module> {
        debug!("Loading module `{}` from {}", module.name, module.path.display());

        let content = file_utils::read_file_to_string(&module.path)
            .map_err(|e| ResolverError::load(&module.name, &module.path, e))?;

        let manifest: ModuleManifest = if content.trim().is_empty() {
            warn!("Empty module definition: {}", module.path.display());
            ModuleManifest::default()
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| ResolverError::load(&module.name, &module.path, e))?
        };

        let exports = self.check_exports(module, manifest.exports)?;
        debug!("Found {} exports in `{}`", exports.len(), module.name);

        Ok(Module {
            name: module.name.clone(),
            path: module.path.clone(),
            file_hash: hash_utils::hash_string(&content),
            loaded_at: Utc::now(),
            exports,
        })
    }

    /// Validate export declarations and convert them to exported symbols
    fn check_exports(&self, module: &ModuleFile, decls: Vec<ExportDecl>) -> Result<Vec<ExportedSymbol>> {
        let mut seen = HashSet::new();
        let mut exports = Vec::with_capacity(decls.len());

        for decl in decls {
            if !is_identifier(&decl.name) {
                return Err(ResolverError::load(
                    &module.name,
                    &module.path,
                    format!("export name `{}` is not a valid identifier", decl.name),
                ));
            }

            if !seen.insert(decl.name.clone()) {
                return Err(ResolverError::load(
                    &module.name,
                    &module.path,
                    format!("duplicate export `{}`", decl.name),
                ));
            }

            for interface in &decl.implements {
                if !is_identifier(interface) {
                    return Err(ResolverError::load(
                        &module.name,
                        &module.path,
                        format!("`{}` implements `{}`, which is not a valid identifier", decl.name, interface),
                    ));
                }
            }

            if let Some(parent) = &decl.extends {
                if !is_identifier(parent) {
                    return Err(ResolverError::load(
                        &module.name,
                        &module.path,
                        format!("`{}` extends `{}`, which is not a valid identifier", decl.name, parent),
                    ));
                }
            }

            match decl.kind {
                SymbolKind::Class if decl.extends.is_some() => {
                    return Err(ResolverError::load(
                        &module.name,
                        &module.path,
                        format!("class `{}` may not declare `extends`; only interfaces extend", decl.name),
                    ));
                }
                SymbolKind::Interface if !decl.implements.is_empty() => {
                    return Err(ResolverError::load(
                        &module.name,
                        &module.path,
                        format!("interface `{}` may not declare `implements`", decl.name),
                    ));
                }
                _ => {}
            }

            exports.push(ExportedSymbol {
                name: decl.name,
                kind: decl.kind,
                implements: decl.implements,
                extends: decl.extends,
                entry: decl.entry,
                module: module.name.clone(),
                file_path: Some(module.path.clone()),
            });
        }

        Ok(exports)
    }
}
