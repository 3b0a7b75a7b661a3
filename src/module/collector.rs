use std::path::Path;
use log::{debug, trace};
use walkdir::WalkDir;

use crate::error::{ResolverError, Result};
use crate::module::types::{LoadOptions, ModuleFile, Package};
use crate::utils::file_utils;

/// Module collector for discovering module definition files in a package tree
#[derive(Debug)]
pub struct ModuleCollector {
    /// Valid file extensions for module definitions
    valid_extensions: Vec<String>,

    /// Whether to follow symbolic links during traversal
    follow_links: bool,
}

impl Default for ModuleCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleCollector {
    /// Create a new module collector with default settings
    pub fn new() -> Self {
        Self::with_options(&LoadOptions::default())
    }

    /// Create a new module collector from load options
    pub fn with_options(options: &LoadOptions) -> Self {
        Self {
            valid_extensions: options.module_extensions.clone(),
            follow_links: options.follow_links,
        }
    }

    /// Collect all module definition files under the package root
    ///
    /// Traversal is depth-first with siblings in lexicographic file-name
    /// order, so discovery order is deterministic for a given tree. Any
    /// traversal failure aborts collection for the package.
    pub fn collect_modules(&self, package: &Package) -> Result<Vec<ModuleFile>> {
        debug!("Collecting modules from package `{}` at {}", package.name, package.root.display());

        let mut modules = Vec::new();

        for entry in WalkDir::new(&package.root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ResolverError::load(&package.name, &package.root, e))?;

            if !entry.file_type().is_file() {
                continue;
            }

            if file_utils::has_any_extension(entry.path(), &self.valid_extensions) {
                let name = self.module_name(package, entry.path())?;
                trace!("Discovered module `{}` at {}", name, entry.path().display());
                modules.push(ModuleFile {
                    name,
                    path: entry.path().to_owned(),
                });
            }
        }

        debug!("Discovered {} modules under `{}`", modules.len(), package.name);
        Ok(modules)
    }

    /// Derive the dotted module name from a file path relative to the
    /// package root, e.g. `<root>/widgets/fancy.yaml` -> `pkg.widgets.fancy`
    fn module_name(&self, package: &Package, path: &Path) -> Result<String> {
        let relative = path
            .strip_prefix(&package.root)
            .map_err(|e| ResolverError::load(&package.name, path, e))?;

        let mut parts = vec![package.name.clone()];

        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                parts.push(component.as_os_str().to_string_lossy().into_owned());
            }
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| ResolverError::load(&package.name, path, "module file has no name"))?;
        parts.push(stem);

        Ok(parts.join("."))
    }

    /// Add a valid file extension
    pub fn add_extension(&mut self, extension: &str) {
        if !self.valid_extensions.contains(&extension.to_string()) {
            self.valid_extensions.push(extension.to_string());
        }
    }

    /// Get the list of valid file extensions
    pub fn extensions(&self) -> &[String] {
        &self.valid_extensions
    }
}
