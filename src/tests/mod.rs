use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::tempdir;
use test_case::test_case;

use crate::error::ResolverError;
use crate::module::collector::ModuleCollector;
use crate::module::manifest::{self, ManifestParser};
use crate::module::types::{LoadOptions, ModuleFile, Package, SymbolKind};
use crate::resolver::types::InterfaceDescriptor;
use crate::resolver::ClassResolver;
use crate::utils::{file_utils, hash_utils};

// Helper function to write a module definition file
fn write_module(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(name);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

#[test]
fn test_manifest_basic() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = write_module(
        temp_dir.path(),
        "widgets.yaml",
        "exports:\n  - name: Widget\n    kind: interface\n  - name: FancyWidget\n    implements: [Widget]\n    entry: fancy_widget::new\n",
    )?;

    let parser = ManifestParser::new();
    let module = parser.load_module(&ModuleFile {
        name: "pkg.widgets".to_string(),
        path: path.clone(),
    })?;

    assert_eq!(module.name, "pkg.widgets");
    assert_eq!(module.exports.len(), 2, "Should have found 2 exports");

    let widget = &module.exports[0];
    assert_eq!(widget.name, "Widget");
    assert_eq!(widget.kind, SymbolKind::Interface);

    let fancy = &module.exports[1];
    assert_eq!(fancy.name, "FancyWidget");
    assert_eq!(fancy.kind, SymbolKind::Class, "kind should default to class");
    assert_eq!(fancy.implements, vec!["Widget".to_string()]);
    assert_eq!(fancy.entry.as_deref(), Some("fancy_widget::new"));
    assert_eq!(fancy.module, "pkg.widgets");
    assert_eq!(fancy.file_path.as_deref(), Some(path.as_path()));

    // The handle hash is the hash of the file content
    assert_eq!(module.file_hash, hash_utils::hash_file(&path)?);

    Ok(())
}

#[test]
fn test_manifest_empty_file_is_a_module_without_exports() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = write_module(temp_dir.path(), "empty.yaml", "")?;

    let parser = ManifestParser::new();
    let module = parser.load_module(&ModuleFile {
        name: "pkg.empty".to_string(),
        path,
    })?;

    assert!(module.exports.is_empty(), "Empty file should export nothing");
    Ok(())
}

#[test]
fn test_manifest_malformed_yaml_fails_load() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = write_module(temp_dir.path(), "broken.yaml", "exports: [\n")?;

    let parser = ManifestParser::new();
    let err = parser
        .load_module(&ModuleFile {
            name: "pkg.broken".to_string(),
            path,
        })
        .unwrap_err();

    assert!(matches!(err, ResolverError::Load { .. }));
    Ok(())
}

#[test]
fn test_manifest_rejects_invalid_export_name() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = write_module(
        temp_dir.path(),
        "bad.yaml",
        "exports:\n  - name: \"not an identifier\"\n",
    )?;

    let parser = ManifestParser::new();
    let err = parser
        .load_module(&ModuleFile {
            name: "pkg.bad".to_string(),
            path,
        })
        .unwrap_err();

    assert!(matches!(err, ResolverError::Load { .. }));
    Ok(())
}

#[test]
fn test_manifest_rejects_duplicate_exports() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = write_module(
        temp_dir.path(),
        "dup.yaml",
        "exports:\n  - name: Widget\n  - name: Widget\n",
    )?;

    let parser = ManifestParser::new();
    let err = parser
        .load_module(&ModuleFile {
            name: "pkg.dup".to_string(),
            path,
        })
        .unwrap_err();

    assert!(matches!(err, ResolverError::Load { .. }));
    Ok(())
}

#[test]
fn test_manifest_rejects_structural_mismatches() -> Result<()> {
    let temp_dir = tempdir()?;
    let parser = ManifestParser::new();

    // Classes extend nothing; only interfaces do
    let path = write_module(
        temp_dir.path(),
        "class_extends.yaml",
        "exports:\n  - name: Widget\n    extends: Base\n",
    )?;
    assert!(parser
        .load_module(&ModuleFile {
            name: "pkg.class_extends".to_string(),
            path,
        })
        .is_err());

    // Interfaces declare extends, not implements
    let path = write_module(
        temp_dir.path(),
        "iface_implements.yaml",
        "exports:\n  - name: Widget\n    kind: interface\n    implements: [Base]\n",
    )?;
    assert!(parser
        .load_module(&ModuleFile {
            name: "pkg.iface_implements".to_string(),
            path,
        })
        .is_err());

    Ok(())
}

#[test]
fn test_collector_lexicographic_depth_first_order() -> Result<()> {
    let temp_dir = tempdir()?;
    write_module(temp_dir.path(), "a.yaml", "")?;
    write_module(temp_dir.path(), "b/c.yaml", "")?;
    write_module(temp_dir.path(), "d.yml", "")?;
    write_module(temp_dir.path(), "notes.txt", "not a module")?;

    let package = Package::named("pkg", temp_dir.path())?;
    let collector = ModuleCollector::new();
    let modules = collector.collect_modules(&package)?;

    let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["pkg.a", "pkg.b.c", "pkg.d"]);

    Ok(())
}

#[test]
fn test_collector_custom_extension() -> Result<()> {
    let temp_dir = tempdir()?;
    write_module(temp_dir.path(), "a.plugin", "")?;
    write_module(temp_dir.path(), "b.yaml", "")?;

    let package = Package::named("pkg", temp_dir.path())?;
    let mut collector = ModuleCollector::with_options(&LoadOptions {
        module_extensions: vec!["plugin".to_string()],
        ..LoadOptions::default()
    });
    assert_eq!(collector.extensions().to_vec(), vec!["plugin".to_string()]);

    let modules = collector.collect_modules(&package)?;
    let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["pkg.a"]);

    collector.add_extension("yaml");
    let modules = collector.collect_modules(&package)?;
    assert_eq!(modules.len(), 2);

    Ok(())
}

#[test]
fn test_package_name_derived_from_directory() -> Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path().join("plugins");
    fs::create_dir_all(&root)?;

    let package = Package::new(&root)?;
    assert_eq!(package.name, "plugins");
    assert_eq!(package.root, root);

    Ok(())
}

#[test]
fn test_package_root_must_be_a_directory() {
    let err = Package::new("/definitely/not/a/real/path").unwrap_err();
    assert!(matches!(err, ResolverError::Load { .. }));
}

#[test]
fn test_resolve_rejects_non_identifier_descriptor() {
    let resolver = ClassResolver::new();
    let err = resolver
        .resolve(&InterfaceDescriptor::new("not an identifier"))
        .unwrap_err();
    assert!(matches!(err, ResolverError::InvalidDescriptor { .. }));
}

#[test_case("Widget", true; "plain name")]
#[test_case("_private", true; "leading underscore")]
#[test_case("Widget2", true; "trailing digit")]
#[test_case("2Widget", false; "leading digit")]
#[test_case("Wid get", false; "embedded space")]
#[test_case("", false; "empty")]
#[test_case("a.b", false; "dotted")]
fn test_is_identifier(name: &str, expected: bool) {
    assert_eq!(manifest::is_identifier(name), expected);
}

#[test_case("module.yaml", "yaml", true; "exact match")]
#[test_case("module.YAML", "yaml", true; "case insensitive")]
#[test_case("module.yml", "yaml", false; "different extension")]
#[test_case("module", "yaml", false; "no extension")]
fn test_has_extension(path: &str, extension: &str, expected: bool) {
    assert_eq!(file_utils::has_extension(path, extension), expected);
}

#[test]
fn test_hash_string_is_stable() {
    assert_eq!(
        hash_utils::hash_string("hello"),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    assert_eq!(hash_utils::hash_string("hello"), hash_utils::hash_string("hello"));
}
