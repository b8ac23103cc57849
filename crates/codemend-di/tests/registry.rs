//! Fragment loading against on-disk descriptor trees.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use codemend_di::{RegistryBuilder, RegistryError, ResourceLoader};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn loader_for(dir: &TempDir) -> Arc<ResourceLoader> {
    Arc::new(ResourceLoader::new(vec![dir.path().to_path_buf()]))
}

#[test]
fn loads_fragments_in_order_and_builds() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "application-context.toml",
        r#"
            [[component]]
            name = "walker"
            kind = "walker"

            [component.properties]
            parser = "@default-parser"

            [[component]]
            name = "default-parser"
            kind = "parser"
        "#,
    );
    write(
        dir.path(),
        "meta/codemend/codemend-json-plugin.toml",
        r#"
            [[component]]
            name = "json-parser"
            kind = "parser"
        "#,
    );

    let mut builder = RegistryBuilder::new(loader_for(&dir));
    builder.load_fragment("application-context.toml").unwrap();
    builder
        .load_fragment("meta/codemend/codemend-json-plugin.toml")
        .unwrap();
    assert_eq!(builder.definitions().len(), 3);

    let registry = builder.build().unwrap();
    assert_eq!(registry.len(), 3);
    assert!(registry.contains("json-parser"));
    let walker = registry.get("walker").unwrap();
    assert_eq!(walker.references(), ["default-parser"]);
}

#[test]
fn later_fragment_overrides_earlier_definition() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "base.toml",
        r#"
            [[component]]
            name = "formatter"
            kind = "formatter"

            [component.properties]
            width = 80
        "#,
    );
    write(
        dir.path(),
        "override.toml",
        r#"
            [[component]]
            name = "formatter"
            kind = "formatter"

            [component.properties]
            width = 120
        "#,
    );

    let mut builder = RegistryBuilder::new(loader_for(&dir));
    builder.load_fragment("base.toml").unwrap();
    builder.load_fragment("override.toml").unwrap();

    let registry = builder.build().unwrap();
    let formatter = registry.get("formatter").unwrap();
    assert_eq!(formatter.property("width"), Some(&serde_json::json!(120)));
}

#[test]
fn missing_fragment_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut builder = RegistryBuilder::new(loader_for(&dir));

    let err = builder.load_fragment("absent.toml").unwrap_err();
    assert!(matches!(
        err,
        RegistryError::FragmentNotFound { ref resource } if resource == "absent.toml"
    ));
}

#[test]
fn probe_tolerates_absence() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "present.toml",
        r#"
            [[component]]
            name = "writer"
            kind = "writer"
        "#,
    );

    let mut builder = RegistryBuilder::new(loader_for(&dir));
    assert!(!builder.load_fragment_if_present("absent.toml").unwrap());
    assert!(builder.load_fragment_if_present("present.toml").unwrap());
    assert_eq!(builder.definitions().len(), 1);
}
