use kapigraph::errors::LoadError;
use kapigraph::inventory::{load_universe, Inventory, NameStyle};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let mut f = fs::File::create(path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
}

#[test]
fn loads_classes_with_dotted_names_and_targets_by_basename() {
    let dir = tempdir().unwrap();
    let inv = dir.path().join("inventory");
    write_file(&inv.join("classes/common.yml"), "parameters: {}\n");
    write_file(&inv.join("classes/component/nginx.yaml"), "classes:\n  - common\n");
    write_file(&inv.join("classes/component/README.md"), "classes: [ignored]\n");
    write_file(&inv.join("targets/prod/eu/cluster1.yml"), "classes:\n  - component.nginx\n");
    write_file(&inv.join("targets/notes.txt"), "not yaml");

    let loaded = Inventory::load(&inv).unwrap();
    let mut classes: Vec<&str> = loaded.classes.keys().map(String::as_str).collect();
    classes.sort_unstable();
    assert_eq!(classes, vec!["common", "component.nginx"]);
    assert_eq!(loaded.classes["component.nginx"], vec!["common".to_string()]);
    assert!(loaded.classes["common"].is_empty());
    assert_eq!(loaded.target_names(), vec!["cluster1"]);
}

#[test]
fn directories_named_like_yaml_are_skipped() {
    let dir = tempdir().unwrap();
    let classes = dir.path().join("classes");
    write_file(&classes.join("odd.yml/inner.yml"), "classes: [x]\n");

    let u = load_universe(&classes, NameStyle::Dotted).unwrap();
    assert_eq!(u.len(), 1);
    assert_eq!(u["odd.yml.inner"], vec!["x".to_string()]);
}

#[test]
fn decode_error_identifies_path() {
    let dir = tempdir().unwrap();
    let inv = dir.path().join("inventory");
    write_file(&inv.join("classes/good.yml"), "classes: []\n");
    write_file(&inv.join("classes/nested/bad.yml"), "classes: [a\n  b: c\n");
    write_file(&inv.join("targets/t.yml"), "classes: [good]\n");

    let err = Inventory::load(&inv).unwrap_err();
    match &err {
        LoadError::Decode { path, .. } => assert!(path.ends_with("nested/bad.yml")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("bad.yml"));
}

#[test]
fn missing_targets_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let inv = dir.path().join("inventory");
    write_file(&inv.join("classes/a.yml"), "classes: []\n");

    assert!(matches!(Inventory::load(&inv), Err(LoadError::Walk { .. })));
}

#[test]
fn later_target_with_same_basename_wins_deterministically() {
    let dir = tempdir().unwrap();
    let targets = dir.path().join("targets");
    write_file(&targets.join("a/dup.yml"), "classes: [from-a]\n");
    write_file(&targets.join("b/dup.yml"), "classes: [from-b]\n");

    let u = load_universe(&targets, NameStyle::BaseName).unwrap();
    assert_eq!(u["dup"], vec!["from-b".to_string()]);
}
