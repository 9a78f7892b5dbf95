use cadence_modernizer_core::config::ScanConfig;
use cadence_modernizer_core::{collect_sources, Config};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn scan() -> ScanConfig {
    ScanConfig::default()
}

#[test]
fn collects_cadence_files_recursively_in_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("contracts/nested")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::write(root.join("contracts/B.cdc"), "pub fun b() {}").unwrap();
    fs::write(root.join("contracts/nested/A.cdc"), "pub fun a() {}").unwrap();
    fs::write(root.join("node_modules/pkg/C.cdc"), "pub fun c() {}").unwrap();
    fs::write(root.join("README.md"), "pub fun readme() {}").unwrap();

    let sources = collect_sources(&[root.to_path_buf()], &scan()).unwrap();
    let names: Vec<PathBuf> = sources
        .iter()
        .map(|s| s.path.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        names,
        vec![
            PathBuf::from("contracts/B.cdc"),
            PathBuf::from("contracts/nested/A.cdc"),
        ]
    );
    assert_eq!(sources[0].content, "pub fun b() {}");
}

#[test]
fn ignored_names_above_the_scan_root_do_not_hide_files() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("build/proj");
    fs::create_dir_all(project.join("target")).unwrap();
    fs::write(project.join("A.cdc"), "pub fun a() {}").unwrap();
    fs::write(project.join("target/Out.cdc"), "pub fun out() {}").unwrap();

    let sources = collect_sources(&[project.clone()], &scan()).unwrap();
    let names: Vec<PathBuf> = sources
        .iter()
        .map(|s| s.path.strip_prefix(&project).unwrap().to_path_buf())
        .collect();
    assert_eq!(names, vec![PathBuf::from("A.cdc")]);
}

#[test]
fn respects_file_limit_and_size() {
    let dir = tempdir().unwrap();
    for name in ["A.cdc", "B.cdc", "C.cdc"] {
        fs::write(dir.path().join(name), "pub fun f() {}").unwrap();
    }
    fs::write(dir.path().join("Big.cdc"), "x".repeat(4096)).unwrap();

    let limited = ScanConfig {
        max_files: 2,
        ..scan()
    };
    assert_eq!(collect_sources(&[dir.path().to_path_buf()], &limited).unwrap().len(), 2);

    let small = ScanConfig {
        max_file_size_kb: 1,
        ..scan()
    };
    let sources = collect_sources(&[dir.path().to_path_buf()], &small).unwrap();
    assert_eq!(sources.len(), 3);
    assert!(sources.iter().all(|s| !s.path.ends_with("Big.cdc")));
}

#[test]
fn missing_path_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(collect_sources(&[missing], &scan()).is_err());
}

#[test]
fn loads_explicit_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cadence-modernizer.toml");
    fs::write(
        &path,
        "[modernize]\nadd_explanation_comments = true\npreserve_comments = false\n\n[scan]\nextensions = [\"cdc\", \"cadence\"]\n",
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    let options = config.modernization_options();
    assert!(options.add_explanation_comments);
    assert!(!options.preserve_comments);
    assert!(options.auto_fix_critical);
    assert_eq!(config.scan.extensions, vec!["cdc", "cadence"]);
}

#[test]
fn malformed_config_file_reports_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[modernize\n").unwrap();
    let err = Config::load(Some(path.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("broken.toml"));
}
