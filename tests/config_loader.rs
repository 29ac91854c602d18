// tests/config_loader.rs
use std::path::{Path, PathBuf};

use nickboard::config::{Config, consts};
use nickboard::config::options::AppOptions;
use nickboard::Error;

fn origin() -> &'static Path {
    Path::new("nickboard.toml")
}

#[test]
fn empty_file_gives_defaults() {
    let opts = Config::parse("", origin()).unwrap().into_options();
    assert_eq!(opts, AppOptions::default());
    assert_eq!(opts.merge.sources.len(), consts::DEFAULT_SOURCES.len());
    assert_eq!(opts.dashboard.top_n, consts::DEFAULT_TOP_N);
}

#[test]
fn keys_override_defaults_and_paths_resolve_against_data_dir() {
    let text = r#"
        data_dir = "scraped"
        sources = ["one.csv", "/abs/two.csv"]
        master = "all.csv"

        [dashboard]
        page_size = 50
        top_n = 0
    "#;
    let opts = Config::parse(text, origin()).unwrap().into_options();

    assert_eq!(
        opts.merge.source_paths(),
        vec![PathBuf::from("scraped/one.csv"), PathBuf::from("/abs/two.csv")]
    );
    assert_eq!(opts.merge.master_path(), PathBuf::from("scraped/all.csv"));
    assert_eq!(opts.dashboard.page_size, 50);
    // Zero keeps the default.
    assert_eq!(opts.dashboard.top_n, consts::DEFAULT_TOP_N);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Config::parse("colour = \"blue\"\n", origin()).unwrap_err();
    match err {
        Error::Config { path, message } => {
            assert_eq!(path, origin());
            assert!(message.contains("colour"), "message was: {message}");
        }
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn explicit_missing_config_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("none.toml");
    assert!(matches!(Config::load(Some(missing.as_path())), Err(Error::Config { .. })));
}

#[test]
fn explicit_config_file_is_read() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("custom.toml");
    std::fs::write(&path, "master = \"m.csv\"\n").unwrap();

    let opts = Config::load(Some(path.as_path())).unwrap().into_options();
    assert_eq!(opts.merge.master, PathBuf::from("m.csv"));
}
