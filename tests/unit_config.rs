use std::fs;

use refnet_core::config::{Config, DisplayConfig, NetworkConfig};
use refnet_core::error::RefnetError;

#[test]
fn test_defaults() {
    let n = NetworkConfig::default();
    assert_eq!(n.root_codes, vec!["00", "01"]);
    assert_eq!(n.virtual_id_base, 1_000_000);
    assert_eq!(n.virtual_label, "cluster");

    let d = DisplayConfig::default();
    assert!(d.max_depth.is_none());
    assert!(!d.show_contacts);
    assert!(d.show_metrics);
}

#[test]
fn test_parse_partial_toml() {
    let mut c = Config::new();
    c.parse_toml("[network]\nroot_codes = [\"10\", \"x\", \"2\"]\n[display]\nmax_depth = 3")
        .unwrap();
    assert_eq!(c.network.normalized_root_codes(), vec!["10", "02"]);
    assert_eq!(c.network.virtual_id_base, 1_000_000);
    assert_eq!(c.display.max_depth, Some(3));
    assert!(c.display.show_metrics);
}

#[test]
fn test_load_from_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("custom.toml");
    fs::write(&path, "[network]\nvirtual_label = \"vago\"\nvirtual_id_base = 5000").unwrap();

    let c = Config::load_from(&path).unwrap();
    assert_eq!(c.network.virtual_label, "vago");
    assert_eq!(c.network.virtual_id_base, 5000);
}

#[test]
fn test_explicit_malformed_file_is_an_error() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("bad.toml");
    fs::write(&path, "[network]\nroot_codes = 12").unwrap();

    assert!(matches!(Config::load_from(&path), Err(RefnetError::Config { .. })));
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let d = tempfile::tempdir().unwrap();
    let err = Config::load_from(&d.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, RefnetError::Io { .. }));
}

#[test]
fn test_local_config_is_lenient() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("refnet.toml"), "[display]\nshow_contacts = true").unwrap();
    std::env::set_current_dir(d.path()).unwrap();
    let c = Config::load();
    assert!(c.display.show_contacts);

    fs::write(d.path().join("refnet.toml"), "not = [valid").unwrap();
    let c = Config::load();
    assert!(!c.display.show_contacts);
}
