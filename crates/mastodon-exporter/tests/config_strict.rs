#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use mastodon_exporter::config;
use mastodon_exporter_core::measure::{MetricType, Transform};
use mastodon_exporter_core::ErrorKind;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn full_env() -> HashMap<String, String> {
    env(&[
        ("MASTODON_BASE_URL", "https://social.example/"),
        ("MASTODON_CLIENT_KEY", "ck"),
        ("MASTODON_CLIENT_SECRET", "cs"),
        ("MASTODON_ACCESS_TOKEN", "tok-very-secret"),
    ])
}

#[test]
fn ok_minimal_env() {
    let vars = full_env();
    let cfg = config::load_from_lookup(|k| vars.get(k).cloned()).expect("must load");
    assert_eq!(cfg.credentials.base_url(), "https://social.example");
    assert_eq!(cfg.credentials.access_token(), "tok-very-secret");
    assert_eq!(cfg.port, 9876);
    assert_eq!(cfg.upstream_timeout, Duration::from_secs(10));
    assert!(cfg.catalog_file.is_none());
}

#[test]
fn missing_access_token_names_the_variable() {
    let mut vars = full_env();
    vars.remove("MASTODON_ACCESS_TOKEN");
    let err = config::load_from_lookup(|k| vars.get(k).cloned()).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("MASTODON_ACCESS_TOKEN"));

    // empty counts as missing
    vars.insert("MASTODON_ACCESS_TOKEN".into(), "  ".into());
    assert!(config::load_from_lookup(|k| vars.get(k).cloned()).is_err());
}

#[test]
fn bad_values_are_rejected() {
    for (var, value) in [
        ("MASTODON_BASE_URL", "social.example"),
        ("MASTODON_BASE_URL", "ftp://social.example"),
        ("PORT", "http"),
        ("PORT", "0"),
        ("PORT", "70000"),
        ("MASTODON_UPSTREAM_TIMEOUT_SECS", "0"),
    ] {
        let mut vars = full_env();
        vars.insert(var.into(), value.into());
        let Err(err) = config::load_from_lookup(|k| vars.get(k).cloned()) else {
            panic!("{var}={value} must fail");
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains(var), "{err}");
    }
}

#[test]
fn port_override() {
    let mut vars = full_env();
    vars.insert("PORT".into(), "9100".into());
    let cfg = config::load_from_lookup(|k| vars.get(k).cloned()).unwrap();
    assert_eq!(cfg.port, 9100);
}

#[test]
fn debug_redacts_secrets() {
    let vars = full_env();
    let cfg = config::load_from_lookup(|k| vars.get(k).cloned()).unwrap();
    let dbg = format!("{cfg:?}");
    assert!(dbg.contains("https://social.example"));
    assert!(!dbg.contains("tok-very-secret"));
    assert!(!dbg.contains("\"cs\""));
}

#[test]
fn catalog_yaml_ok() {
    let ok = r#"
version: 1
measures:
  - key: new_users
    metric_name: mastodon_new_users
    help: New users yesterday
    type: gauge
  - key: active_users
    metric_name: mastodon_active_users_7d_rate
    help: Active users per second over a week
    type: gauge
    window_days: 7
    per_second: true
  - key: interactions
    metric_name: mastodon_interactions_hundreds
    help: Interactions in hundreds
    type: counter
    divide_by: 100
"#;
    let catalog = config::load_catalog_str(ok).expect("must parse");
    let defs = catalog.definitions();
    assert_eq!(defs.len(), 3);
    assert_eq!(defs[0].metric_type, MetricType::Gauge);
    assert_eq!(defs[0].window_days, 1);
    assert_eq!(defs[1].transform, Some(Transform::PerSecond));
    assert_eq!(defs[2].transform, Some(Transform::Divide(100.0)));
}

#[test]
fn catalog_yaml_deny_unknown_fields() {
    let bad = r#"
version: 1
measures:
  - key: new_users
    metric_name: mastodon_new_users
    help: New users
    typ: gauge # typo should fail
"#;
    let err = config::load_catalog_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "INVALID_CATALOG");
}

#[test]
fn catalog_yaml_semantic_errors() {
    let wrong_version = "version: 2\nmeasures: []\n";
    assert!(config::load_catalog_str(wrong_version).is_err());

    let both_transforms = r#"
version: 1
measures:
  - key: a
    metric_name: m_a
    help: h
    type: gauge
    divide_by: 2
    per_second: true
"#;
    assert!(config::load_catalog_str(both_transforms).is_err());
}

#[test]
fn catalog_file_replaces_builtin() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "version: 1\nmeasures:\n  - key: new_users\n    metric_name: mastodon_new_users\n    help: New users\n    type: gauge\n"
    )
    .unwrap();

    let mut vars = full_env();
    vars.insert("MASTODON_CATALOG_FILE".into(), file.path().display().to_string());
    let cfg = config::load_from_lookup(|k| vars.get(k).cloned()).unwrap();
    assert_eq!(cfg.catalog_file.as_deref(), Some(file.path()));

    let catalog = config::load_catalog(&cfg).expect("catalog file must load");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.definitions()[0].metric_name, "mastodon_new_users");
}

#[test]
fn missing_catalog_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut vars = full_env();
    vars.insert(
        "MASTODON_CATALOG_FILE".into(),
        dir.path().join("absent.yaml").display().to_string(),
    );
    let cfg = config::load_from_lookup(|k| vars.get(k).cloned()).unwrap();

    let err = config::load_catalog(&cfg).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("MASTODON_CATALOG_FILE"));
}

#[test]
fn catalog_window_upper_bound() {
    let huge = r#"
version: 1
measures:
  - key: active_users
    metric_name: m_active
    help: h
    type: gauge
    window_days: 4000000000
"#;
    let err = config::load_catalog_str(huge).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::InvalidCatalog);
}

#[test]
fn builtin_catalog_without_file() {
    let vars = full_env();
    let cfg = config::load_from_lookup(|k| vars.get(k).cloned()).unwrap();
    assert_eq!(config::load_catalog(&cfg).unwrap().len(), 7);
}
