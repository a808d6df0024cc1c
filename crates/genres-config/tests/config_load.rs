use genres_config::{init_tracing, CacheConfig, ConfigError, LoggingConfig, ResolverConfig};

use pretty_assertions::assert_eq;

#[test]
fn empty_document_yields_defaults() {
    let config = ResolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, ResolverConfig::default());
    assert_eq!(config.cache, CacheConfig::default());
    assert!(config.cache.memoize_contexts);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.stderr);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = ResolverConfig::from_toml_str(
        r#"
[cache]
memoize_members = false

[logging]
level = "debug"
json = true
"#,
    )
    .unwrap();

    assert_eq!(
        config.cache,
        CacheConfig {
            memoize_declarations: true,
            memoize_contexts: true,
            memoize_members: false,
        }
    );
    assert_eq!(
        config.logging,
        LoggingConfig {
            level: "debug".to_string(),
            json: true,
            stderr: true,
        }
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = ResolverConfig::from_toml_str("[cache]\nevict = true\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err:?}");
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("genres.toml");
    std::fs::write(&path, "[cache]\nmemoize_declarations = false\n").unwrap();

    let config = ResolverConfig::load(&path).unwrap();
    assert!(!config.cache.memoize_declarations);
    assert!(config.cache.memoize_members);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = ResolverConfig::load(&path).unwrap_err();
    let ConfigError::Io { path: reported, .. } = &err else {
        panic!("expected io error, got {err:?}");
    };
    assert_eq!(reported, &path.display().to_string());
}

#[test]
fn tracing_initializes_once() {
    let config = LoggingConfig {
        stderr: false,
        ..LoggingConfig::default()
    };
    let _first = init_tracing(&config);
    assert!(!init_tracing(&config));
}
