//! Integration tests for config module public API.

use apiconf::config::{
    load_config_file, load_layers_with_env, override_var, ConfigFile, ConfigurationRecord,
    EnvironmentTable, CONFIG_DIR, DEVELOPMENT, PRODUCTION,
};
use apiconf::ApiConfError;
use std::fs;
use tempfile::TempDir;

fn no_env(_: &str) -> Result<String, std::env::VarError> {
    Err(std::env::VarError::NotPresent)
}

#[test]
fn public_api_is_accessible() {
    let _table = EnvironmentTable::builtin();
    let _file = ConfigFile::default();
    let _record = ConfigurationRecord::new("http://localhost:5000");
    assert_eq!(override_var(PRODUCTION), "APICONF_PRODUCTION_API_BASE_URL");
}

#[test]
fn full_layering_workflow() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(CONFIG_DIR);
    fs::create_dir_all(&dir).unwrap();

    fs::write(
        dir.join("config.yml"),
        r#"
environments:
  production:
    api_base_url: https://project.example.com
  development:
    apiBaseUrl: http://localhost:8000
"#,
    )
    .unwrap();
    fs::write(
        dir.join("config.local.yml"),
        r#"
environments:
  development:
    api_base_url: http://127.0.0.1:9000
"#,
    )
    .unwrap();

    let env = |key: &str| {
        if key == "APICONF_PRODUCTION_API_BASE_URL" {
            Ok("https://env.example.com".to_string())
        } else {
            Err(std::env::VarError::NotPresent)
        }
    };
    let stack = load_layers_with_env(temp.path(), None, env).unwrap();
    let table = stack.resolve();

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.get(DEVELOPMENT).unwrap().api_base_url,
        "http://127.0.0.1:9000"
    );
    assert!(stack
        .source_of(DEVELOPMENT)
        .unwrap()
        .ends_with("config.local.yml"));
    assert_eq!(
        table.get(PRODUCTION).unwrap().api_base_url,
        "https://env.example.com"
    );
    assert_eq!(stack.source_of(PRODUCTION), Some("environment"));
}

#[test]
fn load_config_file_reports_missing_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.yml");
    match load_config_file(&path) {
        Err(ApiConfError::ConfigNotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected ConfigNotFound, got {:?}", other),
    }
}

#[test]
fn unknown_top_level_key_is_rejected() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(CONFIG_DIR);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yml"), "staging_url: https://x.example.com\n").unwrap();

    let result = load_layers_with_env(temp.path(), None, no_env);
    assert!(matches!(result, Err(ApiConfError::ConfigParseError { .. })));
}
