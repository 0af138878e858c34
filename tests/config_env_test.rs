//! ORGUNIT_* environment overrides. Kept in a single test so no other test in
//! this binary observes the mutated environment.

use std::env;
use std::fs;

use tempfile::TempDir;

use orgunit_tree::config::Settings;
use orgunit_tree::domain::KeyPolicy;

#[test]
fn given_env_vars_when_load_then_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orgunit-tree.toml");
    fs::write(&path, "root_name = \"From File\"\njson_indent = 8\n").unwrap();

    env::set_var("ORGUNIT_ROOT_NAME", "From Env");
    env::set_var("ORGUNIT_KEY_POLICY", "strict");
    env::set_var("ORGUNIT_OUTLINE_INDENT", "2");
    env::set_var("ORGUNIT_TRIM", "true");
    let settings = Settings::load(Some(&path));
    env::remove_var("ORGUNIT_ROOT_NAME");
    env::remove_var("ORGUNIT_KEY_POLICY");
    env::remove_var("ORGUNIT_OUTLINE_INDENT");
    env::remove_var("ORGUNIT_TRIM");

    let settings = settings.expect("load settings");
    assert_eq!(settings.root_name, "From Env");
    assert_eq!(settings.key_policy, KeyPolicy::Strict);
    assert_eq!(settings.outline_indent, 2);
    assert_eq!(settings.json_indent, 8);
    assert!(settings.trim);
}
