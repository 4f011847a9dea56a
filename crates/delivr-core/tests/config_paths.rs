use std::path::PathBuf;

use delivr_core::config::ConfigScope;
use delivr_core::config::paths::config_path_for_scope;

#[test]
fn global_scope_uses_config_dir() {
    let global_dir = PathBuf::from("/tmp/delivr-config");
    let project_root = PathBuf::from("/workspace/project");

    let path = config_path_for_scope(ConfigScope::Global, &global_dir, &project_root);

    assert_eq!(path, PathBuf::from("/tmp/delivr-config/delivr.toml"));
}

#[test]
fn project_scope_uses_project_root() {
    let global_dir = PathBuf::from("/tmp/delivr-config");
    let project_root = PathBuf::from("/workspace/project");

    let path = config_path_for_scope(ConfigScope::Project, &global_dir, &project_root);

    assert_eq!(path, PathBuf::from("/workspace/project/delivr.toml"));
}
