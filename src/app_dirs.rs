use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "multitables") {
            proj_dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("multitables_config.json")
        }
    }
}
