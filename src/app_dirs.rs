use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn progress_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("pulong");
            Some(state_dir.join("progress.json"))
        } else {
            ProjectDirs::from("", "", "pulong")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("progress.json"))
        }
    }

    pub fn vocabulary_cache_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pulong").map(|proj_dirs| proj_dirs.cache_dir().to_path_buf())
    }
}
