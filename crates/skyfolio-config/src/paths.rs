//! Platform locations of the skyfolio files.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "skyfolio")
}

/// `config.toml` in the platform config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// `profile.toml` in the platform config directory.
pub fn profile_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("profile.toml"))
}

/// `state.toml` in the platform data directory.
pub fn state_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().join("state.toml"))
}
