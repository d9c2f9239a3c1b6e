use std::path::PathBuf;

use color_eyre::eyre::eyre;
use directories::ProjectDirs;

pub fn project_dirs() -> color_eyre::Result<ProjectDirs> {
    ProjectDirs::from("org", "spinpod", "spinpod")
        .ok_or_else(|| eyre!("could not resolve a home directory"))
}

pub fn data_dir() -> color_eyre::Result<PathBuf> {
    let dir = project_dirs()?.data_local_dir().to_path_buf();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
