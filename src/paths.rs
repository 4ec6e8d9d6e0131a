use anyhow::{Context, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Name of the profile document, looked up next to the executable
pub const CONFS_FILE_NAME: &str = "confs.yaml";

/// All computed paths used by gitswitch
#[derive(Debug, Clone)]
pub struct Paths {
    /// <exe dir>/confs.yaml
    pub confs_file: PathBuf,
    /// ~/.gitconfig
    pub git_config: PathBuf,
    /// ~/.ssh
    pub ssh_dir: PathBuf,
    /// ~/.ssh/config
    pub ssh_config: PathBuf,
    /// ~/.ssh/gitswitch-backups
    pub backups_dir: PathBuf,
}

impl Paths {
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
        let exe = std::env::current_exe().context("Failed to locate the gitswitch executable")?;
        let exe_dir = exe
            .parent()
            .context("Executable path has no parent directory")?;

        Ok(Self::with_locations(
            base_dirs.home_dir(),
            exe_dir.join(CONFS_FILE_NAME),
        ))
    }

    /// Build the layout for an explicit home directory and profile document
    pub fn with_locations(home: &Path, confs_file: PathBuf) -> Self {
        let ssh_dir = home.join(".ssh");
        Self {
            confs_file,
            git_config: home.join(".gitconfig"),
            ssh_config: ssh_dir.join("config"),
            backups_dir: ssh_dir.join("gitswitch-backups"),
            ssh_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_locations_layout() {
        let paths = Paths::with_locations(Path::new("/home/u"), PathBuf::from("/opt/gs/confs.yaml"));
        assert_eq!(paths.git_config, PathBuf::from("/home/u/.gitconfig"));
        assert_eq!(paths.ssh_config, PathBuf::from("/home/u/.ssh/config"));
        assert!(paths.backups_dir.starts_with(&paths.ssh_dir));
        assert_eq!(paths.confs_file, PathBuf::from("/opt/gs/confs.yaml"));
    }

    #[test]
    fn test_confs_file_next_to_executable() {
        let paths = Paths::new().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(paths.confs_file.parent(), exe.parent());
        assert!(paths.confs_file.ends_with(CONFS_FILE_NAME));
    }
}
