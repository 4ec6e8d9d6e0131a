//! Timestamped backups of files gitswitch is about to rewrite.
//!
//! The SSH config parser drops blank lines and anything before the first `Host`
//! line, so a copy of the original is kept before every rewrite.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of backups to keep per prefix
const MAX_BACKUPS: usize = 10;

/// Backup name prefix for `~/.ssh/config`
pub const SSH_CONFIG_PREFIX: &str = "ssh_config";

/// Copy `path` into `backups_dir` as `<prefix>.<timestamp>.bak`.
///
/// Returns the backup path, or `None` when there was nothing to back up.
pub fn backup_existing_file(
    path: &Path,
    backups_dir: &Path,
    name_prefix: &str,
) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }

    fs::create_dir_all(backups_dir).with_context(|| {
        format!("Failed to create backups directory: {}", backups_dir.display())
    })?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = unique_backup_path(backups_dir, name_prefix, &timestamp);

    fs::copy(path, &backup_path).with_context(|| {
        format!(
            "Failed to back up {} to {}",
            path.display(),
            backup_path.display()
        )
    })?;

    cleanup_old_backups(backups_dir, name_prefix, MAX_BACKUPS)?;

    Ok(Some(backup_path))
}

/// `<prefix>.<timestamp>.bak`, or `<prefix>.<timestamp>.<n>.bak` when runs share a second
fn unique_backup_path(backups_dir: &Path, name_prefix: &str, timestamp: &str) -> PathBuf {
    let first = backups_dir.join(format!("{}.{}.bak", name_prefix, timestamp));
    if !first.exists() {
        return first;
    }

    (1..)
        .map(|n| backups_dir.join(format!("{}.{}.{}.bak", name_prefix, timestamp, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// List backups for `name_prefix`, oldest first
pub fn list_backups(backups_dir: &Path, name_prefix: &str) -> Result<Vec<PathBuf>> {
    if !backups_dir.exists() {
        return Ok(Vec::new());
    }

    let mut backups: Vec<_> = fs::read_dir(backups_dir)
        .with_context(|| format!("Failed to read backups directory: {}", backups_dir.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|n| n.starts_with(name_prefix) && n.ends_with(".bak"))
        })
        .filter_map(|e| {
            let modified = e.metadata().ok()?.modified().ok()?;
            Some((e.path(), modified))
        })
        .collect();

    // Timestamped names break ties within the same mtime
    backups.sort_by_key(|(path, modified)| (*modified, name_order(path)));

    Ok(backups.into_iter().map(|(path, _)| path).collect())
}

/// `ssh_config.<ts>.bak` sorts before `ssh_config.<ts>.1.bak`, `.2.bak`, ...
fn name_order(path: &Path) -> (String, u32) {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .trim_end_matches(".bak");

    match name.rsplit_once('.') {
        Some((base, n)) => match n.parse() {
            Ok(n) => (base.to_string(), n),
            Err(_) => (name.to_string(), 0),
        },
        None => (name.to_string(), 0),
    }
}

fn cleanup_old_backups(backups_dir: &Path, name_prefix: &str, keep: usize) -> Result<()> {
    let backups = list_backups(backups_dir, name_prefix)?;
    if backups.len() <= keep {
        return Ok(());
    }

    let to_remove = backups.len() - keep;
    for path in backups.iter().take(to_remove) {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove old backup: {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_missing_file_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let backups_dir = temp_dir.path().join("backups");

        let result = backup_existing_file(&temp_dir.path().join("config"), &backups_dir, "ssh_config")
            .unwrap();

        assert!(result.is_none());
        assert!(!backups_dir.exists());
    }

    #[test]
    fn test_backup_copies_content() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("config");
        fs::write(&source, "Host a\n").unwrap();

        let backups_dir = temp_dir.path().join("backups");
        let backup = backup_existing_file(&source, &backups_dir, SSH_CONFIG_PREFIX)
            .unwrap()
            .unwrap();

        assert!(backup.starts_with(&backups_dir));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "Host a\n");
        assert_eq!(list_backups(&backups_dir, SSH_CONFIG_PREFIX).unwrap(), vec![backup]);
    }

    #[test]
    fn test_backups_in_same_second_do_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let backups_dir = temp_dir.path().join("backups");
        fs::create_dir_all(&backups_dir).unwrap();

        let first = unique_backup_path(&backups_dir, SSH_CONFIG_PREFIX, "20240101_120000");
        fs::write(&first, "original").unwrap();
        let second = unique_backup_path(&backups_dir, SSH_CONFIG_PREFIX, "20240101_120000");
        fs::write(&second, "rewritten").unwrap();
        let third = unique_backup_path(&backups_dir, SSH_CONFIG_PREFIX, "20240101_120000");

        assert_eq!(first, backups_dir.join("ssh_config.20240101_120000.bak"));
        assert_eq!(second, backups_dir.join("ssh_config.20240101_120000.1.bak"));
        assert_eq!(third, backups_dir.join("ssh_config.20240101_120000.2.bak"));
        assert_eq!(fs::read_to_string(&first).unwrap(), "original");
    }

    #[test]
    fn test_repeated_backups_keep_every_version() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("config");
        let backups_dir = temp_dir.path().join("backups");

        fs::write(&source, "# mine\n\nHost a\n").unwrap();
        backup_existing_file(&source, &backups_dir, SSH_CONFIG_PREFIX).unwrap();
        fs::write(&source, "Host a\n").unwrap();
        backup_existing_file(&source, &backups_dir, SSH_CONFIG_PREFIX).unwrap();

        let contents: Vec<String> = list_backups(&backups_dir, SSH_CONFIG_PREFIX)
            .unwrap()
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        assert_eq!(contents.len(), 2);
        assert!(contents.iter().any(|c| c == "# mine\n\nHost a\n"));
    }

    #[test]
    fn test_counter_suffix_sorts_after_base_name() {
        let base = name_order(Path::new("/b/ssh_config.20240101_120000.bak"));
        let first = name_order(Path::new("/b/ssh_config.20240101_120000.1.bak"));
        let tenth = name_order(Path::new("/b/ssh_config.20240101_120000.10.bak"));
        let later = name_order(Path::new("/b/ssh_config.20240101_120001.bak"));

        assert!(base < first);
        assert!(first < tenth);
        assert!(tenth < later);
    }

    #[test]
    fn test_cleanup_keeps_newest() {
        let temp_dir = TempDir::new().unwrap();
        let backups_dir = temp_dir.path();

        for i in 0..5 {
            fs::write(backups_dir.join(format!("ssh_config.2024010{}_000000.bak", i)), "x").unwrap();
        }
        fs::write(backups_dir.join("unrelated.bak"), "x").unwrap();

        cleanup_old_backups(backups_dir, SSH_CONFIG_PREFIX, 2).unwrap();

        let remaining = list_backups(backups_dir, SSH_CONFIG_PREFIX).unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(backups_dir.join("unrelated.bak").exists());
    }
}
