//! High-level command orchestration for the CLI.
//!
//! `switch` is the whole run of `gitswitch <conf>`: resolve the profile, apply the
//! git identity, point the SSH host block at the profile's key, then dump both
//! configuration files for the user to check.

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::backup::{SSH_CONFIG_PREFIX, backup_existing_file};
use crate::git::{GitConfig, GitOutcome, USER_EMAIL, USER_NAME};
use crate::paths::Paths;
use crate::profiles::{ProfileDocument, ResolvedConfig};
use crate::ssh_config::SshConfig;
use crate::ui::Ui;

const RULE: &str = "******************************************************";

/// Switch git and SSH identity to the profile `conf`
pub fn switch(paths: &Paths, conf: &str, git: &dyn GitConfig, ui: &Ui) -> Result<()> {
    let document = ProfileDocument::load(&paths.confs_file)?;
    let resolved = document.resolve(conf);

    show_resolved(conf, &resolved, ui);
    if document.find_specific(conf).is_none() {
        let known = document.specific_names();
        if known.is_empty() {
            ui.warn(format!("no specific profile '{}', using default values", conf));
        } else {
            ui.warn(format!(
                "no specific profile '{}' (known: {}), using default values",
                conf,
                known.join(", ")
            ));
        }
    }
    ui.newline();

    apply_git_identity(&resolved, git, ui)?;
    apply_ssh_key(paths, &resolved, ui)?;
    ui.newline();

    print_conf(paths, ui);
    Ok(())
}

fn show_resolved(conf: &str, resolved: &ResolvedConfig, ui: &Ui) {
    ui.section(format!("Profile: {}", conf));

    let mut table = ui.simple_table();
    for (field, value) in [
        ("hostname", &resolved.hostname),
        ("git_user_name", &resolved.git_user_name),
        ("git_user_email", &resolved.git_user_email),
        ("ssh_key", &resolved.ssh_key),
    ] {
        table.add_row(vec![ui.header_cell(field), ui.value_cell(value.as_deref())]);
    }
    ui.println(table.to_string());
}

/// Set `user.name` and `user.email`, unsetting whichever the profile leaves empty
pub fn apply_git_identity(resolved: &ResolvedConfig, git: &dyn GitConfig, ui: &Ui) -> Result<()> {
    apply_git_key(USER_NAME, resolved.git_user_name.as_deref(), "user_name", git, ui)?;
    apply_git_key(USER_EMAIL, resolved.git_user_email.as_deref(), "user_email", git, ui)
}

fn apply_git_key(
    key: &str,
    value: Option<&str>,
    field: &str,
    git: &dyn GitConfig,
    ui: &Ui,
) -> Result<()> {
    match value {
        Some(value) => match git.set(key, value)? {
            GitOutcome::Success => ui.ok(format!("{} = {}", key, value)),
            GitOutcome::Failed { stderr } => {
                ui.warn(format!("git could not set {}: {}", key, stderr))
            }
        },
        None => {
            ui.warn(format!("no {} configuration", field));
            // Unsetting a key that was never set fails; either way it ends up unset
            git.unset(key)?;
        }
    }
    Ok(())
}

/// Point the host block for the profile's hostname at the profile's key
pub fn apply_ssh_key(paths: &Paths, resolved: &ResolvedConfig, ui: &Ui) -> Result<()> {
    let Some(identity_file) = resolved.identity_file() else {
        ui.warn("no ssh_key configuration");
        return Ok(());
    };
    let Some(hostname) = resolved.hostname.as_deref() else {
        ui.warn("no hostname configuration, SSH config left untouched");
        return Ok(());
    };

    let mut ssh_config = SshConfig::read(&paths.ssh_config)?;
    if let Some(backup) =
        backup_existing_file(&paths.ssh_config, &paths.backups_dir, SSH_CONFIG_PREFIX)?
    {
        ui.info(format!("Backed up SSH config to {}", ui.dim(backup.display().to_string())));
    }

    let updated = ssh_config.set_identity_file(hostname, &identity_file);
    ssh_config.write(&paths.ssh_config)?;

    if updated == 0 {
        ui.ok(format!("Added SSH host {} -> {}", hostname, identity_file));
    } else {
        ui.ok(format!(
            "Updated {} SSH host block(s) for {} -> {}",
            updated, hostname, identity_file
        ));
    }
    Ok(())
}

/// Print the global git config and the SSH config, each under a header
pub fn print_conf(paths: &Paths, ui: &Ui) {
    dump_file("GIT", &paths.git_config, ui);
    dump_file("SSH", &paths.ssh_config, ui);
}

fn dump_file(label: &str, path: &Path, ui: &Ui) {
    ui.println(format!("* {} configuration ({})", label, path.display()));
    ui.println(RULE);
    match fs::read_to_string(path) {
        Ok(content) => ui.println(content.trim_end_matches('\n')),
        Err(e) => ui.warn(format!("{}: {}", path.display(), e)),
    }
    ui.newline();
}
