//! Profile document loading and resolution.
//!
//! The profile document (`confs.yaml`) holds an optional `default` profile and an
//! optional ordered list of `specific` profiles. Resolving a name layers the
//! matching specific profile over the default, one field at a time.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One profile record, either the default or a named override
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    /// Profile name (absent for the default profile)
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub git_user_name: Option<String>,
    pub git_user_email: Option<String>,
    pub ssh_key: Option<String>,
}

impl Profile {
    /// Copy every field that is set on this profile into `resolved`.
    ///
    /// Fields left unset here keep whatever value `resolved` already holds.
    pub fn overlay_onto(&self, resolved: &mut ResolvedConfig) {
        overlay(&mut resolved.hostname, &self.hostname);
        overlay(&mut resolved.git_user_name, &self.git_user_name);
        overlay(&mut resolved.git_user_email, &self.git_user_email);
        overlay(&mut resolved.ssh_key, &self.ssh_key);
    }
}

fn overlay(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}

/// The parsed `confs.yaml` document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDocument {
    #[serde(default)]
    pub default: Option<Profile>,
    #[serde(default)]
    pub specific: Option<Vec<Profile>>,
}

impl ProfileDocument {
    /// Load the profile document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile document: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid profile document: {}", path.display()))
    }

    /// Parse a profile document from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        // `~` on its own is a valid YAML document meaning null
        let doc: Option<Self> =
            serde_yaml::from_str(content).context("Failed to parse profile YAML")?;
        Ok(doc.unwrap_or_default())
    }

    /// Find the first specific profile with the given name
    pub fn find_specific(&self, name: &str) -> Option<&Profile> {
        self.specific
            .as_deref()?
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }

    /// Names of all specific profiles, in document order
    pub fn specific_names(&self) -> Vec<&str> {
        self.specific
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|p| p.name.as_deref())
            .collect()
    }

    /// Resolve `name` into a flat configuration: default first, then the matching
    /// specific profile on top. A missing match is not an error.
    pub fn resolve(&self, name: &str) -> ResolvedConfig {
        let mut resolved = ResolvedConfig::default();

        if let Some(default) = &self.default {
            default.overlay_onto(&mut resolved);
        }
        if let Some(specific) = self.find_specific(name) {
            specific.overlay_onto(&mut resolved);
        }

        resolved
    }
}

/// Flattened profile consumed by the switch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub hostname: Option<String>,
    pub git_user_name: Option<String>,
    pub git_user_email: Option<String>,
    pub ssh_key: Option<String>,
}

impl ResolvedConfig {
    /// The `IdentityFile` value for the resolved key: its file name under `~/.ssh/`.
    ///
    /// A blank `ssh_key` counts as no key at all.
    pub fn identity_file(&self) -> Option<String> {
        self.ssh_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(identity_file_for)
    }
}

/// Re-root a key path under `~/.ssh/`, keeping only its file name.
///
/// A path without a file name component is returned unchanged.
pub fn identity_file_for(ssh_key: &str) -> String {
    match Path::new(ssh_key).file_name() {
        Some(file_name) => PathBuf::from("~/.ssh")
            .join(file_name)
            .to_string_lossy()
            .into_owned(),
        None => ssh_key.to_string(),
    }
}
