//! SSH client configuration store.
//!
//! A deliberately small model of `~/.ssh/config`: an ordered list of `Host` blocks,
//! each holding single-valued directives. Parsing is line oriented:
//! - blank lines are dropped
//! - `Host <name>` opens a new block
//! - any other line is `<key> <value>`, split on the first space
//! - lines before the first `Host` line belong to no block and are dropped
//!
//! Serializing writes each block as `Host <name>` followed by its directives
//! indented by four spaces. Well-formed files (no blank lines, nothing before the
//! first `Host`) survive a parse/serialize cycle byte for byte.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;

const HOST_PREFIX: &str = "Host ";
const INDENT: &str = "    ";

pub const HOST_NAME: &str = "HostName";
pub const IDENTITY_FILE: &str = "IdentityFile";

/// One `Host <name>` stanza
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBlock {
    name: String,
    directives: Vec<(String, String)>,
}

impl HostBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: Vec::new(),
        }
    }

    /// The alias after `Host`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a directive, replacing the value in place if the key already exists
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.directives.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.directives.push((key, value)),
        }
    }

    /// Directives in insertion order
    pub fn directives(&self) -> impl Iterator<Item = (&str, &str)> {
        self.directives.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn host_name(&self) -> Option<&str> {
        self.get(HOST_NAME)
    }

    pub fn identity_file(&self) -> Option<&str> {
        self.get(IDENTITY_FILE)
    }
}

/// An ordered sequence of host blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshConfig {
    hosts: Vec<HostBlock>,
}

impl SshConfig {
    /// Read the config at `path`; a missing file is an empty document
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read SSH config: {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    /// Overwrite `path` with the serialized document
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create SSH directory: {}", parent.display()))?;
        }

        fs::write(path, self.render())
            .with_context(|| format!("Failed to write SSH config: {}", path.display()))
    }

    pub fn parse(content: &str) -> Self {
        let mut hosts = Vec::new();
        let mut current: Option<HostBlock> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix(HOST_PREFIX) {
                if let Some(block) = current.take() {
                    hosts.push(block);
                }
                current = Some(HostBlock::new(name.trim()));
                continue;
            }

            // No open block yet: nowhere to put this line
            let Some(block) = current.as_mut() else {
                continue;
            };

            match line.split_once(' ') {
                Some((key, value)) => block.set(key, value),
                None => block.set(line, ""),
            }
        }

        if let Some(block) = current {
            hosts.push(block);
        }

        Self { hosts }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn hosts(&self) -> &[HostBlock] {
        &self.hosts
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Point every block whose `HostName` is `hostname` at `identity_file`.
    ///
    /// When no block matches, a new `Host <hostname>` block is appended.
    /// Returns the number of existing blocks updated (0 means one was appended).
    pub fn set_identity_file(&mut self, hostname: &str, identity_file: &str) -> usize {
        let mut updated = 0;
        for block in self
            .hosts
            .iter_mut()
            .filter(|b| b.host_name() == Some(hostname))
        {
            block.set(IDENTITY_FILE, identity_file);
            updated += 1;
        }

        if updated == 0 {
            let mut block = HostBlock::new(hostname);
            block.set(HOST_NAME, hostname);
            block.set(IDENTITY_FILE, identity_file);
            self.hosts.push(block);
        }

        updated
    }
}

impl fmt::Display for SshConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.hosts {
            writeln!(f, "{}{}", HOST_PREFIX, block.name)?;
            for (key, value) in block.directives() {
                if value.is_empty() {
                    writeln!(f, "{INDENT}{key}")?;
                } else {
                    writeln!(f, "{INDENT}{key} {value}")?;
                }
            }
        }
        Ok(())
    }
}
